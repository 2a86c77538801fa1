//! Running-sum trend series over a window slice.
//!
//! Three independent ±1 axes: Low/High, Red/Black, Even/Odd. Each series
//! starts at 0 ("before any entries") and gains one point per outcome, so its
//! length is always slice length + 1. Zero outcomes step flat on all three
//! axes. The sum restarts at 0 for whatever slice is selected.

use serde::Serialize;

use crate::outcome::{Color, Half, Parity, TableVariant, classify};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// Low +1, High −1.
    pub half: Vec<i64>,
    /// Red +1, Black −1.
    pub color: Vec<i64>,
    /// Even +1, Odd −1.
    pub parity: Vec<i64>,
}

/// Build all three trend series for the slice.
pub fn trends(slice: &[u8], variant: TableVariant) -> TrendReport {
    let mut half = Vec::with_capacity(slice.len() + 1);
    let mut color = Vec::with_capacity(slice.len() + 1);
    let mut parity = Vec::with_capacity(slice.len() + 1);
    let (mut h, mut c_sum, mut p) = (0i64, 0i64, 0i64);
    half.push(h);
    color.push(c_sum);
    parity.push(p);

    for &n in slice {
        let c = classify(n, variant).ok();
        h += match c.as_ref().and_then(|c| c.half) {
            Some(Half::Low) => 1,
            Some(Half::High) => -1,
            None => 0,
        };
        c_sum += match c.as_ref().and_then(|c| c.color) {
            Some(Color::Red) => 1,
            Some(Color::Black) => -1,
            None => 0,
        };
        p += match c.as_ref().and_then(|c| c.parity) {
            Some(Parity::Even) => 1,
            Some(Parity::Odd) => -1,
            None => 0,
        };
        half.push(h);
        color.push(c_sum);
        parity.push(p);
    }

    TrendReport {
        half,
        color,
        parity,
    }
}
