//! Longest and current streaks per category partition.
//!
//! A streak is a maximal run of consecutive slice entries sharing one
//! partition value. Zero outcomes break every run in the five non-zero
//! schemes; the dedicated Zero axis tracks its own runs normally. The
//! current streak is the run ending at the last slice entry — every other
//! partition value reports 0.

use serde::Serialize;

use crate::outcome::{Color, Column, Dozen, Half, Parity, TableVariant, classify};

/// Longest run ever observed and run in progress for one partition value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct StreakEntry {
    pub longest: usize,
    pub current: usize,
}

/// Streaks for all five category schemes plus the Zero axis, in the
/// original table's row order.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct StreakReport {
    pub col1: StreakEntry,
    pub col2: StreakEntry,
    pub col3: StreakEntry,
    pub dozen1: StreakEntry,
    pub dozen2: StreakEntry,
    pub dozen3: StreakEntry,
    pub low: StreakEntry,
    pub high: StreakEntry,
    pub red: StreakEntry,
    pub black: StreakEntry,
    pub even: StreakEntry,
    pub odd: StreakEntry,
    pub zero: StreakEntry,
}

/// Longest run of entries mapping to `target`. Anything that maps elsewhere
/// (other partition values, or zero mapping to `None`) ends the run.
fn longest_run<K: PartialEq>(slice: &[u8], key: impl Fn(u8) -> Option<K>, target: &K) -> usize {
    let mut best = 0;
    let mut cur = 0;
    for &n in slice {
        if key(n).as_ref() == Some(target) {
            cur += 1;
            best = best.max(cur);
        } else {
            cur = 0;
        }
    }
    best
}

/// Length of the trailing run if it maps to `target`, else 0.
fn current_run<K: PartialEq>(slice: &[u8], key: impl Fn(u8) -> Option<K>, target: &K) -> usize {
    let Some(&last) = slice.last() else { return 0 };
    if key(last).as_ref() != Some(target) {
        return 0;
    }
    slice
        .iter()
        .rev()
        .take_while(|&&n| key(n).as_ref() == Some(target))
        .count()
}

fn entry<K: PartialEq>(slice: &[u8], key: impl Fn(u8) -> Option<K> + Copy, target: K) -> StreakEntry {
    StreakEntry {
        longest: longest_run(slice, key, &target),
        current: current_run(slice, key, &target),
    }
}

/// Scan the slice once per partition value and fill the full streak table.
pub fn streaks(slice: &[u8], variant: TableVariant) -> StreakReport {
    let column = move |n: u8| classify(n, variant).ok().and_then(|c| c.column);
    let dozen = move |n: u8| classify(n, variant).ok().and_then(|c| c.dozen);
    let half = move |n: u8| classify(n, variant).ok().and_then(|c| c.half);
    let color = move |n: u8| classify(n, variant).ok().and_then(|c| c.color);
    let parity = move |n: u8| classify(n, variant).ok().and_then(|c| c.parity);
    // The Zero axis is its own binary scheme: nothing breaks it but the
    // other pole.
    let zero = move |n: u8| Some(variant.is_zero(n));

    StreakReport {
        col1: entry(slice, column, Column::Col1),
        col2: entry(slice, column, Column::Col2),
        col3: entry(slice, column, Column::Col3),
        dozen1: entry(slice, dozen, Dozen::First),
        dozen2: entry(slice, dozen, Dozen::Second),
        dozen3: entry(slice, dozen, Dozen::Third),
        low: entry(slice, half, Half::Low),
        high: entry(slice, half, Half::High),
        red: entry(slice, color, Color::Red),
        black: entry(slice, color, Color::Black),
        even: entry(slice, parity, Parity::Even),
        odd: entry(slice, parity, Parity::Odd),
        zero: entry(slice, zero, true),
    }
}
