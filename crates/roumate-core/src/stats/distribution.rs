//! Per-scheme category distributions over a window slice.
//!
//! Percentages are computed against the full slice length (zeros included in
//! the denominator, never in a partition), so the partitions of one scheme
//! plus the zero share always account for the whole slice.

use serde::Serialize;

use crate::outcome::{Color, Column, Dozen, Half, Parity, TableVariant, classify};

/// Count and percentage of one partition value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Share {
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ColumnShares {
    pub col1: Share,
    pub col2: Share,
    pub col3: Share,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DozenShares {
    pub first: Share,
    pub second: Share,
    pub third: Share,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HalfShares {
    pub low: Share,
    pub high: Share,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ColorShares {
    pub red: Share,
    pub black: Share,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ParityShares {
    pub even: Share,
    pub odd: Share,
}

/// All five category schemes plus the shared zero share.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DistributionReport {
    /// Slice length the percentages are relative to.
    pub len: usize,
    pub columns: ColumnShares,
    pub dozens: DozenShares,
    pub halves: HalfShares,
    pub colors: ColorShares,
    pub parity: ParityShares,
    /// Zero and double-zero outcomes. Counted in `len`, in no partition.
    pub zero: Share,
}

/// Count partition membership over the slice. Empty slice ⇒ all zero shares.
pub fn distribution(slice: &[u8], variant: TableVariant) -> DistributionReport {
    let mut counts = [0usize; 13];
    const COL1: usize = 0;
    const COL2: usize = 1;
    const COL3: usize = 2;
    const DOZ1: usize = 3;
    const DOZ2: usize = 4;
    const DOZ3: usize = 5;
    const LOW: usize = 6;
    const HIGH: usize = 7;
    const RED: usize = 8;
    const BLACK: usize = 9;
    const EVEN: usize = 10;
    const ODD: usize = 11;
    const ZERO: usize = 12;

    for &n in slice {
        // The slice comes from a validated history.
        let Ok(c) = classify(n, variant) else { continue };
        if c.is_zero {
            counts[ZERO] += 1;
            continue;
        }
        counts[match c.column.unwrap() {
            Column::Col1 => COL1,
            Column::Col2 => COL2,
            Column::Col3 => COL3,
        }] += 1;
        counts[match c.dozen.unwrap() {
            Dozen::First => DOZ1,
            Dozen::Second => DOZ2,
            Dozen::Third => DOZ3,
        }] += 1;
        counts[match c.half.unwrap() {
            Half::Low => LOW,
            Half::High => HIGH,
        }] += 1;
        counts[match c.color.unwrap() {
            Color::Red => RED,
            Color::Black => BLACK,
        }] += 1;
        counts[match c.parity.unwrap() {
            Parity::Even => EVEN,
            Parity::Odd => ODD,
        }] += 1;
    }

    let len = slice.len();
    let share = |count: usize| Share {
        count,
        percent: 100.0 * count as f64 / len.max(1) as f64,
    };

    DistributionReport {
        len,
        columns: ColumnShares {
            col1: share(counts[COL1]),
            col2: share(counts[COL2]),
            col3: share(counts[COL3]),
        },
        dozens: DozenShares {
            first: share(counts[DOZ1]),
            second: share(counts[DOZ2]),
            third: share(counts[DOZ3]),
        },
        halves: HalfShares {
            low: share(counts[LOW]),
            high: share(counts[HIGH]),
        },
        colors: ColorShares {
            red: share(counts[RED]),
            black: share(counts[BLACK]),
        },
        parity: ParityShares {
            even: share(counts[EVEN]),
            odd: share(counts[ODD]),
        },
        zero: share(counts[ZERO]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::DOUBLE_ZERO;

    #[test]
    fn test_empty_slice_is_all_zeros() {
        let d = distribution(&[], TableVariant::European);
        assert_eq!(d.len, 0);
        assert_eq!(d.colors.red.count, 0);
        assert_eq!(d.colors.red.percent, 0.0);
        assert_eq!(d.zero.percent, 0.0);
    }

    #[test]
    fn test_spec_example_color_distribution() {
        // [1, 2, 3, 0]: Red {1,3}, Black {2}, Zero {0}.
        let d = distribution(&[1, 2, 3, 0], TableVariant::European);
        assert_eq!(d.colors.red.count, 2);
        assert_eq!(d.colors.red.percent, 50.0);
        assert_eq!(d.colors.black.count, 1);
        assert_eq!(d.colors.black.percent, 25.0);
        assert_eq!(d.zero.count, 1);
        assert_eq!(d.zero.percent, 25.0);
    }

    #[test]
    fn test_counts_sum_to_len_per_scheme() {
        let slice = [0, 1, 2, 3, 17, 36, 0, 12, 25, 30];
        let d = distribution(&slice, TableVariant::European);
        let len = slice.len();
        let z = d.zero.count;
        assert_eq!(
            d.columns.col1.count + d.columns.col2.count + d.columns.col3.count + z,
            len
        );
        assert_eq!(
            d.dozens.first.count + d.dozens.second.count + d.dozens.third.count + z,
            len
        );
        assert_eq!(d.halves.low.count + d.halves.high.count + z, len);
        assert_eq!(d.colors.red.count + d.colors.black.count + z, len);
        assert_eq!(d.parity.even.count + d.parity.odd.count + z, len);
    }

    #[test]
    fn test_double_zero_counts_as_zero() {
        let d = distribution(&[DOUBLE_ZERO, 0, 5], TableVariant::American);
        assert_eq!(d.zero.count, 2);
        assert_eq!(d.colors.red.count, 1);
    }

    #[test]
    fn test_column_membership() {
        // 1 -> Col1, 2 -> Col2, 3 -> Col3, 6 -> Col3
        let d = distribution(&[1, 2, 3, 6], TableVariant::European);
        assert_eq!(d.columns.col1.count, 1);
        assert_eq!(d.columns.col2.count, 1);
        assert_eq!(d.columns.col3.count, 2);
    }
}
