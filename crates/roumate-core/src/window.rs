//! Trailing-window selection over the history.

use crate::error::{Result, RouletteError};

/// Select the statistics window: `k == 0` is the whole history, `k > 0` the
/// last `min(k, len)` entries in original order. Borrows, never copies.
pub fn select_window(history: &[u8], k: i64) -> Result<&[u8]> {
    if k < 0 {
        return Err(RouletteError::InvalidWindow(k));
    }
    Ok(take_last(history, k as u64))
}

/// The already-validated form of [`select_window`]: `k == 0` means all.
pub fn take_last(history: &[u8], k: u64) -> &[u8] {
    if k == 0 {
        return history;
    }
    let k = usize::try_from(k).unwrap_or(usize::MAX).min(history.len());
    &history[history.len() - k..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_selects_everything() {
        let h = [1, 2, 3];
        assert_eq!(select_window(&h, 0).unwrap(), &h);
    }

    #[test]
    fn test_window_is_trailing_suffix() {
        let h = [1, 2, 3, 4, 5];
        assert_eq!(select_window(&h, 2).unwrap(), &[4, 5]);
        assert_eq!(select_window(&h, 5).unwrap(), &h);
    }

    #[test]
    fn test_window_clamps_to_length() {
        let h = [1, 2, 3];
        assert_eq!(select_window(&h, 10).unwrap(), &h);
    }

    #[test]
    fn test_negative_window_rejected() {
        assert!(matches!(
            select_window(&[1, 2], -1),
            Err(RouletteError::InvalidWindow(-1))
        ));
    }

    #[test]
    fn test_empty_history() {
        let h: [u8; 0] = [];
        assert_eq!(select_window(&h, 0).unwrap(), &[] as &[u8]);
        assert_eq!(select_window(&h, 3).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_window_length_property() {
        let h = [9, 8, 7, 6];
        for k in 1..8i64 {
            let got = select_window(&h, k).unwrap();
            assert_eq!(got.len(), (k as usize).min(h.len()));
        }
    }
}
