//! Last-seen recency for the eight Half-Color-Parity combinations.

use serde::Serialize;

use crate::outcome::{ComboKey, TableVariant, classify};

/// Recency of one combination within the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComboRecency {
    pub combo: ComboKey,
    /// Entries since the last occurrence: 0 means the most recent entry,
    /// `None` means the combination never occurred in the window.
    pub entries_since: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecencyReport {
    /// One row per combination, in display order.
    pub combos: Vec<ComboRecency>,
}

/// Find each combination's most recent occurrence in the slice.
pub fn combo_recency(slice: &[u8], variant: TableVariant) -> RecencyReport {
    let mut last_index: [Option<usize>; 8] = [None; 8];

    for (i, &n) in slice.iter().enumerate() {
        let Some(combo) = classify(n, variant).ok().and_then(|c| c.combo()) else {
            continue;
        };
        if let Some(pos) = ComboKey::ALL.iter().position(|k| *k == combo) {
            last_index[pos] = Some(i);
        }
    }

    let combos = ComboKey::ALL
        .iter()
        .zip(last_index)
        .map(|(&combo, idx)| ComboRecency {
            combo,
            entries_since: idx.map(|i| slice.len() - 1 - i),
        })
        .collect();

    RecencyReport { combos }
}
