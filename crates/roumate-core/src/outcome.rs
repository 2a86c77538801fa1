//! Table variants and outcome classification.
//!
//! An outcome is a raw `u8`: `0..=36` on every table, plus the
//! [`DOUBLE_ZERO`] sentinel on American tables. [`classify`] maps a valid
//! outcome to its membership in the five category schemes (color, parity,
//! half, column, dozen) and its three-way combination key. Zero and
//! double-zero belong to no scheme.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouletteError};

/// Sentinel value for the American "00" pocket. Never a 37th ordinary number.
pub const DOUBLE_ZERO: u8 = 37;

/// The 18 red pockets. Everything else in 1..=36 is black.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Table layout, fixed for the lifetime of a session. Mixing variants in one
/// history is undefined; a variant switch requires a fresh history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    /// Single zero, 37 pockets (0..=36).
    European,
    /// Zero and double zero, 38 pockets.
    American,
}

impl TableVariant {
    /// Number of distinct pockets on this table.
    pub fn slot_count(self) -> usize {
        match self {
            Self::European => 37,
            Self::American => 38,
        }
    }

    /// Whether this outcome is a zero-equivalent pocket on this table.
    pub fn is_zero(self, n: u8) -> bool {
        n == 0 || (self == Self::American && n == DOUBLE_ZERO)
    }

    /// Whether this outcome is inside the valid range for this table.
    pub fn is_valid(self, n: u8) -> bool {
        n <= 36 || (self == Self::American && n == DOUBLE_ZERO)
    }
}

impl std::fmt::Display for TableVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::European => write!(f, "european"),
            Self::American => write!(f, "american"),
        }
    }
}

impl std::str::FromStr for TableVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "european" | "eu" => Ok(Self::European),
            "american" | "us" => Ok(Self::American),
            other => Err(format!("unknown table variant '{other}'")),
        }
    }
}

/// Display label for an outcome: `"00"` for the double-zero sentinel.
pub fn outcome_label(n: u8) -> String {
    if n == DOUBLE_ZERO {
        "00".to_string()
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Col1,
    Col2,
    Col3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dozen {
    First,
    Second,
    Third,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::Black => write!(f, "Black"),
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Even => write!(f, "Even"),
            Self::Odd => write!(f, "Odd"),
        }
    }
}

impl std::fmt::Display for Half {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Col1 => write!(f, "Col1"),
            Self::Col2 => write!(f, "Col2"),
            Self::Col3 => write!(f, "Col3"),
        }
    }
}

impl std::fmt::Display for Dozen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "1st 12"),
            Self::Second => write!(f, "2nd 12"),
            Self::Third => write!(f, "3rd 12"),
        }
    }
}

/// The compound Half-Color-Parity label of a non-zero outcome. 8 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComboKey {
    pub half: Half,
    pub color: Color,
    pub parity: Parity,
}

impl ComboKey {
    /// All 8 combination keys in display order.
    pub const ALL: [ComboKey; 8] = [
        ComboKey::new(Half::Low, Color::Red, Parity::Even),
        ComboKey::new(Half::Low, Color::Red, Parity::Odd),
        ComboKey::new(Half::Low, Color::Black, Parity::Even),
        ComboKey::new(Half::Low, Color::Black, Parity::Odd),
        ComboKey::new(Half::High, Color::Red, Parity::Even),
        ComboKey::new(Half::High, Color::Red, Parity::Odd),
        ComboKey::new(Half::High, Color::Black, Parity::Even),
        ComboKey::new(Half::High, Color::Black, Parity::Odd),
    ];

    pub const fn new(half: Half, color: Color, parity: Parity) -> Self {
        Self {
            half,
            color,
            parity,
        }
    }

    /// The numbers in 1..=36 that produce this key.
    pub fn member_numbers(self) -> Vec<u8> {
        (1..=36)
            .filter(|&n| {
                // classify never fails for 1..=36 on either variant
                classify(n, TableVariant::European)
                    .ok()
                    .and_then(|c| c.combo())
                    == Some(self)
            })
            .collect()
    }
}

impl std::fmt::Display for ComboKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.half, self.color, self.parity)
    }
}

/// Category memberships of a single outcome.
///
/// For zero and double-zero every optional field is `None`; for 1..=36 every
/// field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub is_zero: bool,
    pub color: Option<Color>,
    pub parity: Option<Parity>,
    pub half: Option<Half>,
    pub column: Option<Column>,
    pub dozen: Option<Dozen>,
}

impl Classified {
    /// The three-way combination key, `None` for zero outcomes.
    pub fn combo(&self) -> Option<ComboKey> {
        Some(ComboKey::new(self.half?, self.color?, self.parity?))
    }
}

/// Classify one outcome. Pure and total over the variant's valid range;
/// `InvalidOutcome` outside it. No mutation happens downstream of a failed
/// classification.
pub fn classify(n: u8, variant: TableVariant) -> Result<Classified> {
    if !variant.is_valid(n) {
        return Err(RouletteError::InvalidOutcome { value: n, variant });
    }
    if variant.is_zero(n) {
        return Ok(Classified {
            is_zero: true,
            color: None,
            parity: None,
            half: None,
            column: None,
            dozen: None,
        });
    }

    let half = if n <= 18 { Half::Low } else { Half::High };
    let color = if RED_NUMBERS.contains(&n) {
        Color::Red
    } else {
        Color::Black
    };
    let parity = if n % 2 == 0 { Parity::Even } else { Parity::Odd };
    let column = match n % 3 {
        1 => Column::Col1,
        2 => Column::Col2,
        _ => Column::Col3,
    };
    let dozen = if n <= 12 {
        Dozen::First
    } else if n <= 24 {
        Dozen::Second
    } else {
        Dozen::Third
    };

    Ok(Classified {
        is_zero: false,
        color: Some(color),
        parity: Some(parity),
        half: Some(half),
        column: Some(column),
        dozen: Some(dozen),
    })
}
