//! # roumate-core
//!
//! **Track a roulette table by hand, see every statistic live.**
//!
//! `roumate-core` is the tracking and statistics engine behind roumate: an
//! ordered history of observed outcomes, a trailing statistics window, and a
//! deterministic aggregation pass that derives every view — category
//! distributions, ±1 trend series, per-pocket frequency, streak tables, and
//! combination recency.
//!
//! ## Quick Start
//!
//! ```
//! use roumate_core::{MemoryStorage, TableSession, TableVariant};
//!
//! let mut session = TableSession::new(
//!     TableVariant::European,
//!     Box::new(MemoryStorage::new()),
//!     None,
//! );
//! session.enter(19).unwrap();
//! session.enter(0).unwrap();
//!
//! let report = session.aggregates();
//! assert_eq!(report.len, 2);
//! assert_eq!(report.frequency.count(19), 1);
//! assert_eq!(report.streaks.zero.current, 1);
//! ```
//!
//! ## Architecture
//!
//! Inputs → History store (append/undo) → Window → Aggregation → Reports
//!
//! Every mutation recomputes the full [`AggregateReport`] over the current
//! window and notifies subscribed observers synchronously — the report is a
//! pure function of `(history, window)` and is never cached across a
//! mutation. Persistence is a best-effort collaborator behind the
//! [`StorageAdapter`] trait: the in-memory history stays authoritative when
//! a write fails.
//!
//! One session owns one table variant for its whole lifetime. The American
//! double zero is the sentinel value [`DOUBLE_ZERO`], a second
//! zero-equivalent pocket rather than a 37th number.

pub mod error;
pub mod export;
pub mod gating;
pub mod history;
pub mod outcome;
pub mod session;
pub mod simulate;
pub mod speech;
pub mod stats;
pub mod storage;
pub mod window;

pub use error::{Result, RouletteError};
pub use export::{csv_file_name, write_csv};
pub use gating::{
    AD_REWARD_INPUTS, FREE_DEMO_LIMIT, FREE_EXTENDED_LIMIT, GatePolicy, InputDenial, InputPermit,
    Subscription, Tier, Usage, UserProfile,
};
pub use history::HistoryStore;
pub use outcome::{
    Classified, Color, Column, ComboKey, DOUBLE_ZERO, Dozen, Half, Parity, RED_NUMBERS,
    TableVariant, classify, outcome_label,
};
pub use session::{EnterOutcome, HistoryObserver, TableSession};
pub use simulate::{CancelToken, SpeedProfile, TestRunConfig, TestRunSummary};
pub use speech::{parse_spoken_token, parse_transcript};
pub use stats::{
    AggregateReport, ComboRecency, DistributionReport, FrequencyTable, RecencyReport, Share,
    StreakEntry, StreakReport, TrendReport, aggregate,
};
pub use storage::{JsonFileStorage, MemoryStorage, StorageAdapter, StorageMode, create_storage};
pub use window::select_window;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
