//! One table-variant session: history, window, gate, and live aggregates.
//!
//! `TableSession` is the single entry point every input source funnels
//! through — manual entry, parsed speech tokens, and simulated test runs.
//! Each mutation synchronously recomputes the full [`AggregateReport`] over
//! the current window and notifies subscribed observers; the report is never
//! cached across a mutation. All collaborators are constructor-injected —
//! there is no ambient state, and two sessions never share anything.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, RouletteError};
use crate::gating::{GatePolicy, InputDenial, InputPermit};
use crate::history::HistoryStore;
use crate::outcome::TableVariant;
use crate::stats::{AggregateReport, aggregate};
use crate::storage::StorageAdapter;
use crate::window::take_last;

/// Observer invoked synchronously after every recompute.
pub type HistoryObserver = Box<dyn FnMut(&AggregateReport) + Send>;

/// What happened to a gated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// The outcome was appended; `len` is the new history length.
    Recorded {
        len: usize,
        permit: Option<InputPermit>,
    },
    /// The gate refused the input; history is untouched.
    Denied(InputDenial),
}

/// A live tracking session for one table variant.
pub struct TableSession {
    variant: TableVariant,
    history: HistoryStore,
    window: u64,
    gate: Option<GatePolicy>,
    report: AggregateReport,
    observers: Vec<HistoryObserver>,
}

impl TableSession {
    /// Open a session hydrated from `storage`. Pass a gate to enforce the
    /// free/premium input policy; `None` leaves every input allowed.
    pub fn new(
        variant: TableVariant,
        storage: Box<dyn StorageAdapter>,
        gate: Option<GatePolicy>,
    ) -> Self {
        let history = HistoryStore::new(variant, storage);
        let report = aggregate(history.all(), variant);
        Self {
            variant,
            history,
            window: 0,
            gate,
            report,
            observers: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Input path
    // -----------------------------------------------------------------------

    /// Record one observed outcome through the gate. `InvalidOutcome` leaves
    /// every piece of state untouched; a gate denial is a normal outcome,
    /// not an error.
    pub fn enter(&mut self, n: u8) -> Result<EnterOutcome> {
        let now = now_unix();
        let permit = match &self.gate {
            Some(gate) => match gate.can_input(self.history.len(), now) {
                Ok(p) => Some(p),
                Err(denial) => return Ok(EnterOutcome::Denied(denial)),
            },
            None => None,
        };

        let len = self.history.append(n)?;

        if let Some(gate) = &mut self.gate {
            if matches!(permit, Some(InputPermit::AdReward { .. })) {
                gate.consume_ad_reward();
            }
            gate.record_input(now);
        }

        self.recompute();
        Ok(EnterOutcome::Recorded { len, permit })
    }

    /// Bulk-load outcomes, bypassing the gate (imports and test hydration).
    /// Atomic: one invalid element and nothing is appended.
    pub fn enter_many(&mut self, outcomes: &[u8]) -> Result<usize> {
        let len = self.history.append_many(outcomes)?;
        self.recompute();
        Ok(len)
    }

    /// Undo the most recent entry.
    pub fn undo(&mut self) -> Result<u8> {
        let n = self.history.remove_last()?;
        self.recompute();
        Ok(n)
    }

    /// Clear history and usage counters; the user starts over with fresh
    /// free inputs.
    pub fn reset(&mut self) {
        self.history.clear();
        if let Some(gate) = &mut self.gate {
            gate.reset_usage();
        }
        self.recompute();
    }

    // -----------------------------------------------------------------------
    // Window
    // -----------------------------------------------------------------------

    /// Change the statistics window. `0` means the whole history. The window
    /// is transient view state — it is not persisted with the history.
    pub fn set_window(&mut self, k: i64) -> Result<()> {
        if k < 0 {
            return Err(RouletteError::InvalidWindow(k));
        }
        self.window = k as u64;
        self.recompute();
        Ok(())
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn variant(&self) -> TableVariant {
        self.variant
    }

    /// The latest aggregate report, always in sync with (history, window).
    pub fn aggregates(&self) -> &AggregateReport {
        &self.report
    }

    /// Full ordered history, oldest first.
    pub fn history(&self) -> &[u8] {
        self.history.all()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Persistence failure from the most recent mutation, if any.
    pub fn last_persist_failure(&self) -> Option<&str> {
        self.history.last_persist_failure()
    }

    pub fn gate(&self) -> Option<&GatePolicy> {
        self.gate.as_ref()
    }

    pub fn gate_mut(&mut self) -> Option<&mut GatePolicy> {
        self.gate.as_mut()
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Subscribe to the synchronous history-changed notification. The
    /// callback fires after every recompute with the fresh report.
    pub fn subscribe(&mut self, observer: HistoryObserver) {
        self.observers.push(observer);
    }

    fn recompute(&mut self) {
        let slice = take_last(self.history.all(), self.window);
        self.report = aggregate(slice, self.variant);
        for observer in &mut self.observers {
            observer(&self.report);
        }
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
