//! Simulated test runs: random outcomes fed through the normal input path.
//!
//! The driver appends one uniform-random outcome at a time with a
//! per-profile delay, so the statistics update live exactly as they would
//! for manual input. Cancellation is cooperative: the token is checked
//! before every append, takes effect at the next check point, and already
//! appended outcomes stay in history.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::session::{EnterOutcome, TableSession};

/// Cooperative cancellation flag shared with whatever drives the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run stops at its next check point.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Delay profile between simulated appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedProfile {
    Fast,
    Regular,
    Slow,
}

impl SpeedProfile {
    fn base_delay_ms(self) -> u64 {
        match self {
            Self::Fast => 50,
            Self::Regular => 150,
            Self::Slow => 600,
        }
    }

    fn floor_ms(self) -> u64 {
        match self {
            Self::Fast => 1,
            Self::Regular => 2,
            Self::Slow => 5,
        }
    }

    /// Per-step delay for a run of `count` inputs. Large runs speed up so
    /// they finish in reasonable time: 0.5x faster per 100 inputs past 100,
    /// 3x faster per 500 inputs from 500 up.
    pub fn delay_for(self, count: usize) -> Duration {
        let base = self.base_delay_ms();
        let ms = if count >= 500 {
            let factor = (count / 500) as u64 * 3;
            (base / factor.max(1)).max(self.floor_ms())
        } else if count >= 100 {
            // Factor in half-steps: 1 + ((count-100)/100) * 0.5.
            let half_steps = 2 + (count as u64 - 100) / 100;
            (base * 2 / half_steps).max(self.floor_ms())
        } else {
            base
        };
        Duration::from_millis(ms)
    }
}

impl std::str::FromStr for SpeedProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "regular" => Ok(Self::Regular),
            "slow" => Ok(Self::Slow),
            other => Err(format!("unknown speed profile '{other}'")),
        }
    }
}

/// Parameters for one simulated run.
#[derive(Debug, Clone)]
pub struct TestRunConfig {
    /// How many outcomes to simulate.
    pub count: usize,
    pub profile: SpeedProfile,
    /// Clear history (and usage counters) before the run starts.
    pub reset_first: bool,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Override the computed per-step delay (tests pass zero).
    pub delay_override: Option<Duration>,
}

impl Default for TestRunConfig {
    fn default() -> Self {
        Self {
            count: 100,
            profile: SpeedProfile::Regular,
            reset_first: false,
            seed: None,
            delay_override: None,
        }
    }
}

/// What a run actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRunSummary {
    pub requested: usize,
    pub appended: usize,
    pub cancelled: bool,
    /// The gate refused an input mid-run, ending it early.
    pub denied: bool,
}

/// Drive a simulated run against the session. Outcomes are uniform over the
/// variant's full pocket range, zeros included.
pub fn run(
    session: &mut TableSession,
    config: &TestRunConfig,
    token: &CancelToken,
) -> Result<TestRunSummary> {
    if config.reset_first {
        session.reset();
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let max = (session.variant().slot_count() - 1) as u8;
    let delay = config
        .delay_override
        .unwrap_or_else(|| config.profile.delay_for(config.count));

    let mut summary = TestRunSummary {
        requested: config.count,
        appended: 0,
        cancelled: false,
        denied: false,
    };

    for _ in 0..config.count {
        if token.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        let n: u8 = rng.random_range(0..=max);
        match session.enter(n)? {
            EnterOutcome::Recorded { .. } => summary.appended += 1,
            EnterOutcome::Denied(_) => {
                summary.denied = true;
                break;
            }
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    Ok(summary)
}
