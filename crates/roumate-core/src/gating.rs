//! Usage gating: free tier limits, ad rewards, and premium access.
//!
//! The policy is a plain injectable object — no ambient storage, no clock of
//! its own. Callers pass the current time as unix seconds; day boundaries
//! are UTC (`secs / 86400`). Decisions depend on the recorded history
//! length, so undoing entries gives inputs back, exactly like the original
//! product behaved.
//!
//! Decision order: active premium → demo allowance → profile gate →
//! extended allowance → ad rewards → upgrade required.

use serde::{Deserialize, Serialize};

/// Inputs allowed before any profile exists.
pub const FREE_DEMO_LIMIT: usize = 10;
/// Inputs allowed once the profile is complete.
pub const FREE_EXTENDED_LIMIT: usize = 20;
/// Inputs granted per watched ad.
pub const AD_REWARD_INPUTS: u32 = 10;

const SECS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub email_confirmed: bool,
}

impl UserProfile {
    /// Complete means name, email, and a confirmed address.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && self.email_confirmed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub tier: Tier,
    /// Unix seconds; premium access lapses after this instant.
    pub end_date: Option<u64>,
    pub ad_reward_inputs: u32,
}

impl Default for Subscription {
    fn default() -> Self {
        Self {
            tier: Tier::Free,
            end_date: None,
            ad_reward_inputs: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub total_inputs: u64,
    pub daily_inputs: u64,
    pub session_inputs: u64,
    /// UTC day number (unix secs / 86400) of the last recorded input.
    pub last_input_day: Option<u64>,
}

/// Why an input was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum InputPermit {
    Premium,
    Demo { remaining: usize },
    Extended { remaining: usize },
    AdReward { remaining: u32 },
}

/// Why an input was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum InputDenial {
    ProfileRequired { limit: usize },
    UpgradeRequired { limit: usize },
}

/// Free/premium gate consulted before each manual input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatePolicy {
    pub profile: UserProfile,
    pub subscription: Subscription,
    pub usage: Usage,
}

impl GatePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether the next input is allowed, given how many entries the
    /// history already holds.
    pub fn can_input(
        &self,
        history_len: usize,
        now: u64,
    ) -> Result<InputPermit, InputDenial> {
        if self.subscription.tier == Tier::Premium
            && self.subscription.end_date.is_some_and(|end| now <= end)
        {
            return Ok(InputPermit::Premium);
        }

        if history_len < FREE_DEMO_LIMIT {
            return Ok(InputPermit::Demo {
                remaining: FREE_DEMO_LIMIT - history_len,
            });
        }

        if !self.profile.is_complete() {
            return Err(InputDenial::ProfileRequired {
                limit: FREE_DEMO_LIMIT,
            });
        }

        if history_len < FREE_EXTENDED_LIMIT {
            return Ok(InputPermit::Extended {
                remaining: FREE_EXTENDED_LIMIT - history_len,
            });
        }

        if self.subscription.ad_reward_inputs > 0 {
            return Ok(InputPermit::AdReward {
                remaining: self.subscription.ad_reward_inputs,
            });
        }

        Err(InputDenial::UpgradeRequired {
            limit: FREE_EXTENDED_LIMIT,
        })
    }

    /// Track one recorded input. Daily and session counters reset when the
    /// UTC day changes.
    pub fn record_input(&mut self, now: u64) {
        let day = now / SECS_PER_DAY;
        if self.usage.last_input_day != Some(day) {
            self.usage.daily_inputs = 0;
            self.usage.session_inputs = 0;
        }
        self.usage.total_inputs += 1;
        self.usage.daily_inputs += 1;
        self.usage.session_inputs += 1;
        self.usage.last_input_day = Some(day);
    }

    /// Spend one ad-reward input, if any remain.
    pub fn consume_ad_reward(&mut self) {
        self.subscription.ad_reward_inputs = self.subscription.ad_reward_inputs.saturating_sub(1);
    }

    /// Grant one watched ad's worth of inputs.
    pub fn grant_ad_rewards(&mut self) {
        self.subscription.ad_reward_inputs += AD_REWARD_INPUTS;
    }

    /// Switch to premium for `days`, clearing any banked ad rewards.
    pub fn upgrade_to_premium(&mut self, days: u64, now: u64) {
        self.subscription = Subscription {
            tier: Tier::Premium,
            end_date: Some(now + days * SECS_PER_DAY),
            ad_reward_inputs: 0,
        };
    }

    pub fn set_profile(&mut self, name: &str, email: &str, email_confirmed: bool) {
        self.profile = UserProfile {
            name: name.to_string(),
            email: email.to_string(),
            email_confirmed,
        };
    }

    /// Reset usage counters; the original did this alongside a history reset
    /// so the user starts over with fresh free inputs.
    pub fn reset_usage(&mut self) {
        self.usage = Usage::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_754_000_000;

    fn complete_profile(gate: &mut GatePolicy) {
        gate.set_profile("Ada", "ada@example.com", true);
    }

    // -----------------------------------------------------------------------
    // Tier decision order
    // -----------------------------------------------------------------------

    #[test]
    fn test_demo_allowance() {
        let gate = GatePolicy::new();
        assert_eq!(
            gate.can_input(0, NOW),
            Ok(InputPermit::Demo { remaining: 10 })
        );
        assert_eq!(
            gate.can_input(9, NOW),
            Ok(InputPermit::Demo { remaining: 1 })
        );
    }

    #[test]
    fn test_profile_gate_at_demo_limit() {
        let gate = GatePolicy::new();
        assert_eq!(
            gate.can_input(FREE_DEMO_LIMIT, NOW),
            Err(InputDenial::ProfileRequired { limit: 10 })
        );
    }

    #[test]
    fn test_extended_allowance_after_profile() {
        let mut gate = GatePolicy::new();
        complete_profile(&mut gate);
        assert_eq!(
            gate.can_input(FREE_DEMO_LIMIT, NOW),
            Ok(InputPermit::Extended { remaining: 10 })
        );
        assert_eq!(
            gate.can_input(FREE_EXTENDED_LIMIT, NOW),
            Err(InputDenial::UpgradeRequired { limit: 20 })
        );
    }

    #[test]
    fn test_incomplete_profile_variants() {
        let mut gate = GatePolicy::new();
        gate.set_profile("Ada", "", true);
        assert!(gate.can_input(FREE_DEMO_LIMIT, NOW).is_err());
        gate.set_profile("Ada", "ada@example.com", false);
        assert!(gate.can_input(FREE_DEMO_LIMIT, NOW).is_err());
    }

    // -----------------------------------------------------------------------
    // Ad rewards
    // -----------------------------------------------------------------------

    #[test]
    fn test_ad_rewards_extend_past_free_limit() {
        let mut gate = GatePolicy::new();
        complete_profile(&mut gate);
        gate.grant_ad_rewards();
        assert_eq!(
            gate.can_input(FREE_EXTENDED_LIMIT, NOW),
            Ok(InputPermit::AdReward { remaining: 10 })
        );
        for _ in 0..AD_REWARD_INPUTS {
            gate.consume_ad_reward();
        }
        assert_eq!(
            gate.can_input(FREE_EXTENDED_LIMIT, NOW),
            Err(InputDenial::UpgradeRequired { limit: 20 })
        );
    }

    // -----------------------------------------------------------------------
    // Premium
    // -----------------------------------------------------------------------

    #[test]
    fn test_premium_is_unlimited_until_expiry() {
        let mut gate = GatePolicy::new();
        gate.upgrade_to_premium(30, NOW);
        assert_eq!(gate.can_input(10_000, NOW), Ok(InputPermit::Premium));
        // One second past the end date, back to free-tier rules.
        let after = NOW + 30 * SECS_PER_DAY + 1;
        assert!(gate.can_input(10_000, after).is_err());
    }

    #[test]
    fn test_upgrade_clears_ad_rewards() {
        let mut gate = GatePolicy::new();
        gate.grant_ad_rewards();
        gate.upgrade_to_premium(7, NOW);
        assert_eq!(gate.subscription.ad_reward_inputs, 0);
    }

    // -----------------------------------------------------------------------
    // Usage counters
    // -----------------------------------------------------------------------

    #[test]
    fn test_daily_counters_reset_on_day_change() {
        let mut gate = GatePolicy::new();
        gate.record_input(NOW);
        gate.record_input(NOW + 10);
        assert_eq!(gate.usage.daily_inputs, 2);
        assert_eq!(gate.usage.total_inputs, 2);

        gate.record_input(NOW + SECS_PER_DAY);
        assert_eq!(gate.usage.daily_inputs, 1);
        assert_eq!(gate.usage.total_inputs, 3);
    }

    #[test]
    fn test_reset_usage() {
        let mut gate = GatePolicy::new();
        gate.record_input(NOW);
        gate.reset_usage();
        assert_eq!(gate.usage.total_inputs, 0);
        assert_eq!(gate.usage.last_input_day, None);
    }

    #[test]
    fn test_state_serializes() {
        let mut gate = GatePolicy::new();
        complete_profile(&mut gate);
        gate.grant_ad_rewards();
        let json = serde_json::to_string(&gate).unwrap();
        let back: GatePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back.subscription.ad_reward_inputs, AD_REWARD_INPUTS);
        assert!(back.profile.is_complete());
    }
}
