//! `roumate gate` — manage the free/premium input gate.
//!
//! Without a gate state file every input is allowed. `gate init` creates one
//! and switches the input path to the free-tier rules.

use std::path::Path;

use clap::Subcommand;
use roumate_core::{GatePolicy, InputDenial, InputPermit, TableVariant, Tier};

#[derive(Subcommand)]
pub enum GateAction {
    /// Enable gating with a fresh free-tier state
    Init,

    /// Show tier, remaining inputs, and usage counters
    Status,

    /// Complete the profile to unlock the extended free limit
    Profile {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Mark the email address as confirmed
        #[arg(long)]
        confirmed: bool,
    },

    /// Bank one ad reward's worth of extra inputs
    WatchAd,

    /// Switch to premium for a number of days
    Upgrade {
        #[arg(long, default_value = "30")]
        days: u64,
    },

    /// Remove the gate entirely (every input allowed again)
    Disable,
}

pub fn run(variant: TableVariant, data_dir: &Path, action: &GateAction) {
    match action {
        GateAction::Init => {
            super::save_gate(data_dir, &GatePolicy::new());
            println!("Gate enabled: free tier, {} demo inputs", roumate_core::FREE_DEMO_LIMIT);
        }
        GateAction::Status => status(variant, data_dir),
        GateAction::Profile {
            name,
            email,
            confirmed,
        } => with_gate(data_dir, |gate| {
            gate.set_profile(name, email, *confirmed);
            if gate.profile.is_complete() {
                println!(
                    "Profile complete — free limit extended to {} inputs",
                    roumate_core::FREE_EXTENDED_LIMIT
                );
            } else {
                println!("Profile saved but incomplete (needs name, email, and --confirmed)");
            }
        }),
        GateAction::WatchAd => with_gate(data_dir, |gate| {
            gate.grant_ad_rewards();
            println!(
                "Ad reward banked: {} extra inputs available",
                gate.subscription.ad_reward_inputs
            );
        }),
        GateAction::Upgrade { days } => with_gate(data_dir, |gate| {
            gate.upgrade_to_premium(*days, super::now_unix());
            println!("Premium active for {days} days — inputs are unlimited");
        }),
        GateAction::Disable => {
            let path = data_dir.join("gate.json");
            match std::fs::remove_file(&path) {
                Ok(()) => println!("Gate disabled"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    println!("Gate was not enabled")
                }
                Err(e) => eprintln!("Error removing gate state: {e}"),
            }
        }
    }
}

fn with_gate(data_dir: &Path, f: impl FnOnce(&mut GatePolicy)) {
    let Some(mut gate) = super::load_gate(data_dir) else {
        eprintln!("Gate is not enabled — run `roumate gate init` first");
        std::process::exit(1);
    };
    f(&mut gate);
    super::save_gate(data_dir, &gate);
}

fn status(variant: TableVariant, data_dir: &Path) {
    let Some(gate) = super::load_gate(data_dir) else {
        println!("Gate: disabled (every input allowed)");
        return;
    };

    let tier = match gate.subscription.tier {
        Tier::Premium => "premium",
        Tier::Free => "free",
    };
    println!("Gate: enabled");
    println!("  Tier:            {tier}");
    println!(
        "  Profile:         {}",
        if gate.profile.is_complete() {
            "complete"
        } else {
            "incomplete"
        }
    );
    println!(
        "  Ad rewards:      {} inputs banked",
        gate.subscription.ad_reward_inputs
    );
    println!("  Total inputs:    {}", gate.usage.total_inputs);
    println!("  Inputs today:    {}", gate.usage.daily_inputs);

    // Decisions depend on the table's history length, so preview against the
    // selected table.
    let history_len = super::open_session(variant, data_dir).len();
    match gate.can_input(history_len, super::now_unix()) {
        Ok(InputPermit::Premium) => println!("  Next input:      allowed (premium)"),
        Ok(InputPermit::Demo { remaining }) => {
            println!("  Next input:      allowed ({remaining} demo inputs left)")
        }
        Ok(InputPermit::Extended { remaining }) => {
            println!("  Next input:      allowed ({remaining} extended inputs left)")
        }
        Ok(InputPermit::AdReward { remaining }) => {
            println!("  Next input:      allowed ({remaining} ad-reward inputs left)")
        }
        Err(InputDenial::ProfileRequired { .. }) => {
            println!("  Next input:      blocked — complete your profile")
        }
        Err(InputDenial::UpgradeRequired { .. }) => {
            println!("  Next input:      blocked — watch an ad or upgrade")
        }
    }
}
