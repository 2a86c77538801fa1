//! `roumate enter` / `undo` / `reset` — the manual input path.

use std::path::Path;

use roumate_core::{
    DOUBLE_ZERO, EnterOutcome, InputDenial, InputPermit, TableVariant, classify, outcome_label,
    parse_spoken_token,
};

/// Map one CLI token to an outcome: decimal, "00", or a spoken word.
fn parse_outcome(token: &str, variant: TableVariant) -> Option<u8> {
    if token == "00" {
        return (variant == TableVariant::American).then_some(DOUBLE_ZERO);
    }
    if let Ok(n) = token.parse::<u8>() {
        return variant.is_valid(n).then_some(n);
    }
    parse_spoken_token(token, variant)
}

fn describe(n: u8, variant: TableVariant) -> String {
    match classify(n, variant) {
        Ok(c) if c.is_zero => format!("{} (Zero)", outcome_label(n)),
        Ok(c) => format!(
            "{} ({}, {}, {}, {})",
            outcome_label(n),
            c.color.unwrap(),
            c.parity.unwrap(),
            c.half.unwrap(),
            c.column.unwrap(),
        ),
        Err(_) => outcome_label(n),
    }
}

fn explain_denial(denial: InputDenial) {
    match denial {
        InputDenial::ProfileRequired { limit } => {
            eprintln!(
                "Input refused: the {limit} free demo inputs are used up. Complete your \
                 profile with `roumate gate profile` to unlock more."
            );
        }
        InputDenial::UpgradeRequired { limit } => {
            eprintln!(
                "Input refused: all {limit} free inputs are used up. `roumate gate watch-ad` \
                 grants more, or `roumate gate upgrade` removes the limit."
            );
        }
    }
}

fn warn_if_low(permit: InputPermit) {
    let remaining = match permit {
        InputPermit::Demo { remaining } | InputPermit::Extended { remaining } => remaining,
        InputPermit::AdReward { remaining } => remaining as usize,
        InputPermit::Premium => return,
    };
    // The permit was for the input just recorded, so one is already spent.
    if remaining <= 3 {
        eprintln!("  ({} free input(s) left)", remaining.saturating_sub(1));
    }
}

/// Record each token in order. Unrecognized tokens are skipped with a note;
/// a gate denial ends the batch.
pub fn run(variant: TableVariant, data_dir: &Path, outcomes: &[String]) {
    let mut session = super::open_session(variant, data_dir);

    for token in outcomes {
        let Some(n) = parse_outcome(token, variant) else {
            eprintln!("Skipping unrecognized outcome '{token}'");
            continue;
        };
        match session.enter(n) {
            Ok(EnterOutcome::Recorded { len, permit }) => {
                println!("#{len}  {}", describe(n, variant));
                if let Some(permit) = permit {
                    warn_if_low(permit);
                }
            }
            Ok(EnterOutcome::Denied(denial)) => {
                explain_denial(denial);
                break;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    if let Some(e) = session.last_persist_failure() {
        eprintln!("Warning: history not persisted: {e}");
    }
    super::save_session_gate(&session, data_dir);
    println!("History: {} entries", session.len());
}

/// Remove the most recent entry.
pub fn undo(variant: TableVariant, data_dir: &Path) {
    let mut session = super::open_session(variant, data_dir);
    match session.undo() {
        Ok(n) => println!(
            "Removed {} — {} entries left",
            outcome_label(n),
            session.len()
        ),
        Err(e) => eprintln!("{e}"),
    }
}

/// Clear history and usage counters.
pub fn reset(variant: TableVariant, data_dir: &Path) {
    let mut session = super::open_session(variant, data_dir);
    let had = session.len();
    session.reset();
    super::save_session_gate(&session, data_dir);
    println!("Cleared {had} entries for the {variant} table");
}
