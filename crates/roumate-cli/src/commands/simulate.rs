//! `roumate simulate` — drive a random test run with Ctrl-C cancellation.

use std::io::Write;
use std::path::Path;

use roumate_core::{CancelToken, SpeedProfile, TableVariant, TestRunConfig, simulate};

pub fn run(
    variant: TableVariant,
    data_dir: &Path,
    count: usize,
    speed: &str,
    reset: bool,
    seed: Option<u64>,
) {
    let profile: SpeedProfile = speed.parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let mut session = super::open_session(variant, data_dir);

    // Live progress from the session's own change notifications.
    session.subscribe(Box::new(|report| {
        print!("\r  Entries: {:<8}", report.len);
        let _ = std::io::stdout().flush();
    }));

    let token = CancelToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel()).unwrap_or_else(|e| {
        eprintln!("Error setting Ctrl+C handler: {e}");
        std::process::exit(1);
    });

    let config = TestRunConfig {
        count,
        profile,
        reset_first: reset,
        seed,
        delay_override: None,
    };

    println!("Simulating {count} outcomes on the {variant} table");
    println!("  Speed:     {speed} ({:?} per input)", profile.delay_for(count));
    println!("  Reset:     {}", if reset { "yes" } else { "no" });
    println!("  Cancel:    Ctrl+C (already-entered outcomes are kept)");
    println!();

    match simulate::run(&mut session, &config, &token) {
        Ok(summary) => {
            println!();
            println!();
            if summary.cancelled {
                println!(
                    "Cancelled after {} of {} outcomes",
                    summary.appended, summary.requested
                );
            } else if summary.denied {
                println!(
                    "Input gate refused further entries after {} outcomes — see `roumate gate status`",
                    summary.appended
                );
            } else {
                println!("Done: {} outcomes appended", summary.appended);
            }
            println!("History now holds {} entries", session.len());
        }
        Err(e) => {
            println!();
            eprintln!("Error: {e}");
        }
    }

    super::save_session_gate(&session, data_dir);
}
