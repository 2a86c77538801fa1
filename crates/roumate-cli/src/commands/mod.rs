pub mod enter;
pub mod export;
pub mod gate;
pub mod serve;
pub mod simulate;
pub mod stats;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use roumate_core::{GatePolicy, JsonFileStorage, TableSession, TableVariant};

/// Parse the table flag, exiting with a usage error on anything unknown.
pub fn parse_table(s: &str) -> TableVariant {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Open the session for `variant` under the data directory. The gate is
/// active only once `roumate gate init` has created its state file.
pub fn open_session(variant: TableVariant, data_dir: &Path) -> TableSession {
    let storage = JsonFileStorage::new(data_dir, variant);
    TableSession::new(variant, Box::new(storage), load_gate(data_dir))
}

fn gate_path(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join("gate.json")
}

/// The persisted gate policy, if one was initialized.
pub fn load_gate(data_dir: &Path) -> Option<GatePolicy> {
    let raw = std::fs::read_to_string(gate_path(data_dir)).ok()?;
    match serde_json::from_str(&raw) {
        Ok(gate) => Some(gate),
        Err(e) => {
            eprintln!("Warning: ignoring corrupt gate state: {e}");
            None
        }
    }
}

/// Persist gate state after usage counters or rewards changed.
pub fn save_gate(data_dir: &Path, gate: &GatePolicy) {
    let path = gate_path(data_dir);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match serde_json::to_string_pretty(gate) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("Warning: gate state not saved: {e}");
            }
        }
        Err(e) => eprintln!("Warning: gate state not saved: {e}"),
    }
}

/// Save the session's gate back to disk, if the session carries one.
pub fn save_session_gate(session: &TableSession, data_dir: &Path) {
    if let Some(gate) = session.gate() {
        save_gate(data_dir, gate);
    }
}

pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
