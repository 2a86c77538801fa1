//! `roumate export` — write the history as CSV.

use std::fs::File;
use std::path::Path;

use roumate_core::{TableVariant, csv_file_name, write_csv};

pub fn run(variant: TableVariant, data_dir: &Path, output: Option<&str>) {
    let session = super::open_session(variant, data_dir);
    if session.is_empty() {
        eprintln!("No data to export.");
        return;
    }

    let name = output
        .map(str::to_string)
        .unwrap_or_else(|| csv_file_name(variant, super::now_unix()));

    let mut file = match File::create(&name) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error creating {name}: {e}");
            std::process::exit(1);
        }
    };

    match write_csv(&mut file, session.history(), variant) {
        Ok(()) => println!("Exported {} entries to {name}", session.len()),
        Err(e) => {
            eprintln!("Error writing {name}: {e}");
            std::process::exit(1);
        }
    }
}
