//! CSV export of the recorded history.
//!
//! One row per entry with its classification, in the column layout the
//! original exporter used. Fields are always quoted, with embedded quotes
//! doubled.

use std::io::Write;

use crate::error::{Result, RouletteError};
use crate::outcome::{TableVariant, classify, outcome_label};

/// Write the history as CSV: `Index,Value,Color,Parity,Half,Column,IsZero`.
/// Zero rows carry the green color label and empty category fields.
pub fn write_csv(w: &mut impl Write, history: &[u8], variant: TableVariant) -> Result<()> {
    writeln!(w, r#""Index","Value","Color","Parity","Half","Column","IsZero""#)
        .map_err(RouletteError::persistence)?;

    for (i, &n) in history.iter().enumerate() {
        let c = classify(n, variant)?;
        let (color, parity, half, column) = if c.is_zero {
            ("Green".to_string(), String::new(), String::new(), String::new())
        } else {
            (
                c.color.unwrap().to_string(),
                c.parity.unwrap().to_string(),
                c.half.unwrap().to_string(),
                c.column.unwrap().to_string(),
            )
        };
        writeln!(
            w,
            r#""{}","{}","{}","{}","{}","{}","{}""#,
            i,
            outcome_label(n),
            color,
            parity,
            half,
            column,
            c.is_zero
        )
        .map_err(RouletteError::persistence)?;
    }
    Ok(())
}

/// Build the export file name: `roulette_{variant}_{yyyymmdd}_{hhmmss}.csv`.
pub fn csv_file_name(variant: TableVariant, unix_secs: u64) -> String {
    let (year, month, day, hour, min, sec) = secs_to_utc(unix_secs);
    format!(
        "roulette_{variant}_{year:04}{month:02}{day:02}_{hour:02}{min:02}{sec:02}.csv"
    )
}

/// Unix seconds to (year, month, day, hour, minute, second) UTC. No leap
/// second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;
    loop {
        let in_year = if is_leap(year) { 366 } else { 365 };
        if days < in_year {
            break;
        }
        days -= in_year;
        year += 1;
    }

    let month_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };
    let mut month = 12;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }

    (year, month, days + 1, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::DOUBLE_ZERO;

    fn export(history: &[u8], variant: TableVariant) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, history, variant).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_row() {
        let csv = export(&[], TableVariant::European);
        assert_eq!(
            csv.lines().next().unwrap(),
            r#""Index","Value","Color","Parity","Half","Column","IsZero""#
        );
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_nonzero_row() {
        let csv = export(&[19], TableVariant::European);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, r#""0","19","Red","Odd","High","Col1","false""#);
    }

    #[test]
    fn test_zero_and_double_zero_rows() {
        let csv = export(&[0, DOUBLE_ZERO], TableVariant::American);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], r#""0","0","Green","","","","true""#);
        assert_eq!(lines[2], r#""1","00","Green","","","","true""#);
    }

    #[test]
    fn test_row_per_entry() {
        let csv = export(&[1, 2, 3, 0], TableVariant::European);
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_file_name_format() {
        // 2000-01-01 00:00:00 UTC
        let name = csv_file_name(TableVariant::American, 946_684_800);
        assert_eq!(name, "roulette_american_20000101_000000.csv");
    }

    #[test]
    fn test_secs_to_utc_epoch() {
        assert_eq!(secs_to_utc(0), (1970, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_secs_to_utc_leap_day() {
        // 2024-02-29 12:30:45 UTC
        let secs = 1_709_209_845;
        assert_eq!(secs_to_utc(secs), (2024, 2, 29, 12, 30, 45));
    }
}
