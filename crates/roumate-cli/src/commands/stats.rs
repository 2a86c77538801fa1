//! `roumate stats` — render the aggregate report as text tables.

use std::path::Path;

use roumate_core::{AggregateReport, Share, StreakEntry, TableVariant, outcome_label};

pub fn run(variant: TableVariant, data_dir: &Path, window: i64, json: bool) {
    let mut session = super::open_session(variant, data_dir);
    if let Err(e) = session.set_window(window) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let report = session.aggregates();

    if json {
        match serde_json::to_string_pretty(report) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }

    let window_desc = if window == 0 {
        "all".to_string()
    } else {
        format!("last {window}")
    };
    println!(
        "{} table — {} entries, window: {} ({} shown)",
        variant,
        session.len(),
        window_desc,
        report.len
    );
    println!();
    print_distribution(report);
    println!();
    print_trends(report);
    println!();
    print_hot_numbers(report);
    println!();
    print_streaks(report);
    println!();
    print_combos(report);
}

fn seg(label: &str, share: Share) -> String {
    format!("{label} {:.1}% ({})", share.percent, share.count)
}

fn print_distribution(report: &AggregateReport) {
    let d = &report.distribution;
    let zero = seg("Zero", d.zero);
    println!(
        "Columns   {}   {}   {}   {}",
        seg("Col1", d.columns.col1),
        seg("Col2", d.columns.col2),
        seg("Col3", d.columns.col3),
        zero,
    );
    println!(
        "Dozens    {}   {}   {}   {}",
        seg("1st 12", d.dozens.first),
        seg("2nd 12", d.dozens.second),
        seg("3rd 12", d.dozens.third),
        zero,
    );
    println!(
        "Halves    {}   {}   {}",
        seg("Low", d.halves.low),
        seg("High", d.halves.high),
        zero,
    );
    println!(
        "Colors    {}   {}   {}",
        seg("Red", d.colors.red),
        seg("Black", d.colors.black),
        zero,
    );
    println!(
        "Parity    {}   {}   {}",
        seg("Even", d.parity.even),
        seg("Odd", d.parity.odd),
        zero,
    );
}

fn print_trends(report: &AggregateReport) {
    let t = &report.trends;
    let last = |series: &[i64]| series.last().copied().unwrap_or(0);
    println!(
        "Trend (running ±1 over window): Half {:+}   Color {:+}   Parity {:+}",
        last(&t.half),
        last(&t.color),
        last(&t.parity)
    );
}

fn print_hot_numbers(report: &AggregateReport) {
    let mut pockets: Vec<(u8, u64)> = report
        .frequency
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(n, &c)| (n as u8, c))
        .collect();
    pockets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if pockets.is_empty() {
        println!("Hot numbers: none yet");
        return;
    }
    let line: Vec<String> = pockets
        .iter()
        .take(8)
        .map(|&(n, c)| format!("{} ×{}", outcome_label(n), c))
        .collect();
    println!("Hot numbers: {}", line.join("  "));
}

fn print_streaks(report: &AggregateReport) {
    let s = &report.streaks;
    let rows: [(&str, StreakEntry); 13] = [
        ("Col1", s.col1),
        ("Col2", s.col2),
        ("Col3", s.col3),
        ("1st 12", s.dozen1),
        ("2nd 12", s.dozen2),
        ("3rd 12", s.dozen3),
        ("Low", s.low),
        ("High", s.high),
        ("Red", s.red),
        ("Black", s.black),
        ("Even", s.even),
        ("Odd", s.odd),
        ("Zero", s.zero),
    ];

    println!("{:<10} {:>7} {:>7}", "Streaks", "longest", "current");
    for (label, entry) in rows {
        println!("  {:<8} {:>7} {:>7}", label, entry.longest, entry.current);
    }
}

fn print_combos(report: &AggregateReport) {
    println!("{:<38} last seen", "Combinations");
    for row in &report.recency.combos {
        let numbers: Vec<String> = row
            .combo
            .member_numbers()
            .iter()
            .map(|n| n.to_string())
            .collect();
        let label = format!("{} ({})", row.combo, numbers.join(", "));
        let seen = match row.entries_since {
            Some(0) => "just now".to_string(),
            Some(k) => format!("{k} ago"),
            None => "—".to_string(),
        };
        println!("  {label:<36} {seen}");
    }
}
