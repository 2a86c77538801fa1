//! Integration tests for roumate-core.
//!
//! These tests exercise the full tracking pipeline:
//! storage hydration → input → window selection → aggregation → undo/reset.

use roumate_core::{
    CancelToken, DOUBLE_ZERO, JsonFileStorage, MemoryStorage, StorageAdapter, TableSession,
    TableVariant, TestRunConfig, parse_transcript, select_window, simulate, write_csv,
};
use std::time::Duration;

fn memory_session(variant: TableVariant) -> TableSession {
    TableSession::new(variant, Box::new(MemoryStorage::new()), None)
}

#[test]
fn full_pipeline_from_manual_input() {
    let mut s = memory_session(TableVariant::European);
    for n in [1, 2, 3, 0] {
        s.enter(n).unwrap();
    }

    let report = s.aggregates();
    assert_eq!(report.len, 4);

    // Color distribution: Red {1,3} = 50%, Black {2} = 25%, Zero = 25%.
    assert_eq!(report.distribution.colors.red.percent, 50.0);
    assert_eq!(report.distribution.colors.black.percent, 25.0);
    assert_eq!(report.distribution.zero.percent, 25.0);

    // Trailing zero: color currents are 0, the Zero axis runs at 1.
    assert_eq!(report.streaks.red.current, 0);
    assert_eq!(report.streaks.black.current, 0);
    assert_eq!(report.streaks.zero.current, 1);

    // Trends restart at 0 and carry one point per entry.
    assert_eq!(report.trends.color.len(), 5);
    assert_eq!(report.trends.color[0], 0);
}

#[test]
fn window_narrows_every_view() {
    let mut s = memory_session(TableVariant::European);
    s.enter_many(&[5, 5, 5, 19, 20]).unwrap();

    s.set_window(2).unwrap();
    let report = s.aggregates();
    assert_eq!(report.len, 2);
    assert_eq!(report.frequency.count(5), 0);
    assert_eq!(report.trends.half.len(), 3);
    // Only 19 and 20 are visible; the 5-streak is outside the window.
    assert_eq!(report.streaks.high.longest, 2);
    assert_eq!(report.streaks.low.longest, 0);
}

#[test]
fn double_zero_breaks_streaks_on_american_tables() {
    let mut s = memory_session(TableVariant::American);
    s.enter_many(&[1, 3, DOUBLE_ZERO, 5]).unwrap();

    let report = s.aggregates();
    assert_eq!(report.streaks.red.longest, 2);
    assert_eq!(report.streaks.red.current, 1);
    assert_eq!(report.frequency.count(DOUBLE_ZERO), 1);
}

#[test]
fn history_persists_across_sessions() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let storage = JsonFileStorage::new(tmp.path(), TableVariant::European);
        let mut s = TableSession::new(TableVariant::European, Box::new(storage), None);
        s.enter_many(&[7, 9, 5]).unwrap();
        s.enter(0).unwrap();
        s.undo().unwrap();
    }

    // A new session over the same directory sees the surviving history.
    let storage = JsonFileStorage::new(tmp.path(), TableVariant::European);
    let s = TableSession::new(TableVariant::European, Box::new(storage), None);
    assert_eq!(s.history(), &[7, 9, 5]);
    assert_eq!(s.aggregates().streaks.red.longest, 3);
    assert_eq!(s.aggregates().streaks.odd.current, 3);
}

#[test]
fn variants_keep_separate_histories() {
    let tmp = tempfile::tempdir().unwrap();

    let mut eu = TableSession::new(
        TableVariant::European,
        Box::new(JsonFileStorage::new(tmp.path(), TableVariant::European)),
        None,
    );
    let mut us = TableSession::new(
        TableVariant::American,
        Box::new(JsonFileStorage::new(tmp.path(), TableVariant::American)),
        None,
    );
    eu.enter(12).unwrap();
    us.enter(DOUBLE_ZERO).unwrap();

    assert_eq!(eu.history(), &[12]);
    assert_eq!(us.history(), &[DOUBLE_ZERO]);
}

#[test]
fn speech_tokens_feed_the_same_entry_point() {
    let mut s = memory_session(TableVariant::American);
    for n in parse_transcript("seven um double zero nineteen 19", TableVariant::American) {
        s.enter(n).unwrap();
    }
    // "nineteen" is not a recognized token; "19" is.
    assert_eq!(s.history(), &[7, DOUBLE_ZERO, 0, 19]);
}

#[test]
fn simulated_run_drives_live_aggregates() {
    let mut s = memory_session(TableVariant::European);
    let config = TestRunConfig {
        count: 80,
        seed: Some(7),
        delay_override: Some(Duration::ZERO),
        ..Default::default()
    };
    let summary = simulate::run(&mut s, &config, &CancelToken::new()).unwrap();

    assert_eq!(summary.appended, 80);
    let report = s.aggregates();
    assert_eq!(report.len, 80);
    assert_eq!(report.frequency.counts.iter().sum::<u64>(), 80);

    // Every scheme's partitions plus zero account for the whole window.
    let d = &report.distribution;
    assert_eq!(
        d.colors.red.count + d.colors.black.count + d.zero.count,
        80
    );
}

#[test]
fn window_selector_contract_over_stored_history() {
    let mut storage = MemoryStorage::new();
    storage.save_all(&[1, 2, 3, 4, 5, 6]).unwrap();
    let history = storage.load().unwrap();

    assert_eq!(select_window(&history, 0).unwrap().len(), 6);
    assert_eq!(select_window(&history, 4).unwrap(), &[3, 4, 5, 6]);
    assert_eq!(select_window(&history, 100).unwrap().len(), 6);
    assert!(select_window(&history, -1).is_err());
}

#[test]
fn csv_export_matches_history() {
    let mut s = memory_session(TableVariant::American);
    s.enter_many(&[1, DOUBLE_ZERO, 24]).unwrap();

    let mut buf = Vec::new();
    write_csv(&mut buf, s.history(), s.variant()).unwrap();
    let csv = String::from_utf8(buf).unwrap();

    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().nth(2).unwrap().contains(r#""00""#));
    assert!(csv.lines().nth(3).unwrap().contains(r#""Black""#));
}
