//! Unit tests for tier summaries and the CSV report sink

use chrono::{TimeZone, Utc};
use crowdscan::config::Config;
use crowdscan::models::evaluation::{Evaluation, QualityTier};
use crowdscan::report::{summarize_by_tier, CsvReportSink, ReportSink};
use crowdscan::signals::engine::SignalEngine;

use crate::fixtures::{assert_close, falling_candles, positioning, rising_candles};

fn evaluation(instrument: &str, falling: bool, long: f64) -> Evaluation {
    let candles = if falling {
        falling_candles(30)
    } else {
        rising_candles(30)
    };
    SignalEngine::evaluate(
        instrument,
        &candles,
        Some(&positioning(long, 1.0 - long)),
        &Config::default(),
    )
    .unwrap()
}

fn sample_evaluations() -> Vec<Evaluation> {
    vec![
        evaluation("AAAUSDT", true, 0.8),
        evaluation("BBBUSDT", true, 0.75),
        evaluation("CCCUSDT", false, 0.5),
    ]
}

#[test]
fn test_summary_groups_highest_tier_first() {
    let evaluations = sample_evaluations();
    let summaries = summarize_by_tier(&evaluations);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].tier, QualityTier::Cr4);
    assert_eq!(summaries[0].count, 2);
    assert_close(summaries[0].mean_rsi, 0.0);
    assert_close(summaries[0].mean_rating, 7.75);

    assert_eq!(summaries[1].tier, QualityTier::Cr1);
    assert_eq!(summaries[1].count, 1);
    assert_eq!(summaries[1].status_counts.get("Hold"), Some(&1));
}

#[test]
fn test_summary_of_nothing_is_empty() {
    assert!(summarize_by_tier(&[]).is_empty());
}

#[test]
fn test_csv_sink_writes_one_file_per_tier() {
    let dir = tempfile::tempdir().unwrap();
    let stamp = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
    let mut sink = CsvReportSink::new(dir.path()).with_stamp(stamp);

    let outcome = sink.write(&sample_evaluations()).unwrap();

    let names: Vec<String> = outcome
        .files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "signals_05032024_1407_4CR.csv",
            "signals_05032024_1407_1CR.csv",
            "signals_05032024_1407_summary.json",
        ]
    );

    let mut reader = csv::Reader::from_path(&outcome.files[0]).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "symbol");
    assert!(headers.iter().any(|h| h == "prediction_status"));

    let symbol_col = headers.iter().position(|h| h == "symbol").unwrap();
    let quality_col = headers.iter().position(|h| h == "quality").unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][symbol_col], "AAAUSDT");
    assert_eq!(&rows[0][quality_col], "4CR");

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&outcome.files[2]).unwrap()).unwrap();
    assert_eq!(summary[0]["tier"], "4CR");
    assert_eq!(summary[0]["count"], 2);
    assert_eq!(outcome.summaries.len(), 2);
}

#[test]
fn test_csv_sink_with_no_evaluations_writes_only_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = CsvReportSink::new(dir.path().join("nested"));

    let outcome = sink.write(&[]).unwrap();
    assert_eq!(outcome.files.len(), 1);
    assert!(outcome.files[0].exists());
    assert!(outcome.summaries.is_empty());
}
