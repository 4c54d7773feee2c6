//! Crowdscan
//!
//! Runs one scan over Binance USDT-M perpetuals and writes per-tier CSV
//! reports plus a JSON summary.

use crowdscan::config::{get_environment, Config};
use crowdscan::core::runtime::{RuntimeConfig, ScanRuntime};
use crowdscan::logging;
use crowdscan::metrics::Metrics;
use crowdscan::report::{CsvReportSink, ReportSink};
use crowdscan::services::binance::{BinanceFuturesSource, BinanceRestClient};
use crowdscan::services::market_data::MarketDataSource;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = get_environment();
    info!(environment = %env, "Starting crowdscan");

    let config = Config::from_env()?;
    let runtime_config = RuntimeConfig::from_env();
    info!(
        interval = %config.interval,
        window_length = config.window_length,
        score_mode = ?config.scoring.mode,
        base_url = %runtime_config.base_url,
        report_dir = %runtime_config.report_dir.display(),
        "Configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let client = Arc::new(BinanceRestClient::new(runtime_config.base_url.clone()));
    let source: Arc<dyn MarketDataSource> = Arc::new(BinanceFuturesSource::new(client));

    let runtime = ScanRuntime::new(source, config)
        .with_symbols(runtime_config.symbols.clone())
        .with_concurrency(runtime_config.concurrency)
        .with_metrics(metrics.clone());

    let report = tokio::select! {
        report = runtime.run_once() => report?,
        _ = signal::ctrl_c() => {
            warn!("Interrupted, discarding in-flight evaluations");
            return Ok(());
        }
    };

    if report.evaluations.is_empty() {
        warn!(skipped = report.skipped.len(), "No instrument produced an evaluation");
    }

    let mut sink = CsvReportSink::new(&runtime_config.report_dir);
    let outcome = sink.write(&report.evaluations)?;

    for summary in &outcome.summaries {
        info!(
            tier = %summary.tier,
            count = summary.count,
            mean_rsi = summary.mean_rsi,
            mean_rating = summary.mean_rating,
            mean_score = summary.mean_score,
            "Tier summary"
        );
    }
    for path in &outcome.files {
        info!(path = %path.display(), "Report written");
    }

    match metrics.export() {
        Ok(text) => debug!(metrics = %text, "Scan metrics"),
        Err(e) => warn!(error = %e, "Failed to render metrics"),
    }

    Ok(())
}
