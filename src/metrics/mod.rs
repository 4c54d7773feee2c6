//! Prometheus metrics for scan runs

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub evaluations_total: IntCounter,
    pub evaluations_by_tier: IntCounterVec,
    pub instruments_skipped_total: IntCounterVec,
    pub evaluations_in_flight: IntGauge,
    pub evaluation_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::with_opts(Opts::new(
            "crowdscan_scans_total",
            "Completed scan runs",
        ))?;
        let evaluations_total = IntCounter::with_opts(Opts::new(
            "crowdscan_evaluations_total",
            "Instruments evaluated successfully",
        ))?;
        let evaluations_by_tier = IntCounterVec::new(
            Opts::new("crowdscan_evaluations_by_tier", "Evaluations per quality tier"),
            &["tier"],
        )?;
        let instruments_skipped_total = IntCounterVec::new(
            Opts::new(
                "crowdscan_instruments_skipped_total",
                "Instruments skipped, labelled by reason",
            ),
            &["reason"],
        )?;
        let evaluations_in_flight = IntGauge::with_opts(Opts::new(
            "crowdscan_evaluations_in_flight",
            "Instruments currently being fetched or evaluated",
        ))?;
        let evaluation_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "crowdscan_evaluation_duration_seconds",
                "Fetch plus evaluation latency per instrument",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(evaluations_by_tier.clone()))?;
        registry.register(Box::new(instruments_skipped_total.clone()))?;
        registry.register(Box::new(evaluations_in_flight.clone()))?;
        registry.register(Box::new(evaluation_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            evaluations_total,
            evaluations_by_tier,
            instruments_skipped_total,
            evaluations_in_flight,
            evaluation_duration_seconds,
        })
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
