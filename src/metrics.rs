//! Prometheus metrics for signal evaluation.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub signals_generated_total: IntCounterVec,
    pub signal_errors_total: IntCounterVec,
    pub signal_evaluations_active: IntGauge,
    pub signal_evaluation_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let signals_generated_total = IntCounterVec::new(
            Opts::new("signals_generated_total", "Signals emitted, by strategy and signal"),
            &["strategy", "signal"],
        )?;
        let signal_errors_total = IntCounterVec::new(
            Opts::new("signal_errors_total", "Signal requests that returned an error"),
            &["strategy"],
        )?;
        let signal_evaluations_active = IntGauge::new(
            "signal_evaluations_active",
            "Signal evaluations currently in progress",
        )?;
        let signal_evaluation_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "signal_evaluation_duration_seconds",
            "Time spent producing one signal, including the kline fetch",
        ))?;

        registry.register(Box::new(signals_generated_total.clone()))?;
        registry.register(Box::new(signal_errors_total.clone()))?;
        registry.register(Box::new(signal_evaluations_active.clone()))?;
        registry.register(Box::new(signal_evaluation_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            signals_generated_total,
            signal_errors_total,
            signal_evaluations_active,
            signal_evaluation_duration_seconds,
        })
    }

    /// Mark one evaluation as in flight until the returned guard is dropped.
    pub fn start_evaluation(&self) -> ActiveEvaluation {
        self.signal_evaluations_active.inc();
        ActiveEvaluation {
            gauge: self.signal_evaluations_active.clone(),
        }
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Decrements `signal_evaluations_active` on drop, including when the
/// evaluation future is cancelled.
pub struct ActiveEvaluation {
    gauge: IntGauge,
}

impl Drop for ActiveEvaluation {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
