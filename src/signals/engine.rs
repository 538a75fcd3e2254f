//! Batch signal evaluation over many symbols.

use crate::error::SignalError;
use crate::metrics::Metrics;
use crate::models::signal::{Signal, SignalRequest};
use crate::services::volatility::VolatilityProvider;
use crate::strategies::SignalStrategy;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Outcome for one symbol of a batch.
#[derive(Debug)]
pub struct SymbolSignal {
    pub symbol: String,
    pub result: Result<Signal, SignalError>,
}

/// Runs one strategy across symbols, resolving volatility per symbol.
///
/// Each symbol is evaluated independently; an error for one symbol is
/// recorded in its [`SymbolSignal`] and never aborts the batch.
pub struct SignalEngine {
    strategy: Arc<dyn SignalStrategy>,
    volatility: Arc<dyn VolatilityProvider>,
    timeframe: String,
    limit: usize,
    metrics: Option<Arc<Metrics>>,
}

impl SignalEngine {
    pub fn new(
        strategy: Arc<dyn SignalStrategy>,
        volatility: Arc<dyn VolatilityProvider>,
        timeframe: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            strategy,
            volatility,
            timeframe: timeframe.into(),
            limit,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Evaluate a single symbol.
    pub async fn evaluate_symbol(&self, symbol: &str) -> Result<Signal, SignalError> {
        let start = Instant::now();
        let strategy = self.strategy.name();
        let _active = self.metrics.as_ref().map(|metrics| metrics.start_evaluation());

        let mut request = SignalRequest::new(symbol, self.timeframe.as_str(), self.limit);
        request.volatility = self.volatility.get_volatility(symbol).await;
        debug!(symbol = %symbol, strategy, volatility = ?request.volatility, "evaluating signal");

        let result = self.strategy.generate_signal(&request).await;

        if let Some(ref metrics) = self.metrics {
            metrics
                .signal_evaluation_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match &result {
                Ok(signal) => metrics
                    .signals_generated_total
                    .with_label_values(&[strategy, signal.as_str()])
                    .inc(),
                Err(_) => metrics.signal_errors_total.with_label_values(&[strategy]).inc(),
            }
        }

        if let Err(ref e) = result {
            error!(symbol = %symbol, strategy, error = %e, "signal evaluation failed");
        }
        result
    }

    /// Evaluate every symbol, preserving input order in the output.
    pub async fn evaluate_batch(&self, symbols: &[String]) -> Vec<SymbolSignal> {
        let results = join_all(symbols.iter().map(|symbol| self.evaluate_symbol(symbol))).await;

        let batch: Vec<SymbolSignal> = symbols
            .iter()
            .cloned()
            .zip(results)
            .map(|(symbol, result)| SymbolSignal { symbol, result })
            .collect();

        let failed = batch.iter().filter(|s| s.result.is_err()).count();
        info!(
            strategy = self.strategy.name(),
            symbols = batch.len(),
            failed,
            "batch evaluated {} symbols ({} failed)",
            batch.len(),
            failed
        );
        batch
    }
}
