//! Cron-based scheduler for periodic batch evaluation

use crate::signals::engine::SignalEngine;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Convert an interval to a six-field cron expression (seconds first).
///
/// Intervals are truncated to whole minutes from 60s and to whole hours from 3600s.
pub fn cron_expression(interval_seconds: u64) -> Result<String, SchedulerError> {
    match interval_seconds {
        0 => Err(SchedulerError::Disabled),
        s if s < 60 => Ok(format!("*/{} * * * * *", s)),
        s if s < 3600 => Ok(format!("0 */{} * * * *", s / 60)),
        s => Ok(format!("0 0 */{} * * *", s / 3600)),
    }
}

/// Whether the cron expression for this interval fires at exactly that
/// interval. Steps that do not divide their field (60 seconds, 60 minutes,
/// 24 hours) reset at the field boundary and leave uneven gaps.
pub fn is_exact_cron_step(interval_seconds: u64) -> bool {
    match interval_seconds {
        0 => false,
        s if s < 60 => 60 % s == 0,
        s if s < 3600 => s % 60 == 0 && 60 % (s / 60) == 0,
        s => s % 3600 == 0 && 24 % (s / 3600) == 0,
    }
}

/// Scheduler that periodically evaluates every symbol through the engine
pub struct JobScheduler {
    engine: Arc<SignalEngine>,
    symbols: Vec<String>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    pub fn new(
        engine: Arc<SignalEngine>,
        symbols: Vec<String>,
        interval_seconds: u64,
    ) -> Result<Self, SchedulerError> {
        let cron_expr = cron_expression(interval_seconds)?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.clone(),
            reason: e.to_string(),
        })?;

        if !is_exact_cron_step(interval_seconds) {
            warn!(
                interval = interval_seconds,
                cron = %cron_expr,
                "JobScheduler: interval {}s is not an exact cron step, ticks will be uneven",
                interval_seconds
            );
        }

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            symbols = ?symbols,
            "JobScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            engine,
            symbols,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler loop in a background task
    pub async fn start(&self) {
        let engine = self.engine.clone();
        let symbols = self.symbols.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: started, waiting for cron schedule...");

            loop {
                match schedule.upcoming(chrono::Utc).next() {
                    Some(next_tick) => {
                        let wait = (next_tick - chrono::Utc::now()).to_std().unwrap_or_default();
                        tokio::time::sleep(wait).await;
                    }
                    None => {
                        warn!("JobScheduler: schedule has no upcoming ticks");
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!(
                    symbol_count = symbols.len(),
                    "JobScheduler: cron tick, evaluating {} symbols",
                    symbols.len()
                );

                for outcome in engine.evaluate_batch(&symbols).await {
                    if let Ok(signal) = outcome.result {
                        info!(symbol = %outcome.symbol, signal = %signal, "JobScheduler: signal");
                    }
                }
            }
        });

        let mut slot = self.handle.write().await;
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        info!("JobScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
