//! Unit tests for the cron scheduler

use std::sync::Arc;
use voltrix::core::scheduler::{
    cron_expression, is_exact_cron_step, JobScheduler, SchedulerError,
};
use voltrix::services::market_data::StaticKlineSource;
use voltrix::services::volatility::FixedVolatility;
use voltrix::signals::engine::SignalEngine;
use voltrix::strategies::RsiAdxStrategy;

fn engine() -> Arc<SignalEngine> {
    let strategy = Arc::new(RsiAdxStrategy::new(Arc::new(StaticKlineSource::new())));
    Arc::new(SignalEngine::new(strategy, Arc::new(FixedVolatility(0.2)), "1h", 30))
}

#[test]
fn test_cron_expression_for_intervals() {
    assert_eq!(cron_expression(30).unwrap(), "*/30 * * * * *");
    assert_eq!(cron_expression(60).unwrap(), "0 */1 * * * *");
    assert_eq!(cron_expression(300).unwrap(), "0 */5 * * * *");
    assert_eq!(cron_expression(7200).unwrap(), "0 0 */2 * * *");
    assert!(matches!(cron_expression(0), Err(SchedulerError::Disabled)));
}

#[test]
fn test_exact_cron_steps() {
    for interval in [1, 15, 30, 60, 300, 900, 3600, 7200, 21_600, 86_400] {
        assert!(is_exact_cron_step(interval), "interval {}", interval);
    }
    // */45 seconds fires at :00 and :45, 90s collapses to every minute,
    // and */30 hours fires once a day
    for interval in [0, 45, 90, 420, 5400, 108_000, 172_800] {
        assert!(!is_exact_cron_step(interval), "interval {}", interval);
    }
}

#[test]
fn test_scheduler_accepts_uneven_interval() {
    let scheduler = JobScheduler::new(engine(), vec!["BTCUSDT".to_string()], 45);
    assert!(scheduler.is_ok());
}

#[test]
fn test_scheduler_rejects_zero_interval() {
    let result = JobScheduler::new(engine(), vec!["BTCUSDT".to_string()], 0);
    assert!(matches!(result, Err(SchedulerError::Disabled)));
}

#[tokio::test]
async fn test_scheduler_start_stop() {
    let scheduler = JobScheduler::new(engine(), vec!["BTCUSDT".to_string()], 300).unwrap();
    assert!(!scheduler.is_running().await);

    scheduler.start().await;
    assert!(scheduler.is_running().await);

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}
