use dotenvy::dotenv;
use voltrix::core::runtime::{RuntimeConfig, SignalRuntime};
use voltrix::logging;
use voltrix::signals::SymbolSignal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = RuntimeConfig::from_env()?;
    let runtime = SignalRuntime::from_config(config, None)?;

    println!(
        "Strategy: {} ({} @ {}, {} candles)",
        runtime.config().strategy,
        runtime.config().symbols.join(", "),
        runtime.config().timeframe,
        runtime.config().limit
    );
    for outcome in runtime.run_once().await {
        print_signal(&outcome);
    }

    Ok(())
}

fn print_signal(outcome: &SymbolSignal) {
    match &outcome.result {
        Ok(signal) => println!("  {}: {}", outcome.symbol, signal),
        Err(e) => println!("  {}: error: {}", outcome.symbol, e),
    }
}
