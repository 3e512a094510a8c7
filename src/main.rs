//! statarb - Volatility-band pairs trading replay
//!
//! Replays recorded daily bars through the configured pairs and paper-executes
//! the resulting target weights.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use statarb_pairs::adapters::cli::{CliApp, Command, RunCmd, ValidateCmd};
use statarb_pairs::adapters::{JsonLinesFeed, JsonLinesTelemetry, PaperExecution, TracingTelemetry};
use statarb_pairs::application::{ReplayOrchestrator, ReplaySummary};
use statarb_pairs::config::{load_config, Config};
use statarb_pairs::ports::TelemetryPort;
use statarb_pairs::strategy::StrategyRunner;

type LogHandle = reload::Handle<EnvFilter, Registry>;

fn main() -> Result<()> {
    // Load .env file if it exists (feed path overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let rust_log = std::env::var("RUST_LOG").ok();
    let logging = init_logging(&filter_directive(app.verbose, app.debug, rust_log.as_deref(), None))?;

    match app.command {
        Command::Run(cmd) => {
            let config = load(&cmd.config)?;
            apply_configured_level(&logging, app.verbose, app.debug, rust_log.as_deref(), &config)?;
            run_command(cmd, config)
        }
        Command::Validate(cmd) => {
            let config = load(&cmd.config)?;
            apply_configured_level(&logging, app.verbose, app.debug, rust_log.as_deref(), &config)?;
            validate_command(cmd, config)
        }
    }
}

fn load(path: &Path) -> Result<Config> {
    tracing::debug!("Loading configuration from {}", path.display());
    load_config(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Flags win over RUST_LOG, which wins over the configured level
fn filter_directive(verbose: bool, debug: bool, rust_log: Option<&str>, configured: Option<&str>) -> String {
    if debug {
        "debug".to_string()
    } else if verbose {
        "info".to_string()
    } else if let Some(env) = rust_log.filter(|v| !v.is_empty()) {
        env.to_string()
    } else {
        configured.unwrap_or("warn").to_string()
    }
}

/// Install the subscriber before the config is read; the filter is reloadable
fn init_logging(directive: &str) -> Result<LogHandle> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;

    Ok(handle)
}

fn apply_configured_level(
    handle: &LogHandle,
    verbose: bool,
    debug: bool,
    rust_log: Option<&str>,
    config: &Config,
) -> Result<()> {
    let directive = filter_directive(verbose, debug, rust_log, Some(&config.logging.level));
    match EnvFilter::try_new(&directive) {
        Ok(filter) => handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("Failed to apply log level: {}", e)),
        Err(e) => {
            tracing::warn!("Ignoring log level '{}': {}", config.logging.level, e);
            Ok(())
        }
    }
}

fn run_command(cmd: RunCmd, config: Config) -> Result<()> {
    let feed_path = match cmd.feed.clone().or_else(|| config.replay.get_feed_path()) {
        Some(path) => path,
        None => bail!(
            "No bar feed configured\n\n\
             Set 'feed_path' under [replay] in {}, export STATARB_FEED_PATH, or pass --feed FILE",
            cmd.config.display()
        ),
    };

    let runner = StrategyRunner::new(config.pair_configs()).context("Invalid pair configuration")?;
    let feed = JsonLinesFeed::open(&feed_path)
        .with_context(|| format!("Failed to open bar feed {}", feed_path.display()))?
        .with_window(config.replay.start_date, config.replay.end_date);
    let execution = PaperExecution::new(config.paper.capital);
    let telemetry: Box<dyn TelemetryPort> = match &cmd.telemetry {
        Some(path) => Box::new(
            JsonLinesTelemetry::create(path)
                .with_context(|| format!("Failed to create telemetry file {}", path.display()))?,
        ),
        None => Box::new(TracingTelemetry),
    };

    tracing::info!("Replaying {} with {} pair(s)", feed_path.display(), runner.len());

    let mut orchestrator = ReplayOrchestrator::new(runner, feed, execution, telemetry);
    let summary = orchestrator.run().context("Replay failed")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, orchestrator.execution());
    }

    Ok(())
}

fn print_summary(summary: &ReplaySummary, paper: &PaperExecution) {
    println!("Replay complete");
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        println!("  Period:  {} .. {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"));
    }
    println!("  Ticks:   {}", summary.ticks);
    println!("  Entries: {}", summary.entries);
    println!("  Exits:   {}", summary.exits);
    if summary.faults > 0 {
        println!("  Blocked entries: {}", summary.faults);
    }
    if summary.skipped > 0 {
        println!("  Skipped feed lines: {}", summary.skipped);
    }
    if summary.execution_errors + summary.telemetry_errors > 0 {
        println!(
            "  Port errors: {} execution, {} telemetry",
            summary.execution_errors, summary.telemetry_errors
        );
    }

    println!();
    println!("Final regimes:");
    for (pair, regime) in &summary.final_regimes {
        println!("  {:<12} {}", pair, regime);
    }

    if !paper.holdings().is_empty() {
        println!();
        println!("Open paper holdings (capital ${:.2}):", paper.capital());
        for (instrument, weight) in paper.holdings() {
            println!(
                "  {:<8} {:+.4}  ${:.2}",
                instrument,
                weight,
                paper.notional(instrument)
            );
        }
    }
}

fn validate_command(cmd: ValidateCmd, config: Config) -> Result<()> {
    StrategyRunner::new(config.pair_configs()).context("Invalid pair configuration")?;

    println!("Configuration OK: {}", cmd.config.display());
    println!("  Paper capital: ${:.2}", config.paper.capital);
    match config.replay.get_feed_path() {
        Some(path) => println!("  Feed: {}", path.display()),
        None => println!("  Feed: (not set)"),
    }
    println!();
    for pair in config.pair_configs() {
        println!(
            "  {:<12} h={:<8} band={} x{} ({})  vol window={}",
            pair.id(),
            pair.hedge_ratio,
            pair.band_window,
            pair.band_multiplier,
            pair.moving_average,
            pair.volatility_window
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_directive(true, true, Some("trace"), Some("error")), "debug");
        assert_eq!(filter_directive(true, false, Some("trace"), Some("error")), "info");
        assert_eq!(filter_directive(false, false, Some("trace"), Some("error")), "trace");
        assert_eq!(filter_directive(false, false, Some(""), Some("error")), "error");
        assert_eq!(filter_directive(false, false, None, Some("error")), "error");
    }

    #[test]
    fn test_default_filter_before_config() {
        assert_eq!(filter_directive(false, false, None, None), "warn");
    }
}
