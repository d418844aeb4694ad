use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use uniquegen::cli::{Cli, Command};
use uniquegen::config::Config;
use uniquegen::{ExhaustionPolicy, SampleArg, SampleDelegate, UniquenessTracker};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > WARN
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") | None => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", other);
            tracing::Level::WARN
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }
    if cli.repeat {
        config.policy = ExhaustionPolicy::Repeat;
    }
    info!(max_retries = config.max_retries, policy = %config.policy, "uniquegen starting");

    let delegate = match cli.seed {
        Some(seed) => SampleDelegate::seeded(seed),
        None => SampleDelegate::new(),
    };
    let mut tracker = UniquenessTracker::from_config(delegate, &config);

    let (operation, args, exclude, count) = match cli.command {
        Command::Pick {
            candidates,
            count,
            exclude,
        } => {
            debug!("main: matched Pick command");
            let args: Vec<SampleArg> = candidates.into_iter().map(SampleArg::Text).collect();
            ("pick", args, exclude, count)
        }
        Command::Number {
            min,
            max,
            count,
            exclude,
        } => {
            debug!("main: matched Number command");
            let exclude: Vec<String> = exclude.iter().map(i64::to_string).collect();
            ("number", vec![SampleArg::Int(min), SampleArg::Int(max)], exclude, count)
        }
    };

    tracker.exclude(operation, &args, exclude);

    for n in 0..count {
        let value = tracker
            .call(operation, &args)
            .context(format!("Failed to produce value {} of {}", n + 1, count))?;
        println!("{}", value);
    }

    eprintln!("{} Produced {} unique {} values", "✓".green(), count, operation.cyan());
    Ok(())
}
