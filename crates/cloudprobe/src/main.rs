use anyhow::{Context, Result};
use clap::Parser;
use cloudprobe_core::{ClientFactory, Config, Outcome, TracingReporter, TracingSink, invoke};
use std::io::IsTerminal;
use tracing::{debug, warn};
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

mod cli;
mod error;

use cli::Cli;

/// Environment variable holding the log level or an `EnvFilter` directive
const LOG_LEVEL_ENV: &str = "CLOUDPROBE_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "debug";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    // Remote failures are already logged; only setup failures change the exit code
    match run(&cli).await {
        Ok(outcome) => {
            debug!(?outcome, "Invocation finished");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.display_with_suggestions());
            std::process::exit(1);
        }
    }
}

fn init_tracing() -> Result<()> {
    let directive =
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let filter = log_filter(&directive);
    let recognized = filter.is_some();

    tracing_subscriber::registry()
        .with(filter.unwrap_or_else(default_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stdout().is_terminal())
                .compact(),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if !recognized {
        warn!(
            "Unrecognized {}='{}', using '{}'",
            LOG_LEVEL_ENV, directive, DEFAULT_LOG_LEVEL
        );
    }
    debug!("Tracing initialized with {}={}", LOG_LEVEL_ENV, directive);
    Ok(())
}

/// Build the log filter from `CLOUDPROBE_LOG_LEVEL`, `None` if it is not usable
fn log_filter(directive: &str) -> Option<EnvFilter> {
    filter_spec(directive).and_then(|spec| EnvFilter::try_new(spec).ok())
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(format!("cloudprobe={0},cloudprobe_core={0}", DEFAULT_LOG_LEVEL))
}

/// A bare level applies to cloudprobe's own crates only, leaving HTTP stack
/// internals quiet. Only values with `=` or `,` are full `EnvFilter` directives.
fn filter_spec(directive: &str) -> Option<String> {
    let directive = directive.trim();

    if directive.contains('=') || directive.contains(',') {
        return Some(directive.to_string());
    }
    if directive.is_empty() {
        return None;
    }

    let level: LevelFilter = directive.parse().ok()?;
    let level = level.to_string().to_ascii_lowercase();
    Some(format!("cloudprobe={0},cloudprobe_core={0}", level))
}

async fn run(cli: &Cli) -> error::Result<Outcome> {
    let config = match &cli.config_file {
        Some(path) => {
            debug!("Loading config from explicit path: {:?}", path);
            Config::load_from_path(path)?
        }
        None => {
            debug!("Loading config from default location");
            Config::load()?
        }
    };

    let name = config.resolve_provider_name(cli.command.provider(), cli.command.preferred_kind())?;
    let provider = config.provider_config(&name, cli.variant)?;
    debug!(
        "Using provider profile '{}' ({}), account variant {}",
        name, provider.kind, cli.variant
    );

    let operation = cli.command.operation();
    let client = ClientFactory::new(TracingSink).create(provider, operation.capability())?;

    Ok(invoke(&client, &operation, &TracingReporter).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped_to_our_crates() {
        assert_eq!(
            filter_spec(" INFO ").as_deref(),
            Some("cloudprobe=info,cloudprobe_core=info")
        );
    }

    #[test]
    fn test_directives_pass_through() {
        assert_eq!(
            filter_spec("cloudprobe_core=trace,reqwest=debug").as_deref(),
            Some("cloudprobe_core=trace,reqwest=debug")
        );
    }

    #[test]
    fn test_unknown_level_words_are_rejected() {
        assert_eq!(filter_spec("warning"), None);
        assert_eq!(filter_spec("verbose"), None);
        assert_eq!(filter_spec("  "), None);
        assert!(log_filter("warning").is_none());
    }

    #[test]
    fn test_default_level_builds_a_filter() {
        assert!(log_filter(DEFAULT_LOG_LEVEL).is_some());
    }
}
