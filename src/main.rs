//! cleanbench CLI entry point

use anyhow::Result;
use cleanbench::config::cli::Cli;
use cleanbench::config::{toml, validator};
use cleanbench::output::{json, text};
use cleanbench::{BenchError, Harness};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let config = toml::load_config(&cli).map_err(|e| match e.downcast::<BenchError>() {
        Ok(err) => with_stage(err),
        Err(e) => e.context("Invalid configuration"),
    })?;
    validator::validate_config(&config).map_err(with_stage)?;

    let harness = Harness::new(config.engine.clone(), config.erase.clone());

    if cli.dry_run {
        let plan = harness
            .plan(&cli.device, &config.parameters, &config.workload)
            .map_err(with_stage)?;
        println!("Dry run - the following commands would run:");
        for invocation in &plan {
            println!("  {}", invocation);
        }
        return Ok(());
    }

    let device = harness.validate_device(&cli.device).map_err(with_stage)?;
    let result = harness
        .run_on(&device, &config.parameters, &config.workload)
        .map_err(with_stage)?;

    if cli.json {
        let record = json::JsonResult::new(&device, &result, &config.parameters, &config.workload);
        println!("{}", json::format_result(&record)?);
    } else {
        text::print_result(&result);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Name the failing stage in the top-level error
fn with_stage(err: BenchError) -> anyhow::Error {
    let stage = match err.stage() {
        Some(stage) => format!("{} stage failed", stage),
        None => "invalid arguments".to_string(),
    };
    anyhow::Error::new(err).context(stage)
}
