//! CLI command handling
//!
//! Resolves configuration, runs the requested scenarios and prints the
//! report. Returns the process exit code.

use crate::commands::{Commands, TargetArgs};
use crate::common::config::Config;
use crate::common::Result;
use crate::harness::{Format, Sequencer};
use crate::http::HttpExecutor;
use crate::plan::{load_plan, PlanScenario};
use crate::suite;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run { target, only } => {
            let sequencer = suite::builtin().retain(&only)?;
            run(sequencer, &target).await
        }

        Commands::Plan { path, target } => {
            let plan = load_plan(&path)?;
            tracing::info!(plan = %plan.name, steps = plan.steps.len(), "loaded test plan");
            run(PlanScenario::new(plan).into_sequencer(), &target).await
        }

        Commands::List => {
            for (i, name) in suite::builtin().names().iter().enumerate() {
                println!("{:>2}. {}", i + 1, name);
            }
            Ok(0)
        }
    }
}

/// Run a sequencer against the configured server and print its report
async fn run(sequencer: Sequencer, target: &TargetArgs) -> Result<i32> {
    let config = load_config(target)?;
    let base_url = config.resolve_base_url(target.base_url.as_deref())?;
    let executor = HttpExecutor::new(&base_url, &config.timeouts)?;

    if target.format == Format::Text {
        println!("Starting {}", sequencer.title());
        println!("Base URL: {}", executor.base_url());
    }
    tracing::info!(%base_url, scenarios = sequencer.names().len(), "starting run");

    let report = sequencer.run(&executor, &config).await;
    let summary = report.summarize();

    print!("{}", report.render(target.format, sequencer.title())?);
    tracing::info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        "run finished"
    );

    Ok(summary.exit_code)
}

/// Load the config file and apply command-line overrides
fn load_config(target: &TargetArgs) -> Result<Config> {
    let mut config = match &target.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(secs) = target.connect_timeout {
        config.timeouts.connect_secs = secs;
    }
    if let Some(secs) = target.timeout {
        config.timeouts.request_secs = secs;
    }
    config.timeouts.validate()?;

    Ok(config)
}
