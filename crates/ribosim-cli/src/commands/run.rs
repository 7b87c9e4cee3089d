use crate::cli::{OutputFormat, RunArgs};
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ribosim::engine::progress::ProgressReporter;
use ribosim::workflows::{self, simulate::SimulationResult};
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;
    info!(
        "Model: {} ribosome(s), {} mRNA(s) of '{}'; {} step(s).",
        final_config.model.ribosome_count,
        final_config.model.initial_mrna_count,
        final_config.model.initial_sequence,
        final_config.simulation.steps
    );

    let reporter = if args.no_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(CliProgressHandler::new().get_callback())
    };

    info!("Invoking the core simulation workflow...");
    let result = workflows::simulate::run(&final_config, &reporter)?;

    if result.trajectory.is_none() {
        warn!("Trajectory logging was disabled; only final counts are reported.");
    }

    let rendered = render(&result, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!(
                "✓ Simulation of {} step(s) written to: {}",
                result.steps_taken,
                path.display()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn render(result: &SimulationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| CliError::Serialization(e.to_string())),
        OutputFormat::Toml => {
            toml::to_string_pretty(result).map_err(|e| CliError::Serialization(e.to_string()))
        }
    }
}
