use crate::engine::config::RunConfig;
use crate::engine::error::EngineError;
use crate::engine::logger::TrajectoryOutput;
use crate::engine::model::Model;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub steps_taken: u64,
    /// Entity count per kind label once the last step has run.
    pub final_counts: BTreeMap<String, usize>,
    /// The assembled trajectory; `None` when logging was disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<TrajectoryOutput>,
}

#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(config: &RunConfig, reporter: &ProgressReporter) -> Result<SimulationResult, EngineError> {
    // === Phase 1: Build registry and processes ===
    reporter.report(Progress::PhaseStart {
        name: "Initialization",
    });
    let mut model = Model::new(&config.model)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Step the model ===
    reporter.report(Progress::PhaseStart { name: "Simulation" });
    model.simulate_with_progress(config.simulation.steps, config.simulation.log, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Assemble results ===
    let trajectory = if config.simulation.log {
        Some(model.output()?)
    } else {
        None
    };
    let final_counts = model
        .registry()
        .count_by_kind()
        .into_iter()
        .map(|(kind, count)| (kind.label().to_string(), count))
        .collect();

    info!(
        "Workflow complete after {} step(s).",
        model.steps_taken()
    );
    Ok(SimulationResult {
        steps_taken: model.steps_taken(),
        final_counts,
        trajectory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{ModelConfig, RunConfigBuilder};
    use std::sync::Mutex;

    fn run_config(steps: u64, log: bool) -> RunConfig {
        RunConfigBuilder::new()
            .model(ModelConfig::default())
            .steps(steps)
            .log(log)
            .build()
            .unwrap()
    }

    #[test]
    fn run_returns_trajectory_and_final_counts() {
        let result = run(&run_config(10, true), &ProgressReporter::new()).unwrap();

        assert_eq!(result.steps_taken, 10);
        assert_eq!(result.final_counts["Ribosome"], 10);
        assert_eq!(result.final_counts["MRNA"], 50);
        let trajectory = result.trajectory.unwrap();
        assert_eq!(trajectory.steps.len(), 10);
        assert_eq!(
            trajectory.entity_counts["Protein"].last().copied().unwrap_or(0),
            result.final_counts.get("Protein").copied().unwrap_or(0)
        );
    }

    #[test]
    fn run_without_logging_has_no_trajectory() {
        let result = run(&run_config(3, false), &ProgressReporter::new()).unwrap();

        assert!(result.trajectory.is_none());
        assert_eq!(result.steps_taken, 3);
    }

    #[test]
    fn run_with_zero_logged_steps_reports_no_data() {
        let result = run(&run_config(0, true), &ProgressReporter::new());

        assert_eq!(result, Err(EngineError::NoData));
    }

    #[test]
    fn run_reports_both_phases() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));

        run(&run_config(1, true), &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Initialization", "Simulation"]
        );
    }
}
