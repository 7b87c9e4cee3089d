use super::config::ModelConfig;
use super::error::EngineError;
use super::logger::{Snapshot, TrajectoryLogger, TrajectoryOutput};
use super::process::{Configure, Process};
use super::processes::translation::{TRANSLATION_PROCESS_NAME, Translation, TranslationConfig};
use super::progress::{Progress, ProgressReporter};
use crate::core::models::entity::{EntityKind, Mrna, Ribosome};
use crate::core::registry::EntityRegistry;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Registry and processes are built; no step has run yet.
    Initialized,
    /// A simulation is in progress.
    Running,
    /// The last simulation finished; output may be assembled.
    Completed,
    /// A process failed mid-step. Registry and trajectory remain inspectable.
    Aborted,
}

/// The simulation orchestrator.
///
/// Owns the entity registry, the ordered list of processes and the trajectory
/// logger. Each [`Model::step`] lends the registry to every process in
/// registration order; [`Model::simulate`] repeats steps and records a snapshot
/// after each one.
pub struct Model {
    registry: EntityRegistry,
    processes: Vec<Box<dyn Process>>,
    logger: TrajectoryLogger,
    state: ModelState,
    steps_taken: u64,
}

impl Model {
    /// Builds the reference translation model: `ribosome_count` ribosomes, `initial_mrna_count`
    /// strands carrying `initial_sequence`, and a single configured translation process.
    pub fn new(config: &ModelConfig) -> Result<Self, EngineError> {
        let mut model = Self::empty();

        let mut ribosome_keys = Vec::with_capacity(config.ribosome_count);
        for i in 0..config.ribosome_count {
            let key = EntityKind::Ribosome.key_for(i);
            model.registry.register(&key, Ribosome::new(i, &key).into())?;
            ribosome_keys.push(key);
        }

        let mut mrna_keys = Vec::with_capacity(config.initial_mrna_count);
        for i in 0..config.initial_mrna_count {
            let key = EntityKind::Mrna.key_for(i);
            model
                .registry
                .register(&key, Mrna::new(i, &key, &config.initial_sequence).into())?;
            mrna_keys.push(key);
        }

        let mut translation = Translation::new(1, TRANSLATION_PROCESS_NAME);
        translation.configure(TranslationConfig {
            mrna_keys,
            ribosome_keys,
        })?;
        model.add_process(Box::new(translation))?;

        info!(
            ribosomes = config.ribosome_count,
            mrnas = config.initial_mrna_count,
            sequence = %config.initial_sequence,
            "Model initialized."
        );
        Ok(model)
    }

    /// Creates a model with an empty registry and no processes.
    pub fn empty() -> Self {
        Self {
            registry: EntityRegistry::new(),
            processes: Vec::new(),
            logger: TrajectoryLogger::new(),
            state: ModelState::Initialized,
            steps_taken: 0,
        }
    }

    /// Appends a configured process to the dispatch list.
    ///
    /// # Errors
    ///
    /// Fails if the model has already stepped, if the process is not configured, or
    /// if a process with the same name is registered.
    pub fn add_process(&mut self, process: Box<dyn Process>) -> Result<(), EngineError> {
        if self.state != ModelState::Initialized || self.steps_taken > 0 {
            return Err(EngineError::InvalidState {
                operation: "add a process",
                state: self.state,
            });
        }
        if !process.is_configured() {
            return Err(EngineError::NotConfigured {
                process: process.name().to_string(),
            });
        }
        if self.processes.iter().any(|p| p.name() == process.name()) {
            return Err(EngineError::DuplicateProcess {
                name: process.name().to_string(),
            });
        }
        debug!(process = process.name(), id = process.id(), "Process registered.");
        self.processes.push(process);
        Ok(())
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable registry access for assembling a custom model before simulation.
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn logger(&self) -> &TrajectoryLogger {
        &self.logger
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn process_names(&self) -> Vec<&str> {
        self.processes.iter().map(|p| p.name()).collect()
    }

    /// Runs every registered process once, in registration order.
    ///
    /// The first failing process aborts the step and leaves the model in
    /// [`ModelState::Aborted`]; processes after it do not run.
    pub fn step(&mut self) -> Result<(), EngineError> {
        self.ensure_not_aborted("step")?;
        for process in self.processes.iter_mut() {
            if let Err(e) = process.update(&mut self.registry) {
                warn!(
                    process = process.name(),
                    step = self.steps_taken + 1,
                    error = %e,
                    "Process update failed; aborting."
                );
                self.state = ModelState::Aborted;
                return Err(e);
            }
        }
        self.steps_taken += 1;
        Ok(())
    }

    pub fn simulate(&mut self, steps: u64, log: bool) -> Result<(), EngineError> {
        self.simulate_with_progress(steps, log, &ProgressReporter::new())
    }

    /// Runs `steps` steps, recording a snapshot after each one when `log` is set.
    ///
    /// A failing step is propagated as-is; snapshots of earlier steps are kept.
    #[instrument(skip_all, name = "simulation", fields(steps = steps, log = log))]
    pub fn simulate_with_progress(
        &mut self,
        steps: u64,
        log: bool,
        reporter: &ProgressReporter,
    ) -> Result<(), EngineError> {
        self.ensure_not_aborted("simulate")?;
        self.state = ModelState::Running;
        info!("Simulating {} step(s).", steps);

        reporter.report(Progress::StepsStart { total: steps });
        for _ in 0..steps {
            if let Err(e) = self.step() {
                reporter.report(Progress::Aborted {
                    step: self.steps_taken + 1,
                });
                return Err(e);
            }
            if log {
                self.logger
                    .add_step(Snapshot::capture(self.steps_taken, &self.registry));
            }
            reporter.report(Progress::StepCompleted {
                step: self.steps_taken,
                entities: self.registry.len(),
            });
        }
        reporter.report(Progress::StepsFinish);

        self.state = ModelState::Completed;
        info!(
            total_steps = self.steps_taken,
            logged = self.logger.len(),
            entities = self.registry.len(),
            "Simulation completed."
        );
        Ok(())
    }

    /// Assembles the logged trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoData`] if no step has been logged.
    pub fn output(&self) -> Result<TrajectoryOutput, EngineError> {
        self.logger.output()
    }

    fn ensure_not_aborted(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.state == ModelState::Aborted {
            return Err(EngineError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}
