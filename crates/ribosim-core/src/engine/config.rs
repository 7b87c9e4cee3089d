use crate::core::models::codon::is_rna_nucleotide;
use thiserror::Error;

pub const DEFAULT_RIBOSOME_COUNT: usize = 10;
pub const DEFAULT_INITIAL_MRNA_COUNT: usize = 50;
pub const DEFAULT_INITIAL_SEQUENCE: &str = "UUUUUUUUUUAA";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Fixed construction parameters of a translation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub ribosome_count: usize,
    pub initial_mrna_count: usize,
    pub initial_sequence: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            ribosome_count: DEFAULT_RIBOSOME_COUNT,
            initial_mrna_count: DEFAULT_INITIAL_MRNA_COUNT,
            initial_sequence: DEFAULT_INITIAL_SEQUENCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub steps: u64,
    pub log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub simulation: SimulationConfig,
}

#[derive(Default)]
pub struct ModelConfigBuilder {
    ribosome_count: Option<usize>,
    initial_mrna_count: Option<usize>,
    initial_sequence: Option<String>,
}

impl ModelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ribosome_count(mut self, count: usize) -> Self {
        self.ribosome_count = Some(count);
        self
    }
    pub fn initial_mrna_count(mut self, count: usize) -> Self {
        self.initial_mrna_count = Some(count);
        self
    }
    pub fn initial_sequence(mut self, sequence: &str) -> Self {
        self.initial_sequence = Some(sequence.to_string());
        self
    }

    pub fn build(self) -> Result<ModelConfig, ConfigError> {
        let ribosome_count = self
            .ribosome_count
            .ok_or(ConfigError::MissingParameter("ribosome_count"))?;
        if ribosome_count == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "ribosome_count",
                reason: "at least one ribosome is required".to_string(),
            });
        }

        let initial_mrna_count = self
            .initial_mrna_count
            .ok_or(ConfigError::MissingParameter("initial_mrna_count"))?;

        let initial_sequence = self
            .initial_sequence
            .ok_or(ConfigError::MissingParameter("initial_sequence"))?
            .trim()
            .to_ascii_uppercase();
        validate_sequence(&initial_sequence)?;

        Ok(ModelConfig {
            ribosome_count,
            initial_mrna_count,
            initial_sequence,
        })
    }
}

fn validate_sequence(sequence: &str) -> Result<(), ConfigError> {
    if sequence.is_empty() {
        return Err(ConfigError::InvalidParameter {
            parameter: "initial_sequence",
            reason: "sequence is empty".to_string(),
        });
    }
    if let Some((offset, base)) = sequence.char_indices().find(|(_, c)| !is_rna_nucleotide(*c)) {
        return Err(ConfigError::InvalidParameter {
            parameter: "initial_sequence",
            reason: format!("'{}' at offset {} is not an RNA nucleotide (A, C, G, U)", base, offset),
        });
    }
    Ok(())
}

#[derive(Default)]
pub struct RunConfigBuilder {
    model: Option<ModelConfig>,
    steps: Option<u64>,
    log: Option<bool>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = Some(model);
        self
    }
    pub fn steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }
    pub fn log(mut self, log: bool) -> Self {
        self.log = Some(log);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        Ok(RunConfig {
            model: self.model.ok_or(ConfigError::MissingParameter("model"))?,
            simulation: SimulationConfig {
                steps: self.steps.ok_or(ConfigError::MissingParameter("steps"))?,
                log: self.log.unwrap_or(true),
            },
        })
    }
}
