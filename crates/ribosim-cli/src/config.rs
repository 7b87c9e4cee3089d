pub mod defaults;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use ribosim::engine::config as core_config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialModelConfig {
    #[serde(rename = "ribosome-count", skip_serializing_if = "Option::is_none")]
    ribosome_count: Option<usize>,
    #[serde(rename = "initial-mrna-count", skip_serializing_if = "Option::is_none")]
    initial_mrna_count: Option<usize>,
    #[serde(rename = "initial-sequence", skip_serializing_if = "Option::is_none")]
    initial_sequence: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialSimulationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<bool>,
}

/// The on-disk configuration file; every field may be omitted.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<PartialModelConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<PartialSimulationConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// A fully populated configuration holding the built-in defaults.
    pub fn from_defaults() -> Self {
        let defaults = DefaultsConfig::default();
        Self {
            model: Some(PartialModelConfig {
                ribosome_count: Some(defaults.ribosome_count),
                initial_mrna_count: Some(defaults.initial_mrna_count),
                initial_sequence: Some(defaults.initial_sequence),
            }),
            simulation: Some(PartialSimulationConfig {
                steps: Some(defaults.steps),
                log: Some(defaults.log),
            }),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Resolves the final configuration. Precedence, highest first: dedicated CLI
    /// flags, `--set` values, the config file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<core_config::RunConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let model_config = self.model.take().unwrap_or_default();
        let sim_config = self.simulation.take().unwrap_or_default();

        let model = core_config::ModelConfigBuilder::new()
            .ribosome_count(
                args.ribosomes
                    .or(model_config.ribosome_count)
                    .unwrap_or(defaults.ribosome_count),
            )
            .initial_mrna_count(
                args.mrnas
                    .or(model_config.initial_mrna_count)
                    .unwrap_or(defaults.initial_mrna_count),
            )
            .initial_sequence(
                args.sequence
                    .as_deref()
                    .or(model_config.initial_sequence.as_deref())
                    .unwrap_or(&defaults.initial_sequence),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let log = if args.no_log {
            false
        } else {
            sim_config.log.unwrap_or(defaults.log)
        };

        core_config::RunConfigBuilder::new()
            .model(model)
            .steps(args.steps.or(sim_config.steps).unwrap_or(defaults.steps))
            .log(log)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "model.ribosome-count" => {
                    self.model.get_or_insert_with(Default::default).ribosome_count =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "model.initial-mrna-count" => {
                    self.model
                        .get_or_insert_with(Default::default)
                        .initial_mrna_count = Some(parse_value(key, value_str, "integer")?);
                }
                "model.initial-sequence" => {
                    self.model
                        .get_or_insert_with(Default::default)
                        .initial_sequence = Some(value_str.to_string());
                }
                "simulation.steps" => {
                    self.simulation.get_or_insert_with(Default::default).steps =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "simulation.log" => {
                    self.simulation.get_or_insert_with(Default::default).log =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn parse_run_args(extra: &[&str]) -> RunArgs {
        let mut args = vec!["ribosim", "run"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Run(run_args) => run_args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let args = parse_run_args(&[]);

        let config = PartialRunConfig::default().merge_with_cli(&args).unwrap();

        assert_eq!(config.model, core_config::ModelConfig::default());
        assert_eq!(config.simulation.steps, 100);
        assert!(config.simulation.log);
    }

    #[test]
    fn load_from_file_and_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "config.toml",
            r#"
        [model]
        ribosome-count = 4
        initial-sequence = "auggcuuaa"

        [simulation]
        steps = 12
        "#,
        );

        let args = parse_run_args(&["-c", config_path.to_str().unwrap()]);
        let partial = PartialRunConfig::from_file(&config_path).unwrap();
        let config = partial.merge_with_cli(&args).unwrap();

        assert_eq!(config.model.ribosome_count, 4);
        assert_eq!(config.model.initial_mrna_count, 50);
        assert_eq!(config.model.initial_sequence, "AUGGCUUAA");
        assert_eq!(config.simulation.steps, 12);
        assert!(config.simulation.log);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "config_override.toml",
            r#"
        [model]
        ribosome-count = 4 # Will be overridden
        initial-mrna-count = 8

        [simulation]
        steps = 12 # Will be overridden
        log = true
        "#,
        );

        let args = parse_run_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "--ribosomes",
            "2",
            "--steps",
            "30",
            "--sequence",
            "UUUUAA",
            "--no-log",
        ]);
        let partial = PartialRunConfig::from_file(&config_path).unwrap();
        let config = partial.merge_with_cli(&args).unwrap();

        assert_eq!(config.model.ribosome_count, 2);
        assert_eq!(config.model.initial_mrna_count, 8);
        assert_eq!(config.model.initial_sequence, "UUUUAA");
        assert_eq!(config.simulation.steps, 30);
        assert!(!config.simulation.log);
    }

    #[test]
    fn set_value_overrides_file_but_not_flags() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "config_set.toml",
            r#"
        [model]
        initial-mrna-count = 8 # Will be overridden by --set
        "#,
        );

        let args = parse_run_args(&[
            "-S",
            "model.initial-mrna-count=20",
            "-S",
            "simulation.log=false",
            "-S",
            "simulation.steps=7",
            "--steps",
            "9",
        ]);
        let partial = PartialRunConfig::from_file(&config_path).unwrap();
        let config = partial.merge_with_cli(&args).unwrap();

        assert_eq!(config.model.initial_mrna_count, 20);
        assert!(!config.simulation.log);
        assert_eq!(config.simulation.steps, 9);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["simulation.steps", "simulation.steps=many", "model.color=red"] {
            let args = parse_run_args(&["-S", bad]);
            let result = PartialRunConfig::default().merge_with_cli(&args);
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn invalid_sequence_is_a_config_error() {
        let args = parse_run_args(&["--sequence", "ATGTAA"]);

        let result = PartialRunConfig::default().merge_with_cli(&args);

        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("initial_sequence")),
            other => panic!("Expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "config_unknown.toml",
            r#"
        [model]
        ribosome-total = 4
        "#,
        );

        let result = PartialRunConfig::from_file(&config_path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let rendered = PartialRunConfig::from_defaults().to_toml_string().unwrap();

        assert!(rendered.contains("ribosome-count = 10"));
        assert!(rendered.contains("UUUUUUUUUUAA"));
        let reparsed: PartialRunConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, PartialRunConfig::from_defaults());
    }
}
