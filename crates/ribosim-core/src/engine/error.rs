use super::config::ConfigError;
use super::model::ModelState;
use crate::core::models::entity::EntityKind;
use crate::core::registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Registry error: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Process '{process}' was updated before being configured")]
    NotConfigured { process: String },

    #[error("Process '{process}' has already been configured")]
    AlreadyConfigured { process: String },

    #[error("A process named '{name}' is already registered")]
    DuplicateProcess { name: String },

    #[error("Cannot {operation} while the model is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: ModelState,
    },

    #[error("Entity '{key}' is a {found}, expected a {expected}")]
    WrongKind {
        key: String,
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("No simulation steps have been logged; nothing to output")]
    NoData,

    #[error("Internal logic error: {0}")]
    Internal(String),
}
