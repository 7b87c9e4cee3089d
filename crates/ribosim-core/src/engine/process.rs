//! The capability interface every simulated process implements.

use super::error::EngineError;
use crate::core::registry::EntityRegistry;

/// A pluggable unit of per-step behaviour over the entity registry.
///
/// The orchestrator holds processes as `Box<dyn Process>` in registration order and
/// lends each one the registry for the duration of a single [`Process::update`] call.
pub trait Process {
    fn name(&self) -> &str;

    fn id(&self) -> u32;

    fn is_configured(&self) -> bool;

    /// Performs one discrete unit of work on the registry.
    ///
    /// Called exactly once per step. Implementations must fail with
    /// [`EngineError::NotConfigured`] if they have not been configured yet.
    fn update(&mut self, registry: &mut EntityRegistry) -> Result<(), EngineError>;
}

/// One-time configuration of a process before the first update.
pub trait Configure {
    type Config;

    /// Stores the parameters the process operates on.
    ///
    /// Configuring an already-configured process fails with
    /// [`EngineError::AlreadyConfigured`].
    fn configure(&mut self, config: Self::Config) -> Result<(), EngineError>;
}
