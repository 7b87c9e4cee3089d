//! # RiboSim Core Library
//!
//! A discrete-time simulation harness for ribosomes translating messenger RNA
//! strands into proteins.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep the data model,
//! the stateful simulation logic, and the user-facing entry points apart.
//!
//! - **[`core`]: The Foundation.** Stateless data models: entity identifiers, the
//!   [`Entity`](core::models::entity::Entity) sum type over ribosomes, mRNAs and proteins,
//!   the genetic code, and the [`EntityRegistry`](core::registry::EntityRegistry) that maps
//!   unique string keys to entities.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer that drives a simulation. It holds
//!   the [`Process`](engine::process::Process) capability trait, the translation process,
//!   the trajectory logger, and the [`Model`](engine::model::Model) orchestrator that steps
//!   every registered process over the registry.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together to run a complete
//!   simulation from a configuration and hand back the consolidated trajectory.

pub mod core;
pub mod engine;
pub mod workflows;
