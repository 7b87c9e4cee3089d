//! # Engine Module
//!
//! The stateful layer that drives a translation simulation.
//!
//! ## Overview
//!
//! A [`Model`](model::Model) owns the entity registry and an ordered list of
//! [`Process`](process::Process) implementations. Each step lends the registry to every
//! process in registration order; after each step the registry is captured into the
//! [`TrajectoryLogger`](logger::TrajectoryLogger), which later assembles per-kind time
//! series.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Model construction parameters and their builders
//! - **Error Handling** ([`error`]) - The engine error taxonomy surfaced to callers
//! - **Process Interface** ([`process`]) - The `Process` and `Configure` capability traits
//! - **Processes** ([`processes`]) - Concrete processes, currently translation
//! - **Trajectory Logging** ([`logger`]) - Snapshots and consolidated output
//! - **Orchestration** ([`model`]) - The step and simulate protocol
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//!
//! The whole engine is single-threaded: processes run to completion one after
//! another, and none of them can observe a partially applied update from another.

pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod process;
pub mod processes;
pub mod progress;
