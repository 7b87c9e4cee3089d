//! # Workflows Module
//!
//! High-level entry points that run a complete simulation.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of RiboSim. They build a
//! [`Model`](crate::engine::model::Model) from configuration, drive it with progress
//! reporting, and hand back the consolidated result.
//!
//! - **Simulation Workflow** ([`simulate`]) - Construct, simulate and assemble the trajectory

pub mod simulate;
