//! # Core Module
//!
//! This module provides the data model every simulation is built on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Entity identifiers, the entity sum type
//!   and the genetic code used to read mRNA sequences
//! - **State Storage** ([`registry`]) - The key-addressed entity registry that acts as the
//!   single source of truth for simulation state
//!
//! Nothing in this module performs I/O or holds process logic; processes in
//! [`crate::engine`] read and write these structures.

pub mod models;
pub mod registry;
