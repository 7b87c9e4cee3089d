//! # Core Models Module
//!
//! Data structures representing the molecules of a translation simulation.
//!
//! ## Key Components
//!
//! - [`entity`] - The [`Entity`](entity::Entity) sum type over ribosomes, mRNAs and
//!   proteins, with shared accessors so callers never branch on kind to read keys
//! - [`codon`] - The standard genetic code and codon classification
//! - [`ids`] - Slot-map identifiers for stored entities
//!
//! ## Usage
//!
//! ```ignore
//! use ribosim::core::models::entity::{Entity, Mrna};
//!
//! let mrna = Entity::Mrna(Mrna::new(0, "MRNA_0", "UUUUUUUUUUAA"));
//! assert_eq!(mrna.key(), "MRNA_0");
//! ```

pub mod codon;
pub mod entity;
pub mod ids;
