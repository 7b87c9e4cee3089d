//! Concrete [`Process`](super::process::Process) implementations.
//!
//! - [`translation`] - Ribosomes reading mRNA codons and releasing finished proteins

pub mod translation;
