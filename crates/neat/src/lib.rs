//! A NeuroEvolution of Augmenting Topologies engine: speciated,
//! topology-evolving genetic search over neural network genomes.
//!
//! This crate is a thin facade over [`neat_core`] and [`neat_error`]; the
//! actual genome, speciation, and reproduction machinery lives there.

pub use neat_core::*;
pub use neat_error::*;
