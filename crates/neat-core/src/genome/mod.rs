//! The genome data model: ordered neuron/link genes, the crossover and
//! mutation operators that act on them, and the compatibility distance used
//! to assign genomes to species.

mod genome;
mod traits_config;

pub use genome::{Genome, GenomeId};
pub use traits_config::TraitConfig;
