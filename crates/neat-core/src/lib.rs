//! Core speciation, genome, and reproduction engine for NeuroEvolution of
//! Augmenting Topologies.
//!
//! A run starts by building a [`population::Population`] of minimal genomes
//! ([`genome::Genome`]), then repeatedly: evaluates every genome's fitness
//! (the caller's job, via [`genome::Genome::set_fitness`]), and calls
//! [`population::Population::epoch`] to perform one generation of
//! speciated, fitness-shared reproduction.
//!
//! Every operation that draws randomness takes an [`rng::Rng`] by reference
//! rather than reaching for global state, so seeding it once at the top of
//! a run makes the whole run reproducible. The one exception is
//! [`rng::cosmetic_color`], a decorative process-global generator used only
//! to assign a species' display color - it never influences evolutionary
//! outcomes and must not be folded into the seeded [`rng::Rng`].

pub mod genes;
pub mod genome;
pub mod innovation;
pub mod mutation;
pub mod params;
pub mod population;
pub mod rng;
pub mod species;
pub mod traits;

pub use genes::{ActivationFunction, InnovationId, LinkGene, NeuronGene, NeuronId, NeuronType};
pub use genome::{Genome, GenomeId, TraitConfig};
pub use innovation::{InnovationDatabase, InnovationKind};
pub use params::{COMPAT_EQUALITY_DELTA, Parameters, SearchMode};
pub use population::Population;
pub use rng::Rng;
pub use species::{Species, SpeciesId};
