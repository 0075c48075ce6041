//! The two gene kinds a [`crate::genome::Genome`] is built from: directed
//! [`LinkGene`] edges carrying historical markings, and [`NeuronGene`]
//! nodes carrying the neuron's role and parametric state. Both carry a
//! [`crate::traits::TraitMap`] of arbitrary named attributes.

mod activation;
mod link;
mod neuron;

pub use activation::{ActivationFunction, NeuronType};
pub use link::{InnovationId, LinkGene};
pub use neuron::{NeuronGene, NeuronId};
