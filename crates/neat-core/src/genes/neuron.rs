use super::activation::{ActivationFunction, NeuronType};
use crate::traits::TraitMap;

pub type NeuronId = i32;

/// A node in the network. `id` and `type` are fixed at birth; every other
/// field is mutable parametric state that mutation/mate operators act on.
///
/// Equality compares every field (not just identity) - two neuron genes
/// with the same id but different activation state are not interchangeable
/// for duplicate detection, which relies on full structural+parametric
/// comparison via [`crate::genome::Genome::compatibility_distance`] rather
/// than on this `PartialEq` impl directly, but the invariant that equality
/// here means "fully interchangeable" must hold for it to be useful at all.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronGene {
    id: NeuronId,
    kind: NeuronType,
    pub split_y: f64,
    pub a: f64,
    pub b: f64,
    pub time_constant: f64,
    pub bias: f64,
    pub activation_function: ActivationFunction,
    pub x: f64,
    pub y: f64,
    pub traits: TraitMap,
}

impl NeuronGene {
    pub fn new(id: NeuronId, kind: NeuronType, split_y: f64) -> Self {
        let split_y = match kind {
            NeuronType::Input | NeuronType::Bias => 0.0,
            NeuronType::Output => 1.0,
            _ => split_y,
        };

        NeuronGene {
            id,
            kind,
            split_y,
            a: 1.0,
            b: 0.0,
            time_constant: 1.0,
            bias: 0.0,
            activation_function: ActivationFunction::SignedSigmoid,
            x: 0.0,
            y: 0.0,
            traits: TraitMap::new(),
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn kind(&self) -> NeuronType {
        self.kind
    }

    pub fn init_params(
        &mut self,
        a: f64,
        b: f64,
        time_constant: f64,
        bias: f64,
        activation_function: ActivationFunction,
    ) {
        self.a = a;
        self.b = b;
        self.time_constant = time_constant;
        self.bias = bias;
        self.activation_function = activation_function;
    }
}
