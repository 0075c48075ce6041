use crate::genes::neuron::NeuronId;
use crate::traits::TraitMap;
use std::cmp::Ordering;

pub type InnovationId = i64;

/// A directed edge between two neurons. `from_neuron_id`, `to_neuron_id` and
/// `innovation_id` are fixed at birth; `weight`/`is_recurrent`/`traits` are
/// mutated during evolution.
///
/// Ordering and equality are defined purely in terms of `innovation_id`,
/// matching the historical sort key used by [`crate::genome::Genome::sort_genes`].
#[derive(Debug, Clone)]
pub struct LinkGene {
    from_neuron_id: NeuronId,
    to_neuron_id: NeuronId,
    innovation_id: InnovationId,
    pub weight: f64,
    pub is_recurrent: bool,
    pub traits: TraitMap,
}

impl LinkGene {
    pub fn new(
        from_neuron_id: NeuronId,
        to_neuron_id: NeuronId,
        innovation_id: InnovationId,
        weight: f64,
        is_recurrent: bool,
    ) -> Self {
        LinkGene {
            from_neuron_id,
            to_neuron_id,
            innovation_id,
            weight,
            is_recurrent,
            traits: TraitMap::new(),
        }
    }

    pub fn from_neuron_id(&self) -> NeuronId {
        self.from_neuron_id
    }

    pub fn to_neuron_id(&self) -> NeuronId {
        self.to_neuron_id
    }

    pub fn innovation_id(&self) -> InnovationId {
        self.innovation_id
    }

    pub fn is_looped_recurrent(&self) -> bool {
        self.from_neuron_id == self.to_neuron_id
    }
}

impl PartialEq for LinkGene {
    fn eq(&self, other: &Self) -> bool {
        self.innovation_id == other.innovation_id
    }
}
impl Eq for LinkGene {}

impl PartialOrd for LinkGene {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for LinkGene {
    fn cmp(&self, other: &Self) -> Ordering {
        self.innovation_id.cmp(&other.innovation_id)
    }
}
