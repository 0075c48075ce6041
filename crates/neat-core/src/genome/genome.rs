use super::traits_config::TraitConfig;
use crate::genes::{ActivationFunction, LinkGene, NeuronGene, NeuronId, NeuronType};
use crate::innovation::{InnovationDatabase, InnovationKind};
use crate::params::Parameters;
use crate::rng::Rng;
use crate::traits::{self, TraitMap};
use neat_error::{NeatError, NeatResult};

/// New hidden neuron ids are offset away from the small, densely packed
/// input/bias/output ids so a freshly split neuron can never collide with
/// one of the genome's original I/O neurons.
const HIDDEN_NEURON_ID_OFFSET: NeuronId = 1_000_000;

const MAX_CLONE_AVOIDANCE_RETRIES: usize = 1024;
const MAX_REMOVE_LINK_RETRIES: usize = 128;

pub type GenomeId = i64;

/// A single individual: an ordered set of neuron and link genes plus
/// whatever genome-level traits are configured, together with the fitness
/// bookkeeping the reproduction pipeline needs.
///
/// `neurons` is kept sorted by id and `links` by `innovation_id`
/// ([`Genome::sort_genes`]) - crossover, compatibility distance and display
/// code all rely on this ordering to walk both parents in lockstep.
#[derive(Debug, Clone)]
pub struct Genome {
    id: GenomeId,
    neurons: Vec<NeuronGene>,
    links: Vec<LinkGene>,
    traits: TraitMap,
    fitness: f64,
    adjusted_fitness: f64,
    offspring_amount: f64,
    evaluated: bool,
}

impl Genome {
    /// Builds the canonical seed genome: `num_inputs` input neurons, one
    /// bias neuron, `num_outputs` output neurons, fully connected
    /// input+bias -> output, no hidden neurons. Every structural link drawn
    /// here is registered in `innovation_db` so later independently-seeded
    /// genomes built the same way share innovation ids with this one.
    pub fn new_minimal(
        id: GenomeId,
        num_inputs: usize,
        num_outputs: usize,
        innovation_db: &mut InnovationDatabase,
        trait_config: &TraitConfig,
        rng: &mut Rng,
    ) -> NeatResult<Self> {
        let mut neurons = Vec::with_capacity(num_inputs + 1 + num_outputs);
        let mut next_id: NeuronId = 0;

        let mut input_ids = Vec::with_capacity(num_inputs + 1);
        for _ in 0..num_inputs {
            neurons.push(NeuronGene::new(next_id, NeuronType::Input, 0.0));
            input_ids.push(next_id);
            next_id += 1;
        }
        neurons.push(NeuronGene::new(next_id, NeuronType::Bias, 0.0));
        input_ids.push(next_id);
        next_id += 1;

        let mut output_ids = Vec::with_capacity(num_outputs);
        for _ in 0..num_outputs {
            let mut neuron = NeuronGene::new(next_id, NeuronType::Output, 1.0);
            neuron.traits = traits::init_traits(&trait_config.neuron, rng)?;
            neurons.push(neuron);
            output_ids.push(next_id);
            next_id += 1;
        }

        let mut links = Vec::new();
        for &from in &input_ids {
            for &to in &output_ids {
                let innovation_id = innovation_db.id_for(from, to, InnovationKind::NewLink);
                let weight = rng.rand_float_signed();
                let mut link = LinkGene::new(from, to, innovation_id, weight, false);
                link.traits = traits::init_traits(&trait_config.link, rng)?;
                links.push(link);
            }
        }

        let genome_traits = traits::init_traits(&trait_config.genome, rng)?;

        let mut genome = Genome {
            id,
            neurons,
            links,
            traits: genome_traits,
            fitness: 0.0,
            adjusted_fitness: 0.0,
            offspring_amount: 0.0,
            evaluated: false,
        };
        genome.sort_genes();
        Ok(genome)
    }

    pub fn id(&self) -> GenomeId {
        self.id
    }

    pub fn set_id(&mut self, id: GenomeId) {
        self.id = id;
    }

    pub fn neurons(&self) -> &[NeuronGene] {
        &self.neurons
    }

    pub fn links(&self) -> &[LinkGene] {
        &self.links
    }

    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    pub fn get_fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.evaluated = true;
    }

    pub fn get_adj_fitness(&self) -> f64 {
        self.adjusted_fitness
    }

    pub fn set_adj_fitness(&mut self, adjusted: f64) {
        self.adjusted_fitness = adjusted;
    }

    pub fn get_offspring_amount(&self) -> f64 {
        self.offspring_amount
    }

    pub fn set_offspring_amount(&mut self, amount: f64) {
        self.offspring_amount = amount;
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    pub fn reset_evaluated(&mut self) {
        self.evaluated = false;
    }

    /// Number of link genes. A hidden neuron with no links through it is a
    /// dead end ([`Genome::has_dead_ends`]); this is distinct from that.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Keeps `neurons` sorted by id and `links` sorted by innovation id,
    /// which every alignment-sensitive operation (mate, compatibility
    /// distance) depends on.
    pub fn sort_genes(&mut self) {
        self.neurons.sort_by_key(|n| n.id());
        self.links.sort();
    }

    fn find_neuron(&self, id: NeuronId) -> Option<&NeuronGene> {
        self.neurons.iter().find(|n| n.id() == id)
    }

    /// A hidden neuron is a dead end if it has no incoming links or no
    /// outgoing links - it can never influence the network's output or is
    /// never influenced by its inputs.
    pub fn has_dead_ends(&self) -> bool {
        self.neurons.iter().any(|n| {
            if n.kind() != NeuronType::Hidden {
                return false;
            }
            let has_in = self.links.iter().any(|l| l.to_neuron_id() == n.id());
            let has_out = self.links.iter().any(|l| l.from_neuron_id() == n.id());
            !has_in || !has_out
        })
    }

    /// Structural sanity check: every link's endpoints must resolve within
    /// this genome, and no two links may share the same
    /// `(from, to, is_recurrent)` triple. Violating either is a programmer
    /// fault in the operator that produced this genome, never a normal
    /// evolutionary outcome.
    pub fn fails_constraints(&self, _params: &Parameters) -> bool {
        for link in &self.links {
            if self.find_neuron(link.from_neuron_id()).is_none()
                || self.find_neuron(link.to_neuron_id()).is_none()
            {
                return true;
            }
        }

        for (i, a) in self.links.iter().enumerate() {
            for b in &self.links[i + 1..] {
                if a.from_neuron_id() == b.from_neuron_id()
                    && a.to_neuron_id() == b.to_neuron_id()
                    && a.is_recurrent == b.is_recurrent
                {
                    return true;
                }
            }
        }

        false
    }

    /// Standard NEAT compatibility distance:
    /// `(excess_coeff*E + disjoint_coeff*D) / N + weight_diff_coeff*W̄`,
    /// plus the genome-level trait distance. `N` is the larger genome's
    /// link count, floored at 1 so small genomes aren't penalized.
    pub fn compatibility_distance(&self, other: &Genome, params: &Parameters) -> NeatResult<f64> {
        let (mut i, mut j) = (0, 0);
        let (mut matching, mut disjoint, mut excess) = (0u32, 0u32, 0u32);
        let mut weight_diff_sum = 0.0;

        while i < self.links.len() && j < other.links.len() {
            let a = &self.links[i];
            let b = &other.links[j];
            match a.innovation_id().cmp(&b.innovation_id()) {
                std::cmp::Ordering::Equal => {
                    matching += 1;
                    weight_diff_sum += (a.weight - b.weight).abs();
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => {
                    disjoint += 1;
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    disjoint += 1;
                    j += 1;
                }
            }
        }
        excess += (self.links.len() - i) as u32;
        excess += (other.links.len() - j) as u32;

        let n = self.links.len().max(other.links.len()).max(1) as f64;
        let weight_diff_avg = if matching > 0 {
            weight_diff_sum / matching as f64
        } else {
            0.0
        };

        let structural = (params.excess_coeff * excess as f64
            + params.disjoint_coeff * disjoint as f64)
            / n
            + params.weight_diff_coeff * weight_diff_avg;

        let trait_component = traits::trait_distances(&self.traits, &other.traits)?;

        Ok(structural + trait_component)
    }

    pub fn is_compatible_with(&self, other: &Genome, params: &Parameters) -> NeatResult<bool> {
        Ok(self.compatibility_distance(other, params)? < params.compat_threshold)
    }

    /// Crossover. When `average` is true, matching link genes get their
    /// weights averaged; otherwise each matching gene is inherited whole
    /// from a randomly chosen parent (multipoint crossover). Disjoint and
    /// excess genes are always inherited from the fitter parent; on a
    /// fitness tie the child is the union of both parents' disjoint/excess
    /// genes (every unique gene from either parent is kept, not a per-gene
    /// coin flip). `interspecies` genomes are aligned the same way - the
    /// only difference is purely who gets offered as the second parent,
    /// which is the caller's concern, not this function's.
    pub fn mate(
        &self,
        other: &Genome,
        average: bool,
        _interspecies: bool,
        new_id: GenomeId,
        rng: &mut Rng,
    ) -> NeatResult<Genome> {
        let (better, worse, tie) = if self.fitness > other.fitness {
            (self, other, false)
        } else if other.fitness > self.fitness {
            (other, self, false)
        } else {
            (self, other, true)
        };

        let mut child_links: Vec<LinkGene> = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < better.links.len() || j < worse.links.len() {
            let a = better.links.get(i);
            let b = worse.links.get(j);

            let pick = match (a, b) {
                (Some(a), Some(b)) => match a.innovation_id().cmp(&b.innovation_id()) {
                    std::cmp::Ordering::Equal => {
                        let mut gene = if average {
                            let mut g = a.clone();
                            g.weight = (a.weight + b.weight) / 2.0;
                            g
                        } else if rng.rand_float() < 0.5 {
                            a.clone()
                        } else {
                            b.clone()
                        };
                        let mut traits = gene.traits.clone();
                        traits::mate_traits(&mut traits, &b.traits, rng)?;
                        gene.traits = traits;
                        i += 1;
                        j += 1;
                        Some(gene)
                    }
                    std::cmp::Ordering::Less => {
                        i += 1;
                        Some(a.clone())
                    }
                    std::cmp::Ordering::Greater => {
                        j += 1;
                        if tie {
                            Some(b.clone())
                        } else {
                            None
                        }
                    }
                },
                (Some(a), None) => {
                    i += 1;
                    Some(a.clone())
                }
                (None, Some(b)) => {
                    j += 1;
                    if tie { Some(b.clone()) } else { None }
                }
                (None, None) => unreachable!(),
            };

            if let Some(gene) = pick {
                if !child_links
                    .iter()
                    .any(|g: &LinkGene| g.innovation_id() == gene.innovation_id())
                {
                    child_links.push(gene);
                }
            }
        }

        let mut needed_ids: Vec<NeuronId> = child_links
            .iter()
            .flat_map(|l| [l.from_neuron_id(), l.to_neuron_id()])
            .collect();
        needed_ids.sort_unstable();
        needed_ids.dedup();

        let mut child_neurons = Vec::with_capacity(needed_ids.len());
        for id in needed_ids {
            let source = better
                .find_neuron(id)
                .or_else(|| worse.find_neuron(id))
                .ok_or_else(|| NeatError::Constraint {
                    message: format!("mate: no parent defines neuron {id}").into(),
                })?;
            let mut neuron = source.clone();
            if let Some(other_neuron) = worse.find_neuron(id) {
                traits::mate_traits(&mut neuron.traits, &other_neuron.traits, rng)?;
            }
            child_neurons.push(neuron);
        }

        let mut child_traits = better.traits.clone();
        traits::mate_traits(&mut child_traits, &worse.traits, rng)?;

        let mut child = Genome {
            id: new_id,
            neurons: child_neurons,
            links: child_links,
            traits: child_traits,
            fitness: 0.0,
            adjusted_fitness: 0.0,
            offspring_amount: 0.0,
            evaluated: false,
        };
        child.sort_genes();
        Ok(child)
    }

    /// Splits a random link with a new hidden neuron: removes the split
    /// link and adds two replacement links (`from -> new`, `new -> to`).
    /// There is no "disabled" flag on [`LinkGene`], so the split link must
    /// be removed outright rather than deactivated.
    pub fn mutate_add_neuron(
        &mut self,
        innovation_db: &mut InnovationDatabase,
        rng: &mut Rng,
        trait_config: &TraitConfig,
    ) -> NeatResult<bool> {
        if self.links.is_empty() {
            return Ok(false);
        }
        let idx = rng.rand_index(self.links.len());
        let split = self.links[idx].clone();

        let split_innovation = innovation_db.id_for(
            split.from_neuron_id(),
            split.to_neuron_id(),
            InnovationKind::NewNeuron,
        );
        let new_neuron_id = HIDDEN_NEURON_ID_OFFSET + split_innovation;
        if self.find_neuron(new_neuron_id).is_some() {
            // Already split elsewhere in this genome; nothing to do.
            return Ok(false);
        }

        let from_split_y = self
            .find_neuron(split.from_neuron_id())
            .map(|n| n.split_y)
            .unwrap_or(0.0);
        let to_split_y = self
            .find_neuron(split.to_neuron_id())
            .map(|n| n.split_y)
            .unwrap_or(1.0);

        let mut new_neuron = NeuronGene::new(
            new_neuron_id,
            NeuronType::Hidden,
            (from_split_y + to_split_y) / 2.0,
        );
        new_neuron.init_params(1.0, 0.0, 1.0, 0.0, ActivationFunction::SignedSigmoid);
        new_neuron.traits = traits::init_traits(&trait_config.neuron, rng)?;

        let in_id = innovation_db.id_for(split.from_neuron_id(), new_neuron_id, InnovationKind::NewLink);
        let out_id = innovation_db.id_for(new_neuron_id, split.to_neuron_id(), InnovationKind::NewLink);

        let mut in_link = LinkGene::new(split.from_neuron_id(), new_neuron_id, in_id, 1.0, false);
        in_link.traits = traits::init_traits(&trait_config.link, rng)?;
        let mut out_link = LinkGene::new(new_neuron_id, split.to_neuron_id(), out_id, split.weight, false);
        out_link.traits = traits::init_traits(&trait_config.link, rng)?;

        self.links.remove(idx);
        self.links.push(in_link);
        self.links.push(out_link);
        self.neurons.push(new_neuron);
        self.sort_genes();
        Ok(true)
    }

    /// Adds a single new link between two neurons not already directly
    /// connected with the same recurrence flag. `from` may be any neuron
    /// except an output; `to` may be any neuron except an input or bias.
    /// Recurrence is determined by `split_y` ordering: a link running from
    /// a later layer to an earlier (or equal) one is recurrent.
    pub fn mutate_add_link(
        &mut self,
        innovation_db: &mut InnovationDatabase,
        rng: &mut Rng,
        params: &Parameters,
        trait_config: &TraitConfig,
    ) -> NeatResult<bool> {
        let from_candidates: Vec<NeuronId> = self
            .neurons
            .iter()
            .filter(|n| n.kind() != NeuronType::Output)
            .map(|n| n.id())
            .collect();
        let to_candidates: Vec<NeuronId> = self
            .neurons
            .iter()
            .filter(|n| n.kind() != NeuronType::Input && n.kind() != NeuronType::Bias)
            .map(|n| n.id())
            .collect();
        if from_candidates.is_empty() || to_candidates.is_empty() {
            return Ok(false);
        }

        for _ in 0..MAX_CLONE_AVOIDANCE_RETRIES {
            let from = from_candidates[rng.rand_index(from_candidates.len())];
            let to = to_candidates[rng.rand_index(to_candidates.len())];

            let from_y = self.find_neuron(from).map(|n| n.split_y).unwrap_or(0.0);
            let to_y = self.find_neuron(to).map(|n| n.split_y).unwrap_or(1.0);
            let is_recurrent = from == to || from_y >= to_y;

            let already_exists = self.links.iter().any(|l| {
                l.from_neuron_id() == from && l.to_neuron_id() == to && l.is_recurrent == is_recurrent
            });
            if already_exists {
                continue;
            }

            let innovation_id = innovation_db.id_for(from, to, InnovationKind::NewLink);
            let weight = rng.rand_float_signed() * params.weight_range.1;
            let mut link = LinkGene::new(from, to, innovation_id, weight, is_recurrent);
            link.traits = traits::init_traits(&trait_config.link, rng)?;
            self.links.push(link);
            self.sort_genes();
            return Ok(true);
        }

        Ok(false)
    }

    /// Removes a hidden neuron that has exactly one incoming and one
    /// outgoing link, reconnecting its predecessor directly to its
    /// successor (unless that link already exists, in which case the
    /// neuron is simply dropped).
    pub fn mutate_remove_simple_neuron(
        &mut self,
        innovation_db: &mut InnovationDatabase,
        rng: &mut Rng,
    ) -> bool {
        let candidates: Vec<NeuronId> = self
            .neurons
            .iter()
            .filter(|n| n.kind() == NeuronType::Hidden)
            .filter_map(|n| {
                let incoming: Vec<&LinkGene> =
                    self.links.iter().filter(|l| l.to_neuron_id() == n.id()).collect();
                let outgoing: Vec<&LinkGene> =
                    self.links.iter().filter(|l| l.from_neuron_id() == n.id()).collect();
                if incoming.len() == 1 && outgoing.len() == 1 {
                    Some(n.id())
                } else {
                    None
                }
            })
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let target = candidates[rng.rand_index(candidates.len())];
        let in_link = self
            .links
            .iter()
            .find(|l| l.to_neuron_id() == target)
            .cloned()
            .unwrap();
        let out_link = self
            .links
            .iter()
            .find(|l| l.from_neuron_id() == target)
            .cloned()
            .unwrap();

        self.links
            .retain(|l| l.to_neuron_id() != target && l.from_neuron_id() != target);
        self.neurons.retain(|n| n.id() != target);

        let bypass_exists = self.links.iter().any(|l| {
            l.from_neuron_id() == in_link.from_neuron_id() && l.to_neuron_id() == out_link.to_neuron_id()
        });
        if !bypass_exists {
            let innovation_id = innovation_db.id_for(
                in_link.from_neuron_id(),
                out_link.to_neuron_id(),
                InnovationKind::NewLink,
            );
            self.links.push(LinkGene::new(
                in_link.from_neuron_id(),
                out_link.to_neuron_id(),
                innovation_id,
                out_link.weight,
                in_link.is_recurrent || out_link.is_recurrent,
            ));
        }

        self.sort_genes();
        true
    }

    /// Removes a random link, retrying up to [`MAX_REMOVE_LINK_RETRIES`]
    /// times if the draw would leave the genome with zero links or create a
    /// dead-end neuron. Exhausting the retry budget leaves `self` unchanged
    /// and returns `false` - this is the bounded-retry evolution-transient
    /// case, not a programmer fault.
    pub fn mutate_remove_link(&mut self, rng: &mut Rng) -> bool {
        if self.links.len() <= 1 {
            return false;
        }

        for _ in 0..MAX_REMOVE_LINK_RETRIES {
            let idx = rng.rand_index(self.links.len());
            let mut candidate = self.clone();
            candidate.links.remove(idx);
            if candidate.links.is_empty() || candidate.has_dead_ends() {
                continue;
            }
            *self = candidate;
            return true;
        }
        false
    }

    pub fn mutate_neuron_activation_type(&mut self, rng: &mut Rng) -> bool {
        let candidates: Vec<usize> = self
            .neurons
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind() == NeuronType::Hidden || n.kind() == NeuronType::Output)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return false;
        }
        let idx = candidates[rng.rand_index(candidates.len())];
        let pick = ActivationFunction::ALL[rng.rand_index(ActivationFunction::ALL.len())];
        let changed = self.neurons[idx].activation_function != pick;
        self.neurons[idx].activation_function = pick;
        changed
    }

    /// Perturbs every link's weight independently: with probability
    /// `weight_replacement_rate` draws a fresh weight, otherwise nudges the
    /// current weight by `weight_mutate_power * rand_float_signed()`.
    /// Always clamps to `params.weight_range`.
    pub fn mutate_link_weights(&mut self, rng: &mut Rng, params: &Parameters) -> bool {
        if self.links.is_empty() {
            return false;
        }
        let mut changed = false;
        for link in &mut self.links {
            let new_weight = if rng.rand_float() < params.weight_replacement_rate {
                rng.rand_float_signed() * params.weight_range.1
            } else {
                link.weight + rng.rand_float_signed() * params.weight_mutate_power
            }
            .clamp(params.weight_range.0, params.weight_range.1);
            changed |= new_weight != link.weight;
            link.weight = new_weight;
        }
        changed
    }

    fn mutate_single_neuron_field(
        &mut self,
        rng: &mut Rng,
        power: f64,
        range: (f64, f64),
        get: impl Fn(&NeuronGene) -> f64,
        set: impl Fn(&mut NeuronGene, f64),
    ) -> bool {
        let candidates: Vec<usize> = self
            .neurons
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind() == NeuronType::Hidden || n.kind() == NeuronType::Output)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return false;
        }
        let idx = candidates[rng.rand_index(candidates.len())];
        let neuron = &mut self.neurons[idx];
        let current = get(neuron);
        let next = (current + rng.rand_float_signed() * power).clamp(range.0, range.1);
        set(neuron, next);
        next != current
    }

    pub fn mutate_activation_a(&mut self, rng: &mut Rng, params: &Parameters) -> bool {
        self.mutate_single_neuron_field(
            rng,
            params.weight_mutate_power,
            (-1.0, 1.0),
            |n| n.a,
            |n, v| n.a = v,
        )
    }

    pub fn mutate_activation_b(&mut self, rng: &mut Rng, params: &Parameters) -> bool {
        self.mutate_single_neuron_field(
            rng,
            params.weight_mutate_power,
            (-1.0, 1.0),
            |n| n.b,
            |n, v| n.b = v,
        )
    }

    pub fn mutate_neuron_time_constants(&mut self, rng: &mut Rng, params: &Parameters) -> bool {
        self.mutate_single_neuron_field(
            rng,
            params.weight_mutate_power,
            (0.0, 1.0),
            |n| n.time_constant,
            |n, v| n.time_constant = v,
        )
    }

    pub fn mutate_neuron_biases(&mut self, rng: &mut Rng, params: &Parameters) -> bool {
        self.mutate_single_neuron_field(
            rng,
            params.weight_mutate_power,
            params.weight_range,
            |n| n.bias,
            |n, v| n.bias = v,
        )
    }

    /// Restricted to hidden/output neurons, like every other per-neuron
    /// mutation operator - input and bias neurons are fixed sensors with no
    /// traits initialized on them by [`Genome::new_minimal`].
    pub fn mutate_neuron_traits(&mut self, rng: &mut Rng, trait_config: &TraitConfig) -> bool {
        let candidates: Vec<usize> = self
            .neurons
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind() == NeuronType::Hidden || n.kind() == NeuronType::Output)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return false;
        }
        let idx = candidates[rng.rand_index(candidates.len())];
        traits::mutate_traits(&mut self.neurons[idx].traits, &trait_config.neuron, rng)
    }

    pub fn mutate_link_traits(&mut self, rng: &mut Rng, trait_config: &TraitConfig) -> bool {
        if self.links.is_empty() {
            return false;
        }
        let idx = rng.rand_index(self.links.len());
        traits::mutate_traits(&mut self.links[idx].traits, &trait_config.link, rng)
    }

    pub fn mutate_genome_traits(&mut self, rng: &mut Rng, trait_config: &TraitConfig) -> bool {
        traits::mutate_traits(&mut self.traits, &trait_config.genome, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: GenomeId, rng: &mut Rng) -> Genome {
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        Genome::new_minimal(id, 2, 1, &mut db, &cfg, rng).unwrap()
    }

    #[test]
    fn minimal_genome_is_fully_connected_and_valid() {
        let mut rng = Rng::seed(1);
        let g = minimal(0, &mut rng);
        assert_eq!(g.neurons().len(), 4); // 2 inputs + bias + 1 output
        assert_eq!(g.links().len(), 3); // (2 inputs + bias) * 1 output
        assert!(!g.fails_constraints(&Parameters::default()));
        assert!(!g.has_dead_ends());
    }

    #[test]
    fn identical_genomes_built_from_same_db_are_zero_distance() {
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut rng_a = Rng::seed(5);
        let mut rng_b = Rng::seed(5);
        let a = Genome::new_minimal(0, 2, 1, &mut db, &cfg, &mut rng_a).unwrap();
        let b = Genome::new_minimal(1, 2, 1, &mut db, &cfg, &mut rng_b).unwrap();

        // Same topology (shared innovation ids), only weights differ.
        let params = Parameters {
            weight_diff_coeff: 0.0,
            ..Parameters::default()
        };
        let distance = a.compatibility_distance(&b, &params).unwrap();
        assert!(distance.abs() < crate::params::COMPAT_EQUALITY_DELTA);
    }

    #[test]
    fn add_neuron_splits_a_link_without_leaving_dead_ends() {
        let mut rng = Rng::seed(3);
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut g = minimal(0, &mut rng);
        let links_before = g.num_links();
        let did = g.mutate_add_neuron(&mut db, &mut rng, &cfg).unwrap();
        assert!(did);
        assert_eq!(g.num_links(), links_before + 1);
        assert!(!g.has_dead_ends());
        assert!(!g.fails_constraints(&Parameters::default()));
    }

    #[test]
    fn mate_produces_a_genome_whose_links_resolve_within_it() {
        let mut rng = Rng::seed(9);
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut a = Genome::new_minimal(0, 2, 1, &mut db, &cfg, &mut rng).unwrap();
        let mut b = Genome::new_minimal(1, 2, 1, &mut db, &cfg, &mut rng).unwrap();
        a.set_fitness(1.0);
        b.set_fitness(0.5);

        let child = a.mate(&b, false, false, 2, &mut rng).unwrap();
        assert!(!child.fails_constraints(&Parameters::default()));
    }

    #[test]
    fn remove_link_never_produces_a_zero_link_genome() {
        let mut rng = Rng::seed(4);
        let mut g = minimal(0, &mut rng);
        while g.num_links() > 1 {
            g.mutate_remove_link(&mut rng);
        }
        assert!(g.num_links() >= 1);
    }
}
