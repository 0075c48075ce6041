//! Mutation dispatch: a roulette wheel over the thirteen mutation
//! categories, gated by search mode, drawn fresh on every retry until one
//! category actually changes the genome or the fallback makes it clear
//! nothing will.

use crate::genome::{Genome, TraitConfig};
use crate::innovation::InnovationDatabase;
use crate::params::{Parameters, SearchMode};
use crate::rng::Rng;
use neat_error::NeatResult;

const MAX_DISPATCH_RETRIES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationCategory {
    AddNeuron,
    AddLink,
    RemoveSimpleNeuron,
    RemoveLink,
    NeuronActivationType,
    LinkWeights,
    ActivationA,
    ActivationB,
    NeuronTimeConstants,
    NeuronBiases,
    NeuronTraits,
    LinkTraits,
    GenomeTraits,
}

const ALL_CATEGORIES: [MutationCategory; 13] = [
    MutationCategory::AddNeuron,
    MutationCategory::AddLink,
    MutationCategory::RemoveSimpleNeuron,
    MutationCategory::RemoveLink,
    MutationCategory::NeuronActivationType,
    MutationCategory::LinkWeights,
    MutationCategory::ActivationA,
    MutationCategory::ActivationB,
    MutationCategory::NeuronTimeConstants,
    MutationCategory::NeuronBiases,
    MutationCategory::NeuronTraits,
    MutationCategory::LinkTraits,
    MutationCategory::GenomeTraits,
];

fn weight(category: MutationCategory, params: &Parameters, mode: SearchMode, is_clone: bool) -> f64 {
    use MutationCategory::*;

    let additive = matches!(category, AddNeuron | AddLink);
    let subtractive = matches!(category, RemoveSimpleNeuron | RemoveLink);

    if additive && (mode == SearchMode::Simplifying || is_clone) {
        return 0.0;
    }
    if subtractive && (mode == SearchMode::Complexifying || is_clone) {
        return 0.0;
    }

    match category {
        AddNeuron => params.mutate_add_neuron_prob,
        AddLink => params.mutate_add_link_prob,
        RemoveSimpleNeuron => params.mutate_rem_simple_neuron_prob,
        RemoveLink => params.mutate_rem_link_prob,
        NeuronActivationType => params.mutate_neuron_activation_type_prob,
        LinkWeights => params.mutate_weights_prob,
        ActivationA => params.mutate_activation_a_prob,
        ActivationB => params.mutate_activation_b_prob,
        NeuronTimeConstants => params.mutate_neuron_time_constants_prob,
        NeuronBiases => params.mutate_neuron_biases_prob,
        NeuronTraits => params.mutate_neuron_traits_prob,
        LinkTraits => params.mutate_link_traits_prob,
        GenomeTraits => params.mutate_genome_traits_prob,
    }
}

/// Draws and applies one mutation category to `genome`, retrying with a
/// freshly drawn category (not a freshly drawn outcome of the *same*
/// category - each failed attempt re-rolls the wheel) up to
/// [`MAX_DISPATCH_RETRIES`] times. Returns whether the genome actually
/// changed; exhausting the retry budget and returning `false` is the
/// expected evolution-transient outcome for a genome with nothing left to
/// mutate (e.g. a single-link genome with additive mutations disabled).
pub fn mutate_one(
    genome: &mut Genome,
    innovation_db: &mut InnovationDatabase,
    rng: &mut Rng,
    params: &Parameters,
    mode: SearchMode,
    is_clone: bool,
    trait_config: &TraitConfig,
) -> NeatResult<bool> {
    for _ in 0..MAX_DISPATCH_RETRIES {
        let weights: Vec<f64> = ALL_CATEGORIES
            .iter()
            .map(|&c| weight(c, params, mode, is_clone))
            .collect();
        if weights.iter().all(|&w| w <= 0.0) {
            return Ok(false);
        }
        let chosen = ALL_CATEGORIES[rng.roulette(&weights)];

        let changed = match chosen {
            MutationCategory::AddNeuron => {
                genome.mutate_add_neuron(innovation_db, rng, trait_config)?
            }
            MutationCategory::AddLink => {
                genome.mutate_add_link(innovation_db, rng, params, trait_config)?
            }
            MutationCategory::RemoveSimpleNeuron => {
                genome.mutate_remove_simple_neuron(innovation_db, rng)
            }
            MutationCategory::RemoveLink => genome.mutate_remove_link(rng),
            MutationCategory::NeuronActivationType => genome.mutate_neuron_activation_type(rng),
            MutationCategory::LinkWeights => genome.mutate_link_weights(rng, params),
            MutationCategory::ActivationA => genome.mutate_activation_a(rng, params),
            MutationCategory::ActivationB => genome.mutate_activation_b(rng, params),
            MutationCategory::NeuronTimeConstants => {
                genome.mutate_neuron_time_constants(rng, params)
            }
            MutationCategory::NeuronBiases => genome.mutate_neuron_biases(rng, params),
            MutationCategory::NeuronTraits => genome.mutate_neuron_traits(rng, trait_config),
            MutationCategory::LinkTraits => genome.mutate_link_traits(rng, trait_config),
            MutationCategory::GenomeTraits => genome.mutate_genome_traits(rng, trait_config),
        };

        if changed {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::innovation::InnovationDatabase;

    fn genome(rng: &mut Rng) -> Genome {
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        Genome::new_minimal(0, 3, 2, &mut db, &cfg, rng).unwrap()
    }

    fn zeroed_params() -> Parameters {
        Parameters {
            mutate_add_neuron_prob: 0.0,
            mutate_add_link_prob: 0.0,
            mutate_rem_simple_neuron_prob: 0.0,
            mutate_rem_link_prob: 0.0,
            mutate_neuron_activation_type_prob: 0.0,
            mutate_weights_prob: 0.0,
            mutate_activation_a_prob: 0.0,
            mutate_activation_b_prob: 0.0,
            mutate_neuron_time_constants_prob: 0.0,
            mutate_neuron_biases_prob: 0.0,
            mutate_neuron_traits_prob: 0.0,
            mutate_link_traits_prob: 0.0,
            mutate_genome_traits_prob: 0.0,
            ..Parameters::default()
        }
    }

    #[test]
    fn simplifying_mode_never_adds_structure() {
        let mut rng = Rng::seed(1);
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut g = genome(&mut rng);
        let params = Parameters {
            mutate_add_neuron_prob: 1.0,
            mutate_add_link_prob: 1.0,
            ..zeroed_params()
        };
        let links_before = g.num_links();
        let neurons_before = g.neurons().len();

        for _ in 0..20 {
            mutate_one(
                &mut g,
                &mut db,
                &mut rng,
                &params,
                SearchMode::Simplifying,
                false,
                &cfg,
            )
            .unwrap();
        }

        assert!(g.num_links() <= links_before);
        assert!(g.neurons().len() <= neurons_before);
    }

    #[test]
    fn clone_suppresses_both_additive_and_subtractive_categories() {
        let mut rng = Rng::seed(2);
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut g = genome(&mut rng);
        let params = Parameters {
            mutate_add_neuron_prob: 1.0,
            mutate_add_link_prob: 1.0,
            mutate_rem_link_prob: 1.0,
            mutate_rem_simple_neuron_prob: 1.0,
            ..zeroed_params()
        };
        let links_before = g.num_links();
        let ok = mutate_one(
            &mut g,
            &mut db,
            &mut rng,
            &params,
            SearchMode::Complexifying,
            true,
            &cfg,
        )
        .unwrap();
        assert!(!ok);
        assert_eq!(g.num_links(), links_before);
    }
}
