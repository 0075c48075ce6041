//! Runtime-tunable knobs consumed by the reproduction and mutation
//! pipelines. This is the `Parameters` value-object described as an
//! external collaborator in the top-level docs: the core reads it, a host
//! harness owns loading and validating it.

/// Search-mode flag toggling which structural mutations are eligible this
/// generation. Transitions are driven externally (e.g. by a host watching
/// mean network complexity); the core only ever reads the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Complexifying,
    Simplifying,
    Blended,
}

#[derive(Debug, Clone)]
pub struct Parameters {
    // --- reproduction / selection ---
    pub survival_rate: f64,
    pub crossover_rate: f64,
    pub interspecies_crossover_rate: f64,
    pub multipoint_crossover_rate: f64,
    pub overall_mutation_rate: f64,
    pub roulette_wheel_selection: bool,
    pub allow_clones: bool,
    pub archive_enforcement: bool,
    pub elite_fraction: f64,

    // --- species aging / stagnation ---
    pub young_age_treshold: usize,
    pub young_age_fitness_boost: f64,
    pub old_age_treshold: usize,
    pub old_age_penalty: f64,
    pub species_max_stagnation: usize,

    // --- mutation dispatch probabilities (sum need not be 1; each is an
    // independent roulette weight, see §4.4) ---
    pub mutate_add_neuron_prob: f64,
    pub mutate_add_link_prob: f64,
    pub mutate_rem_simple_neuron_prob: f64,
    pub mutate_rem_link_prob: f64,
    pub mutate_neuron_activation_type_prob: f64,
    pub mutate_weights_prob: f64,
    pub mutate_activation_a_prob: f64,
    pub mutate_activation_b_prob: f64,
    pub mutate_neuron_time_constants_prob: f64,
    pub mutate_neuron_biases_prob: f64,
    pub mutate_neuron_traits_prob: f64,
    pub mutate_link_traits_prob: f64,
    pub mutate_genome_traits_prob: f64,

    // --- weight mutation shape, consumed by Mutate_LinkWeights ---
    pub weight_mutate_power: f64,
    pub weight_replacement_rate: f64,
    pub weight_range: (f64, f64),

    // --- compatibility distance coefficients ---
    pub disjoint_coeff: f64,
    pub excess_coeff: f64,
    pub weight_diff_coeff: f64,
    pub compat_threshold: f64,
}

/// `COMPAT_EQUALITY_DELTA` - two genomes within this compatibility distance
/// are considered identical for duplicate elimination.
pub const COMPAT_EQUALITY_DELTA: f64 = 1e-7;

impl Default for Parameters {
    /// Values mirror the S1 scenario's tiny-XOR seed configuration, which
    /// is itself representative of sane defaults for a small population.
    fn default() -> Self {
        Parameters {
            survival_rate: 0.5,
            crossover_rate: 0.7,
            interspecies_crossover_rate: 0.05,
            multipoint_crossover_rate: 0.5,
            overall_mutation_rate: 0.25,
            roulette_wheel_selection: false,
            allow_clones: false,
            archive_enforcement: false,
            elite_fraction: 0.02,

            young_age_treshold: 5,
            young_age_fitness_boost: 1.1,
            old_age_treshold: 30,
            old_age_penalty: 0.9,
            species_max_stagnation: 15,

            mutate_add_neuron_prob: 0.03,
            mutate_add_link_prob: 0.05,
            mutate_rem_simple_neuron_prob: 0.0,
            mutate_rem_link_prob: 0.0,
            mutate_neuron_activation_type_prob: 0.03,
            mutate_weights_prob: 0.8,
            mutate_activation_a_prob: 0.0,
            mutate_activation_b_prob: 0.0,
            mutate_neuron_time_constants_prob: 0.0,
            mutate_neuron_biases_prob: 0.0,
            mutate_neuron_traits_prob: 0.0,
            mutate_link_traits_prob: 0.0,
            mutate_genome_traits_prob: 0.0,

            weight_mutate_power: 0.5,
            weight_replacement_rate: 0.1,
            weight_range: (-8.0, 8.0),

            disjoint_coeff: 1.0,
            excess_coeff: 1.0,
            weight_diff_coeff: 0.4,
            compat_threshold: 3.0,
        }
    }
}
