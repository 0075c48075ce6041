//! A niche: a set of genomes considered close enough to compete for
//! offspring among themselves rather than against the whole population.
//! Per-species bookkeeping (fitness sharing, stagnation tracking, member
//! selection) lives here; the cross-species reproduction loop that drives it
//! lives in [`crate::population`].

use crate::genome::{Genome, GenomeId};
use crate::params::Parameters;
use crate::rng::{self, Rng};
use neat_error::{NeatError, NeatResult};

pub type SpeciesId = i64;

/// A niche's display color, drawn once at birth from the decorative
/// [`rng::cosmetic_color`] generator and never touched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone)]
pub struct Species {
    id: SpeciesId,
    representative: Genome,
    best_genome: Genome,
    individuals: Vec<Genome>,
    age_generations: usize,
    age_evaluations: usize,
    gens_no_improvement: usize,
    evals_no_improvement: usize,
    best_fitness: f64,
    average_fitness: f64,
    offspring_rqd: f64,
    best_species: bool,
    worst_species: bool,
    color: Color,
}

impl Species {
    /// Founds a new species around `genome`, which becomes both its
    /// representative and its first (only) member.
    pub fn new(id: SpeciesId, genome: Genome) -> Self {
        let best_fitness = genome.get_fitness();
        let (r, g, b) = rng::cosmetic_color();
        Species {
            id,
            best_genome: genome.clone(),
            representative: genome.clone(),
            individuals: vec![genome],
            age_generations: 0,
            age_evaluations: 0,
            gens_no_improvement: 0,
            evals_no_improvement: 0,
            best_fitness,
            average_fitness: 0.0,
            offspring_rqd: 0.0,
            best_species: true,
            worst_species: false,
            color: Color { r, g, b },
        }
    }

    pub fn id(&self) -> SpeciesId {
        self.id
    }

    pub fn representative(&self) -> &Genome {
        &self.representative
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn individuals(&self) -> &[Genome] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Genome] {
        &mut self.individuals
    }

    pub fn num_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn average_fitness(&self) -> f64 {
        self.average_fitness
    }

    pub fn age_generations(&self) -> usize {
        self.age_generations
    }

    pub fn gens_no_improvement(&self) -> usize {
        self.gens_no_improvement
    }

    pub fn age_evaluations(&self) -> usize {
        self.age_evaluations
    }

    pub fn evals_no_improvement(&self) -> usize {
        self.evals_no_improvement
    }

    /// Ticks the per-evaluation stagnation clock. Distinct from
    /// [`Species::advance_age`] (per-generation): a host running
    /// steady-state or real-time reproduction evaluates individuals without
    /// necessarily completing a full generation, and tracks stagnation on
    /// that finer-grained clock too.
    pub fn record_evaluation(&mut self, fitness: f64) {
        self.age_evaluations += 1;
        if fitness > self.best_fitness {
            self.evals_no_improvement = 0;
        } else {
            self.evals_no_improvement += 1;
        }
    }

    pub fn offspring_rqd(&self) -> f64 {
        self.offspring_rqd
    }

    pub fn set_best_species(&mut self, v: bool) {
        self.best_species = v;
    }

    pub fn set_worst_species(&mut self, v: bool) {
        self.worst_species = v;
    }

    pub fn is_best_species(&self) -> bool {
        self.best_species
    }

    pub fn add_individual(&mut self, genome: Genome) {
        self.individuals.push(genome);
    }

    pub fn advance_age(&mut self) {
        self.age_generations += 1;
    }

    /// Returns a reference to a member chosen from the best `survival_rate`
    /// fraction of evaluated members (or, if `roulette_wheel_selection`, by
    /// fitness-weighted roulette across all evaluated members). Requires
    /// `individuals` to already be sorted best-first
    /// ([`Species::sort_individuals`]).
    ///
    /// Mirrors `Species::GetIndividual`'s small-pool special cases: exactly
    /// one evaluated member returns it outright, exactly two flips a coin.
    pub fn get_individual(&self, params: &Parameters, rng: &mut Rng) -> NeatResult<&Genome> {
        let evaluated: Vec<&Genome> = self.individuals.iter().filter(|g| g.is_evaluated()).collect();
        if evaluated.is_empty() {
            return Err(NeatError::Selection {
                message: "get_individual: species has no evaluated members".into(),
            });
        }
        if evaluated.len() == 1 {
            return Ok(evaluated[0]);
        }
        if evaluated.len() == 2 {
            return Ok(evaluated[rng.rand_index(2)]);
        }

        let chosen = if params.roulette_wheel_selection {
            let weights: Vec<f64> = evaluated.iter().map(|g| g.get_fitness().max(0.0)).collect();
            rng.roulette(&weights)
        } else {
            // t_num_parents is clamped into [1, evaluated.len() - 1] rather
            // than asserted, since a very small or very high survival_rate
            // would otherwise trip an assertion on a perfectly ordinary run.
            let raw = (params.survival_rate * evaluated.len() as f64) as usize;
            let num_parents = raw.clamp(1, evaluated.len() - 1);
            rng.rand_index(num_parents + 1)
        };

        Ok(evaluated[chosen])
    }

    pub fn get_random_individual<'a>(&'a self, rng: &mut Rng) -> &'a Genome {
        if self.individuals.is_empty() {
            &self.representative
        } else {
            &self.individuals[rng.rand_index(self.individuals.len())]
        }
    }

    pub fn get_leader(&self) -> &Genome {
        self.individuals
            .iter()
            .max_by(|a, b| a.get_fitness().partial_cmp(&b.get_fitness()).unwrap())
            .unwrap_or(&self.representative)
    }

    /// Sum of every member's already-computed offspring allotment.
    pub fn count_offspring(&mut self) {
        self.offspring_rqd = self.individuals.iter().map(|g| g.get_offspring_amount()).sum();
    }

    /// Fitness sharing: divides each member's (boosted/penalized) fitness by
    /// the species size, tracking best fitness and stagnation as a side
    /// effect. A species stuck at `gens_no_improvement > max_stagnation`
    /// gets its fitness crushed to near zero unless it's the best species in
    /// the population, in which case it is kept alive regardless.
    pub fn adjust_fitness(&mut self, params: &Parameters) {
        let size = self.individuals.len() as f64;
        let mut improved = false;

        for genome in &mut self.individuals {
            let mut fitness = genome.get_fitness().max(0.0001);

            if fitness > self.best_fitness {
                self.best_fitness = fitness;
                improved = true;
            }

            if self.age_generations < params.young_age_treshold {
                fitness *= params.young_age_fitness_boost;
            }
            if self.age_generations > params.old_age_treshold {
                fitness *= params.old_age_penalty;
            }
            if self.gens_no_improvement > params.species_max_stagnation && !self.best_species {
                fitness *= 0.0000001;
            }

            genome.set_adj_fitness(fitness / size);
        }

        self.gens_no_improvement = if improved { 0 } else { self.gens_no_improvement + 1 };
        self.average_fitness = self.individuals.iter().map(|g| g.get_fitness()).sum::<f64>() / size;
    }

    /// Sorts members best fitness first. Every consumer of
    /// [`Species::get_individual`]/elitism relies on this ordering.
    pub fn sort_individuals(&mut self) {
        self.individuals
            .sort_by(|a, b| b.get_fitness().partial_cmp(&a.get_fitness()).unwrap());
    }

    pub fn replace_representative(&mut self, genome: Genome) {
        self.representative = genome;
    }

    pub fn update_best_genome(&mut self) {
        if let Some(best) = self
            .individuals
            .iter()
            .max_by(|a, b| a.get_fitness().partial_cmp(&b.get_fitness()).unwrap())
        {
            if best.get_fitness() >= self.best_genome.get_fitness() {
                self.best_genome = best.clone();
            }
        }
    }

    pub fn best_genome(&self) -> &Genome {
        &self.best_genome
    }

    pub fn clear_individuals(&mut self) -> Vec<Genome> {
        std::mem::take(&mut self.individuals)
    }
}

pub fn find_genome_by_id(species: &[Species], id: GenomeId) -> Option<&Genome> {
    species
        .iter()
        .flat_map(|s| s.individuals())
        .find(|g| g.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::TraitConfig;
    use crate::innovation::InnovationDatabase;

    fn genome(id: GenomeId, fitness: f64, rng: &mut Rng) -> Genome {
        let mut db = InnovationDatabase::new();
        let cfg = TraitConfig::default();
        let mut g = Genome::new_minimal(id, 2, 1, &mut db, &cfg, rng).unwrap();
        g.set_fitness(fitness);
        g
    }

    #[test]
    fn single_evaluated_member_is_returned_outright() {
        let mut rng = Rng::seed(1);
        let g = genome(0, 1.0, &mut rng);
        let species = Species::new(0, g.clone());
        let chosen = species.get_individual(&Parameters::default(), &mut rng).unwrap();
        assert_eq!(chosen.id(), g.id());
    }

    #[test]
    fn stagnant_non_best_species_fitness_collapses() {
        let mut rng = Rng::seed(2);
        let g = genome(0, 10.0, &mut rng);
        let mut species = Species::new(0, g);
        species.set_best_species(false);
        species.gens_no_improvement = 999;
        let params = Parameters {
            species_max_stagnation: 5,
            young_age_treshold: 0,
            old_age_treshold: 999,
            ..Parameters::default()
        };
        species.adjust_fitness(&params);
        assert!(species.individuals()[0].get_adj_fitness() < 0.001);
    }

    #[test]
    fn sort_individuals_orders_best_first() {
        let mut rng = Rng::seed(3);
        let a = genome(0, 1.0, &mut rng);
        let b = genome(1, 5.0, &mut rng);
        let mut species = Species::new(0, a);
        species.add_individual(b);
        species.sort_individuals();
        assert_eq!(species.individuals()[0].get_fitness(), 5.0);
    }
}
