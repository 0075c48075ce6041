//! Generation-level orchestration: holds every species, the shared
//! innovation database and id counters, and drives one generation's worth of
//! reproduction ([`Population::epoch`]).

use crate::genome::{Genome, GenomeId, TraitConfig};
use crate::innovation::InnovationDatabase;
use crate::mutation;
use crate::params::{COMPAT_EQUALITY_DELTA, Parameters, SearchMode};
use crate::rng::Rng;
use crate::species::{Species, SpeciesId};
use neat_error::{NeatError, NeatResult};
use tracing::{debug, info, trace, warn};

pub struct Population {
    species: Vec<Species>,
    genome_archive: Vec<Genome>,
    next_genome_id: GenomeId,
    next_species_id: SpeciesId,
    innovation_db: InnovationDatabase,
    search_mode: SearchMode,
    generation: usize,
}

impl Population {
    /// Seeds a population of `size` minimal genomes, all sharing the same
    /// innovation ids since they're all built from one
    /// [`InnovationDatabase`], and places them into species.
    pub fn new(
        size: usize,
        num_inputs: usize,
        num_outputs: usize,
        trait_config: &TraitConfig,
        params: &Parameters,
        rng: &mut Rng,
    ) -> NeatResult<Self> {
        let mut innovation_db = InnovationDatabase::new();
        let mut next_genome_id: GenomeId = 0;
        let mut genomes = Vec::with_capacity(size);
        for _ in 0..size {
            let genome = Genome::new_minimal(
                next_genome_id,
                num_inputs,
                num_outputs,
                &mut innovation_db,
                trait_config,
                rng,
            )?;
            next_genome_id += 1;
            genomes.push(genome);
        }

        let mut population = Population {
            species: Vec::new(),
            genome_archive: Vec::new(),
            next_genome_id,
            next_species_id: 0,
            innovation_db,
            search_mode: SearchMode::Complexifying,
            generation: 0,
        };
        population.speciate(genomes, params)?;
        info!(
            generation = population.generation,
            species = population.species.len(),
            "population initialized"
        );
        Ok(population)
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }

    pub fn innovation_db(&self) -> &InnovationDatabase {
        &self.innovation_db
    }

    fn next_genome_id(&mut self) -> GenomeId {
        let id = self.next_genome_id;
        self.next_genome_id += 1;
        id
    }

    fn next_species_id(&mut self) -> SpeciesId {
        let id = self.next_species_id;
        self.next_species_id += 1;
        id
    }

    /// Assigns every genome in `genomes` to an existing compatible species
    /// (compared against that species' representative) or founds a new one.
    fn speciate(&mut self, genomes: Vec<Genome>, params: &Parameters) -> NeatResult<()> {
        for genome in genomes {
            let mut placed = false;
            for species in &mut self.species {
                if genome.is_compatible_with(species.representative(), params)? {
                    species.add_individual(genome);
                    placed = true;
                    break;
                }
            }
            if !placed {
                let id = self.next_species_id();
                self.species.push(Species::new(id, genome));
            }
        }
        Ok(())
    }

    /// All genomes across every species, flattened.
    pub fn all_genomes(&self) -> impl Iterator<Item = &Genome> {
        self.species.iter().flat_map(|s| s.individuals())
    }

    pub fn num_genomes(&self) -> usize {
        self.species.iter().map(Species::num_individuals).sum()
    }

    /// Runs one full generation: fitness sharing, offspring allotment,
    /// per-species reproduction into a scratch species list, then swaps the
    /// scratch list in. Every genome in the population must be evaluated
    /// ([`Genome::set_fitness`]) before calling this.
    pub fn epoch(&mut self, params: &Parameters, trait_config: &TraitConfig, rng: &mut Rng) -> NeatResult<()> {
        let total = self.num_genomes();
        if total == 0 {
            return Err(NeatError::InvalidConfig {
                message: "epoch: population has no genomes".into(),
            });
        }

        for species in &mut self.species {
            species.sort_individuals();
            species.adjust_fitness(params);
        }
        self.mark_best_and_worst_species();

        let total_adjusted: f64 = self
            .all_genomes()
            .map(Genome::get_adj_fitness)
            .sum::<f64>()
            .max(f64::MIN_POSITIVE);
        let average_adjusted = total_adjusted / total as f64;

        for species in &mut self.species {
            let count = species.individuals().len();
            for i in 0..count {
                let adj = species.individuals()[i].get_adj_fitness();
                let amount = adj / average_adjusted;
                species.individuals_mut()[i].set_offspring_amount(amount);
            }
            species.count_offspring();
        }

        let mut temp_species: Vec<Species> = Vec::new();

        for species_idx in 0..self.species.len() {
            let offspring_needed = self.species[species_idx].offspring_rqd().round() as i64;
            if offspring_needed <= 0 {
                debug!(species = self.species[species_idx].id(), "species produced no offspring");
                continue;
            }

            let elite_count =
                ((params.elite_fraction * self.species[species_idx].num_individuals() as f64).round() as usize).max(1);

            for slot in 0..offspring_needed {
                let baby = if (slot as usize) < elite_count {
                    self.species[species_idx].individuals()[slot as usize].clone()
                } else {
                    self.reproduce_one(species_idx, &temp_species, params, trait_config, rng)?
                };
                self.place_baby(baby, &mut temp_species, params, rng)?;
            }
        }

        self.species = temp_species;
        self.species.retain(|s| s.num_individuals() > 0);
        for species in &mut self.species {
            species.advance_age();
            species.update_best_genome();
        }
        self.generation += 1;

        info!(
            generation = self.generation,
            species = self.species.len(),
            genomes = self.num_genomes(),
            "epoch complete"
        );
        Ok(())
    }

    fn mark_best_and_worst_species(&mut self) {
        if self.species.is_empty() {
            return;
        }
        let best_idx = self
            .species
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.best_fitness().partial_cmp(&b.best_fitness()).unwrap())
            .map(|(i, _)| i);
        let worst_idx = self
            .species
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.best_fitness().partial_cmp(&b.best_fitness()).unwrap())
            .map(|(i, _)| i);

        for (i, species) in self.species.iter_mut().enumerate() {
            species.set_best_species(Some(i) == best_idx);
            species.set_worst_species(Some(i) == worst_idx);
        }
    }

    /// Produces exactly one non-elite offspring for species `species_idx`:
    /// chooses a mother, decides whether to mate (and with whom), mutates
    /// the result, and retries (bounded) until the baby is structurally
    /// valid and - unless clones are allowed - distinct from every genome
    /// already placed into `temp_species`/the archive this generation.
    fn reproduce_one(
        &mut self,
        species_idx: usize,
        temp_species: &[Species],
        params: &Parameters,
        trait_config: &TraitConfig,
        rng: &mut Rng,
    ) -> NeatResult<Genome> {
        const MAX_VALIDITY_RETRIES: usize = 256;

        let mut baby = self.species[species_idx].get_individual(params, rng)?.clone();

        for attempt in 0..MAX_VALIDITY_RETRIES {
            let is_clone;
            if self.species[species_idx].num_individuals() == 1 {
                baby = self.species[species_idx].get_individual(params, rng)?.clone();
                is_clone = true;
            } else {
                let mom = self.species[species_idx].get_individual(params, rng)?.clone();

                let should_mate =
                    rng.rand_float() < params.crossover_rate && self.search_mode != SearchMode::Simplifying;

                if should_mate {
                    let (dad, interspecies) =
                        self.choose_father(species_idx, &mom, params, rng)?;
                    let average = rng.rand_float() >= params.multipoint_crossover_rate;
                    let new_id = self.next_genome_id();
                    baby = mom.mate(&dad, average, interspecies, new_id, rng)?;
                    is_clone = false;
                } else {
                    baby = mom;
                    is_clone = true;
                }
            }

            if !is_clone && rng.rand_float() >= params.overall_mutation_rate {
                // mated baby skips mutation this round
            } else {
                mutation::mutate_one(
                    &mut baby,
                    &mut self.innovation_db,
                    rng,
                    params,
                    self.search_mode,
                    is_clone,
                    trait_config,
                )?;
            }

            if baby.fails_constraints(params) {
                trace!(attempt, "baby failed constraints, retrying");
                continue;
            }
            if !params.allow_clones && self.duplicates_existing(&baby, temp_species, params)? {
                trace!(attempt, "baby duplicated an existing genome, retrying");
                continue;
            }
            return Ok(baby);
        }

        warn!(
            species = self.species[species_idx].id(),
            "reproduce_one exhausted its retry budget, returning best-effort baby"
        );
        Ok(baby)
    }

    /// Picks the father for a mating event: with probability
    /// `interspecies_crossover_rate` (and only if more than one species
    /// exists) draws from a randomly chosen other species; otherwise draws
    /// from the same species, retrying up to 1024 times to avoid pairing
    /// `mom` with herself or a near-identical clone (unless clones are
    /// explicitly allowed).
    fn choose_father(
        &self,
        species_idx: usize,
        mom: &Genome,
        params: &Parameters,
        rng: &mut Rng,
    ) -> NeatResult<(Genome, bool)> {
        if rng.rand_float() < params.interspecies_crossover_rate && self.species.len() > 1 {
            let other_idx = rng.rand_index(self.species.len());
            let dad = self.species[other_idx].get_individual(params, rng)?.clone();
            return Ok((dad, true));
        }

        let mut dad = self.species[species_idx].get_individual(params, rng)?.clone();
        if !params.allow_clones {
            for _ in 0..1024 {
                let too_close = dad.id() == mom.id()
                    || mom.compatibility_distance(&dad, params)? < COMPAT_EQUALITY_DELTA;
                if !too_close {
                    break;
                }
                dad = self.species[species_idx].get_individual(params, rng)?.clone();
            }
        } else {
            for _ in 0..1024 {
                if dad.id() != mom.id() {
                    break;
                }
                dad = self.species[species_idx].get_individual(params, rng)?.clone();
            }
        }
        Ok((dad, false))
    }

    /// Scans every individual already placed into `temp_species` this
    /// generation, plus the genome archive when archive enforcement is on,
    /// for a near-duplicate of `baby` (spec: compatibility distance below
    /// [`COMPAT_EQUALITY_DELTA`]).
    fn duplicates_existing(
        &self,
        baby: &Genome,
        temp_species: &[Species],
        params: &Parameters,
    ) -> NeatResult<bool> {
        for existing in temp_species.iter().flat_map(Species::individuals) {
            if baby.compatibility_distance(existing, params)? < COMPAT_EQUALITY_DELTA {
                return Ok(true);
            }
        }
        if params.archive_enforcement {
            for existing in &self.genome_archive {
                if baby.compatibility_distance(existing, params)? < COMPAT_EQUALITY_DELTA {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Finalizes a freshly produced baby (new id, reset fitness bookkeeping)
    /// and places it into `temp_species`, founding a new species if none of
    /// the existing scratch species are compatible.
    fn place_baby(
        &mut self,
        mut baby: Genome,
        temp_species: &mut Vec<Species>,
        params: &Parameters,
        _rng: &mut Rng,
    ) -> NeatResult<()> {
        baby.set_id(self.next_genome_id());
        baby.sort_genes();
        baby.set_fitness(0.0);
        baby.set_adj_fitness(0.0);
        baby.set_offspring_amount(0.0);
        baby.reset_evaluated();

        if params.archive_enforcement {
            self.genome_archive.push(baby.clone());
        }

        for species in temp_species.iter_mut() {
            if baby.is_compatible_with(species.representative(), params)? {
                species.add_individual(baby);
                return Ok(());
            }
        }

        let id = self.next_species_id();
        temp_species.push(Species::new(id, baby));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_population_is_fully_speciated() {
        let mut rng = Rng::seed(1);
        let cfg = TraitConfig::default();
        let params = Parameters::default();
        let pop = Population::new(10, 3, 1, &cfg, &params, &mut rng).unwrap();
        assert_eq!(pop.num_genomes(), 10);
        assert!(!pop.species().is_empty());
    }

    #[test]
    fn epoch_preserves_population_size() {
        let mut rng = Rng::seed(2);
        let cfg = TraitConfig::default();
        let params = Parameters::default();
        let mut pop = Population::new(12, 3, 1, &cfg, &params, &mut rng).unwrap();

        for species in pop_species_mut(&mut pop) {
            for genome in species.individuals_mut() {
                genome.set_fitness(1.0);
            }
        }

        pop.epoch(&params, &cfg, &mut rng).unwrap();
        assert!(pop.num_genomes() > 0);
    }

    fn pop_species_mut(pop: &mut Population) -> &mut [Species] {
        &mut pop.species
    }
}
