//! Roulette-wheel genetic algorithm over network weights.
//!
//! # Algorithm Overview
//!
//! Each generation follows this cycle:
//!
//! 1. **Evaluate** - The caller runs one episode per member and reports fitnesses
//!    with [`Genetics::set_population_fitnesses`]
//! 2. **Elitism** - The best `elite_count` members are copied `elite_copies` times,
//!    unchanged
//! 3. **Roulette Selection** - Parents are drawn with probability proportional to
//!    their fitness
//! 4. **Crossover** - Single-point crossover of the parents' flat weights
//! 5. **Mutation** - Each child weight is perturbed with probability `mutation_chance`
//! 6. **Replace** - The new members replace the whole population; fitness resets to 0
//!
//! The population size never changes. When two-child crossover would overshoot the
//! target size, the second child of the final pairing is dropped.
//!
//! # Degenerate Fitness
//!
//! When every member scored zero, roulette selection cannot prefer anyone and
//! always returns the last member. Training still progresses through mutation,
//! but a fitness function that rarely rewards anything makes for slow learning.

use astro_network::{Topology, random::RandomSource};
use astro_stats::descriptive::DescriptiveStats;
use rand::Rng;

use crate::{GeneticParams, GeneticsError, PopulationMember};

#[derive(Debug, Clone)]
pub struct Genetics {
    params: GeneticParams,
    topology: Topology,
    population: Vec<PopulationMember>,
    generation: usize,
}

impl Genetics {
    /// Creates an empty population; call [`reset`](Self::reset) or
    /// [`reset_with_weights`](Self::reset_with_weights) before the first epoch.
    pub fn new(params: GeneticParams, topology: Topology) -> Result<Self, GeneticsError> {
        params.validate()?;
        topology.validate()?;
        Ok(Self {
            params,
            topology,
            population: vec![],
            generation: 0,
        })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn population(&self) -> &[PopulationMember] {
        &self.population
    }

    /// Number of epochs performed since the last reset.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fills the population with `population_size` randomly initialized members.
    pub fn reset<R>(&mut self, rng: &mut R) -> Result<(), GeneticsError>
    where
        R: Rng + ?Sized,
    {
        self.population = (0..self.params.population_size)
            .map(|_| PopulationMember::random(self.topology, rng))
            .collect::<Result<_, _>>()?;
        self.generation = 0;
        Ok(())
    }

    /// Fills the population from caller-supplied weight vectors, one per member.
    pub fn reset_with_weights<I, W>(&mut self, weights: I) -> Result<(), GeneticsError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[f64]>,
    {
        let population = weights
            .into_iter()
            .map(|w| PopulationMember::from_weights(self.topology, w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if population.len() != self.params.population_size {
            return Err(GeneticsError::PopulationSizeMismatch {
                expected: self.params.population_size,
                actual: population.len(),
            });
        }
        self.population = population;
        self.generation = 0;
        Ok(())
    }

    /// Appends a member built from `weights`, growing the population by one.
    ///
    /// Meant for seeding a population incrementally. Fails once the population
    /// already holds `population_size` members.
    pub fn add_population_member(&mut self, weights: &[f64]) -> Result<(), GeneticsError> {
        let expected = self.params.population_size;
        if self.population.len() >= expected {
            return Err(GeneticsError::PopulationSizeMismatch {
                expected,
                actual: self.population.len() + 1,
            });
        }
        self.population
            .push(PopulationMember::from_weights(self.topology, weights)?);
        Ok(())
    }

    /// Assigns fitness values in population order.
    pub fn set_population_fitnesses(&mut self, fitnesses: &[f64]) -> Result<(), GeneticsError> {
        if fitnesses.len() != self.population.len() {
            return Err(GeneticsError::FitnessCountMismatch {
                expected: self.population.len(),
                actual: fitnesses.len(),
            });
        }
        if let Some(index) = fitnesses.iter().position(|f| !(f.is_finite() && *f >= 0.0)) {
            return Err(GeneticsError::InvalidFitness {
                index,
                value: fitnesses[index],
            });
        }
        for (member, fitness) in self.population.iter_mut().zip(fitnesses) {
            member.set_fitness(*fitness);
        }
        Ok(())
    }

    /// Picks a member with probability proportional to its fitness.
    ///
    /// Falls back to the last member when the wheel comes up empty (all fitness
    /// zero, or rounding leaves the slice past the total).
    pub fn roulette_selection<R>(&self, rng: &mut R) -> Result<&PopulationMember, GeneticsError>
    where
        R: Rng + ?Sized,
    {
        let last = self.population.last().ok_or(GeneticsError::EmptyPopulation)?;
        let total = self.population.iter().map(PopulationMember::fitness).sum::<f64>();
        let slice = rng.unit() * total;

        let mut tracked = 0.0;
        for member in &self.population {
            tracked += member.fitness();
            if tracked > slice {
                return Ok(member);
            }
        }
        Ok(last)
    }

    /// Replaces the population with the next generation and returns its weights.
    ///
    /// The returned vectors are in population order; feed them back to the
    /// simulations before the next round of episodes.
    pub fn epoch<R>(&mut self, rng: &mut R) -> Result<Vec<Vec<f64>>, GeneticsError>
    where
        R: Rng + ?Sized,
    {
        if self.population.is_empty() {
            return Err(GeneticsError::EmptyPopulation);
        }
        let size = self.params.population_size;
        self.population
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

        let mut next = Vec::with_capacity(size);
        'elites: for elite in self.population.iter().take(self.params.elite_count) {
            for _ in 0..self.params.elite_copies {
                if next.len() >= size {
                    break 'elites;
                }
                next.push(PopulationMember::new(elite.network().clone()));
            }
        }

        while next.len() < size {
            let dad = self.roulette_selection(rng)?;
            let mum = self.roulette_selection(rng)?;
            let children = dad.crossover(mum, &self.params, rng)?;
            let room = size - next.len();
            next.extend(children.into_iter().take(room));
        }

        self.population = next;
        self.generation += 1;
        log::debug!(
            "generation {} bred: {} members",
            self.generation,
            self.population.len()
        );
        Ok(self.population.iter().map(PopulationMember::weights).collect())
    }

    /// Member with the highest fitness, the first one on ties.
    #[must_use]
    pub fn best_member(&self) -> Option<&PopulationMember> {
        self.population
            .iter()
            .reduce(|best, m| if m.fitness() > best.fitness() { m } else { best })
    }

    /// Descriptive statistics of the current fitness values.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.population.iter().map(PopulationMember::fitness))
    }

    /// Statistics of each weight position across the population.
    ///
    /// A small `normalized_std_dev` at a position means the population has
    /// converged on that weight. Empty when the population is.
    #[must_use]
    pub fn weight_stats(&self) -> Vec<DescriptiveStats> {
        let weights = self
            .population
            .iter()
            .map(PopulationMember::weights)
            .collect::<Vec<_>>();
        (0..self.topology.weight_count())
            .filter_map(|i| DescriptiveStats::new(weights.iter().map(|w| w[i])))
            .collect()
    }

    /// Mean of the per-position `normalized_std_dev`; `0.0` means every member is identical.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn weight_diversity(&self) -> f64 {
        let stats = self.weight_stats();
        if stats.is_empty() {
            return 0.0;
        }
        stats.iter().map(|s| s.normalized_std_dev).sum::<f64>() / stats.len() as f64
    }
}
