//! Training loop: episodes in parallel, then one epoch, repeated.
//!
//! A [`Trainer`] owns one [`Simulation`] per population member. Member `i` of the
//! [`Genetics`] population always drives simulation `i`, so fitness values and
//! new weights are exchanged purely by position.

use std::{sync::Arc, thread};

use astro_engine::{Outcome, Simulation};
use astro_network::{
    Topology,
    random::{self, SimRng},
};
use astro_stats::descriptive::DescriptiveStats;

use crate::{Genetics, GeneticsError, TrainingConfig, TrainingError};

/// How the episodes of one generation ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub died: usize,
    pub cleared: usize,
    pub timed_out: usize,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Died => self.died += 1,
            Outcome::Cleared => self.cleared += 1,
            Outcome::TimedOut => self.timed_out += 1,
        }
    }
}

/// The best weights seen so far and when they were found.
#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub generation: usize,
    pub fitness: f64,
    pub weights: Vec<f64>,
}

/// Summary of one evaluated generation, produced before breeding the next one.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Zero-based index of the evaluated generation
    pub generation: usize,
    pub fitness: DescriptiveStats,
    pub outcomes: OutcomeCounts,
    pub asteroids_destroyed: usize,
    /// Mean normalized spread of each weight position; see [`Genetics::weight_diversity`]
    pub weight_diversity: f64,
    pub best: Champion,
}

#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    topology: Topology,
    genetics: Genetics,
    simulations: Vec<Simulation>,
    rng: SimRng,
    best: Option<Champion>,
}

impl Trainer {
    /// Builds the simulations and seeds the population from their initial weights.
    ///
    /// Every simulation gets its own generator forked from `rng`, so a seeded
    /// trainer produces the same run regardless of thread scheduling.
    pub fn new(config: TrainingConfig, mut rng: SimRng) -> Result<Self, TrainingError> {
        let topology = config.topology();
        let mut genetics = Genetics::new(config.genetics.clone(), topology)?;
        let evaluator = Arc::new(config.fitness);
        let simulations = (0..config.genetics.population_size)
            .map(|_| {
                Simulation::new(
                    config.simulation.clone(),
                    topology,
                    evaluator.clone(),
                    random::fork(&mut rng),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        genetics.reset_with_weights(simulations.iter().map(Simulation::weights))?;
        log::info!(
            "trainer ready: {} members, {} weights each",
            simulations.len(),
            topology.weight_count()
        );
        Ok(Self {
            config,
            topology,
            genetics,
            simulations,
            rng,
            best: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn genetics(&self) -> &Genetics {
        &self.genetics
    }

    #[must_use]
    pub fn simulations(&self) -> &[Simulation] {
        &self.simulations
    }

    /// Best individual observed over every generation run so far.
    #[must_use]
    pub fn best_so_far(&self) -> Option<&Champion> {
        self.best.as_ref()
    }

    /// Runs one episode per member, breeds the next generation and installs its weights.
    pub fn run_generation(&mut self) -> Result<GenerationReport, TrainingError> {
        let generation = self.genetics.generation();

        let mut results = vec![Ok(0.0); self.simulations.len()];
        thread::scope(|s| {
            for (sim, result) in self.simulations.iter_mut().zip(&mut results) {
                s.spawn(move || *result = sim.run_episode());
            }
        });
        let fitnesses = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        self.genetics.set_population_fitnesses(&fitnesses)?;

        let report = self.report(generation)?;
        log::info!(
            "generation {generation}: best {:.2}, mean {:.2}, diversity {:.3}, died {}, cleared {}, timed out {}",
            report.fitness.max,
            report.fitness.mean,
            report.weight_diversity,
            report.outcomes.died,
            report.outcomes.cleared,
            report.outcomes.timed_out
        );
        if self
            .best
            .as_ref()
            .is_none_or(|b| report.best.fitness > b.fitness)
        {
            log::debug!("new best fitness {:.2}", report.best.fitness);
            self.best = Some(report.best.clone());
        }

        let weights = self.genetics.epoch(&mut self.rng)?;
        for (sim, weights) in self.simulations.iter_mut().zip(&weights) {
            sim.apply_weights(weights)?;
        }
        Ok(report)
    }

    /// Runs `generations` generations, handing each report to `on_report`.
    pub fn run<F>(&mut self, generations: usize, mut on_report: F) -> Result<(), TrainingError>
    where
        F: FnMut(&GenerationReport),
    {
        for _ in 0..generations {
            let report = self.run_generation()?;
            on_report(&report);
        }
        Ok(())
    }

    fn report(&self, generation: usize) -> Result<GenerationReport, TrainingError> {
        let fitness = self
            .genetics
            .fitness_stats()
            .ok_or(GeneticsError::EmptyPopulation)?;
        let best = self
            .genetics
            .best_member()
            .ok_or(GeneticsError::EmptyPopulation)?;

        let mut outcomes = OutcomeCounts::default();
        let mut asteroids_destroyed = 0;
        for stats in self.simulations.iter().map(Simulation::stats) {
            if let Some(outcome) = stats.outcome() {
                outcomes.record(outcome);
            }
            asteroids_destroyed += stats.asteroids_destroyed();
        }

        Ok(GenerationReport {
            generation,
            fitness,
            outcomes,
            asteroids_destroyed,
            weight_diversity: self.genetics.weight_diversity(),
            best: Champion {
                generation,
                fitness: best.fitness(),
                weights: best.weights(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use astro_engine::SimulationConfig;

    use super::*;
    use crate::GeneticParams;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            genetics: GeneticParams {
                population_size: 5,
                elite_count: 1,
                ..Default::default()
            },
            simulation: SimulationConfig {
                sim_timeout_secs: 1.0,
                asteroids: 3,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_seeds_population_from_simulations() {
        let trainer = Trainer::new(small_config(), random::seeded(1)).unwrap();
        assert_eq!(trainer.simulations().len(), 5);
        for (sim, member) in trainer.simulations().iter().zip(trainer.genetics().population()) {
            assert_eq!(sim.weights(), member.weights());
        }
        assert!(trainer.best_so_far().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = small_config();
        config.genetics.crossover_rate = 2.0;
        assert!(Trainer::new(config, random::seeded(0)).unwrap_err().is_genetics());

        let mut config = small_config();
        config.simulation.asteroids = 0;
        assert!(Trainer::new(config, random::seeded(0)).unwrap_err().is_simulation());
    }

    #[test]
    fn test_run_generations() {
        let mut trainer = Trainer::new(small_config(), random::seeded(2)).unwrap();
        let mut reports = vec![];
        trainer
            .run(3, |report| reports.push(report.clone()))
            .unwrap();

        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.generation, i);
            let o = report.outcomes;
            assert_eq!(o.died + o.cleared + o.timed_out, 5);
            assert_eq!(report.best.fitness, report.fitness.max);
            // std_dev never exceeds half the range
            assert!((0.0..=0.5).contains(&report.weight_diversity));
        }
        // freshly initialized members are not identical
        assert!(reports[0].weight_diversity > 0.0);
        assert_eq!(trainer.genetics().generation(), 3);

        let best = trainer.best_so_far().unwrap();
        let max = reports
            .iter()
            .map(|r| r.fitness.max)
            .fold(0.0, f64::max);
        assert_eq!(best.fitness, max);
        assert_eq!(best.weights.len(), trainer.topology().weight_count());

        // new weights are installed in the simulations
        for (sim, member) in trainer.simulations().iter().zip(trainer.genetics().population()) {
            assert_eq!(sim.weights(), member.weights());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut trainer = Trainer::new(small_config(), random::seeded(3)).unwrap();
            let mut maxima = vec![];
            trainer.run(2, |r| maxima.push(r.fitness.max)).unwrap();
            (maxima, trainer.genetics().population()[0].weights())
        };
        assert_eq!(run(), run());
    }
}
