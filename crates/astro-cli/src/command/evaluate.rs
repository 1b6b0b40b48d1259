use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use astro_engine::Simulation;
use astro_stats::descriptive::DescriptiveStats;
use astro_training::random;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Trained model file (JSON)
    #[arg(long)]
    model: PathBuf,
    /// Number of episodes to run
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Seed for reproducible asteroid fields
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        model,
        episodes,
        seed,
    } = arg;
    let model = util::read_trained_model_file(model)?;
    let rng = match seed {
        Some(seed) => random::seeded(*seed),
        None => random::from_os_rng(),
    };

    let mut sim = Simulation::new(
        model.simulation.clone(),
        model.topology,
        Arc::new(model.fitness),
        rng,
    )
    .context("Model does not fit its simulation settings")?;
    sim.apply_weights(&model.weights)
        .context("Model weights do not match its topology")?;

    eprintln!("Evaluating model {} ({})", model.name, model.trained_at);
    let mut fitnesses = Vec::with_capacity(*episodes);
    for episode in 0..*episodes {
        let fitness = sim.run_episode().context("Episode failed")?;
        let stats = sim.stats();
        let outcome = stats
            .outcome()
            .map_or_else(|| "unfinished".to_owned(), |o| o.to_string());
        eprintln!(
            "  {episode:3}: {outcome:<10} ticks {:5}, destroyed {:3}, fired {:3} => {fitness:.3}",
            stats.ticks(),
            stats.asteroids_destroyed(),
            stats.bullets_fired(),
        );
        fitnesses.push(fitness);
    }

    if let Some(stats) = DescriptiveStats::new(fitnesses) {
        eprintln!("Fitness Stats:");
        eprintln!("  Min:  {:.3}", stats.min);
        eprintln!("  Max:  {:.3}", stats.max);
        eprintln!("  Mean: {:.3}", stats.mean);
    }
    Ok(())
}
