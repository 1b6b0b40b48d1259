use std::path::PathBuf;

use anyhow::Context as _;
use astro_engine::{FitnessKind, KillCountFitness, SurvivalAdjustedFitness};
use astro_training::{GenerationReport, Trainer, TrainingConfig, random};
use chrono::Utc;

use crate::{
    model::trained_model::TrainedModel,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum FitnessType {
    #[default]
    Kills,
    Survival,
}

const DEFAULT_GENERATIONS: usize = 100;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Training configuration file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Overrides the configured population size
    #[arg(long)]
    population: Option<usize>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the configured fitness function (kills, survival)
    #[arg(long)]
    fitness: Option<FitnessType>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        generations,
        population,
        seed,
        fitness,
        output,
    } = arg;

    let mut config = match config {
        Some(path) => util::read_training_config_file(path)?,
        None => TrainingConfig::default(),
    };
    if let Some(population) = population {
        config.genetics.population_size = *population;
    }
    if let Some(fitness) = fitness {
        config.fitness = match fitness {
            FitnessType::Kills => FitnessKind::KillCount(KillCountFitness::default()),
            FitnessType::Survival => {
                FitnessKind::SurvivalAdjusted(SurvivalAdjustedFitness::default())
            }
        };
    }
    let rng = match seed {
        Some(seed) => random::seeded(*seed),
        None => random::from_os_rng(),
    };

    let mut trainer =
        Trainer::new(config.clone(), rng).context("Failed to set up the training session")?;
    log::info!(
        "training {} members for {generations} generations",
        config.genetics.population_size
    );
    trainer
        .run(*generations, print_report)
        .context("Training failed")?;

    let best = trainer
        .best_so_far()
        .context("No generation was run, nothing to save")?;
    let model = TrainedModel {
        name: model_name(&config.fitness).to_owned(),
        trained_at: Utc::now(),
        generations: *generations,
        final_fitness: best.fitness,
        topology: *trainer.topology(),
        fitness: config.fitness,
        simulation: config.simulation.clone(),
        weights: best.weights.clone(),
    };
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Found in generation: {}", best.generation);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Weights: {}", model.weights.len());

    Ok(())
}

fn print_report(report: &GenerationReport) {
    let GenerationReport {
        generation,
        fitness,
        outcomes,
        asteroids_destroyed,
        weight_diversity,
        best: _,
    } = report;
    eprintln!("Generation #{generation}:");
    eprintln!("  Fitness Stats:");
    eprintln!("    Min:    {:.3}", fitness.min);
    eprintln!("    Max:    {:.3}", fitness.max);
    eprintln!("    Mean:   {:.3}", fitness.mean);
    eprintln!("    Median: {:.3}", fitness.median);
    eprintln!("  Weight diversity: {weight_diversity:.3}");
    eprintln!("  Outcomes:");
    eprintln!("    Died:      {}", outcomes.died);
    eprintln!("    Cleared:   {}", outcomes.cleared);
    eprintln!("    Timed out: {}", outcomes.timed_out);
    eprintln!("  Asteroids destroyed: {asteroids_destroyed}");
}

fn model_name(fitness: &FitnessKind) -> &'static str {
    match fitness {
        FitnessKind::KillCount(_) => "kill-count",
        FitnessKind::SurvivalAdjusted(_) => "survival-adjusted",
    }
}
