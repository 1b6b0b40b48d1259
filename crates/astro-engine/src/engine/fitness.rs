//! Fitness functions: turning an episode into a single score.
//!
//! The genetic algorithm only needs "a non-negative scalar, higher is better".
//! What counts as good play is decided here, by the strategy plugged into each
//! [`Simulation`](crate::Simulation).
//!
//! # Kill Count
//!
//! ```text
//! fitness = asteroids_destroyed × asteroid_weight
//! ```
//!
//! Rewards aggressive play only. A ship that hides until the timeout scores zero.
//!
//! # Survival Adjusted
//!
//! ```text
//! fitness = asteroids_destroyed × asteroid_weight
//!         + survival_weight × survived_fraction
//!         + (cleared ? win_bonus × (1 - survived_fraction) : 0)
//!
//! where survived_fraction = ticks_survived / timeout_ticks ∈ [0, 1]
//! ```
//!
//! Surviving longer is worth something on its own, and clearing the field early
//! earns a bonus that shrinks the longer the clear took.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::episode_stats::EpisodeStats;
use crate::SimulationConfig;

/// Computes the fitness of a finished (or interrupted) episode.
pub trait EvaluateEpisode: fmt::Debug + Send + Sync {
    /// Returns a non-negative fitness; higher is better.
    fn evaluate_episode(&self, stats: &EpisodeStats, config: &SimulationConfig) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillCountFitness {
    pub asteroid_weight: f64,
}

impl Default for KillCountFitness {
    fn default() -> Self {
        Self {
            asteroid_weight: 20.0,
        }
    }
}

impl EvaluateEpisode for KillCountFitness {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_episode(&self, stats: &EpisodeStats, _config: &SimulationConfig) -> f64 {
        stats.asteroids_destroyed() as f64 * self.asteroid_weight.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalAdjustedFitness {
    pub asteroid_weight: f64,
    pub survival_weight: f64,
    pub win_bonus: f64,
}

impl Default for SurvivalAdjustedFitness {
    fn default() -> Self {
        Self {
            asteroid_weight: 20.0,
            survival_weight: 10.0,
            win_bonus: 100.0,
        }
    }
}

impl EvaluateEpisode for SurvivalAdjustedFitness {
    fn evaluate_episode(&self, stats: &EpisodeStats, config: &SimulationConfig) -> f64 {
        let kills = KillCountFitness {
            asteroid_weight: self.asteroid_weight,
        }
        .evaluate_episode(stats, config);
        let survived = stats.survived_fraction(config.timeout_ticks());
        let win = if stats.outcome().is_some_and(|o| o.is_cleared()) {
            self.win_bonus.max(0.0) * (1.0 - survived)
        } else {
            0.0
        };
        kills + self.survival_weight.max(0.0) * survived + win
    }
}

/// Serializable choice of fitness strategy, as stored in training configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FitnessKind {
    KillCount(KillCountFitness),
    SurvivalAdjusted(SurvivalAdjustedFitness),
}

impl Default for FitnessKind {
    fn default() -> Self {
        Self::KillCount(KillCountFitness::default())
    }
}

impl EvaluateEpisode for FitnessKind {
    fn evaluate_episode(&self, stats: &EpisodeStats, config: &SimulationConfig) -> f64 {
        match self {
            Self::KillCount(f) => f.evaluate_episode(stats, config),
            Self::SurvivalAdjusted(f) => f.evaluate_episode(stats, config),
        }
    }
}
