//! Neuro-evolution of ship controllers with a roulette-wheel genetic algorithm.
//!
//! Networks are never trained by gradient descent. Their flat weight vectors are
//! the genome, and a generation of ships is scored by playing one headless
//! Asteroids episode each.
//!
//! # How Training Works
//!
//! 1. **Population** - One [`PopulationMember`] (network + fitness) per simulation
//! 2. **Episodes** - Every simulation runs to completion on its own scoped thread
//! 3. **Fitness** - The engine's fitness strategy scores each episode
//! 4. **Epoch** - [`Genetics::epoch`] keeps the elites and breeds the rest through
//!    roulette selection, single-point crossover and mutation
//! 5. **Repeat** - The new weights are installed and the episodes restart
//!
//! # Architecture
//!
//! ```text
//! Trainer
//!     ↓ owns
//! Simulation × population_size (astro-engine)    Genetics
//!     ↓ fitness                                     ↑ fitnesses / ↓ weights
//!     └─────────────────────────────────────────────┘
//! ```
//!
//! - [`GeneticParams`] - Population size, crossover rate, mutation settings, elitism
//! - [`Genetics`] - Population management and the epoch
//! - [`weights`] - Crossover and mutation on flat weight vectors
//! - [`Trainer`] - Drives simulations and genetics, one generation at a time
//! - [`TrainingConfig`] - Serializable configuration for a whole run
//!
//! Randomness is injected everywhere through [`random`]; nothing in this crate
//! touches a global generator.
//!
//! # Example
//!
//! ```
//! use astro_training::{GeneticParams, Genetics, random};
//! use astro_network::Topology;
//!
//! let params = GeneticParams { population_size: 4, ..Default::default() };
//! let mut genetics = Genetics::new(params, Topology::for_inputs(4, 2)).unwrap();
//! let mut rng = random::seeded(42);
//! genetics.reset(&mut rng).unwrap();
//!
//! genetics.set_population_fitnesses(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! let next = genetics.epoch(&mut rng).unwrap();
//! assert_eq!(next.len(), 4);
//! ```

use astro_engine::SimulationError;
use astro_network::NetworkError;

pub use astro_network::random;

pub use self::{config::*, genetics::*, member::*, params::*, trainer::*};

mod config;
mod genetics;
mod member;
mod params;
mod trainer;
pub mod weights;

/// Errors raised by the genetic algorithm.
#[derive(
    Debug,
    Clone,
    PartialEq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum GeneticsError {
    #[display("invalid genetic parameters: {reason}")]
    InvalidParams { reason: &'static str },
    #[display("expected {expected} fitness values, got {actual}")]
    FitnessCountMismatch { expected: usize, actual: usize },
    #[display("fitness of member {index} must be finite and non-negative, got {value}")]
    InvalidFitness { index: usize, value: f64 },
    #[display("expected {expected} population members, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
    #[display("population is empty")]
    EmptyPopulation,
    #[display("network error: {_0}")]
    #[from]
    Network(NetworkError),
}

/// Errors raised while setting up or running a training session.
#[derive(
    Debug,
    Clone,
    PartialEq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum TrainingError {
    #[display("genetic algorithm error: {_0}")]
    Genetics(GeneticsError),
    #[display("simulation error: {_0}")]
    Simulation(SimulationError),
}
