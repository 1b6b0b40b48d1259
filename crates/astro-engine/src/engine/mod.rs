//! Episode orchestration: stepping the world and scoring the result.
//!
//! - [`Simulation`] - One ship, its asteroids and bullets, advanced tick by tick
//! - [`EpisodeState`] - Explicit lifecycle (`Ready`, `Running`, `Finished`)
//! - [`SimulationEvent`] - What happened during a tick, returned by [`Simulation::update`]
//! - [`EpisodeStats`] - Counters collected during an episode
//! - [`EvaluateEpisode`] - Pluggable fitness strategies ([`FitnessKind`])
//!
//! # Tick Order
//!
//! Every call to [`Simulation::update`] on a running episode performs, in order:
//!
//! 1. Move asteroids; if any overlaps the ship the episode ends with [`Outcome::Died`]
//! 2. Sense, think and apply controls (possibly firing a bullet)
//! 3. Move bullets, resolve bullet hits (splitting asteroids), drop expired bullets
//! 4. End with [`Outcome::Cleared`] if no asteroids remain, or
//!    [`Outcome::TimedOut`] once the tick count reaches the timeout

pub use self::{episode_stats::*, fitness::*, simulation::*};

mod episode_stats;
mod fitness;
mod simulation;
