//! Headless Asteroids simulation driven by neural network controllers.
//!
//! Each [`Simulation`] is one individual's episode: a ship whose steering,
//! thrust and trigger are decided every tick by its [`Network`](astro_network::Network),
//! in a wrap-around world full of asteroids. There is no rendering and no wall
//! clock; the caller advances the world with [`Simulation::update`] and reads the
//! resulting fitness once the episode [is finished](Simulation::is_finished).
//!
//! # Modules
//!
//! - [`core`] - World objects (ship, asteroids, bullets) and their geometry
//! - [`engine`] - Episode lifecycle, events, statistics and fitness functions
//!
//! # Sensor Layout
//!
//! A ship's network reads [`SimulationConfig::input_count`] values:
//! `2 × asteroids_to_consider` normalized displacements to the nearest asteroids,
//! followed by the two components of the ship's heading. It writes
//! [`SHIP_OUTPUT_COUNT`] values: torque, thrust and fire.

use astro_network::NetworkError;

pub use self::{config::*, engine::*};

mod config;
pub mod core;
pub mod engine;

/// Errors raised while building or running a simulation.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum SimulationError {
    #[display("network error: {_0}")]
    #[from]
    Network(NetworkError),
    #[display("invalid simulation config: {reason}")]
    InvalidConfig { reason: &'static str },
    #[display(
        "topology does not fit the ship: expected {expected_inputs} inputs and {expected_outputs} outputs, got {inputs} and {outputs}"
    )]
    TopologyMismatch {
        expected_inputs: usize,
        expected_outputs: usize,
        inputs: usize,
        outputs: usize,
    },
}
