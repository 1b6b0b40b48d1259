use astro_network::Topology;
use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// Number of network outputs a ship reads: torque, thrust and fire.
pub const SHIP_OUTPUT_COUNT: usize = 3;

/// Physics and episode parameters of a simulation.
///
/// Durations are given in human units (seconds, milliseconds) and converted to
/// ticks through `ticks_per_second`, because the simulation only advances when
/// [`Simulation::update`](crate::Simulation::update) is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: f64,
    pub height: f64,
    pub ticks_per_second: u32,
    /// Episode length after which the ship is considered to have survived
    pub sim_timeout_secs: f64,
    /// Number of asteroids at episode start
    pub asteroids: usize,
    /// Largest size class an asteroid can split into (1 = never splits)
    pub max_chunk_factor: u32,
    /// Number of chunks a destroyed asteroid splits into
    pub chunk_count: usize,
    pub reload_time_ms: f64,
    pub bullet_timeout_ms: f64,
    pub bullet_vel: f64,
    pub drag_coefficient: f64,
    pub rotational_drag_coefficient: f64,
    pub max_vel: f64,
    pub max_rot_vel: f64,
    /// Nearest asteroids fed to the ship's network
    pub asteroids_to_consider: usize,
    /// Minimum spawn distance between a new asteroid and the ship
    pub spawn_clearance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            ticks_per_second: 60,
            sim_timeout_secs: 60.0,
            asteroids: 5,
            max_chunk_factor: 3,
            chunk_count: 3,
            reload_time_ms: 333.0,
            bullet_timeout_ms: 2000.0,
            bullet_vel: 5.0,
            drag_coefficient: 0.04,
            rotational_drag_coefficient: 0.85,
            max_vel: 0.1,
            max_rot_vel: 15.0,
            asteroids_to_consider: 5,
            spawn_clearance: 100.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let reason = if !(self.width > 0.0 && self.height > 0.0) {
            "world size must be positive"
        } else if self.ticks_per_second == 0 {
            "ticks per second must be positive"
        } else if !(self.sim_timeout_secs > 0.0) {
            "simulation timeout must be positive"
        } else if self.asteroids == 0 {
            "at least one asteroid is required"
        } else if self.max_chunk_factor == 0 {
            "max chunk factor must be at least 1"
        } else if self.asteroids_to_consider == 0 {
            "the ship must consider at least one asteroid"
        } else if self.reload_time_ms < 0.0 || self.bullet_timeout_ms < 0.0 {
            "durations must not be negative"
        } else {
            return Ok(());
        };
        Err(SimulationError::InvalidConfig { reason })
    }

    /// Length of the ship's sensor vector.
    ///
    /// Two normalized components per considered asteroid, followed by the ship's heading.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.asteroids_to_consider * 2 + 2
    }

    /// Default network topology matching this configuration's sensors.
    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology::for_inputs(self.input_count(), SHIP_OUTPUT_COUNT)
    }

    #[must_use]
    pub fn timeout_ticks(&self) -> u64 {
        self.secs_to_ticks(self.sim_timeout_secs).max(1)
    }

    #[must_use]
    pub fn reload_ticks(&self) -> u64 {
        self.secs_to_ticks(self.reload_time_ms / 1000.0)
    }

    #[must_use]
    pub fn bullet_timeout_ticks(&self) -> u64 {
        self.secs_to_ticks(self.bullet_timeout_ms / 1000.0)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn secs_to_ticks(&self, secs: f64) -> u64 {
        (secs * f64::from(self.ticks_per_second)).round().max(0.0) as u64
    }
}
