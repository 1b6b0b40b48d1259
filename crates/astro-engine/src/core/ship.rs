use astro_network::{Network, NetworkError, Topology};

use super::{
    asteroid::Asteroid,
    bullet::Bullet,
    geometry::{Polygon, Vec2},
};
use crate::SimulationConfig;

const SHIP_MESH: [Vec2; 3] = [
    Vec2::new(-10.0, -10.0),
    Vec2::new(0.0, 20.0),
    Vec2::new(10.0, -10.0),
];

/// Actions decoded from the network outputs for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Angular acceleration in degrees per tick², in `[-1, 1]`
    pub torque: f64,
    /// Forward acceleration factor in `[0, 1]`
    pub thrust: f64,
    pub fire: bool,
}

impl Controls {
    /// Decodes network outputs that have already been mapped onto `[-1, 1]`.
    #[must_use]
    pub fn from_symmetric_outputs(torque: f64, thrust: f64, fire: f64) -> Self {
        Self {
            torque,
            thrust: (thrust + 1.0) / 2.0,
            fire: fire > 0.0,
        }
    }
}

/// The player ship, steered by its own neural network.
#[derive(Debug, Clone)]
pub struct Ship {
    network: Network,
    position: Vec2,
    velocity: Vec2,
    rotation: f64,
    rotation_velocity: f64,
    reload_ticks: u64,
}

impl Ship {
    #[must_use]
    pub fn new(network: Network, config: &SimulationConfig) -> Self {
        let mut ship = Self {
            network,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_velocity: 0.0,
            reload_ticks: 0,
        };
        ship.reset(config);
        ship
    }

    /// Puts the ship back at the centre of the world, at rest and ready to fire.
    pub fn reset(&mut self, config: &SimulationConfig) {
        self.position = spawn_point(config);
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
        self.rotation_velocity = 0.0;
        self.reload_ticks = 0;
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn set_network_weights(&mut self, weights: &[f64]) -> Result<(), NetworkError> {
        self.network.set_weights(weights)
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn polygon(&self) -> Polygon {
        Polygon::from_mesh(&SHIP_MESH, self.position, self.rotation)
    }

    /// Builds the network input vector.
    ///
    /// For each of the `asteroids_to_consider` nearest asteroids (shortest wrapped
    /// distance), the displacement divided by the world size; missing asteroids
    /// contribute `(0, 0)`. The ship's heading is appended last.
    #[must_use]
    pub fn sense(&self, asteroids: &[Asteroid], config: &SimulationConfig) -> Vec<f64> {
        let mut deltas = asteroids
            .iter()
            .map(|a| {
                self.position
                    .toroidal_delta(a.position(), config.width, config.height)
            })
            .collect::<Vec<_>>();
        deltas.sort_by(|a, b| a.length().total_cmp(&b.length()));

        let mut inputs = Vec::with_capacity(config.input_count());
        for i in 0..config.asteroids_to_consider {
            let delta = deltas.get(i).copied().unwrap_or(Vec2::ZERO);
            inputs.push(delta.x / config.width);
            inputs.push(delta.y / config.height);
        }
        let heading = Vec2::heading(self.rotation);
        inputs.extend([heading.x, heading.y]);
        inputs
    }

    /// Runs the network on `inputs` and decodes its outputs.
    pub fn think(&self, inputs: &[f64]) -> Result<Controls, NetworkError> {
        let outputs = self.network.update(inputs)?;
        let Topology { activation, .. } = *self.network.topology();
        let output = |i: usize| activation.to_symmetric(outputs.get(i).copied().unwrap_or(0.0));
        Ok(Controls::from_symmetric_outputs(output(0), output(1), output(2)))
    }

    /// Applies one tick of physics and returns a bullet if the ship fired.
    pub fn apply(&mut self, controls: Controls, config: &SimulationConfig) -> Option<Bullet> {
        self.rotation_velocity = (self.rotation_velocity + controls.torque)
            .clamp(-config.max_rot_vel, config.max_rot_vel)
            - config.rotational_drag_coefficient * self.rotation_velocity;
        self.rotation += self.rotation_velocity;

        let push = Vec2::heading(self.rotation) * controls.thrust;
        self.velocity.x += push.x.clamp(-config.max_vel, config.max_vel)
            - config.drag_coefficient * self.velocity.x;
        self.velocity.y += push.y.clamp(-config.max_vel, config.max_vel)
            - config.drag_coefficient * self.velocity.y;
        self.position += self.velocity;
        self.position = self.position.wrapped(config.width, config.height);

        self.reload_ticks = self.reload_ticks.saturating_sub(1);
        if controls.fire && self.reload_ticks == 0 {
            self.reload_ticks = config.reload_ticks();
            return Some(Bullet::fire(
                config,
                self.position,
                self.velocity,
                self.rotation,
            ));
        }
        None
    }
}

fn spawn_point(config: &SimulationConfig) -> Vec2 {
    Vec2::new(config.width / 2.0, config.height / 2.0)
}
