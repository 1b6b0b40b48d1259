use super::geometry::Vec2;
use crate::SimulationConfig;

/// A projectile fired by the ship.
///
/// Travels in a straight line (wrapping around the world) until it hits an
/// asteroid or its lifetime runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    position: Vec2,
    velocity: Vec2,
    remaining_ticks: u64,
}

impl Bullet {
    /// Fires a bullet from `position` along `rotation_deg`, inheriting the shooter's velocity.
    #[must_use]
    pub fn fire(
        config: &SimulationConfig,
        position: Vec2,
        shooter_velocity: Vec2,
        rotation_deg: f64,
    ) -> Self {
        Self {
            position,
            velocity: shooter_velocity + Vec2::heading(rotation_deg) * config.bullet_vel,
            remaining_ticks: config.bullet_timeout_ticks(),
        }
    }

    /// Moves the bullet one tick and ages it.
    pub fn update(&mut self, config: &SimulationConfig) {
        self.position += self.velocity;
        self.position = self.position.wrapped(config.width, config.height);
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }
}
