use astro_network::random::RandomSource;
use rand::Rng;

use super::geometry::{Polygon, Vec2};
use crate::SimulationConfig;

/// Half the side length of a size-1 asteroid; size class `n` is `1/n` as large.
const ASTEROID_HALF_EXTENT: f64 = 30.0;

/// Rejection-sampling attempts before a spawn ignores the ship clearance.
const MAX_SPAWN_ATTEMPTS: usize = 64;

/// A drifting, spinning square rock.
///
/// Size class 1 is the largest. Higher size classes are smaller and faster.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    position: Vec2,
    velocity: Vec2,
    rotation: f64,
    spin: f64,
    size: u32,
}

impl Asteroid {
    /// Spawns a size-1 asteroid at a random position away from `avoid`.
    pub fn spawn<R>(rng: &mut R, config: &SimulationConfig, avoid: Vec2) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut position = Vec2::ZERO;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            position = Vec2::new(rng.scaled(config.width), rng.scaled(config.height));
            let distance = avoid
                .toroidal_delta(position, config.width, config.height)
                .length();
            if distance >= config.spawn_clearance {
                break;
            }
        }
        Self::with_size(rng, position, 1)
    }

    fn with_size<R>(rng: &mut R, position: Vec2, size: u32) -> Self
    where
        R: Rng + ?Sized,
    {
        let speed = f64::from(size);
        Self {
            position,
            velocity: Vec2::new(
                (2.0 * rng.unit() - 1.0) * speed,
                (2.0 * rng.unit() - 1.0) * speed,
            ),
            rotation: 0.0,
            spin: rng.unit(),
            size,
        }
    }

    /// Splits the asteroid into `chunk_count` smaller ones at the same position.
    ///
    /// Returns no chunks once the next size class would exceed `max_chunk_factor`.
    pub fn split<R>(&self, rng: &mut R, config: &SimulationConfig) -> Vec<Self>
    where
        R: Rng + ?Sized,
    {
        let size = self.size + 1;
        if size > config.max_chunk_factor {
            return vec![];
        }
        (0..config.chunk_count)
            .map(|_| Self::with_size(rng, self.position, size))
            .collect()
    }

    pub fn update(&mut self, config: &SimulationConfig) {
        self.rotation += self.spin;
        self.position += self.velocity;
        self.position = self.position.wrapped(config.width, config.height);
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn polygon(&self) -> Polygon {
        let h = ASTEROID_HALF_EXTENT / f64::from(self.size);
        let mesh = [
            Vec2::new(-h, -h),
            Vec2::new(-h, h),
            Vec2::new(h, h),
            Vec2::new(h, -h),
        ];
        Polygon::from_mesh(&mesh, self.position, self.rotation)
    }
}

#[cfg(test)]
impl Asteroid {
    pub(crate) fn at(position: Vec2, velocity: Vec2, size: u32) -> Self {
        Self {
            position,
            velocity,
            rotation: 0.0,
            spin: 0.0,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use astro_network::random;

    use super::*;

    #[test]
    fn test_spawn_respects_clearance() {
        let config = SimulationConfig::default();
        let centre = Vec2::new(config.width / 2.0, config.height / 2.0);
        let mut rng = random::seeded(3);
        for _ in 0..200 {
            let asteroid = Asteroid::spawn(&mut rng, &config, centre);
            assert!((centre - asteroid.position()).length() >= config.spawn_clearance);
            assert_eq!(asteroid.size(), 1);
            let p = asteroid.position();
            assert!((0.0..=config.width).contains(&p.x));
            assert!((0.0..=config.height).contains(&p.y));
        }
    }

    #[test]
    fn test_velocity_scales_with_size() {
        let mut rng = random::seeded(5);
        for size in 1..=3 {
            let a = Asteroid::with_size(&mut rng, Vec2::ZERO, size);
            assert!(a.velocity.x.abs() <= f64::from(size));
            assert!(a.velocity.y.abs() <= f64::from(size));
        }
    }

    #[test]
    fn test_split() {
        let config = SimulationConfig::default();
        let mut rng = random::seeded(8);
        let big = Asteroid::at(Vec2::new(50.0, 60.0), Vec2::ZERO, 1);
        let chunks = big.split(&mut rng, &config);
        assert_eq!(chunks.len(), config.chunk_count);
        assert!(chunks.iter().all(|c| c.size() == 2 && c.position() == big.position()));

        let smallest = Asteroid::at(Vec2::ZERO, Vec2::ZERO, config.max_chunk_factor);
        assert!(smallest.split(&mut rng, &config).is_empty());
    }

    #[test]
    fn test_update_wraps() {
        let config = SimulationConfig::default();
        let mut a = Asteroid::at(Vec2::new(999.5, 10.0), Vec2::new(1.0, 0.0), 1);
        a.update(&config);
        assert_eq!(a.position(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_polygon_shrinks_with_size() {
        let big = Asteroid::at(Vec2::ZERO, Vec2::ZERO, 1).polygon();
        let small = Asteroid::at(Vec2::ZERO, Vec2::ZERO, 3).polygon();
        assert!(big.contains(Vec2::new(20.0, 0.0)));
        assert!(!small.contains(Vec2::new(20.0, 0.0)));
        assert!(small.contains(Vec2::new(9.0, 0.0)));
    }
}
