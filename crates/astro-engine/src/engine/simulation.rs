use std::sync::Arc;

use astro_network::{Network, Topology, random::SimRng};

use super::{
    episode_stats::{EpisodeStats, Outcome},
    fitness::EvaluateEpisode,
};
use crate::{
    SHIP_OUTPUT_COUNT, SimulationConfig, SimulationError,
    core::{asteroid::Asteroid, bullet::Bullet, ship::Ship},
};

/// Lifecycle of a simulation episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeState {
    /// Created but never started.
    Ready,
    Running,
    Finished(Outcome),
}

/// Something notable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    BulletFired,
    BulletExpired,
    /// A bullet hit an asteroid of the given size class.
    AsteroidDestroyed { size: u32 },
    Finished(Outcome),
}

/// One individual's episode: a network-driven ship among asteroids.
///
/// The episode only advances when [`Simulation::update`] is called, one tick at a
/// time, so a caller can run many simulations side by side without timers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use astro_engine::{KillCountFitness, Simulation, SimulationConfig};
/// use astro_network::random;
///
/// let config = SimulationConfig { sim_timeout_secs: 1.0, ..Default::default() };
/// let topology = config.topology();
/// let mut sim = Simulation::new(
///     config,
///     topology,
///     Arc::new(KillCountFitness::default()),
///     random::seeded(1),
/// )
/// .unwrap();
///
/// let fitness = sim.run_episode().unwrap();
/// assert!(sim.is_finished());
/// assert!(fitness >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    evaluator: Arc<dyn EvaluateEpisode>,
    rng: SimRng,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    bullets: Vec<Bullet>,
    state: EpisodeState,
    stats: EpisodeStats,
}

impl Simulation {
    /// Creates a simulation whose ship carries a freshly randomized network.
    ///
    /// `topology` must read the ship's sensor vector
    /// ([`SimulationConfig::input_count`]) and produce the three ship controls.
    pub fn new(
        config: SimulationConfig,
        topology: Topology,
        evaluator: Arc<dyn EvaluateEpisode>,
        mut rng: SimRng,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        if topology.input_count != config.input_count()
            || topology.output_count != SHIP_OUTPUT_COUNT
        {
            return Err(SimulationError::TopologyMismatch {
                expected_inputs: config.input_count(),
                expected_outputs: SHIP_OUTPUT_COUNT,
                inputs: topology.input_count,
                outputs: topology.output_count,
            });
        }
        let network = Network::random(topology, &mut rng)?;
        let ship = Ship::new(network, &config);
        Ok(Self {
            config,
            evaluator,
            rng,
            ship,
            asteroids: vec![],
            bullets: vec![],
            state: EpisodeState::Ready,
            stats: EpisodeStats::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    #[must_use]
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    #[must_use]
    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    #[must_use]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Resets the episode: ship back at the centre, fresh asteroids, counters cleared.
    ///
    /// The network weights are kept.
    pub fn start(&mut self) {
        self.ship.reset(&self.config);
        self.bullets.clear();
        let centre = self.ship.position();
        self.asteroids = (0..self.config.asteroids)
            .map(|_| Asteroid::spawn(&mut self.rng, &self.config, centre))
            .collect();
        self.stats = EpisodeStats::new();
        self.state = EpisodeState::Running;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Advances the episode by one tick and returns what happened.
    ///
    /// Does nothing unless the episode is running.
    pub fn update(&mut self) -> Result<Vec<SimulationEvent>, SimulationError> {
        let mut events = vec![];
        if !self.state.is_running() {
            return Ok(events);
        }
        self.stats.tick();

        for asteroid in &mut self.asteroids {
            asteroid.update(&self.config);
        }
        let ship_polygon = self.ship.polygon();
        if self
            .asteroids
            .iter()
            .any(|a| a.polygon().intersects(&ship_polygon))
        {
            self.finish(Outcome::Died, &mut events);
            return Ok(events);
        }

        let inputs = self.ship.sense(&self.asteroids, &self.config);
        let controls = self.ship.think(&inputs)?;
        if let Some(bullet) = self.ship.apply(controls, &self.config) {
            self.bullets.push(bullet);
            self.stats.fire_bullet();
            events.push(SimulationEvent::BulletFired);
        }

        for bullet in &mut self.bullets {
            bullet.update(&self.config);
        }
        self.resolve_hits(&mut events);
        let before = self.bullets.len();
        self.bullets.retain(|b| !b.is_expired());
        events.extend((self.bullets.len()..before).map(|_| SimulationEvent::BulletExpired));

        if self.asteroids.is_empty() {
            self.finish(Outcome::Cleared, &mut events);
        } else if self.stats.ticks() >= self.config.timeout_ticks() {
            self.finish(Outcome::TimedOut, &mut events);
        }
        Ok(events)
    }

    /// Starts the episode and ticks it until it finishes, returning the fitness.
    pub fn run_episode(&mut self) -> Result<f64, SimulationError> {
        self.start();
        while !self.is_finished() {
            self.update()?;
        }
        Ok(self.fitness())
    }

    /// Fitness of the episode so far, according to the plugged-in strategy.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.evaluator.evaluate_episode(&self.stats, &self.config)
    }

    /// Copy of the ship network's weights.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.ship.network().copy_of_weights()
    }

    /// Replaces the ship network's weights for the next episode.
    pub fn apply_weights(&mut self, weights: &[f64]) -> Result<(), SimulationError> {
        self.ship.set_network_weights(weights)?;
        Ok(())
    }

    /// Each bullet destroys at most one asteroid; a destroyed asteroid may split.
    fn resolve_hits(&mut self, events: &mut Vec<SimulationEvent>) {
        let mut spawned = vec![];
        self.bullets.retain(|bullet| {
            let Some(index) = self
                .asteroids
                .iter()
                .position(|a| a.polygon().contains(bullet.position()))
            else {
                return true;
            };
            let asteroid = self.asteroids.swap_remove(index);
            spawned.extend(asteroid.split(&mut self.rng, &self.config));
            self.stats.destroy_asteroid();
            events.push(SimulationEvent::AsteroidDestroyed {
                size: asteroid.size(),
            });
            false
        });
        self.asteroids.extend(spawned);
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<SimulationEvent>) {
        self.state = EpisodeState::Finished(outcome);
        self.stats.finish(outcome);
        events.push(SimulationEvent::Finished(outcome));
        log::trace!(
            "episode finished: {outcome} after {} ticks, {} asteroids destroyed",
            self.stats.ticks(),
            self.stats.asteroids_destroyed()
        );
    }
}

#[cfg(test)]
impl Simulation {
    pub(crate) fn place(&mut self, asteroids: Vec<Asteroid>) {
        self.asteroids = asteroids;
    }
}

#[cfg(test)]
mod tests {
    use astro_network::random;

    use super::*;
    use crate::{KillCountFitness, core::geometry::Vec2};

    fn simulation(config: SimulationConfig, seed: u64) -> Simulation {
        let topology = config.topology();
        Simulation::new(
            config,
            topology,
            Arc::new(KillCountFitness::default()),
            random::seeded(seed),
        )
        .unwrap()
    }

    fn short_config() -> SimulationConfig {
        SimulationConfig {
            sim_timeout_secs: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_mismatched_topology() {
        let config = SimulationConfig::default();
        let topology = Topology::for_inputs(4, 3);
        let err = Simulation::new(
            config,
            topology,
            Arc::new(KillCountFitness::default()),
            random::seeded(0),
        )
        .unwrap_err();
        assert!(err.is_topology_mismatch());
    }

    #[test]
    fn test_update_before_start_is_noop() {
        let mut sim = simulation(short_config(), 1);
        assert!(sim.state().is_ready());
        assert!(sim.update().unwrap().is_empty());
        assert_eq!(sim.stats().ticks(), 0);
        assert!(!sim.is_finished());
    }

    #[test]
    fn test_start_spawns_asteroids() {
        let mut sim = simulation(short_config(), 2);
        sim.start();
        assert!(sim.state().is_running());
        assert_eq!(sim.asteroids().len(), sim.config().asteroids);
        assert!(sim.bullets().is_empty());
    }

    #[test]
    fn test_episode_always_terminates_within_timeout() {
        for seed in 0..5 {
            let mut sim = simulation(short_config(), seed);
            let fitness = sim.run_episode().unwrap();
            assert!(sim.is_finished());
            assert!(sim.stats().ticks() <= sim.config().timeout_ticks());
            assert!(fitness >= 0.0);
            assert_eq!(
                sim.stats().outcome(),
                match sim.state() {
                    EpisodeState::Finished(outcome) => Some(outcome),
                    _ => None,
                }
            );
        }
    }

    #[test]
    fn test_update_after_finish_is_noop() {
        let mut sim = simulation(short_config(), 3);
        sim.run_episode().unwrap();
        let stats = sim.stats().clone();
        assert!(sim.update().unwrap().is_empty());
        assert_eq!(sim.stats(), &stats);
    }

    #[test]
    fn test_collision_kills_ship() {
        let mut sim = simulation(short_config(), 4);
        sim.start();
        let centre = sim.ship().position();
        sim.place(vec![Asteroid::at(centre, Vec2::ZERO, 1)]);
        let events = sim.update().unwrap();
        assert_eq!(events, vec![SimulationEvent::Finished(Outcome::Died)]);
        assert_eq!(sim.state(), EpisodeState::Finished(Outcome::Died));
    }

    #[test]
    fn test_timeout_finishes_episode() {
        let mut sim = simulation(short_config(), 5);
        sim.start();
        // a single rock far away that never moves
        sim.place(vec![Asteroid::at(Vec2::new(5.0, 5.0), Vec2::ZERO, 3)]);
        let mut last = vec![];
        while !sim.is_finished() {
            last = sim.update().unwrap();
        }
        assert_eq!(sim.stats().outcome(), Some(Outcome::TimedOut));
        assert_eq!(sim.stats().ticks(), sim.config().timeout_ticks());
        assert_eq!(sim.config().timeout_ticks(), 120);
        assert_eq!(last.last(), Some(&SimulationEvent::Finished(Outcome::TimedOut)));
    }

    #[test]
    fn test_destroying_last_asteroid_clears_field() {
        let config = SimulationConfig {
            max_chunk_factor: 1,
            ..short_config()
        };
        let mut sim = simulation(config, 6);
        sim.start();
        let centre = sim.ship().position();
        let target = Vec2::new(centre.x, centre.y + 60.0);
        sim.place(vec![Asteroid::at(target, Vec2::ZERO, 1)]);
        sim.bullets
            .push(Bullet::fire(sim.config(), target, Vec2::ZERO, 0.0));

        let events = sim.update().unwrap();
        assert!(events.contains(&SimulationEvent::AsteroidDestroyed { size: 1 }));
        assert_eq!(events.last(), Some(&SimulationEvent::Finished(Outcome::Cleared)));
        assert_eq!(sim.stats().asteroids_destroyed(), 1);
        assert_eq!(sim.fitness(), 20.0);
    }

    #[test]
    fn test_destroyed_asteroid_splits() {
        let mut sim = simulation(short_config(), 7);
        sim.start();
        let centre = sim.ship().position();
        let target = Vec2::new(centre.x + 200.0, centre.y);
        sim.place(vec![Asteroid::at(target, Vec2::ZERO, 1)]);
        sim.bullets
            .push(Bullet::fire(sim.config(), target, Vec2::ZERO, 0.0));

        sim.update().unwrap();
        assert_eq!(sim.asteroids().len(), sim.config().chunk_count);
        assert!(sim.asteroids().iter().all(|a| a.size() == 2));
        assert!(sim.state().is_running());
    }

    #[test]
    fn test_apply_weights() {
        let mut sim = simulation(short_config(), 8);
        let count = sim.weights().len();
        sim.apply_weights(&vec![0.25; count]).unwrap();
        assert!(sim.weights().iter().all(|w| *w == 0.25));
        assert!(sim.apply_weights(&[0.0; 3]).unwrap_err().is_network());
    }

    #[test]
    fn test_seeded_episodes_are_reproducible() {
        let mut a = simulation(short_config(), 9);
        let mut b = simulation(short_config(), 9);
        assert_eq!(a.run_episode().unwrap(), b.run_episode().unwrap());
        assert_eq!(a.stats(), b.stats());
    }
}
