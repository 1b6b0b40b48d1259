use serde::{Deserialize, Serialize};

/// How an episode ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The ship collided with an asteroid.
    #[display("died")]
    Died,
    /// Every asteroid (including chunks) was destroyed.
    #[display("cleared")]
    Cleared,
    /// The ship survived until the episode timeout.
    #[display("timed out")]
    TimedOut,
}

/// Counters collected during one episode.
///
/// Fitness strategies ([`EvaluateEpisode`](crate::EvaluateEpisode)) compute their
/// score from these values only.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    ticks: u64,
    asteroids_destroyed: usize,
    bullets_fired: usize,
    outcome: Option<Outcome>,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            asteroids_destroyed: 0,
            bullets_fired: 0,
            outcome: None,
        }
    }

    /// Number of ticks the ship has survived.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn asteroids_destroyed(&self) -> usize {
        self.asteroids_destroyed
    }

    #[must_use]
    pub const fn bullets_fired(&self) -> usize {
        self.bullets_fired
    }

    /// Returns `None` while the episode is still running.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Fraction of the episode timeout the ship survived, in `[0, 1]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn survived_fraction(&self, timeout_ticks: u64) -> f64 {
        if timeout_ticks == 0 {
            return 1.0;
        }
        (self.ticks as f64 / timeout_ticks as f64).clamp(0.0, 1.0)
    }

    pub(crate) fn tick(&mut self) {
        self.ticks += 1;
    }

    pub(crate) fn fire_bullet(&mut self) {
        self.bullets_fired += 1;
    }

    pub(crate) fn destroy_asteroid(&mut self) {
        self.asteroids_destroyed += 1;
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
impl EpisodeStats {
    pub(crate) fn with_values(ticks: u64, asteroids_destroyed: usize, outcome: Outcome) -> Self {
        Self {
            ticks,
            asteroids_destroyed,
            bullets_fired: asteroids_destroyed,
            outcome: Some(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = EpisodeStats::new();
        stats.tick();
        stats.tick();
        stats.fire_bullet();
        stats.destroy_asteroid();
        assert_eq!(stats.ticks(), 2);
        assert_eq!(stats.bullets_fired(), 1);
        assert_eq!(stats.asteroids_destroyed(), 1);
        assert_eq!(stats.outcome(), None);

        stats.finish(Outcome::Died);
        assert!(stats.outcome().is_some_and(|o| o.is_died()));
    }

    #[test]
    fn test_survived_fraction() {
        let stats = EpisodeStats::with_values(30, 0, Outcome::Died);
        assert!((stats.survived_fraction(120) - 0.25).abs() < 1e-12);
        assert_eq!(stats.survived_fraction(10), 1.0);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&Outcome::TimedOut).unwrap(),
            "\"timed-out\""
        );
        assert_eq!(Outcome::Cleared.to_string(), "cleared");
    }
}
