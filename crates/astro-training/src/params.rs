use serde::{Deserialize, Serialize};

use crate::GeneticsError;

/// How a selected weight is perturbed during mutation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Perturbation {
    /// Adds or subtracts exactly `max_perturbation`, sign chosen by a fair coin.
    #[default]
    Fixed,
    /// Adds `(u1 - u2) * max_perturbation` for two uniform draws in `[0, 1)`.
    Difference,
    /// Adds a sample of `N(0, max_perturbation)`.
    Gaussian,
}

/// Number of children produced by one crossover.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Offspring {
    One,
    #[default]
    Two,
}

/// Genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    /// Number of members in every generation
    pub population_size: usize,
    /// Probability that two selected parents are recombined
    pub crossover_rate: f64,
    /// Per-weight probability of mutation
    pub mutation_chance: f64,
    pub max_perturbation: f64,
    /// Number of top members carried into the next generation unchanged
    pub elite_count: usize,
    /// Number of copies of each elite member
    pub elite_copies: usize,
    pub perturbation: Perturbation,
    pub offspring: Offspring,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 30,
            crossover_rate: 0.7,
            mutation_chance: 0.1,
            max_perturbation: 0.3,
            elite_count: 2,
            elite_copies: 1,
            perturbation: Perturbation::Fixed,
            offspring: Offspring::Two,
        }
    }
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), GeneticsError> {
        let reason = if self.population_size == 0 {
            "population size must be at least 1"
        } else if !(0.0..=1.0).contains(&self.crossover_rate) {
            "crossover rate must be within [0, 1]"
        } else if !(0.0..=1.0).contains(&self.mutation_chance) {
            "mutation chance must be within [0, 1]"
        } else if !(self.max_perturbation >= 0.0 && self.max_perturbation.is_finite()) {
            "max perturbation must be a non-negative number"
        } else if self.elite_count.saturating_mul(self.elite_copies) > self.population_size {
            "elites do not fit in the population"
        } else {
            return Ok(());
        };
        Err(GeneticsError::InvalidParams { reason })
    }

    /// Number of slots filled by elites in each new generation.
    #[must_use]
    pub fn elite_slots(&self) -> usize {
        (self.elite_count * self.elite_copies).min(self.population_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GeneticParams::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            GeneticParams {
                population_size: 0,
                elite_count: 0,
                ..Default::default()
            },
            GeneticParams {
                crossover_rate: 1.5,
                ..Default::default()
            },
            GeneticParams {
                mutation_chance: -0.1,
                ..Default::default()
            },
            GeneticParams {
                max_perturbation: f64::NAN,
                ..Default::default()
            },
            GeneticParams {
                population_size: 4,
                elite_count: 3,
                elite_copies: 2,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(
                params.validate().unwrap_err().is_invalid_params(),
                "{params:?}"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: GeneticParams = serde_json::from_str(
            r#"{ "population_size": 12, "perturbation": "gaussian", "offspring": "one" }"#,
        )
        .unwrap();
        assert_eq!(params.population_size, 12);
        assert_eq!(params.perturbation, Perturbation::Gaussian);
        assert_eq!(params.offspring, Offspring::One);
        assert_eq!(params.crossover_rate, 0.7);
    }
}
