use astro_engine::{FitnessKind, SimulationConfig};
use astro_network::Topology;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The best controller of a training run, as written by `astro train`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    pub final_fitness: f64,
    pub topology: Topology,
    /// Strategy the model was scored with during training
    #[serde(default)]
    pub fitness: FitnessKind,
    /// World the model was trained in; its sensors depend on it
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub weights: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use astro_engine::SurvivalAdjustedFitness;

    use super::*;

    fn model(fitness: FitnessKind) -> TrainedModel {
        TrainedModel {
            name: "test".to_owned(),
            trained_at: Utc::now(),
            generations: 1,
            final_fitness: 2.0,
            topology: Topology::for_inputs(4, 2),
            fitness,
            simulation: SimulationConfig::default(),
            weights: vec![0.0; Topology::for_inputs(4, 2).weight_count()],
        }
    }

    #[test]
    fn test_fitness_round_trips() {
        let kind = FitnessKind::SurvivalAdjusted(SurvivalAdjustedFitness::default());
        let json = serde_json::to_string(&model(kind)).unwrap();
        let loaded: TrainedModel = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.fitness, kind);
    }

    #[test]
    fn test_fitness_defaults_when_absent() {
        let mut value = serde_json::to_value(model(FitnessKind::default())).unwrap();
        value.as_object_mut().unwrap().remove("fitness");
        let loaded: TrainedModel = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.fitness, FitnessKind::default());
    }
}
