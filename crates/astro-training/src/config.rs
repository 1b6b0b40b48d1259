use astro_engine::{FitnessKind, SimulationConfig};
use astro_network::{Activation, Topology};
use serde::{Deserialize, Serialize};

use crate::GeneticParams;

/// Network shape settings that are not dictated by the ship's sensors.
///
/// Input and output counts always follow the simulation
/// ([`SimulationConfig::input_count`] and three controls).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub layer_count: usize,
    /// Hidden width; derived from the input and output counts when absent
    pub hidden_count: Option<usize>,
    pub bias: bool,
    pub bias_input: f64,
    pub activation: Activation,
    pub activation_response: f64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        let Topology {
            layer_count,
            bias,
            bias_input,
            activation,
            activation_response,
            ..
        } = Topology::default();
        Self {
            layer_count,
            hidden_count: None,
            bias,
            bias_input,
            activation,
            activation_response,
        }
    }
}

/// Everything a training run needs, loadable from a single JSON document.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub genetics: GeneticParams,
    pub network: NetworkSettings,
    pub simulation: SimulationConfig,
    pub fitness: FitnessKind,
}

impl TrainingConfig {
    /// Network topology fitting the configured simulation.
    #[must_use]
    pub fn topology(&self) -> Topology {
        let base = self.simulation.topology();
        let NetworkSettings {
            layer_count,
            hidden_count,
            bias,
            bias_input,
            activation,
            activation_response,
        } = self.network;
        Topology {
            layer_count,
            hidden_count: hidden_count.unwrap_or(base.hidden_count),
            bias,
            bias_input,
            activation,
            activation_response,
            ..base
        }
    }
}
