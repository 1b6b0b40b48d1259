use serde::{Deserialize, Serialize};

use crate::{Activation, NetworkError};

/// Shape and activation settings of a [`Network`](crate::Network).
///
/// `layer_count` counts fully connected weight layers. Layer 0 reads the network
/// inputs, the last layer produces the network outputs and every other connection
/// is `hidden_count` wide:
///
/// ```text
/// layer_count = 1:  input → output
/// layer_count = 2:  input → hidden → output
/// layer_count = 3:  input → hidden → hidden → output
/// ```
///
/// Once the topology is fixed, so is the number of weights (see
/// [`Topology::weight_count`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    /// Number of fully connected layers (at least 1)
    pub layer_count: usize,
    /// Length of the input vector
    pub input_count: usize,
    /// Width of every hidden connection
    pub hidden_count: usize,
    /// Length of the output vector
    pub output_count: usize,
    /// Whether every layer carries one extra bias weight
    pub bias: bool,
    /// Constant input multiplied by each layer's bias weight
    pub bias_input: f64,
    /// Output squashing function
    pub activation: Activation,
    /// Steepness of the activation (must be positive)
    pub activation_response: f64,
}

impl Default for Topology {
    fn default() -> Self {
        Self::for_inputs(12, 3)
    }
}

impl Topology {
    /// Creates a three-layer, bias-aware topology for the given input and output counts.
    ///
    /// The hidden width is derived as `(input_count + output_count) / 2`, but never
    /// less than one neuron.
    #[must_use]
    pub fn for_inputs(input_count: usize, output_count: usize) -> Self {
        Self {
            layer_count: 3,
            input_count,
            hidden_count: usize::max((input_count + output_count) / 2, 1),
            output_count,
            bias: true,
            bias_input: 1.0,
            activation: Activation::default(),
            activation_response: 1.0,
        }
    }

    /// Checks that the topology can build a working network.
    pub fn validate(&self) -> Result<(), NetworkError> {
        let reason = if self.layer_count == 0 {
            "layer count must be at least 1"
        } else if self.input_count == 0 {
            "input count must be at least 1"
        } else if self.output_count == 0 {
            "output count must be at least 1"
        } else if self.layer_count > 1 && self.hidden_count == 0 {
            "hidden count must be at least 1"
        } else if !(self.activation_response.is_finite() && self.activation_response > 0.0) {
            "activation response must be positive"
        } else if !self.bias_input.is_finite() {
            "bias input must be finite"
        } else {
            return Ok(());
        };
        Err(NetworkError::InvalidTopology { reason })
    }

    /// Returns the `(input_size, output_size)` of each layer in construction order.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.layer_count).map(|layer| {
            let input_size = if layer == 0 {
                self.input_count
            } else {
                self.hidden_count
            };
            let output_size = if layer + 1 == self.layer_count {
                self.output_count
            } else {
                self.hidden_count
            };
            (input_size, output_size)
        })
    }

    /// Returns the number of weights in a single layer of the given shape.
    #[must_use]
    pub fn layer_weight_count(&self, input_size: usize, output_size: usize) -> usize {
        input_size * output_size + usize::from(self.bias)
    }

    /// Returns the total number of weights of a network built from this topology.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.layer_shapes()
            .map(|(input_size, output_size)| self.layer_weight_count(input_size, output_size))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_inputs_derives_hidden_count() {
        let topology = Topology::for_inputs(12, 3);
        assert_eq!(topology.hidden_count, 7);
        assert_eq!(topology.layer_count, 3);

        let tiny = Topology::for_inputs(1, 0);
        assert_eq!(tiny.hidden_count, 1);
    }

    #[test]
    fn test_layer_shapes() {
        let mut topology = Topology::for_inputs(12, 3);
        assert_eq!(
            topology.layer_shapes().collect::<Vec<_>>(),
            vec![(12, 7), (7, 7), (7, 3)]
        );

        topology.layer_count = 2;
        assert_eq!(
            topology.layer_shapes().collect::<Vec<_>>(),
            vec![(12, 7), (7, 3)]
        );

        topology.layer_count = 1;
        assert_eq!(topology.layer_shapes().collect::<Vec<_>>(), vec![(12, 3)]);
    }

    #[test]
    fn test_weight_count_with_and_without_bias() {
        let mut topology = Topology::for_inputs(4, 2);
        // 4x3 + 3x3 + 3x2, one bias per layer
        assert_eq!(topology.weight_count(), 12 + 9 + 6 + 3);
        topology.bias = false;
        assert_eq!(topology.weight_count(), 12 + 9 + 6);
    }

    #[test]
    fn test_validate_rejects_degenerate_topologies() {
        let valid = Topology::for_inputs(4, 2);
        assert!(valid.validate().is_ok());

        let mut t = valid;
        t.layer_count = 0;
        assert!(t.validate().unwrap_err().is_invalid_topology());

        let mut t = valid;
        t.input_count = 0;
        assert!(t.validate().is_err());

        let mut t = valid;
        t.hidden_count = 0;
        assert!(t.validate().is_err());
        t.layer_count = 1;
        assert!(t.validate().is_ok());

        let mut t = valid;
        t.activation_response = 0.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_missing_fields_with_defaults() {
        let topology: Topology =
            serde_json::from_str(r#"{ "layer_count": 2, "activation": "sigmoid" }"#).unwrap();
        assert_eq!(topology.layer_count, 2);
        assert_eq!(topology.activation, Activation::Sigmoid);
        assert_eq!(topology.input_count, Topology::default().input_count);
    }
}
