use rand::Rng;

use crate::{Layer, NetworkError, Topology, random::RandomSource as _};

/// A feed-forward neural network with a fixed topology.
///
/// The topology never changes after construction; the weights can be replaced
/// wholesale through [`Network::set_weights`].
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    topology: Topology,
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network whose weights are drawn uniformly from `[-1, 1]`.
    pub fn random<R>(topology: Topology, rng: &mut R) -> Result<Self, NetworkError>
    where
        R: Rng + ?Sized,
    {
        topology.validate()?;
        let weights = (0..topology.weight_count())
            .map(|_| rng.network_weight())
            .collect::<Vec<_>>();
        Self::from_weights(topology, &weights)
    }

    /// Creates a network from a flat weight vector laid out as by
    /// [`Network::copy_of_weights`].
    pub fn from_weights(topology: Topology, weights: &[f64]) -> Result<Self, NetworkError> {
        topology.validate()?;
        let layers = build_layers(&topology, weights)?;
        Ok(Self { topology, layers })
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the total number of weights across all layers.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(|l| l.weights().len()).sum()
    }

    /// Replaces every weight from a single flat vector.
    ///
    /// The vector is sliced contiguously per layer, in layer order. If its length
    /// differs from [`Network::weight_count`] an error is returned and the network
    /// keeps its previous weights.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<(), NetworkError> {
        self.layers = build_layers(&self.topology, weights)?;
        Ok(())
    }

    /// Feeds `inputs` through every layer and returns the final activations.
    pub fn update(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        let Topology {
            bias_input,
            activation,
            activation_response,
            ..
        } = self.topology;

        let mut outputs = inputs.to_vec();
        for layer in &self.layers {
            outputs = layer.activate(&outputs, bias_input, activation, activation_response)?;
        }
        Ok(outputs)
    }

    /// Returns all weights concatenated in layer order.
    #[must_use]
    pub fn copy_of_weights(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(self.weight_count());
        for layer in &self.layers {
            weights.extend_from_slice(layer.weights());
        }
        weights
    }
}

fn build_layers(topology: &Topology, weights: &[f64]) -> Result<Vec<Layer>, NetworkError> {
    let expected = topology.weight_count();
    if weights.len() != expected {
        return Err(NetworkError::WeightCountMismatch {
            expected,
            actual: weights.len(),
        });
    }

    let mut rest = weights;
    topology
        .layer_shapes()
        .map(|(input_size, output_size)| {
            let (head, tail) = rest.split_at(topology.layer_weight_count(input_size, output_size));
            rest = tail;
            Layer::new(input_size, output_size, topology.bias, head.to_vec())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{Activation, random};

    use super::*;

    fn network(topology: Topology, seed: u64) -> Network {
        Network::random(topology, &mut random::seeded(seed)).unwrap()
    }

    #[test]
    fn test_weight_count_invariant() {
        for (input, output, layers, bias) in [
            (2, 2, 1, false),
            (4, 2, 2, true),
            (12, 3, 3, true),
            (12, 3, 5, false),
        ] {
            let mut topology = Topology::for_inputs(input, output);
            topology.layer_count = layers;
            topology.bias = bias;
            let network = network(topology, 3);
            let expected = topology
                .layer_shapes()
                .map(|(i, o)| i * o + usize::from(bias))
                .sum::<usize>();
            assert_eq!(network.copy_of_weights().len(), expected);
            assert_eq!(network.weight_count(), expected);
            assert_eq!(network.layers().len(), layers);
        }
    }

    #[test]
    fn test_random_weights_in_unit_range() {
        let network = network(Topology::for_inputs(12, 3), 5);
        assert!(
            network
                .copy_of_weights()
                .iter()
                .all(|w| (-1.0..=1.0).contains(w))
        );
    }

    #[test]
    fn test_set_weights_roundtrip_keeps_outputs() {
        let mut network = network(Topology::for_inputs(6, 3), 11);
        let inputs = [0.3, -0.7, 0.1, 0.9, -0.2, 0.0];
        let before = network.update(&inputs).unwrap();

        let weights = network.copy_of_weights();
        network.set_weights(&weights).unwrap();

        assert_eq!(network.update(&inputs).unwrap(), before);
        assert_eq!(network.copy_of_weights(), weights);
    }

    #[test]
    fn test_set_weights_slices_layers_in_order() {
        let mut topology = Topology::for_inputs(2, 1);
        topology.bias = false;
        // layers: 2x1, 1x1, 1x1
        let network = Network::from_weights(topology, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let layer_weights = network
            .layers()
            .iter()
            .map(|l| l.weights().to_vec())
            .collect::<Vec<_>>();
        assert_eq!(layer_weights, vec![vec![1.0, 2.0], vec![3.0], vec![4.0]]);
    }

    #[test]
    fn test_set_weights_rejects_wrong_length() {
        let mut network = network(Topology::for_inputs(4, 2), 1);
        let before = network.copy_of_weights();
        let expected = before.len();

        for actual in [0, expected - 1, expected + 1] {
            assert_eq!(
                network.set_weights(&vec![0.5; actual]),
                Err(NetworkError::WeightCountMismatch { expected, actual })
            );
        }
        assert_eq!(network.copy_of_weights(), before);
    }

    #[test]
    fn test_copy_of_weights_is_detached() {
        let mut network = network(Topology::for_inputs(3, 2), 8);
        let copy = network.copy_of_weights();
        network.set_weights(&vec![0.0; copy.len()]).unwrap();
        assert_ne!(network.copy_of_weights(), copy);
        assert!(copy.iter().any(|w| *w != 0.0));
    }

    #[test]
    fn test_update_output_shape_and_range() {
        for activation in [Activation::Sigmoid, Activation::Tanh] {
            let mut topology = Topology::for_inputs(12, 3);
            topology.activation = activation;
            let network = network(topology, 21);
            let mut rng = random::seeded(4);
            for _ in 0..50 {
                let inputs = (0..12)
                    .map(|_| rng.random_range(-5.0..5.0))
                    .collect::<Vec<f64>>();
                let outputs = network.update(&inputs).unwrap();
                assert_eq!(outputs.len(), 3);
                let (lo, hi) = match activation {
                    Activation::Sigmoid => (0.0, 1.0),
                    Activation::Tanh => (-1.0, 1.0),
                };
                assert!(outputs.iter().all(|y| *y > lo && *y < hi), "{outputs:?}");
            }
        }
    }

    #[test]
    fn test_update_rejects_wrong_input_size() {
        let network = network(Topology::for_inputs(4, 2), 2);
        assert_eq!(
            network.update(&[1.0, 2.0, 3.0]),
            Err(NetworkError::InputSizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(network.update(&[0.0; 5]).unwrap_err().is_input_size_mismatch());
    }

    #[test]
    fn test_from_weights_rejects_invalid_topology() {
        let mut topology = Topology::for_inputs(4, 2);
        topology.output_count = 0;
        assert!(
            Network::from_weights(topology, &[])
                .unwrap_err()
                .is_invalid_topology()
        );
    }
}
