use crate::{Activation, NetworkError};

/// A fully connected layer.
///
/// Holds `input_size * output_size` neuron weights, followed by one bias weight
/// when the layer is bias-aware. Neuron `o` reads its weights from
/// `weights[o * input_size..(o + 1) * input_size]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    input_size: usize,
    output_size: usize,
    has_bias: bool,
    weights: Vec<f64>,
}

impl Layer {
    /// Creates a layer from its weights.
    ///
    /// Fails if `weights` does not hold exactly the number of weights the shape requires.
    pub fn new(
        input_size: usize,
        output_size: usize,
        has_bias: bool,
        weights: Vec<f64>,
    ) -> Result<Self, NetworkError> {
        let expected = input_size * output_size + usize::from(has_bias);
        if weights.len() != expected {
            return Err(NetworkError::WeightCountMismatch {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            input_size,
            output_size,
            has_bias,
            weights,
        })
    }

    #[must_use]
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    #[must_use]
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Computes the layer outputs for the given inputs.
    ///
    /// Each output is the activation of the weighted sum of all inputs, plus
    /// `bias_weight * bias_input` for bias-aware layers.
    pub fn activate(
        &self,
        inputs: &[f64],
        bias_input: f64,
        activation: Activation,
        response: f64,
    ) -> Result<Vec<f64>, NetworkError> {
        if inputs.len() != self.input_size {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size,
                actual: inputs.len(),
            });
        }

        let bias = if self.has_bias {
            self.weights[self.weights.len() - 1] * bias_input
        } else {
            0.0
        };

        let outputs = (0..self.output_size)
            .map(|o| {
                let neuron = &self.weights[o * self.input_size..(o + 1) * self.input_size];
                let net_input = neuron
                    .iter()
                    .zip(inputs)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias;
                activation.apply(net_input, response)
            })
            .collect();
        Ok(outputs)
    }
}
