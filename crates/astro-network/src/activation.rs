use serde::{Deserialize, Serialize};

/// Output squashing function applied by every neuron.
///
/// Both variants are parameterized by the activation response (a temperature-like
/// scalar): larger responses flatten the curve, smaller ones make it steeper.
///
/// - [`Activation::Sigmoid`]: `1 / (1 + e^(-x / response))`, range `(0, 1)`
/// - [`Activation::Tanh`]: `2 * sigmoid(2x) - 1`, range `(-1, 1)`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    Sigmoid,
    #[default]
    Tanh,
}

impl Activation {
    /// Applies the activation to a neuron's net input.
    #[must_use]
    pub fn apply(self, x: f64, response: f64) -> f64 {
        match self {
            Self::Sigmoid => sigmoid(x, response),
            Self::Tanh => 2.0 * sigmoid(2.0 * x, response) - 1.0,
        }
    }

    /// Maps an output of this activation onto `[-1, 1]`.
    ///
    /// Controllers interpret outputs on a symmetric scale regardless of which
    /// activation produced them.
    #[must_use]
    pub fn to_symmetric(self, y: f64) -> f64 {
        match self {
            Self::Sigmoid => 2.0 * y - 1.0,
            Self::Tanh => y,
        }
    }
}

fn sigmoid(x: f64, response: f64) -> f64 {
    1.0 / (1.0 + (-x / response).exp())
}
