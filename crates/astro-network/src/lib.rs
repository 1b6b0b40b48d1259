//! Fixed-topology feed-forward neural networks for evolved ship controllers.
//!
//! This crate provides the "brain" that every simulated ship carries. Networks are
//! never trained with back-propagation: their weights are treated as a flat genome
//! that the genetic algorithm (see the `astro-training` crate) recombines and mutates.
//!
//! # Architecture
//!
//! ```text
//! Topology (layer count, input/hidden/output sizes, activation)
//!     ↓ builds
//! Network = [Layer 0, Layer 1, ..., Layer N-1]
//!     ↓ flattens to / rebuilds from
//! Flat weight vector (the GA genome)
//! ```
//!
//! - [`Topology`] - Shape of the network and activation settings
//! - [`Network`] - Ordered list of fully connected layers
//! - [`Layer`] - One fully connected layer with an optional bias weight
//! - [`Activation`] - Sigmoid or tanh output squashing
//! - [`random::RandomSource`] - Uniform draws used for weight initialization
//!
//! # Weight Layout
//!
//! Weights are stored layer by layer in construction order. Inside a layer, the
//! weights of output neuron `o` occupy the contiguous range
//! `o * input_size .. (o + 1) * input_size`; when the topology is bias-aware a single
//! bias weight follows the neuron weights. [`Network::copy_of_weights`] and
//! [`Network::set_weights`] use exactly this layout, so a round trip through both
//! leaves the network unchanged.
//!
//! # Example
//!
//! ```
//! use astro_network::{Network, Topology, random};
//!
//! let topology = Topology::for_inputs(4, 2);
//! let mut rng = random::seeded(7);
//! let network = Network::random(topology, &mut rng).unwrap();
//!
//! let outputs = network.update(&[0.1, -0.2, 0.3, 0.0]).unwrap();
//! assert_eq!(outputs.len(), 2);
//! assert_eq!(network.copy_of_weights().len(), topology.weight_count());
//! ```

pub use self::{activation::*, layer::*, network::*, topology::*};

mod activation;
mod layer;
mod network;
pub mod random;
mod topology;

/// Errors raised when a network is fed data that does not match its topology.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum NetworkError {
    #[display("incorrect number of inputs: expected {expected}, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[display("incorrect number of weights: expected {expected}, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },
    #[display("invalid topology: {reason}")]
    InvalidTopology { reason: &'static str },
}
