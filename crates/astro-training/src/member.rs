use std::ptr;

use astro_network::{Network, Topology, random::RandomSource};
use rand::Rng;

use crate::{GeneticParams, GeneticsError, Offspring, weights};

/// A candidate solution: one network and the fitness its last episode earned.
#[derive(Debug, Clone)]
pub struct PopulationMember {
    network: Network,
    fitness: f64,
}

impl PopulationMember {
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            fitness: 0.0,
        }
    }

    /// Creates a member with uniformly random weights.
    pub fn random<R>(topology: Topology, rng: &mut R) -> Result<Self, GeneticsError>
    where
        R: Rng + ?Sized,
    {
        Ok(Self::new(Network::random(topology, rng)?))
    }

    /// Creates a member from a flat weight vector.
    pub fn from_weights(topology: Topology, weights: &[f64]) -> Result<Self, GeneticsError> {
        Ok(Self::new(Network::from_weights(topology, weights)?))
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.network.copy_of_weights()
    }

    /// Recombines this member (the dad) with `mum` and mutates the children.
    ///
    /// With probability `1 - crossover_rate`, or when both parents are the same
    /// member, the children start as verbatim copies of the parents. Otherwise a
    /// crossover point `p` is drawn from `[0, weight_count - 1)` and the tails are
    /// swapped. Every child is then mutated; the parents are never modified.
    ///
    /// Returns two children, or only the first with [`Offspring::One`].
    pub fn crossover<R>(
        &self,
        mum: &Self,
        params: &GeneticParams,
        rng: &mut R,
    ) -> Result<Vec<Self>, GeneticsError>
    where
        R: Rng + ?Sized,
    {
        let dad_weights = self.weights();
        let mum_weights = mum.weights();
        let count = dad_weights.len();

        let roll = rng.unit();
        let (mut a, mut b) = if roll >= params.crossover_rate
            || ptr::eq(self, mum)
            || count < 2
            || mum_weights.len() != count
        {
            (dad_weights, mum_weights)
        } else {
            let point = rng.index(count - 1);
            weights::crossover_at(&dad_weights, &mum_weights, point)
        };

        weights::mutate(&mut a, params, rng);
        let topology = *self.network.topology();
        let mut children = vec![Self::from_weights(topology, &a)?];
        if params.offspring == Offspring::Two {
            weights::mutate(&mut b, params, rng);
            children.push(Self::from_weights(*mum.network.topology(), &b)?);
        }
        Ok(children)
    }
}
