//! Operations on flat weight vectors (the genome of a population member).
//!
//! - [`crossover_at`] - Single-point crossover producing two complementary children
//! - [`mutate`] - Per-weight mutation with a configurable [`Perturbation`]
//!
//! These functions never look at networks or fitness; [`PopulationMember`](crate::PopulationMember)
//! and [`Genetics`](crate::Genetics) decide when and to what they are applied.

use astro_network::random::RandomSource;
use rand::Rng;
use rand_distr::Normal;

use crate::{GeneticParams, Perturbation};

/// Swaps the tails of two equally long weight vectors at `point`.
///
/// Returns `(mum[..point] ++ dad[point..], dad[..point] ++ mum[point..])`.
///
/// # Panics
///
/// Panics if the parents have different lengths or `point` is out of bounds.
///
/// # Examples
///
/// ```
/// use astro_training::weights;
///
/// let (a, b) = weights::crossover_at(&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0], 1);
/// assert_eq!(a, vec![2.0, 1.0, 1.0]);
/// assert_eq!(b, vec![1.0, 2.0, 2.0]);
/// ```
#[must_use]
pub fn crossover_at(dad: &[f64], mum: &[f64], point: usize) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(dad.len(), mum.len());
    let a = mum[..point].iter().chain(&dad[point..]).copied().collect();
    let b = dad[..point].iter().chain(&mum[point..]).copied().collect();
    (a, b)
}

/// Perturbs each weight independently with probability `mutation_chance`.
///
/// Weights are not clamped; evolved networks may leave the initial `[-1, 1]` range.
///
/// # Panics
///
/// Panics if `mutation_chance` lies outside `[0, 1]`. Parameters accepted by
/// [`GeneticParams::validate`] never do.
pub fn mutate<R>(weights: &mut [f64], params: &GeneticParams, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let max = params.max_perturbation;
    // validated params always yield a valid distribution
    let normal = Normal::new(0.0, max).ok();
    for w in weights {
        if !rng.random_bool(params.mutation_chance) {
            continue;
        }
        *w += match params.perturbation {
            Perturbation::Fixed => {
                if rng.coin() {
                    max
                } else {
                    -max
                }
            }
            Perturbation::Difference => (rng.unit() - rng.unit()) * max,
            Perturbation::Gaussian => normal.map_or(0.0, |n| rng.sample(n)),
        };
    }
}
