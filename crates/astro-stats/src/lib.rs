//! Statistical summaries for training reports.
//!
//! Each generation of the genetic algorithm produces one fitness value per
//! population member and one value per weight position. This crate condenses
//! those samples into [`descriptive::DescriptiveStats`] so the trainer can log
//! progress and population diversity.
//!
//! # Example
//!
//! ```
//! use astro_stats::descriptive::DescriptiveStats;
//!
//! let fitnesses = [0.0, 20.0, 40.0, 20.0];
//! let stats = DescriptiveStats::new(fitnesses).unwrap();
//! assert_eq!(stats.mean, 20.0);
//! assert_eq!(stats.max, 40.0);
//! ```

pub mod descriptive;
