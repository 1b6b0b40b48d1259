/// Descriptive statistics summarizing a sample of fitness or weight values.
///
/// Holds the range, central tendency and dispersion of a non-empty sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Middle value, or the midpoint of the two middle values for even-sized samples.
    pub median: f64,
    /// Population variance (divides by `n`).
    pub variance: f64,
    pub std_dev: f64,
    /// `std_dev / (max - min)`, or `0.0` when the range has collapsed.
    ///
    /// Used as a scale-free diversity measure: values near zero mean every member
    /// of the population carries nearly the same weight at that position.
    pub normalized_std_dev: f64,
}

impl DescriptiveStats {
    /// Computes statistics over `values` in any order.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// ```
    /// # use astro_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes statistics over values already sorted in ascending order.
    ///
    /// Returns `None` for an empty sample.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[count / 2 - 1], sorted_values[count / 2])
        } else {
            sorted_values[count / 2]
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        // relative epsilon: a collapsed population has no meaningful spread
        let normalized_std_dev = if (max - min).abs() <= mean.abs() * f64::EPSILON {
            0.0
        } else {
            std_dev / (max - min)
        };

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
            normalized_std_dev,
        })
    }
}
