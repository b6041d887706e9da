//! Statistics Calculator Module
//! Per-field summaries and the correlation readout for the active field pair.

use crate::data::{Dataset, Field};
use crate::selection::Selection;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::collections::HashMap;

/// Significance threshold for the correlation t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub field: Field,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Linear relationship between the active x and y fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationStats {
    pub n: usize,
    pub pearson_r: f64,
    pub r_squared: f64,
    /// Least-squares fit `y = slope * x + intercept`.
    pub slope: f64,
    pub intercept: f64,
    pub p_value: f64,
    pub is_significant: bool,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summaries for all six fields, computed in parallel.
    pub fn summarize_all(dataset: &Dataset) -> HashMap<Field, FieldSummary> {
        Field::ALL
            .par_iter()
            .filter_map(|&field| Self::summarize(dataset, field).map(|s| (field, s)))
            .collect()
    }

    /// Summary of one column; `None` for an empty dataset.
    pub fn summarize(dataset: &Dataset, field: Field) -> Option<FieldSummary> {
        let mut sorted: Vec<f64> = dataset.column(field).map(|v| v as f64).collect();
        let n = sorted.len();
        if n == 0 {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Some(FieldSummary {
            field,
            count: n,
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
        })
    }

    /// Pearson correlation with a two-tailed t-test on `r`.
    ///
    /// Needs at least three records and non-zero variance on both axes.
    pub fn correlation(dataset: &Dataset, selection: Selection) -> Option<CorrelationStats> {
        let xs: Vec<f64> = dataset.column(selection.x()).map(|v| v as f64).collect();
        let ys: Vec<f64> = dataset.column(selection.y()).map(|v| v as f64).collect();
        let n = xs.len();
        if n < 3 {
            return None;
        }

        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = ys.iter().sum::<f64>() / n as f64;

        let (sxx, syy, sxy) = xs.iter().zip(ys.iter()).fold(
            (0.0, 0.0, 0.0),
            |(sxx, syy, sxy), (&x, &y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
            },
        );

        if sxx == 0.0 || syy == 0.0 {
            return None;
        }

        let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let p_value = Self::correlation_p_value(r, n);

        Some(CorrelationStats {
            n,
            pearson_r: r,
            r_squared: r * r,
            slope,
            intercept,
            p_value,
            is_significant: p_value <= SIGNIFICANCE_THRESHOLD,
        })
    }

    /// Two-tailed p-value for H0: r = 0, using t = r * sqrt((n-2) / (1-r^2)).
    fn correlation_p_value(r: f64, n: usize) -> f64 {
        let df = (n - 2) as f64;
        let denom = 1.0 - r * r;
        if denom <= 0.0 {
            return 0.0;
        }
        let t = r * (df / denom).sqrt();

        if let Ok(dist) = StudentsT::new(0.0, 1.0, df) {
            (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0)
        } else {
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn dataset(pairs: &[(i64, i64)]) -> Dataset {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(poverty, healthcare))| {
                Record::new(format!("S{i}"), format!("S{i}"), [poverty, healthcare, 0, 0, 0, 0])
            })
            .collect()
    }

    #[test]
    fn summary_matches_hand_computed_values() {
        let ds = dataset(&[(10, 1), (20, 2), (40, 3), (30, 4)]);
        let s = StatsCalculator::summarize(&ds, Field::Poverty).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 40.0);
        assert_eq!(s.mean, 25.0);
        assert_eq!(s.median, 25.0);
    }

    #[test]
    fn summarize_all_covers_every_field() {
        let ds = dataset(&[(1, 2), (3, 4)]);
        let all = StatsCalculator::summarize_all(&ds);
        assert_eq!(all.len(), Field::ALL.len());
        assert_eq!(all[&Field::Healthcare].mean, 3.0);
    }

    #[test]
    fn perfectly_linear_data_has_unit_correlation() {
        let ds = dataset(&[(1, 3), (2, 5), (3, 7), (4, 9)]);
        let c = StatsCalculator::correlation(&ds, Selection::default()).unwrap();
        assert!((c.pearson_r - 1.0).abs() < 1e-12);
        assert!((c.slope - 2.0).abs() < 1e-12);
        assert!((c.intercept - 1.0).abs() < 1e-12);
        assert!(c.is_significant);
    }

    #[test]
    fn weak_relationship_is_not_significant() {
        let ds = dataset(&[(1, 5), (2, 1), (3, 4), (4, 2), (5, 5), (6, 1)]);
        let c = StatsCalculator::correlation(&ds, Selection::default()).unwrap();
        assert!(c.pearson_r.abs() < 0.5);
        assert!(!c.is_significant);
    }

    #[test]
    fn degenerate_inputs_have_no_correlation() {
        assert!(StatsCalculator::correlation(&dataset(&[(1, 1), (2, 2)]), Selection::default()).is_none());
        assert!(
            StatsCalculator::correlation(&dataset(&[(1, 1), (1, 2), (1, 3)]), Selection::default())
                .is_none()
        );
    }
}
