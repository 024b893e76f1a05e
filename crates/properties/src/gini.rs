//! Gini index over popularity distributions.

use crate::error::{MetricError, Result};
use crate::popularity::PopularityDistribution;
use interactions::{InteractionMatrix, Key};

/// Discrete Gini coefficient of a descending-sorted count sequence.
///
/// ```text
/// gini = 1/(n-1) * sum_i (2(n-i) - n - 1) * c[i] / S
/// ```
///
/// 0 means every key has the same count; a sequence concentrated on a single
/// key gives 1.
///
/// Undefined (returned as an error) for fewer than two keys or when all
/// counts are zero.
pub fn gini(sorted_counts: &[usize]) -> Result<f64> {
    let n = sorted_counts.len();
    if n < 2 {
        return Err(MetricError::TooFewKeys(n));
    }
    let sum: usize = sorted_counts.iter().sum();
    if sum == 0 {
        return Err(MetricError::ZeroMass);
    }

    let n_f = n as f64;
    let sum_f = sum as f64;
    let total: f64 = sorted_counts
        .iter()
        .enumerate()
        .map(|(i, &count)| (2.0 * (n_f - i as f64) - n_f - 1.0) * count as f64 / sum_f)
        .sum();

    Ok(total / (n_f - 1.0))
}

/// Gini indices of the two sides of an interaction matrix
pub struct GiniIndex<'a, U: Key, I: Key> {
    popularity: PopularityDistribution<'a, U, I>,
}

impl<'a, U: Key, I: Key> GiniIndex<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self {
            popularity: PopularityDistribution::new(matrix),
        }
    }

    /// Inequality of the number of items rated per user
    pub fn users(&self) -> Result<f64> {
        self.popularity.users().gini()
    }

    pub fn relevant_users(&self) -> Result<f64> {
        self.popularity.relevant_users().gini()
    }

    /// Inequality of item popularity
    pub fn items(&self) -> Result<f64> {
        self.popularity.items().gini()
    }

    pub fn relevant_items(&self) -> Result<f64> {
        self.popularity.relevant_items().gini()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interactions::MatrixConfig;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_uniform_is_zero() {
        assert!(gini(&[3, 3, 3, 3]).unwrap().abs() < EPS);
        assert!(gini(&[1, 1]).unwrap().abs() < EPS);
    }

    #[test]
    fn test_concentrated_is_one() {
        assert!((gini(&[4, 0, 0, 0]).unwrap() - 1.0).abs() < EPS);
        assert!((gini(&[1, 0]).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_intermediate_value() {
        // (1/2) * [(6-3-1)*3 + (4-3-1)*2 + (2-3-1)*1] / 6 = (1/2) * 4/6
        let value = gini(&[3, 2, 1]).unwrap();
        assert!((value - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_undefined_cases_are_distinct() {
        assert_eq!(gini(&[]), Err(MetricError::TooFewKeys(0)));
        assert_eq!(gini(&[5]), Err(MetricError::TooFewKeys(1)));
        assert_eq!(gini(&[0, 0, 0]), Err(MetricError::ZeroMass));
    }

    #[test]
    fn test_matrix_sides() {
        let mut matrix: InteractionMatrix = InteractionMatrix::new(MatrixConfig::new(3.0));
        for user in [1, 2] {
            matrix.add_user(user);
        }
        for item in [10, 20] {
            matrix.add_item(item);
        }
        matrix.add_edge(1, 10, 5.0);
        matrix.add_edge(2, 10, 1.0);

        let index = GiniIndex::new(&matrix);
        // items: [2, 0]
        assert!((index.items().unwrap() - 1.0).abs() < EPS);
        // users: [1, 1]
        assert!(index.users().unwrap().abs() < EPS);
        // relevant users: [1, 0]
        assert!((index.relevant_users().unwrap() - 1.0).abs() < EPS);
    }
}
