//! Pairwise distance matrix assembly.

use std::ops::Index;

/// Symmetric matrix of time-averaged distances over a spike train collection.
///
/// Only the strict lower triangle is stored: `n*(n-1)/2` entries for `n`
/// trains, one per unordered pair, in the order the aggregator computes them.
/// Lookups are symmetric (`get(i, j) == get(j, i)`) and the diagonal is an
/// implicit zero: a train has no dissimilarity to itself.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DistanceMatrix {
    n: usize,
    distances: Vec<f64>,
}

/// Flat position of pair `(row, col)` with `row > col` in the lower triangle.
fn pair_index(row: usize, col: usize) -> usize {
    debug_assert!(row > col);
    row * (row - 1) / 2 + col
}

impl DistanceMatrix {
    /// Assemble a matrix from lower-triangle pair distances, ordered
    /// `(1,0), (2,0), (2,1), (3,0), …` — the aggregator's flat pair order.
    pub(crate) fn from_raw(n: usize, distances: Vec<f64>) -> Self {
        debug_assert_eq!(distances.len(), n * (n - 1) / 2);
        Self { n, distances }
    }

    /// Return the number of spike trains covered by the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix covers no spike trains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the time-averaged distance between trains `i` and `j`.
    /// Zero when `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below [`len`][DistanceMatrix::len].
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.n && j < self.n,
            "pair ({i}, {j}) out of range for {} spike trains",
            self.n
        );
        if i == j {
            return 0.0;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        self.distances[pair_index(row, col)]
    }

    /// Iterate over the stored unordered pairs as `(i, j, distance)` with
    /// `i > j`. Each pair appears exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..self.n)
            .flat_map(move |i| (0..i).map(move |j| (i, j, self.distances[pair_index(i, j)])))
    }

    /// Distances from train `i` to every train in the collection, including
    /// the zero entry for `i` itself.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }

    /// Expand into a dense `n x n` row-major matrix, symmetric with zero
    /// diagonal. Suitable for downstream plotting or serialization.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i)).collect()
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        // Diagonal zeros are implicit rather than stored, so only
        // off-diagonal entries can be referenced. get() covers the diagonal.
        assert!(i != j, "diagonal entries are implicit zeros, use get()");
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        &self.distances[pair_index(row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Matrix over the 3-train reference collection on [0, 4]:
    /// ({1,2,3}, {1.5,2.5}) = 0.25, ({1,2,3}, {}) = 0.75,
    /// ({1.5,2.5}, {}) = 0.65625.
    fn trio_matrix() -> DistanceMatrix {
        DistanceMatrix::from_raw(3, vec![0.25, 0.75, 0.65625])
    }

    #[test]
    fn self_distance_is_zero() {
        let m = trio_matrix();
        for i in 0..3 {
            assert_eq!(m.get(i, i), 0.0);
        }
    }

    #[test]
    fn lookup_is_order_independent() {
        let m = trio_matrix();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn flat_storage_follows_pair_order() {
        // 4 trains: 6 pairs in order (1,0), (2,0), (2,1), (3,0), (3,1), (3,2).
        let m = DistanceMatrix::from_raw(4, vec![0.25, 0.75, 0.65625, 0.1, 0.4, 0.5]);
        assert_eq!(m.get(1, 0), 0.25);
        assert_eq!(m.get(2, 0), 0.75);
        assert_eq!(m.get(2, 1), 0.65625);
        assert_eq!(m.get(3, 0), 0.1);
        assert_eq!(m.get(3, 1), 0.4);
        assert_eq!(m.get(3, 2), 0.5);
    }

    #[test]
    fn index_access_either_orientation() {
        let m = trio_matrix();
        assert_eq!(m[(1, 0)], 0.25);
        assert_eq!(m[(0, 2)], 0.75);
        assert_eq!(m[(2, 1)], 0.65625);
    }

    #[test]
    fn iter_covers_each_pair_once() {
        let m = trio_matrix();
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(
            pairs,
            vec![(1, 0, 0.25), (2, 0, 0.75), (2, 1, 0.65625)]
        );
    }

    #[test]
    fn row_includes_self_zero() {
        let m = trio_matrix();
        assert_eq!(m.row(0), vec![0.0, 0.25, 0.75]);
        assert_eq!(m.row(2), vec![0.75, 0.65625, 0.0]);
    }

    #[test]
    fn dense_expansion_is_symmetric() {
        let m = trio_matrix();
        let dense = m.to_dense();
        assert_eq!(dense.len(), 3);
        for i in 0..3 {
            assert_eq!(dense[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(dense[i][j], dense[j][i]);
            }
        }
    }

    #[test]
    fn counts_covered_trains() {
        let m = trio_matrix();
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
    }
}
