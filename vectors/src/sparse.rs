/// A sparse, owning vector: parallel `values`/`indices` arrays plus the
/// logical (dense) length `n`. `indices` are strictly ascending once
/// [`sort_by_index`](Self::sort_by_index) has been called — most builders
/// guarantee that themselves and call it defensively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    values: Vec<f64>,
    indices: Vec<u32>,
    logical_length: u32,
}

impl SparseVector {
    pub fn new(logical_length: u32) -> Self {
        Self {
            values: Vec::new(),
            indices: Vec::new(),
            logical_length,
        }
    }

    pub fn from_pairs(logical_length: u32, mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            indices.push(idx);
            values.push(val);
        }
        Self {
            values,
            indices,
            logical_length,
        }
    }

    pub fn nonzeros(&self) -> usize {
        self.values.len()
    }

    pub fn length(&self) -> usize {
        self.logical_length as usize
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn get(&self, nz: usize) -> (u32, f64) {
        (self.indices[nz], self.values[nz])
    }

    pub fn push(&mut self, index: u32, value: f64) {
        self.indices.push(index);
        self.values.push(value);
    }

    /// Restores the `indices` strictly-ascending invariant after entries were
    /// appended out of order (e.g. assembled by concurrent atomic
    /// fetch-add cursors in the term-major TF-IDF path).
    pub fn sort_by_index(&mut self) {
        let mut order: Vec<usize> = (0..self.indices.len()).collect();
        order.sort_unstable_by_key(|&i| self.indices[i]);
        let indices: Vec<u32> = order.iter().map(|&i| self.indices[i]).collect();
        let values: Vec<f64> = order.iter().map(|&i| self.values[i]).collect();
        self.indices = indices;
        self.values = values;
    }

    pub fn is_sorted(&self) -> bool {
        self.indices.windows(2).all(|w| w[0] < w[1])
    }

    /// `||s - d||^2` using `||d||^2 + sum_j v_j (v_j - 2 d[c_j])`; starts the
    /// accumulator at `d_sq_norm` when the dense side carries a cached
    /// squared norm, avoiding the full-length dense pass entirely.
    pub fn sq_dist_dense(&self, dense: &[f64], d_sq_norm: Option<f64>) -> f64 {
        let base = d_sq_norm.unwrap_or_else(|| dense.iter().map(|v| v * v).sum());
        let mut sum = base;
        for (&idx, &v) in self.indices.iter().zip(self.values.iter()) {
            sum += v * (v - 2.0 * dense[idx as usize]);
        }
        sum
    }

    /// `||s1 - s2||^2` via a two-pointer merge over sorted indices. Both
    /// sides must already be [`sort_by_index`](Self::sort_by_index)ed.
    pub fn sq_dist_sparse(&self, other: &SparseVector) -> f64 {
        debug_assert!(self.is_sorted() && other.is_sorted());
        let mut sum = 0.0;
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => {
                    sum += self.values[i] * self.values[i];
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    sum += other.values[j] * other.values[j];
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let diff = self.values[i] - other.values[j];
                    sum += diff * diff;
                    i += 1;
                    j += 1;
                }
            }
        }
        for &v in &self.values[i..] {
            sum += v * v;
        }
        for &v in &other.values[j..] {
            sum += v * v;
        }
        sum
    }

    /// `self += addend`, walking only `addend`'s nonzeros.
    pub fn add_assign_sparse(&mut self, addend: &SparseVector) {
        debug_assert_eq!(self.logical_length, addend.logical_length);
        for (&idx, &v) in addend.indices.iter().zip(addend.values.iter()) {
            match self.indices.binary_search(&idx) {
                Ok(pos) => self.values[pos] += v,
                Err(pos) => {
                    self.indices.insert(pos, idx);
                    self.values.insert(pos, v);
                }
            }
        }
    }

    pub fn to_dense(&self) -> super::dense::DenseVector {
        let mut d = super::dense::DenseVector::zeros(self.length());
        for (&idx, &v) in self.indices.iter().zip(self.values.iter()) {
            d.set(idx as usize, v);
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sort_by_index_restores_ascending_order() {
        let mut v = SparseVector::new(5);
        v.push(3, 1.0);
        v.push(1, 2.0);
        v.sort_by_index();
        assert!(v.is_sorted());
        assert_eq!(v.indices(), &[1, 3]);
    }

    #[test]
    fn sparse_dense_distance_matches_dense_expansion() {
        let s = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 3.0)]);
        let dense = vec![0.5, 0.0, 1.0, 0.0];
        let expanded = s.to_dense();
        let via_sparse = s.sq_dist_dense(&dense, None);
        let via_dense = expanded.square_euclidean_distance(&dense);
        assert_relative_eq!(via_sparse, via_dense, epsilon = 1e-9);
    }

    #[test]
    fn sparse_dense_distance_with_cached_sqnorm_matches_uncached() {
        let s = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 3.0)]);
        let dense = vec![0.5, 0.0, 1.0, 0.0];
        let sq_norm: f64 = dense.iter().map(|v| v * v).sum();
        let cached = s.sq_dist_dense(&dense, Some(sq_norm));
        let uncached = s.sq_dist_dense(&dense, None);
        assert_relative_eq!(cached, uncached, epsilon = 1e-9);
    }

    #[test]
    fn sparse_sparse_distance_matches_dense_expansion() {
        let a = SparseVector::from_pairs(5, vec![(0, 1.0), (3, 2.0)]);
        let b = SparseVector::from_pairs(5, vec![(1, 1.0), (3, 5.0)]);
        let da = a.to_dense();
        let db = b.to_dense();
        let via_sparse = a.sq_dist_sparse(&b);
        let via_dense = da.square_euclidean_distance(db.as_slice());
        assert_relative_eq!(via_sparse, via_dense, epsilon = 1e-9);
    }

    #[test]
    fn add_assign_sparse_walks_only_nonzeros() {
        let mut a = SparseVector::from_pairs(4, vec![(0, 1.0)]);
        let b = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 5.0)]);
        a.add_assign_sparse(&b);
        assert_eq!(a.nonzeros(), 2);
        assert_eq!(a.to_dense().as_slice(), &[2.0, 0.0, 5.0, 0.0]);
    }
}
