use asapcat_toolkit::Error;
use asapcat_vectors::{dense, DenseVectorSet};

use crate::point::Point;

/// `num_clusters` dense centre rows plus, per centre, the point count folded
/// into it and its cached squared norm. Kept as three parallel arrays rather
/// than one struct-per-centre — the vector rows already live in a single
/// pooled allocation via [`DenseVectorSet`], and `counts`/`sq_norms` are
/// tiny (one `f64`/`usize` per cluster).
#[derive(Debug, Clone)]
pub struct CentreSet {
    vectors: DenseVectorSet,
    counts: Vec<usize>,
    sq_norms: Vec<f64>,
}

impl CentreSet {
    pub fn new(num_clusters: usize, dim: usize) -> Result<Self, Error> {
        let mut vectors = DenseVectorSet::new(num_clusters, dim);
        for _ in 0..num_clusters {
            vectors.emplace_back()?;
        }
        Ok(Self {
            vectors,
            counts: vec![0; num_clusters],
            sq_norms: vec![0.0; num_clusters],
        })
    }

    pub fn k(&self) -> usize {
        self.counts.len()
    }

    pub fn dim(&self) -> usize {
        self.vectors.dim()
    }

    pub fn centre(&self, c: usize) -> &[f64] {
        self.vectors.row(c)
    }

    pub fn count(&self, c: usize) -> usize {
        self.counts[c]
    }

    pub fn sq_norm(&self, c: usize) -> f64 {
        self.sq_norms[c]
    }

    pub fn clear(&mut self) {
        for c in 0..self.k() {
            self.vectors.row_mut(c).iter_mut().for_each(|v| *v = 0.0);
        }
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.sq_norms.iter_mut().for_each(|s| *s = 0.0);
    }

    pub fn add_point(&mut self, c: usize, point: &impl Point) {
        point.add_into(self.vectors.row_mut(c));
        self.counts[c] += 1;
    }

    /// Elementwise merge of two centre-sum accumulators, skipping any centre
    /// whose counter is zero in `other` — an empty thread-local accumulator
    /// contributes nothing rather than zeroing out `self`'s share.
    pub fn merge(&mut self, other: &CentreSet) {
        for c in 0..self.k() {
            if other.counts[c] == 0 {
                continue;
            }
            let src: Vec<f64> = other.vectors.row(c).to_vec();
            let dst = self.vectors.row_mut(c);
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s;
            }
            self.counts[c] += other.counts[c];
        }
    }

    /// Divides each nonempty centre's accumulated sum by its point count. An
    /// empty cluster keeps its accumulated (zero) vector and is logged —
    /// matching the upstream decision to warn rather than fail.
    pub fn normalize(&mut self) {
        for c in 0..self.k() {
            let cnt = self.counts[c];
            if cnt > 0 {
                let inv = 1.0 / cnt as f64;
                self.vectors.row_mut(c).iter_mut().for_each(|v| *v *= inv);
            } else {
                log::warn!("cluster {c} is empty");
            }
        }
    }

    pub fn update_sq_norms(&mut self) {
        for c in 0..self.k() {
            self.sq_norms[c] = self.vectors.row(c).iter().map(|v| v * v).sum();
        }
    }

    pub fn sq_dist_between(&self, a: usize, b: usize) -> f64 {
        dense::square_euclidean_distance(self.vectors.row(a), self.vectors.row(b))
    }

    /// Squared distance between this set's centre `c` and an arbitrary dense
    /// slice — used to measure a centre's motion across an iteration without
    /// requiring both sides to be the same `CentreSet`.
    pub fn sq_dist_to_slice(&self, c: usize, other: &[f64]) -> f64 {
        dense::square_euclidean_distance(self.centre(c), other)
    }
}
