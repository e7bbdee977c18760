use asapcat_vectors::{dense, DenseVector, SparseVector};

/// What the clustering core needs from a point: a squared distance to a
/// dense centre (optionally using the centre's cached squared norm) and a
/// way to accumulate itself into a dense accumulator row. Implemented for
/// both vector kinds a [`asapcat_vectors::DataSet`] can carry, so the same
/// seeding and Lloyd-iteration code serves dense and sparse input alike.
pub trait Point: Sync {
    fn dim(&self) -> usize;
    fn sq_dist_to_centre(&self, centre: &[f64], centre_sq_norm: f64) -> f64;
    fn add_into(&self, accumulator: &mut [f64]);
}

impl Point for SparseVector {
    fn dim(&self) -> usize {
        self.length()
    }

    fn sq_dist_to_centre(&self, centre: &[f64], centre_sq_norm: f64) -> f64 {
        self.sq_dist_dense(centre, Some(centre_sq_norm))
    }

    fn add_into(&self, accumulator: &mut [f64]) {
        for (&idx, &v) in self.indices().iter().zip(self.values()) {
            accumulator[idx as usize] += v;
        }
    }
}

impl Point for DenseVector {
    fn dim(&self) -> usize {
        self.length()
    }

    fn sq_dist_to_centre(&self, centre: &[f64], _centre_sq_norm: f64) -> f64 {
        dense::square_euclidean_distance(self.as_slice(), centre)
    }

    fn add_into(&self, accumulator: &mut [f64]) {
        for (a, &v) in accumulator.iter_mut().zip(self.as_slice()) {
            *a += v;
        }
    }
}
