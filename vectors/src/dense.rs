/// A dense, owning vector of `f64` values. Non-owning views into a
/// [`crate::vector_set::DenseVectorSet`]'s backing store are plain `&[f64]` /
/// `&mut [f64]` slices — the set hands those out directly rather than
/// wrapping them in a parallel view type, since a slice already is the
/// non-owning borrow this component needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseVector {
    values: Vec<f64>,
}

impl DenseVector {
    pub fn zeros(length: usize) -> Self {
        Self {
            values: vec![0.0; length],
        }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn length(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    pub fn set(&mut self, i: usize, v: f64) {
        self.values[i] = v;
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn copy_from(&mut self, other: &[f64]) {
        self.values.copy_from_slice(other);
    }

    pub fn scale(&mut self, factor: f64) {
        for v in self.values.iter_mut() {
            *v *= factor;
        }
    }

    pub fn add_assign(&mut self, other: &[f64]) {
        debug_assert_eq!(self.values.len(), other.len());
        for (a, b) in self.values.iter_mut().zip(other) {
            *a += b;
        }
    }

    pub fn square_euclidean_distance(&self, other: &[f64]) -> f64 {
        square_euclidean_distance(&self.values, other)
    }

    pub fn sq_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Per-dimension `v -> f(i, v)` map, used by the normaliser.
    pub fn map_with_index(&mut self, mut f: impl FnMut(usize, &mut f64)) {
        for (i, v) in self.values.iter_mut().enumerate() {
            f(i, v);
        }
    }
}

pub fn square_euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn euclidean_distance_matches_manual_computation() {
        let a = DenseVector::from_values(vec![0.0, 0.0]);
        let b = vec![3.0, 4.0];
        assert_relative_eq!(a.square_euclidean_distance(&b), 25.0);
    }

    #[test]
    fn scale_and_add_assign() {
        let mut a = DenseVector::from_values(vec![1.0, 2.0]);
        a.scale(2.0);
        assert_eq!(a.as_slice(), &[2.0, 4.0]);
        a.add_assign(&[1.0, 1.0]);
        assert_eq!(a.as_slice(), &[3.0, 5.0]);
    }
}
