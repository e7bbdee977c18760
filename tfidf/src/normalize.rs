use asapcat_vectors::VectorSetKind;

/// Per-dimension `(min, max)` pairs computed by [`extrema`]. Dimensions that
/// never carry a nonzero value in a sparse set are pinned at `(0, 0)` —
/// `extrema` leaves them at their sentinel `(f64::MAX, f64::MIN)` otherwise,
/// since no observed value ever beat the sentinel.
#[derive(Debug, Clone)]
pub struct Extrema(Vec<(f64, f64)>);

impl Extrema {
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, dim: usize) -> (f64, f64) {
        self.0[dim]
    }
}

pub fn extrema(vectors: &VectorSetKind) -> Extrema {
    let dim = vectors.dim();
    let mut mm = vec![(f64::MAX, f64::MIN); dim];
    match vectors {
        VectorSetKind::Dense(d) => {
            for row in d.rows() {
                for (i, &v) in row.iter().enumerate() {
                    update(&mut mm[i], v);
                }
            }
        }
        VectorSetKind::Sparse(s) => {
            for r in 0..s.len() {
                for (&idx, &v) in s.row_indices(r).iter().zip(s.row_values(r)) {
                    update(&mut mm[idx as usize], v);
                }
            }
            // A dimension that never appears in any sparse row is implicitly
            // always zero — the sentinel never got a chance to move.
            for pair in mm.iter_mut() {
                if pair.0 == f64::MAX {
                    *pair = (0.0, 0.0);
                }
            }
        }
    }
    Extrema(mm)
}

fn update(pair: &mut (f64, f64), v: f64) {
    if v < pair.0 {
        pair.0 = v;
    }
    if v > pair.1 {
        pair.1 = v;
    }
}

/// Min-max scales `vectors` in place to `[0, 1]`-ish range per dimension,
/// using the upstream `+1` stability bias: `v' = (v - min) / (max - min + 1)`.
/// A constant dimension (`min == max`) is pinned at `1.0` rather than
/// dividing by zero.
pub fn scale(vectors: &mut VectorSetKind, mm: &Extrema) {
    match vectors {
        VectorSetKind::Dense(d) => {
            for r in 0..d.len() {
                for (i, v) in d.row_mut(r).iter_mut().enumerate() {
                    scale_value(v, mm.get(i));
                }
            }
        }
        VectorSetKind::Sparse(s) => {
            for r in 0..s.len() {
                let (values, indices) = s.row_mut(r);
                for (v, &idx) in values.iter_mut().zip(indices.iter()) {
                    scale_value(v, mm.get(idx as usize));
                }
            }
        }
    }
}

fn scale_value(v: &mut f64, (min, max): (f64, f64)) {
    if min != max {
        *v = (*v - min) / (max - min + 1.0);
    } else {
        *v = 1.0;
    }
}

/// Inverse of [`scale`]: `v' = v * (max - min + 1) + min`, except a
/// constant dimension stays at `0` unless it was already nonzero, in which
/// case it is restored to `min`.
pub fn unscale(vectors: &mut VectorSetKind, mm: &Extrema) {
    match vectors {
        VectorSetKind::Dense(d) => {
            for r in 0..d.len() {
                for (i, v) in d.row_mut(r).iter_mut().enumerate() {
                    unscale_value(v, mm.get(i));
                }
            }
        }
        VectorSetKind::Sparse(s) => {
            for r in 0..s.len() {
                let (values, indices) = s.row_mut(r);
                for (v, &idx) in values.iter_mut().zip(indices.iter()) {
                    unscale_value(v, mm.get(idx as usize));
                }
            }
        }
    }
}

fn unscale_value(v: &mut f64, (min, max): (f64, f64)) {
    if min != max {
        *v = *v * (max - min + 1.0) + min;
    } else if *v != 0.0 {
        *v = min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use asapcat_vectors::DenseVectorSet;

    fn dense(rows: &[&[f64]]) -> VectorSetKind {
        let mut set = DenseVectorSet::new(rows.len(), rows[0].len());
        for row in rows {
            let r = set.emplace_back().unwrap();
            set.row_mut(r).copy_from_slice(row);
        }
        VectorSetKind::Dense(set)
    }

    #[test]
    fn scale_then_unscale_round_trips() {
        let mut vectors = dense(&[&[1.0, 5.0], &[3.0, 5.0], &[2.0, 5.0]]);
        let mm = extrema(&vectors);
        scale(&mut vectors, &mm);
        unscale(&mut vectors, &mm);
        if let VectorSetKind::Dense(d) = &vectors {
            assert_relative_eq!(d.row(0)[0], 1.0, epsilon = 1e-9);
            assert_relative_eq!(d.row(1)[0], 3.0, epsilon = 1e-9);
            assert_relative_eq!(d.row(2)[0], 2.0, epsilon = 1e-9);
        } else {
            unreachable!()
        }
    }

    #[test]
    fn constant_dimension_scales_to_one() {
        let mut vectors = dense(&[&[5.0], &[5.0]]);
        let mm = extrema(&vectors);
        scale(&mut vectors, &mm);
        if let VectorSetKind::Dense(d) = &vectors {
            assert_relative_eq!(d.row(0)[0], 1.0);
            assert_relative_eq!(d.row(1)[0], 1.0);
        } else {
            unreachable!()
        }
    }

    #[test]
    fn scale_uses_plus_one_bias_not_plain_minmax() {
        let mut vectors = dense(&[&[0.0], &[10.0]]);
        let mm = extrema(&vectors);
        scale(&mut vectors, &mm);
        if let VectorSetKind::Dense(d) = &vectors {
            // (0 - 0) / (10 - 0 + 1) = 0, (10 - 0) / 11 = 10/11, not 1.0
            assert_relative_eq!(d.row(0)[0], 0.0);
            assert_relative_eq!(d.row(1)[0], 10.0 / 11.0, epsilon = 1e-9);
        } else {
            unreachable!()
        }
    }
}
