use asapcat_toolkit::Error;
use rayon::prelude::*;

use crate::centre::CentreSet;
use crate::point::Point;

/// One Lloyd iteration: reassigns every point to its nearest centre (in
/// parallel), then folds points into fresh per-thread centre accumulators
/// that are reduced pairwise into the replacement centre set — the same
/// reducer-view shape `asapcat_catalogue::aggregate::build_catalogue` uses
/// for its thread-local `WordMap` accumulators.
///
/// Returns the sum of squared distances to the assigned centre (before this
/// iteration's reassignment) and whether any point's assignment changed.
pub fn iterate<P: Point>(
    points: &[P],
    centres: &mut CentreSet,
    assignments: &mut [usize],
) -> Result<f64, Error> {
    let k = centres.k();
    let dim = centres.dim();
    centres.update_sq_norms();

    let nearest: Vec<(usize, f64)> = points
        .par_iter()
        .map(|point| {
            let mut best = (0usize, f64::MAX);
            for c in 0..k {
                let d = point.sq_dist_to_centre(centres.centre(c), centres.sq_norm(c));
                if d < best.1 {
                    best = (c, d);
                }
            }
            best
        })
        .collect();

    let mut sse = 0.0;
    for (assignment, &(cluster, dist)) in assignments.iter_mut().zip(&nearest) {
        *assignment = cluster;
        sse += dist;
    }

    let mut accumulated = points
        .par_iter()
        .zip(nearest.par_iter())
        .fold(
            || CentreSet::new(k, dim).expect("accumulator never exceeds its own capacity"),
            |mut acc, (point, &(cluster, _))| {
                acc.add_point(cluster, point);
                acc
            },
        )
        .reduce(
            || CentreSet::new(k, dim).expect("accumulator never exceeds its own capacity"),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    accumulated.normalize();
    *centres = accumulated;

    Ok(sse)
}

/// Whether any point changed cluster between `previous` and `current`.
pub fn assignments_changed(previous: &[usize], current: &[usize]) -> bool {
    previous.iter().zip(current).any(|(a, b)| a != b)
}

/// Squared motion of the farthest-moving centre, matching the centre
/// indices of `before` and `after` (both must share the same `k`/`dim`).
pub fn max_centre_motion(before: &CentreSet, after: &CentreSet) -> f64 {
    (0..before.k())
        .map(|c| before.sq_dist_to_slice(c, after.centre(c)))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asapcat_vectors::DenseVector;

    #[test]
    fn iterate_moves_points_toward_nearer_centre() {
        let points = vec![
            DenseVector::from_values(vec![0.0]),
            DenseVector::from_values(vec![1.0]),
            DenseVector::from_values(vec![9.0]),
            DenseVector::from_values(vec![10.0]),
        ];
        let mut centres = CentreSet::new(2, 1).unwrap();
        centres.add_point(0, &points[0]);
        centres.add_point(1, &points[3]);
        centres.normalize();

        let mut assignments = vec![usize::MAX; points.len()];
        iterate(&points, &mut centres, &mut assignments).unwrap();

        assert_eq!(assignments[0], assignments[1]);
        assert_eq!(assignments[2], assignments[3]);
        assert_ne!(assignments[0], assignments[2]);
    }
}
