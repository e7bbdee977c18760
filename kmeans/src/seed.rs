use asapcat_toolkit::Error;
use rand::Rng;

use crate::centre::CentreSet;
use crate::point::Point;

/// k-means++ seeding: the first centre is a uniform-random point; every
/// subsequent centre is drawn by roulette-wheel sampling with probability
/// proportional to its squared distance to the nearest centre already
/// chosen. `d[i]` tracks that running minimum distance and only ever
/// shrinks as centres are added.
pub fn seed_plus_plus<P: Point>(
    points: &[P],
    centres: &mut CentreSet,
    rng: &mut impl Rng,
) -> Result<(), Error> {
    let k = centres.k();
    let n = points.len();
    if n == 0 {
        return Err(Error::empty_input("no points to seed centres from"));
    }
    if k == 0 || k > n {
        return Err(Error::invalid_argument(
            "number of clusters must be in 1..=number of points",
        ));
    }

    centres.clear();

    let first = rng.random_range(0..n);
    centres.add_point(0, &points[first]);
    centres.update_sq_norms();

    let mut d: Vec<f64> = points
        .iter()
        .map(|p| p.sq_dist_to_centre(centres.centre(0), centres.sq_norm(0)))
        .collect();
    d[first] = 0.0;

    let mut chosen = 1;
    while chosen < k {
        let total: f64 = d.iter().sum();
        let target = if total > 0.0 {
            rng.random_range(0.0..total)
        } else {
            0.0
        };

        let mut cumulative = 0.0;
        let mut picked = n - 1;
        for (i, &di) in d.iter().enumerate() {
            cumulative += di;
            if cumulative >= target {
                picked = i;
                break;
            }
        }

        centres.add_point(chosen, &points[picked]);
        centres.update_sq_norms();
        d[picked] = 0.0;

        let just_added = chosen;
        chosen += 1;
        if chosen >= k {
            break;
        }

        for (i, di) in d.iter_mut().enumerate() {
            let dist = points[i].sq_dist_to_centre(centres.centre(just_added), centres.sq_norm(just_added));
            if dist < *di {
                *di = dist;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asapcat_vectors::DenseVector;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeds_exactly_k_distinct_centres_with_one_point_each() {
        let points: Vec<DenseVector> = (0..5)
            .map(|i| DenseVector::from_values(vec![i as f64, 0.0]))
            .collect();
        let mut centres = CentreSet::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        seed_plus_plus(&points, &mut centres, &mut rng).unwrap();
        for c in 0..3 {
            assert_eq!(centres.count(c), 1);
        }
    }

    #[test]
    fn rejects_more_clusters_than_points() {
        let points: Vec<DenseVector> = vec![DenseVector::from_values(vec![0.0])];
        let mut centres = CentreSet::new(2, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed_plus_plus(&points, &mut centres, &mut rng).is_err());
    }
}
