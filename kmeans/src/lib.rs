//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! Parallel K-Means clustering (C10): k-means++ seeding followed by Lloyd
//! iteration, converging on assignment stability or near-stationary centres.

pub mod centre;
pub mod lloyd;
pub mod point;
pub mod seed;

pub use centre::CentreSet;
pub use point::Point;

use asapcat_toolkit::Error;
use rand::Rng;

/// The squared-motion threshold below which a centre that moved is treated
/// as stationary for convergence purposes, once assignments have already
/// stopped changing for at least one point.
const EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceState {
    Uninitialized,
    Seeded,
    Iterating,
    Converged,
    Capped,
}

#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub centres: CentreSet,
    pub assignments: Vec<usize>,
    pub within_sse: f64,
    pub num_iterations: usize,
    pub state: ConvergenceState,
}

/// Clusters `points` into `num_clusters` groups. `max_iters == 0` means
/// unbounded — iteration stops only once assignments stabilise (or, once
/// they have changed at least once, once every centre's motion drops below
/// [`EPSILON`] squared).
pub fn cluster<P: Point>(
    points: &[P],
    num_clusters: usize,
    max_iters: usize,
    rng: &mut impl Rng,
) -> Result<KMeansResult, Error> {
    if points.is_empty() {
        return Err(Error::empty_input("no points to cluster"));
    }
    let dim = points[0].dim();

    let mut state = ConvergenceState::Uninitialized;
    let mut centres = CentreSet::new(num_clusters, dim)?;
    seed::seed_plus_plus(points, &mut centres, rng)?;
    centres.normalize();
    state = ConvergenceState::Seeded;

    let mut assignments = vec![usize::MAX; points.len()];
    let mut within_sse = 0.0;
    let mut num_iterations = 1usize;

    loop {
        state = ConvergenceState::Iterating;
        let previous_assignments = assignments.clone();
        let previous_centres = centres.clone();

        within_sse = lloyd::iterate(points, &mut centres, &mut assignments)?;

        let mut modified = lloyd::assignments_changed(&previous_assignments, &assignments);
        if modified {
            let moved = lloyd::max_centre_motion(&previous_centres, &centres);
            modified = moved >= EPSILON * EPSILON;
        }

        if !modified {
            state = ConvergenceState::Converged;
            break;
        }

        num_iterations += 1;
        if max_iters > 0 && num_iterations >= max_iters {
            state = ConvergenceState::Capped;
            break;
        }
    }

    Ok(KMeansResult {
        centres,
        assignments,
        within_sse,
        num_iterations,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asapcat_vectors::DenseVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_well_separated_clusters() -> Vec<DenseVector> {
        let mut points = Vec::new();
        for i in 0..10 {
            points.push(DenseVector::from_values(vec![i as f64 * 0.1, 0.0]));
        }
        for i in 0..10 {
            points.push(DenseVector::from_values(vec![100.0 + i as f64 * 0.1, 0.0]));
        }
        points
    }

    #[test]
    fn converges_to_two_obvious_clusters() {
        let points = two_well_separated_clusters();
        let mut rng = StdRng::seed_from_u64(42);
        let result = cluster(&points, 2, 0, &mut rng).unwrap();

        assert_eq!(result.state, ConvergenceState::Converged);
        let first_half = result.assignments[0];
        let second_half = result.assignments[10];
        assert!(result.assignments[..10].iter().all(|&c| c == first_half));
        assert!(result.assignments[10..].iter().all(|&c| c == second_half));
        assert_ne!(first_half, second_half);
    }

    #[test]
    fn max_iters_caps_iteration_count() {
        // The sentinel `usize::MAX` initial assignment guarantees the first
        // `iterate` call reports every point as modified, so a cap of 1 is
        // always hit right after it.
        let points = two_well_separated_clusters();
        let mut rng = StdRng::seed_from_u64(1);
        let result = cluster(&points, 2, 1, &mut rng).unwrap();
        assert_eq!(result.state, ConvergenceState::Capped);
        assert_eq!(result.num_iterations, 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        let points: Vec<DenseVector> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(cluster(&points, 1, 0, &mut rng).is_err());
    }
}
