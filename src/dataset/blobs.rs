use ndarray::{Array1, Array2, Axis};
use rand::{Rng, seq::SliceRandom};
use rand_distr::{Distribution, Normal, Uniform};

use super::Dataset;
use crate::{SgdErr, config::CentersConfig, error::Result};

/// Draws the blob centers described by `centers`.
///
/// # Errors
/// `SgdErr::Distribution` if the center box is empty.
pub fn resolve_centers<R: Rng>(centers: &CentersConfig, rng: &mut R) -> Result<Vec<[f32; 2]>> {
    match centers {
        CentersConfig::Random { count, low, high } => {
            let uniform = Uniform::new(*low, *high)?;
            Ok((0..*count)
                .map(|_| [uniform.sample(rng), uniform.sample(rng)])
                .collect())
        }
        CentersConfig::Fixed { points } => Ok(points.clone()),
    }
}

/// Generates isotropic gaussian blobs in the plane, labeled by the index of their center.
///
/// Samples are spread evenly among the centers, the first `samples % centers.len()` centers
/// getting one extra. The rows are shuffled before returning.
///
/// # Arguments
/// * `samples` - The total amount of samples.
/// * `centers` - The center of each blob.
/// * `cluster_std` - The standard deviation of every blob, on both axes.
/// * `rng` - A random number generator.
///
/// # Errors
/// `SgdErr::InvalidParameter` if there are no samples or centers, `SgdErr::Distribution` if
/// `cluster_std` is not a valid standard deviation.
pub fn make_blobs<R: Rng>(
    samples: usize,
    centers: &[[f32; 2]],
    cluster_std: f32,
    rng: &mut R,
) -> Result<Dataset> {
    if samples == 0 || centers.is_empty() {
        return Err(SgdErr::InvalidParameter(format!(
            "can't make {samples} samples around {} centers",
            centers.len()
        )));
    }

    let noise = Normal::new(0.0, cluster_std)?;
    let per_center = samples / centers.len();
    let extra = samples % centers.len();

    let mut xs = Vec::with_capacity(samples * 2);
    let mut ys = Vec::with_capacity(samples);
    for (label, [cx, cy]) in centers.iter().enumerate() {
        let n = per_center + usize::from(label < extra);
        for _ in 0..n {
            xs.push(cx + noise.sample(rng));
            xs.push(cy + noise.sample(rng));
            ys.push(label as f32);
        }
    }

    let x = Array2::from_shape_vec((samples, 2), xs)?;
    let y = Array1::from(ys);

    let mut order: Vec<usize> = (0..samples).collect();
    order.shuffle(rng);

    Dataset::new(x.select(Axis(0), &order), y.select(Axis(0), &order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn samples_are_spread_evenly() {
        let centers = [[0.0, 0.0], [5.0, 5.0], [-5.0, 5.0]];
        let ds = make_blobs(100, &centers, 1.0, &mut seeded_rng()).unwrap();

        let count = |label: f32| ds.y().iter().filter(|&&y| y == label).count();
        assert_eq!(ds.len(), 100);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(count(0.0), 34);
        assert_eq!(count(1.0), 33);
        assert_eq!(count(2.0), 33);
    }

    #[test]
    fn zero_std_puts_samples_on_their_center() {
        let centers = [[1.0, 2.0], [-3.0, 4.0]];
        let ds = make_blobs(10, &centers, 0.0, &mut seeded_rng()).unwrap();

        for (row, &label) in ds.x().rows().into_iter().zip(ds.y()) {
            let [cx, cy] = centers[label as usize];
            assert_eq!((row[0], row[1]), (cx, cy));
        }
    }

    #[test]
    fn rows_are_shuffled() {
        let centers = [[0.0, 0.0], [10.0, 10.0]];
        let ds = make_blobs(200, &centers, 0.5, &mut seeded_rng()).unwrap();

        let first_half_ones = ds.y().iter().take(100).filter(|&&y| y == 1.0).count();
        assert!(first_half_ones > 0 && first_half_ones < 100);
    }

    #[test]
    fn same_seed_same_blobs() {
        let centers = [[0.0, 0.0], [3.0, 3.0]];

        let a = make_blobs(50, &centers, 1.5, &mut seeded_rng()).unwrap();
        let b = make_blobs(50, &centers, 1.5, &mut seeded_rng()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn random_centers_stay_in_the_box() {
        let config = CentersConfig::Random {
            count: 8,
            low: -10.0,
            high: 10.0,
        };
        let centers = resolve_centers(&config, &mut seeded_rng()).unwrap();

        assert_eq!(centers.len(), 8);
        assert!(
            centers
                .iter()
                .flatten()
                .all(|&c| (-10.0..10.0).contains(&c))
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = seeded_rng();

        assert!(make_blobs(0, &[[0.0, 0.0]], 1.0, &mut rng).is_err());
        assert!(make_blobs(10, &[], 1.0, &mut rng).is_err());
        assert!(make_blobs(10, &[[0.0, 0.0]], f32::NAN, &mut rng).is_err());
    }
}
