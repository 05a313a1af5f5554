//! Synthetic datasets for demos and tests.

use ndarray::Axis;
use ndarray_rand::rand_distr::{Normal, Uniform};
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Isotropic Gaussian clusters.
#[derive(Clone, Debug)]
pub struct Blobs {
    pub features: Matrix,
    /// Cluster index of every row, as `f64`.
    pub labels: Vector,
    pub centers: Matrix,
}

/// Draws `n_samples` points split evenly over `centers` clusters.
///
/// Centres are uniform in `[-10, 10)` per feature and points are normal
/// around their centre with standard deviation `cluster_std`. Row `i`
/// belongs to cluster `i % centers`. The same seed yields the same data.
pub fn make_blobs(
    n_samples: usize,
    centers: usize,
    n_features: usize,
    cluster_std: f64,
    seed: u64,
) -> Result<Blobs> {
    if n_samples == 0 || centers == 0 || n_features == 0 {
        return Err(Error::InvalidConfig(format!(
            "n_samples, centers and n_features must be positive, got {n_samples}, {centers}, {n_features}"
        )));
    }
    if !(cluster_std.is_finite() && cluster_std >= 0.0) {
        return Err(Error::InvalidConfig(format!(
            "cluster_std must be finite and non-negative, got {cluster_std}"
        )));
    }
    let noise = Normal::new(0.0, cluster_std).map_err(|e| {
        Error::InvalidConfig(format!("invalid cluster_std {cluster_std}: {e}"))
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let center_points = Matrix::random_using((centers, n_features), Uniform::new(-10.0, 10.0), &mut rng);

    let labels = Vector::from_shape_fn(n_samples, |i| (i % centers) as f64);
    let assignment: Vec<usize> = (0..n_samples).map(|i| i % centers).collect();
    let features = center_points.select(Axis(0), &assignment)
        + Matrix::random_using((n_samples, n_features), noise, &mut rng);

    Ok(Blobs {
        features,
        labels,
        centers: center_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_and_labels() {
        let blobs = make_blobs(10, 3, 2, 1.0, 0).unwrap();
        assert_eq!(blobs.features.shape(), &[10, 2]);
        assert_eq!(blobs.centers.shape(), &[3, 2]);
        assert_eq!(blobs.labels.len(), 10);
        assert_eq!(blobs.labels[0], 0.0);
        assert_eq!(blobs.labels[4], 1.0);
        assert_eq!(blobs.labels[8], 2.0);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = make_blobs(20, 2, 3, 0.5, 99).unwrap();
        let b = make_blobs(20, 2, 3, 0.5, 99).unwrap();
        let c = make_blobs(20, 2, 3, 0.5, 100).unwrap();
        assert_eq!(a.features, b.features);
        assert_ne!(a.features, c.features);
    }

    #[test]
    fn test_points_near_their_center() {
        let blobs = make_blobs(200, 4, 2, 0.1, 5).unwrap();
        for c in blobs.centers.iter() {
            assert!((-10.0..10.0).contains(c));
        }
        for (row, &label) in blobs.features.rows().into_iter().zip(blobs.labels.iter()) {
            let center = blobs.centers.row(label as usize);
            let distance = (&row - &center).mapv(|d| d * d).sum().sqrt();
            assert!(distance < 1.0);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(make_blobs(0, 2, 2, 1.0, 0).is_err());
        assert!(make_blobs(10, 0, 2, 1.0, 0).is_err());
        assert!(make_blobs(10, 2, 2, -1.0, 0).is_err());
        assert!(make_blobs(10, 2, 2, f64::NAN, 0).is_err());
        assert!(matches!(
            make_blobs(10, 2, 2, -0.5, 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_spread_puts_points_on_centers() {
        let blobs = make_blobs(6, 3, 2, 0.0, 1).unwrap();
        for (row, &label) in blobs.features.rows().into_iter().zip(blobs.labels.iter()) {
            assert_eq!(row, blobs.centers.row(label as usize));
        }
    }
}
