use nalgebra::Point3;

/// Checks a coordinate set for pairs closer than `threshold`.
/// Returns `true` if every pair is at least `threshold` apart.
pub fn check_distances(xyz: &[Point3<f64>], threshold: f64) -> bool {
    let n = xyz.len();
    let threshold_sq = threshold * threshold;

    for i in 0..n {
        for j in (i + 1)..n {
            let dist_sq = nalgebra::distance_squared(&xyz[i], &xyz[j]);

            if dist_sq.is_nan() || dist_sq < threshold_sq {
                return false;
            }
        }
    }
    true
}

/// Smallest Euclidean distance over all pairs, `None` for fewer than two points.
pub fn min_pair_distance(xyz: &[Point3<f64>]) -> Option<f64> {
    let n = xyz.len();
    let mut best: Option<f64> = None;

    for i in 0..n {
        for j in (i + 1)..n {
            let d = nalgebra::distance(&xyz[i], &xyz[j]);
            best = Some(best.map_or(d, |b| b.min(d)));
        }
    }
    best
}

/// Multiplies every coordinate by `scale` in place.
pub fn scale_in_place(xyz: &mut [Point3<f64>], scale: f64) {
    for p in xyz.iter_mut() {
        p.coords *= scale;
    }
}
