#![allow(dead_code)]

use molforge::core::domain::GenerateConfig;
use nalgebra::Point3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Number of seeds swept by the property tests.
pub const SWEEP: u64 = 200;

pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A default config with a custom atom-count window.
pub fn window(min: usize, max: usize) -> GenerateConfig {
    GenerateConfig {
        min_num_atoms: min,
        max_num_atoms: max,
        ..Default::default()
    }
}

pub fn assert_pairwise_at_least(xyz: &[Point3<f64>], threshold: f64) {
    for i in 0..xyz.len() {
        for j in (i + 1)..xyz.len() {
            let d = (xyz[i] - xyz[j]).norm();
            assert!(
                d >= threshold,
                "atoms {} and {} are {:.4} apart (threshold {})",
                i,
                j,
                d,
                threshold
            );
        }
    }
}
