use molforge::core::domain::{Composition, GenerateConfig};
use molforge::core::error::GenerationError;
use molforge::core::spatial;
use molforge::engine::geometry::{draw_raw_coordinates, expand_elements, sample_geometry};

use crate::common::{assert_pairwise_at_least, seeded, SWEEP};

mod common;

#[test]
fn test_expand_elements_in_index_order() {
    let comp = Composition::from_counts(&[(7, 1), (0, 2), (5, 3)]);
    assert_eq!(expand_elements(&comp), vec![0, 0, 5, 5, 5, 7]);
    assert!(expand_elements(&Composition::new()).is_empty());
}

#[test]
fn test_raw_coordinate_boxes() {
    let ati = vec![0, 0, 0, 5, 7, 25];
    for seed in 0..SWEEP {
        let xyz = draw_raw_coordinates(&ati, &mut seeded(seed));
        assert_eq!(xyz.len(), ati.len());
        for (elem, p) in ati.iter().zip(xyz.iter()) {
            let w = if *elem == 0 { 1.5 } else { 1.0 };
            assert!(p.coords.iter().all(|c| (-w..w).contains(c)), "{:?}", p);
        }
    }
}

#[test]
fn test_geometry_respects_threshold() {
    let comp = Composition::from_counts(&[(0, 6), (5, 4), (7, 2), (16, 1)]);
    let cfg = GenerateConfig::default();

    for seed in 0..SWEEP {
        let geom = sample_geometry(&comp, &cfg, &mut seeded(seed)).unwrap();
        assert_eq!(geom.xyz.len(), comp.total());
        assert_eq!(geom.ati, expand_elements(&comp));
        assert!(geom.scale >= cfg.init_coord_scaling);
        assert_pairwise_at_least(&geom.xyz, cfg.dist_threshold);
    }
}

#[test]
fn test_scale_grows_on_rejection() {
    // A tiny starting scale cannot fit 10 atoms 1.5 apart.
    let comp = Composition::from_counts(&[(5, 10)]);
    let cfg = GenerateConfig {
        init_coord_scaling: 0.1,
        dist_threshold: 1.5,
        increase_scaling_factor: 1.3,
        ..Default::default()
    };

    let geom = sample_geometry(&comp, &cfg, &mut seeded(11)).unwrap();
    assert!(geom.attempts > 1);
    let expected = 0.1 * 1.3f64.powi(geom.attempts as i32 - 1);
    assert!((geom.scale - expected).abs() < 1e-9 * expected);
    assert!(spatial::check_distances(&geom.xyz, 1.5));
}

#[test]
fn test_zero_threshold_accepts_first_draw() {
    let comp = Composition::from_counts(&[(0, 4), (5, 20)]);
    let cfg = GenerateConfig {
        dist_threshold: 0.0,
        ..Default::default()
    };

    for seed in 0..SWEEP {
        let geom = sample_geometry(&comp, &cfg, &mut seeded(seed)).unwrap();
        assert_eq!(geom.attempts, 1);
        assert_eq!(geom.scale, cfg.init_coord_scaling);
    }
}

#[test]
fn test_attempt_cap_is_fatal() {
    let comp = Composition::from_counts(&[(5, 2)]);
    let cfg = GenerateConfig {
        init_coord_scaling: 1.0,
        dist_threshold: 1.0e6,
        increase_scaling_factor: 1.01,
        max_geometry_attempts: 3,
        ..Default::default()
    };

    match sample_geometry(&comp, &cfg, &mut seeded(0)) {
        Err(GenerationError::GeometryNotConverged { attempts, scale }) => {
            assert_eq!(attempts, 3);
            assert!((scale - 1.01 * 1.01).abs() < 1e-12);
        }
        other => panic!("expected convergence failure, got {:?}", other),
    }
}

#[test]
fn test_seeded_geometry_is_reproducible() {
    let comp = Composition::from_counts(&[(0, 3), (6, 3)]);
    let cfg = GenerateConfig::default();

    let a = sample_geometry(&comp, &cfg, &mut seeded(99)).unwrap();
    let b = sample_geometry(&comp, &cfg, &mut seeded(99)).unwrap();
    assert_eq!(a.xyz, b.xyz);
    assert_eq!(a.ati, b.ati);
    assert_eq!(a.attempts, b.attempts);
}
