use log::debug;
use nalgebra::Point3;
use rand::Rng;

use crate::core::chemistry::HYDROGEN;
use crate::core::domain::{Composition, GenerateConfig};
use crate::core::error::GenerationError;
use crate::core::spatial;

/// Half-width of the raw sampling cube for hydrogen.
const HYDROGEN_HALF_WIDTH: f64 = 1.5;
/// Half-width of the raw sampling cube for every other element.
const HEAVY_HALF_WIDTH: f64 = 1.0;

/// Coordinates accepted by the distance check.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub xyz: Vec<Point3<f64>>,
    pub ati: Vec<usize>,
    /// Scale applied to the accepted draw.
    pub scale: f64,
    /// Number of draws, including the accepted one.
    pub attempts: usize,
}

/// Expands counts into one element index per atom, in increasing element order.
pub fn expand_elements(comp: &Composition) -> Vec<usize> {
    let mut ati = Vec::with_capacity(comp.total());
    for (elem, count) in comp.iter_nonzero() {
        ati.extend(std::iter::repeat(elem).take(count));
    }
    ati
}

/// Draws unscaled positions: hydrogen in `[-1.5, 1.5)^3`, everything else in `[-1, 1)^3`.
pub fn draw_raw_coordinates<R: Rng + ?Sized>(ati: &[usize], rng: &mut R) -> Vec<Point3<f64>> {
    ati.iter()
        .map(|&elem| {
            let w = if elem == HYDROGEN {
                HYDROGEN_HALF_WIDTH
            } else {
                HEAVY_HALF_WIDTH
            };
            Point3::new(
                rng.gen_range(-w..w),
                rng.gen_range(-w..w),
                rng.gen_range(-w..w),
            )
        })
        .collect()
}

/// Samples positions for `comp` such that no two atoms are closer than
/// `cfg.dist_threshold`.
///
/// Each rejected draw grows the scale by `cfg.increase_scaling_factor` and
/// redraws every atom. Gives up after `cfg.max_geometry_attempts` draws, or
/// once the scale is no longer finite.
pub fn sample_geometry<R: Rng + ?Sized>(
    comp: &Composition,
    cfg: &GenerateConfig,
    rng: &mut R,
) -> Result<Geometry, GenerationError> {
    cfg.validate_geometry()?;

    let ati = expand_elements(comp);
    let mut scale = cfg.init_coord_scaling;

    for attempt in 1..=cfg.max_geometry_attempts {
        let mut xyz = draw_raw_coordinates(&ati, rng);
        spatial::scale_in_place(&mut xyz, scale);

        if spatial::check_distances(&xyz, cfg.dist_threshold) {
            return Ok(Geometry {
                xyz,
                ati,
                scale,
                attempts: attempt,
            });
        }

        debug!(
            "Distance check failed at scale {:.3}. Increasing by {}...",
            scale, cfg.increase_scaling_factor
        );
        let next = scale * cfg.increase_scaling_factor;
        if attempt == cfg.max_geometry_attempts || !next.is_finite() {
            return Err(GenerationError::GeometryNotConverged {
                attempts: attempt,
                scale,
            });
        }
        scale = next;
    }

    // Only reachable with a zero attempt cap, which validation rejects.
    Err(GenerationError::GeometryNotConverged { attempts: 0, scale })
}
