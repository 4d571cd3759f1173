use log::{debug, info, warn};
use rand::Rng;

use crate::core::domain::{GenerateConfig, Molecule};
use crate::core::error::GenerationError;
use crate::engine::charge;
use crate::engine::composition::sample_composition;
use crate::engine::geometry::sample_geometry;

/// Generates one random molecule: composition, then geometry, then charge and name.
///
/// Either every step succeeds or no molecule is returned.
pub fn generate_molecule<R: Rng + ?Sized>(
    cfg: &GenerateConfig,
    rng: &mut R,
) -> Result<Molecule, GenerationError> {
    let composition = sample_composition(cfg, rng)?;
    let geometry = sample_geometry(&composition, cfg, rng)?;
    debug!(
        "Geometry accepted after {} draw(s) at scale {:.3}",
        geometry.attempts, geometry.scale
    );

    let charge = charge::assign_random_charge(&geometry.ati, rng);
    let name = format!("{}_{:06x}", composition.sum_formula(), rng.gen_range(0..0x100_0000u32));

    Ok(Molecule {
        name,
        num_atoms: composition.total(),
        charge,
        composition,
        xyz: geometry.xyz,
        ati: geometry.ati,
    })
}

/// Calls [`generate_molecule`] up to `max_attempts` times.
///
/// Convergence failures are retried with fresh draws from the same `rng`;
/// configuration errors are returned straight away. The last error is
/// returned when every attempt fails.
pub fn generate_with_retries<R: Rng + ?Sized>(
    cfg: &GenerateConfig,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Molecule, GenerationError> {
    let mut last_err = None;

    for attempt in 1..=max_attempts.max(1) {
        match generate_molecule(cfg, rng) {
            Ok(mol) => {
                info!(
                    "Generated {} ({} atoms, charge {}) on attempt {}",
                    mol.name, mol.num_atoms, mol.charge, attempt
                );
                return Ok(mol);
            }
            Err(e) if e.is_retryable() => {
                warn!("Attempt {} failed: {}", attempt, e);
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or(GenerationError::GeometryNotConverged {
        attempts: 0,
        scale: cfg.init_coord_scaling,
    }))
}
