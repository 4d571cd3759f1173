use std::collections::BTreeSet;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::chemistry::{self, HYDROGEN, MAX_GENERATED_ELEMENT, P_BLOCK_BOOST};
use crate::core::domain::{Composition, GenerateConfig};
use crate::core::error::{ConfigError, GenerationError};

/// Largest combined count allowed within one metal group before bounds are applied.
pub const METAL_LIMIT: usize = 3;

/// Number of p-block boost draws.
const P_BLOCK_ROUNDS: usize = 5;

/// Hydrogen backfill only looks at this many atoms when sizing the addition.
const BACKFILL_ATOM_CAP: usize = 10;
const BACKFILL_FACTOR: f64 = 1.2;

/// Samples a random element-count vector for one molecule.
///
/// The passes run in a fixed order and later passes may undo what earlier ones
/// established: in particular the element bounds are applied after the metal
/// limits and can push a metal group back above [`METAL_LIMIT`]. The final
/// total always lies within `[min_num_atoms, max_num_atoms]`.
pub fn sample_composition<R: Rng + ?Sized>(
    cfg: &GenerateConfig,
    rng: &mut R,
) -> Result<Composition, GenerationError> {
    cfg.validate()?;
    let valid = cfg.valid_elements();

    let mut comp = Composition::new();

    // 1. Seed a few random elements
    add_random_elements(&mut comp, &valid, rng)?;

    // 2. Cap metal abundance
    limit_group_abundance(&mut comp, &chemistry::group_one_two_metals(), METAL_LIMIT);
    limit_group_abundance(
        &mut comp,
        &chemistry::transition_and_rare_earth_metals(),
        METAL_LIMIT,
    );

    // 3. Organic backbone and hydrogens
    boost_p_block(&mut comp, &cfg.forbidden_elements, rng);
    backfill_hydrogen(&mut comp, &cfg.forbidden_elements, rng);

    // 4. User bounds, then the atom-count window
    apply_bounds(&mut comp, cfg);
    grow_to_min(&mut comp, cfg, &valid, rng)?;
    shrink_to_max(&mut comp, cfg, rng)?;

    debug!("Sampled composition {} ({} atoms)", comp.sum_formula(), comp.total());
    Ok(comp)
}

/// Runs 1 to 6 rounds, each adding 0 to 2 atoms of a random valid element.
pub fn add_random_elements<R: Rng + ?Sized>(
    comp: &mut Composition,
    valid: &[usize],
    rng: &mut R,
) -> Result<(), GenerationError> {
    let rounds = rng.gen_range(1..=6);
    for _ in 0..rounds {
        let elem = *valid.choose(rng).ok_or(ConfigError::NoValidElements)?;
        let n = rng.gen_range(0..=2);
        debug!("Adding {} x element {}", n, elem);
        comp[elem] += n;
    }
    Ok(())
}

/// Reduces the combined count of `group` to at most `limit`.
///
/// The group is scanned in order, taking one atom from every populated
/// element per sweep, so the first-listed elements lose atoms first.
pub fn limit_group_abundance(comp: &mut Composition, group: &[usize], limit: usize) {
    let mut n = comp.group_total(group);
    if n > limit {
        debug!("Reducing metal group from {} to {} atoms", n, limit);
    }

    while n > limit {
        for &elem in group {
            if comp[elem] > 0 {
                comp[elem] -= 1;
                n -= 1;
            }
            if n <= limit {
                break;
            }
        }
    }
}

/// Adds 0 to 2 atoms of a random element between B and F, five times.
/// Forbidden picks are drawn but not added.
pub fn boost_p_block<R: Rng + ?Sized>(
    comp: &mut Composition,
    forbidden: &BTreeSet<usize>,
    rng: &mut R,
) {
    for _ in 0..P_BLOCK_ROUNDS {
        let elem = rng.gen_range(P_BLOCK_BOOST);
        let n = rng.gen_range(0..=2);
        if !forbidden.contains(&elem) {
            comp[elem] += n;
        }
    }
}

/// If no hydrogen is present, adds `1 + floor(u * min(total, 10) * 1.2)` of it,
/// with `u` uniform in `[0, 1)`. Returns the number of hydrogens added.
pub fn backfill_hydrogen<R: Rng + ?Sized>(
    comp: &mut Composition,
    forbidden: &BTreeSet<usize>,
    rng: &mut R,
) -> usize {
    if comp[HYDROGEN] != 0 {
        return 0;
    }

    let min_nat = comp.total().min(BACKFILL_ATOM_CAP);
    let u: f64 = rng.gen();
    if forbidden.contains(&HYDROGEN) {
        return 0;
    }

    let added = 1 + (u * min_nat as f64 * BACKFILL_FACTOR) as usize;
    debug!("Adding {} hydrogen atoms", added);
    comp[HYDROGEN] += added;
    added
}

/// Clamps each bounded element into its `[min, max]` window.
///
/// Clamps are independent per element and may exceed the metal limits.
pub fn apply_bounds(comp: &mut Composition, cfg: &GenerateConfig) {
    for (&elem, bounds) in &cfg.element_composition {
        match (bounds.min, bounds.max) {
            (Some(min), _) if comp[elem] < min => {
                debug!("Raising element {} to its minimum {}", elem, min);
                comp[elem] = min;
            }
            (_, Some(max)) if comp[elem] > max => {
                debug!("Lowering element {} to its maximum {}", elem, max);
                comp[elem] = max;
            }
            _ => {}
        }
    }
}

/// Adds single atoms of random valid elements until `min_num_atoms` is reached.
/// Picks already at their configured maximum are skipped; fails after
/// `max_composition_iterations` skips in a row.
pub fn grow_to_min<R: Rng + ?Sized>(
    comp: &mut Composition,
    cfg: &GenerateConfig,
    valid: &[usize],
    rng: &mut R,
) -> Result<(), GenerationError> {
    let mut total = comp.total();
    let mut misses = 0;

    while total < cfg.min_num_atoms {
        let elem = *valid.choose(rng).ok_or(ConfigError::NoValidElements)?;
        if cfg.max_count(elem).is_some_and(|max| comp[elem] >= max) {
            misses += 1;
            if misses >= cfg.max_composition_iterations {
                return Err(GenerationError::CompositionNotConverged {
                    phase: "growing to min_num_atoms",
                    iterations: misses,
                });
            }
            continue;
        }
        misses = 0;
        comp[elem] += 1;
        total += 1;
    }
    Ok(())
}

/// Removes single atoms of random elements until `max_num_atoms` is respected.
/// Elements at or below their configured minimum are left alone; fails after
/// `max_composition_iterations` fruitless picks in a row.
pub fn shrink_to_max<R: Rng + ?Sized>(
    comp: &mut Composition,
    cfg: &GenerateConfig,
    rng: &mut R,
) -> Result<(), GenerationError> {
    let mut total = comp.total();
    let mut misses = 0;

    while total > cfg.max_num_atoms {
        let elem = rng.gen_range(0..MAX_GENERATED_ELEMENT);
        let removable = comp[elem] > 0 && cfg.min_count(elem).map_or(true, |min| comp[elem] > min);
        if !removable {
            misses += 1;
            if misses >= cfg.max_composition_iterations {
                return Err(GenerationError::CompositionNotConverged {
                    phase: "shrinking to max_num_atoms",
                    iterations: misses,
                });
            }
            continue;
        }
        misses = 0;
        comp[elem] -= 1;
        total -= 1;
    }
    Ok(())
}
