use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::domain::{GenerateConfig, Molecule};
use crate::core::error::GenerationError;
use crate::engine::assembler::generate_with_retries;

/// Seeded RNG for the `index`-th molecule of a batch.
///
/// All molecules share the key derived from `seed` and differ by ChaCha
/// stream, so batches with neighbouring seeds do not reuse each other's draws.
pub fn molecule_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Generates `count` molecules in parallel on the current rayon pool.
///
/// Every molecule owns its RNG (see [`molecule_rng`]), so the output for a given
/// seed does not depend on the number of threads. Results are in index order,
/// and each name gets the batch index appended so names are unique in a batch.
pub fn generate_batch(
    cfg: &GenerateConfig,
    count: usize,
    seed: u64,
    max_attempts: usize,
) -> Vec<Result<Molecule, GenerationError>> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = molecule_rng(seed, i);
            generate_with_retries(cfg, &mut rng, max_attempts).map(|mut mol| {
                mol.name = format!("{}_{}", mol.name, i);
                mol
            })
        })
        .collect()
}
