//! Random molecule generation.
//!
//! A molecule is built in two stages: [`engine::composition`] samples how many
//! atoms of each element to use, then [`engine::geometry`] places them in 3D so
//! that no two atoms are closer than a threshold. [`engine::assembler`] ties the
//! stages together and adds a charge and a name.

pub mod core;
pub mod engine;
pub mod interface;

pub use crate::core::domain::{Composition, ElementBounds, GenerateConfig, Molecule};
pub use crate::core::error::{ConfigError, GenerationError};
pub use crate::engine::assembler::{generate_molecule, generate_with_retries};
