use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Index, IndexMut};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::core::chemistry::{self, MAX_GENERATED_ELEMENT, NUM_ELEMENTS};
use crate::core::error::ConfigError;
use crate::core::spatial;

// --- Composition ---

/// Dense per-element atom counts, one slot per element index (0 = H).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    counts: Vec<usize>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// An empty composition with all [`NUM_ELEMENTS`] slots at zero.
    pub fn new() -> Self {
        Self {
            counts: vec![0; NUM_ELEMENTS],
        }
    }

    /// Builds a composition from `(element, count)` pairs. Indices outside the
    /// table are ignored.
    pub fn from_counts(pairs: &[(usize, usize)]) -> Self {
        let mut c = Self::new();
        for &(elem, count) in pairs {
            if elem < NUM_ELEMENTS {
                c.counts[elem] += count;
            }
        }
        c
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of atoms.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Sum of counts over the given element indices.
    pub fn group_total(&self, group: &[usize]) -> usize {
        group.iter().map(|&i| self.counts[i]).sum()
    }

    /// Iterates `(element, count)` over non-zero slots in increasing element order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, &n)| (i, n))
    }

    /// Sum formula in increasing atomic number, counts of one omitted (e.g. `H2CO`).
    pub fn sum_formula(&self) -> String {
        let mut formula = String::new();
        for (elem, count) in self.iter_nonzero() {
            formula.push_str(chemistry::symbol(elem).unwrap_or("X"));
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        }
        formula
    }
}

impl Index<usize> for Composition {
    type Output = usize;

    fn index(&self, elem: usize) -> &usize {
        &self.counts[elem]
    }
}

impl IndexMut<usize> for Composition {
    fn index_mut(&mut self, elem: usize) -> &mut usize {
        &mut self.counts[elem]
    }
}

// --- Configuration Types ---

/// Optional lower/upper count for one element. Either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ElementBounds {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Pins the element to exactly `n` atoms.
    pub fn exactly(n: usize) -> Self {
        Self::new(Some(n), Some(n))
    }
}

/// Options consumed by the samplers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub forbidden_elements: BTreeSet<usize>,
    pub element_composition: BTreeMap<usize, ElementBounds>,
    pub min_num_atoms: usize,
    pub max_num_atoms: usize,
    pub init_coord_scaling: f64,
    pub dist_threshold: f64,
    pub increase_scaling_factor: f64,

    // Iteration caps for the rejection loops
    pub max_composition_iterations: usize,
    pub max_geometry_attempts: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            forbidden_elements: BTreeSet::new(),
            element_composition: BTreeMap::new(),
            min_num_atoms: 2,
            max_num_atoms: 100,
            init_coord_scaling: 3.0,
            dist_threshold: 1.2,
            increase_scaling_factor: 1.3,
            max_composition_iterations: 100_000,
            max_geometry_attempts: 500,
        }
    }
}

impl GenerateConfig {
    /// Generatable element indices minus the forbidden ones, ascending.
    pub fn valid_elements(&self) -> Vec<usize> {
        (0..MAX_GENERATED_ELEMENT)
            .filter(|e| !self.forbidden_elements.contains(e))
            .collect()
    }

    pub fn min_count(&self, elem: usize) -> Option<usize> {
        self.element_composition.get(&elem).and_then(|b| b.min)
    }

    pub fn max_count(&self, elem: usize) -> Option<usize> {
        self.element_composition.get(&elem).and_then(|b| b.max)
    }

    /// Checks every precondition the sampling loops rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&bad) = self.forbidden_elements.iter().find(|&&e| e >= NUM_ELEMENTS) {
            return Err(ConfigError::ElementOutOfRange(bad));
        }
        for (&elem, bounds) in &self.element_composition {
            if elem >= NUM_ELEMENTS {
                return Err(ConfigError::ElementOutOfRange(elem));
            }
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min > max {
                    return Err(ConfigError::InvertedBounds { element: elem, min, max });
                }
            }
        }

        if self.min_num_atoms == 0 {
            return Err(ConfigError::ZeroMinAtoms);
        }
        if self.min_num_atoms > self.max_num_atoms {
            return Err(ConfigError::InvertedAtomRange {
                min: self.min_num_atoms,
                max: self.max_num_atoms,
            });
        }

        let valid = self.valid_elements();
        if valid.is_empty() {
            return Err(ConfigError::NoValidElements);
        }

        // Shrinking can never go below the pinned minimums.
        let required: usize = self
            .element_composition
            .values()
            .filter_map(|b| b.min)
            .sum();
        if required > self.max_num_atoms {
            return Err(ConfigError::MinimumsExceedMaxAtoms {
                required,
                max: self.max_num_atoms,
            });
        }

        // Growing can never go above the capped maximums when every valid element is capped.
        if valid.iter().all(|&e| self.max_count(e).is_some()) {
            let capped: usize = valid.iter().filter_map(|&e| self.max_count(e)).sum();
            let pinned: usize = self
                .element_composition
                .iter()
                .filter(|(e, _)| !valid.contains(e))
                .filter_map(|(_, b)| b.min)
                .sum();
            let available = capped + pinned;
            if available < self.min_num_atoms {
                return Err(ConfigError::MaximumsBelowMinAtoms {
                    available,
                    min: self.min_num_atoms,
                });
            }
        }

        if self.max_composition_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap("max_composition_iterations"));
        }

        self.validate_geometry()
    }

    /// Checks the options the geometry sampler reads.
    pub fn validate_geometry(&self) -> Result<(), ConfigError> {
        check_positive("init_coord_scaling", self.init_coord_scaling)?;
        if !self.dist_threshold.is_finite() || self.dist_threshold < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dist_threshold",
                rule: "finite and non-negative",
                value: self.dist_threshold,
            });
        }
        if !self.increase_scaling_factor.is_finite() || self.increase_scaling_factor <= 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "increase_scaling_factor",
                rule: "finite and greater than 1",
                value: self.increase_scaling_factor,
            });
        }

        if self.max_geometry_attempts == 0 {
            return Err(ConfigError::ZeroIterationCap("max_geometry_attempts"));
        }

        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            rule: "finite and positive",
            value,
        })
    }
}

// --- The Core Entity ---

/// A generated molecule: composition plus aligned element/coordinate lists.
#[derive(Debug, Clone, Serialize)]
pub struct Molecule {
    pub name: String,
    pub num_atoms: usize,
    pub charge: i32,
    pub composition: Composition,
    /// Positions, aligned with `ati`.
    pub xyz: Vec<Point3<f64>>,
    /// Element index of each atom.
    pub ati: Vec<usize>,
}

impl Molecule {
    pub fn formula(&self) -> String {
        self.composition.sum_formula()
    }

    /// Smallest interatomic distance, `None` for fewer than two atoms.
    pub fn min_distance(&self) -> Option<f64> {
        spatial::min_pair_distance(&self.xyz)
    }
}
