//! Static element tables.
//!
//! Every element is addressed by its index, i.e. atomic number minus one
//! (`0` = hydrogen). Only indices below [`MAX_GENERATED_ELEMENT`] are ever
//! produced by the samplers; the remaining slots exist so that composition
//! vectors can carry the full table.

/// Number of slots in a composition vector (H through No).
pub const NUM_ELEMENTS: usize = 102;

/// Exclusive upper bound of generatable element indices (up to Rn).
pub const MAX_GENERATED_ELEMENT: usize = 86;

/// Index of hydrogen.
pub const HYDROGEN: usize = 0;

/// Element indices boron through fluorine, used by the p-block boost.
pub const P_BLOCK_BOOST: std::ops::RangeInclusive<usize> = 4..=9;

const SYMBOLS: [&str; NUM_ELEMENTS] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No",
];

// --- Element Groups ---

/// The "alkali" group as it is historically tabulated for generation.
///
/// These indices sit one slot after the noble gases (and so are not the
/// textbook alkali metals); the values are kept as-is because the
/// abundance limits are calibrated against them.
pub fn alkali_metals() -> Vec<usize> {
    vec![2, 10, 18, 36, 54]
}

/// The "alkaline-earth" group, shifted the same way as [`alkali_metals`].
pub fn alkaline_earth_metals() -> Vec<usize> {
    vec![3, 11, 19, 37, 55]
}

pub fn three_d_metals() -> Vec<usize> {
    (20..30).collect()
}

pub fn four_d_metals() -> Vec<usize> {
    (38..48).collect()
}

pub fn five_d_metals() -> Vec<usize> {
    (71..80).collect()
}

pub fn lanthanides() -> Vec<usize> {
    (56..71).collect()
}

/// Alkali followed by alkaline-earth indices, in scan order.
pub fn group_one_two_metals() -> Vec<usize> {
    let mut group = alkali_metals();
    group.extend(alkaline_earth_metals());
    group
}

/// 3d, 4d, 5d metals and lanthanides, in scan order.
pub fn transition_and_rare_earth_metals() -> Vec<usize> {
    let mut group = three_d_metals();
    group.extend(four_d_metals());
    group.extend(five_d_metals());
    group.extend(lanthanides());
    group
}

// --- Symbols ---

/// Returns the chemical symbol for an element index, if it is in the table.
pub fn symbol(index: usize) -> Option<&'static str> {
    SYMBOLS.get(index).copied()
}

/// Looks up an element index by symbol (case-insensitive).
pub fn index_of_symbol(sym: &str) -> Option<usize> {
    let sym = sym.trim();
    SYMBOLS.iter().position(|s| s.eq_ignore_ascii_case(sym))
}
