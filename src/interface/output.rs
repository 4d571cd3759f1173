use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::chemistry;
use crate::core::domain::Molecule;
use crate::core::error::OutputError;

/// Renders a molecule in XYZ format.
///
/// The comment line carries the name and the total charge.
pub fn to_xyz(mol: &Molecule) -> String {
    let mut s = String::with_capacity(64 + mol.ati.len() * 48);

    // `fmt::Write` for String never fails.
    let _ = writeln!(s, "{}", mol.ati.len());
    let _ = writeln!(s, "{} charge={}", mol.name, mol.charge);
    for (elem, p) in mol.ati.iter().zip(mol.xyz.iter()) {
        let sym = chemistry::symbol(*elem).unwrap_or("X");
        let _ = writeln!(s, "{:<2} {:>18.10} {:>18.10} {:>18.10}", sym, p.x, p.y, p.z);
    }
    s
}

/// Creates `path` and writes `contents`; an existing file is an error, never overwritten.
fn write_new_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let io_err = |source: std::io::Error| match source.kind() {
        ErrorKind::AlreadyExists => OutputError::AlreadyExists {
            path: path.display().to_string(),
        },
        _ => OutputError::Io {
            path: path.display().to_string(),
            source,
        },
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(contents.as_bytes()).map_err(io_err)
}

/// Writes `<name>.xyz` and `<name>.CHRG` into `dir`, creating it if needed.
/// Fails with [`OutputError::AlreadyExists`] rather than replacing earlier output.
/// Returns the path of the XYZ file.
pub fn write_molecule(mol: &Molecule, dir: &Path) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let xyz_path = dir.join(format!("{}.xyz", mol.name));
    write_new_file(&xyz_path, &to_xyz(mol))?;
    write_new_file(&dir.join(format!("{}.CHRG", mol.name)), &format!("{}\n", mol.charge))?;
    Ok(xyz_path)
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    formula: String,
    num_atoms: usize,
    charge: i32,
    min_distance: Option<f64>,
}

/// Writes one CSV row per molecule: name, formula, atom count, charge, closest pair distance.
pub fn write_summary(path: &Path, molecules: &[Molecule]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for mol in molecules {
        wtr.serialize(SummaryRow {
            name: &mol.name,
            formula: mol.formula(),
            num_atoms: mol.num_atoms,
            charge: mol.charge,
            min_distance: mol.min_distance(),
        })?;
    }
    wtr.flush().map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
