use std::collections::BTreeSet;
use std::fs;

use molforge::core::domain::{ElementBounds, GenerateConfig};
use molforge::core::error::{ConfigError, LoadError, OutputError};
use molforge::engine::assembler::generate_molecule;
use molforge::interface::config::{
    load_config, parse_composition, parse_element, parse_element_list, read_config,
};
use molforge::interface::output::{to_xyz, write_molecule, write_summary};

use crate::common::{seeded, window};

mod common;

#[test]
fn test_parse_element() {
    assert_eq!(parse_element("C"), Ok(5));
    assert_eq!(parse_element(" 26 "), Ok(25));
    assert!(parse_element("0").is_err());
    assert!(parse_element("103").is_err());
    assert!(parse_element("Qq").is_err());
}

#[test]
fn test_parse_element_list_mixed() {
    let set = parse_element_list("57-59, Hg, 6").unwrap();
    let expected: BTreeSet<usize> = [5, 56, 57, 58, 79].into_iter().collect();
    assert_eq!(set, expected);
}

#[test]
fn test_parse_element_list_open_range() {
    let set = parse_element_list("81-*").unwrap();
    assert_eq!(set.iter().next(), Some(&80));
    assert_eq!(set.iter().last(), Some(&85));
    assert_eq!(set.len(), 6);
}

#[test]
fn test_parse_element_list_rejects_garbage() {
    assert!(parse_element_list("Xx").is_err());
    assert!(parse_element_list("10-5").is_err());
    assert!(parse_element_list("a-b").is_err());
    assert_eq!(parse_element_list(" , ").unwrap(), BTreeSet::new());
}

#[test]
fn test_parse_composition() {
    let map = parse_composition("C:1-3, H:2, O:*-4, 7:2-*").unwrap();
    assert_eq!(map[&5], ElementBounds::new(Some(1), Some(3)));
    assert_eq!(map[&0], ElementBounds::exactly(2));
    assert_eq!(map[&7], ElementBounds::new(None, Some(4)));
    assert_eq!(map[&6], ElementBounds::new(Some(2), None));
}

#[test]
fn test_parse_composition_errors() {
    assert_eq!(
        parse_composition("C:4-1").unwrap_err(),
        ConfigError::InvertedBounds { element: 5, min: 4, max: 1 }
    );
    assert!(parse_composition("C").is_err());
    assert!(parse_composition("C:x-2").is_err());
}

#[test]
fn test_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gen.json");
    fs::write(
        &path,
        r#"{
            "min_num_atoms": 3,
            "max_num_atoms": 12,
            "forbidden_elements": [79, 80],
            "element_composition": { "0": { "min": 2, "max": 2 }, "5": { "min": 1 } }
        }"#,
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.min_num_atoms, 3);
    assert_eq!(cfg.max_num_atoms, 12);
    assert!(cfg.forbidden_elements.contains(&79));
    assert_eq!(cfg.element_composition[&0], ElementBounds::exactly(2));
    assert_eq!(cfg.element_composition[&5], ElementBounds::new(Some(1), None));
    // Unspecified fields keep their defaults.
    assert_eq!(cfg.dist_threshold, GenerateConfig::default().dist_threshold);
}

#[test]
fn test_load_config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_config(&missing), Err(LoadError::Io { .. })));

    let malformed = dir.path().join("bad.json");
    fs::write(&malformed, "{ not json").unwrap();
    assert!(matches!(load_config(&malformed), Err(LoadError::Json { .. })));

    let invalid = dir.path().join("invalid.json");
    fs::write(&invalid, r#"{ "min_num_atoms": 9, "max_num_atoms": 2 }"#).unwrap();
    assert!(matches!(
        load_config(&invalid),
        Err(LoadError::Invalid(ConfigError::InvertedAtomRange { min: 9, max: 2 }))
    ));
}

#[test]
fn test_read_config_defers_validation_to_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "min_num_atoms": 9, "max_num_atoms": 2 }"#).unwrap();

    // The file alone is inconsistent, but a later override repairs it.
    let mut cfg = read_config(&path).unwrap();
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::InvertedAtomRange { min: 9, max: 2 })
    );
    cfg.max_num_atoms = 20;
    assert_eq!(cfg.validate(), Ok(()));

    let malformed = dir.path().join("bad.json");
    fs::write(&malformed, "[1, 2]").unwrap();
    assert!(matches!(read_config(&malformed), Err(LoadError::Json { .. })));
}

#[test]
fn test_xyz_format() {
    let mol = generate_molecule(&window(4, 8), &mut seeded(7)).unwrap();
    let xyz = to_xyz(&mol);
    let lines: Vec<&str> = xyz.lines().collect();

    assert_eq!(lines.len(), mol.num_atoms + 2);
    assert_eq!(lines[0], mol.num_atoms.to_string());
    assert_eq!(lines[1], format!("{} charge={}", mol.name, mol.charge));

    let first: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(first.len(), 4);
    let x: f64 = first[1].parse().unwrap();
    assert!((x - mol.xyz[0].x).abs() < 1e-9);
}

#[test]
fn test_write_molecule_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mols");
    let cfg = window(3, 10);

    let mols: Vec<_> = (0..3)
        .map(|s| generate_molecule(&cfg, &mut seeded(s)).unwrap())
        .collect();
    for mol in &mols {
        let path = write_molecule(mol, &out).unwrap();
        assert!(path.exists());
        let chrg = fs::read_to_string(out.join(format!("{}.CHRG", mol.name))).unwrap();
        assert_eq!(chrg.trim(), mol.charge.to_string());
    }

    let summary = dir.path().join("summary.csv");
    write_summary(&summary, &mols).unwrap();

    let mut rdr = csv::Reader::from_path(&summary).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["name", "formula", "num_atoms", "charge", "min_distance"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], mols[0].name.as_str());
    assert_eq!(rows[0][2].parse::<usize>().unwrap(), mols[0].num_atoms);
}

#[test]
fn test_write_molecule_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = window(3, 10);
    let first = generate_molecule(&cfg, &mut seeded(1)).unwrap();
    let mut second = generate_molecule(&cfg, &mut seeded(2)).unwrap();
    second.name = first.name.clone();

    let path = write_molecule(&first, dir.path()).unwrap();
    let err = write_molecule(&second, dir.path()).unwrap_err();
    assert!(matches!(err, OutputError::AlreadyExists { .. }));

    // The first molecule's file is left intact.
    assert_eq!(fs::read_to_string(&path).unwrap(), to_xyz(&first));
}
