use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::core::chemistry::{self, MAX_GENERATED_ELEMENT, NUM_ELEMENTS};
use crate::core::domain::{ElementBounds, GenerateConfig};
use crate::core::error::{ConfigError, LoadError};

/// Reads a JSON configuration file and validates it.
pub fn load_config(path: &Path) -> Result<GenerateConfig, LoadError> {
    let cfg = read_config(path)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Reads a JSON configuration file without validating it, for callers that
/// still adjust fields before checking the result.
///
/// Missing fields take their defaults. `element_composition` keys are element
/// indices (`"0"` = H).
pub fn read_config(path: &Path) -> Result<GenerateConfig, LoadError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let cfg: GenerateConfig = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: display,
        source,
    })?;
    Ok(cfg)
}

fn parse_error(input: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Parse {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_atomic_number(token: &str) -> Result<usize, ConfigError> {
    let z: usize = token
        .parse()
        .map_err(|_| parse_error(token, "expected an atomic number"))?;
    if z == 0 || z > NUM_ELEMENTS {
        return Err(parse_error(token, format!("atomic number must be in 1..={}", NUM_ELEMENTS)));
    }
    Ok(z - 1)
}

/// Resolves an element symbol or 1-based atomic number to an element index.
pub fn parse_element(token: &str) -> Result<usize, ConfigError> {
    let token = token.trim();
    if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
        return parse_atomic_number(token);
    }
    chemistry::index_of_symbol(token).ok_or_else(|| parse_error(token, "unknown element symbol"))
}

/// Parses a comma-separated element list into element indices.
///
/// Entries are symbols (`Hg`), atomic numbers (`6`) or inclusive atomic-number
/// ranges (`57-71`); `*` as the upper end of a range means the heaviest
/// generatable element (`81-*`).
pub fn parse_element_list(input: &str) -> Result<BTreeSet<usize>, ConfigError> {
    let mut out = BTreeSet::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((lo, hi)) => {
                let lo = parse_atomic_number(lo.trim())?;
                let hi = match hi.trim() {
                    "*" => MAX_GENERATED_ELEMENT - 1,
                    other => parse_atomic_number(other)?,
                };
                if lo > hi {
                    return Err(parse_error(token, "range start is above its end"));
                }
                out.extend(lo..=hi);
            }
            None => {
                out.insert(parse_element(token)?);
            }
        }
    }
    Ok(out)
}

fn parse_count(side: &str, token: &str) -> Result<Option<usize>, ConfigError> {
    match side.trim() {
        "*" | "" => Ok(None),
        n => n
            .parse()
            .map(Some)
            .map_err(|_| parse_error(token, format!("'{}' is not a count", n))),
    }
}

/// Parses per-element bounds such as `C:1-3, H:2-2, O:*-4, N:2`.
///
/// `*` leaves that side unbounded; a single number pins the count exactly.
pub fn parse_composition(input: &str) -> Result<BTreeMap<usize, ElementBounds>, ConfigError> {
    let mut out = BTreeMap::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (elem, range) = token
            .split_once(':')
            .ok_or_else(|| parse_error(token, "expected <element>:<min>-<max>"))?;
        let elem = parse_element(elem)?;

        let bounds = match range.split_once('-') {
            Some((min, max)) => ElementBounds::new(parse_count(min, token)?, parse_count(max, token)?),
            None => match parse_count(range, token)? {
                Some(n) => ElementBounds::exactly(n),
                None => ElementBounds::default(),
            },
        };

        if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
            if min > max {
                return Err(ConfigError::InvertedBounds { element: elem, min, max });
            }
        }
        out.insert(elem, bounds);
    }
    Ok(out)
}

