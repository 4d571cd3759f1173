use thiserror::Error;

/// Configuration precondition violations, reported before any sampling loop runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no valid elements remain after removing the forbidden ones")]
    NoValidElements,

    #[error("element index {0} is outside the periodic table (0..102)")]
    ElementOutOfRange(usize),

    #[error("element {element}: minimum count {min} exceeds maximum count {max}")]
    InvertedBounds { element: usize, min: usize, max: usize },

    #[error("min_num_atoms must be at least 1")]
    ZeroMinAtoms,

    #[error("min_num_atoms ({min}) is larger than max_num_atoms ({max})")]
    InvertedAtomRange { min: usize, max: usize },

    #[error("configured minimum counts sum to {required}, above max_num_atoms ({max})")]
    MinimumsExceedMaxAtoms { required: usize, max: usize },

    #[error("configured maximum counts allow at most {available} atoms, below min_num_atoms ({min})")]
    MaximumsBelowMinAtoms { available: usize, min: usize },

    #[error("{name} must be {rule}, got {value}")]
    InvalidParameter {
        name: &'static str,
        rule: &'static str,
        value: f64,
    },

    #[error("{0} must be greater than zero")]
    ZeroIterationCap(&'static str),

    #[error("could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Failures of a single molecule generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{phase} stalled after {iterations} consecutive picks without progress")]
    CompositionNotConverged {
        phase: &'static str,
        iterations: usize,
    },

    #[error("no geometry satisfied the distance threshold after {attempts} attempts (scale {scale:.3e})")]
    GeometryNotConverged { attempts: usize, scale: f64 },
}

impl GenerationError {
    /// Whether a fresh attempt with new random draws can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::Config(_))
    }
}

/// Failures while writing generated molecules.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("refusing to overwrite existing file {path}")]
    AlreadyExists { path: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
