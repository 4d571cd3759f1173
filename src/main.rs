use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{error, info};
use tracing_subscriber::filter::LevelFilter;

use molforge::core::domain::GenerateConfig;
use molforge::engine::batch::generate_batch;
use molforge::interface::config::{parse_composition, parse_element_list, read_config};
use molforge::interface::output::{write_molecule, write_summary};

// --- CLI Definitions ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate random molecules with a minimum interatomic distance", long_about = None)]
struct Args {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of molecules to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    molecules: usize,

    /// Seed for reproducible output (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Directory receiving the .xyz and .CHRG files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Minimum number of atoms per molecule
    #[arg(long)]
    min_atoms: Option<usize>,

    /// Maximum number of atoms per molecule
    #[arg(long)]
    max_atoms: Option<usize>,

    /// Elements never to generate, e.g. "57-71, 81-*, Hg"
    #[arg(long)]
    forbidden: Option<String>,

    /// Per-element count bounds, e.g. "C:1-3, H:2-2, O:*-4"
    #[arg(long)]
    composition: Option<String>,

    /// Minimum distance between any two atoms
    #[arg(long)]
    dist_threshold: Option<f64>,

    /// Generation attempts per molecule before giving up
    #[arg(long, default_value_t = 200)]
    max_attempts: usize,

    /// Optional CSV summary of all generated molecules
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    quiet: bool,
}

// --- Initialization Helpers ---

fn setup_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // The tracing-log bridge forwards the library's `log` records.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

fn build_config(args: &Args) -> Result<GenerateConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => GenerateConfig::default(),
    };

    if let Some(n) = args.min_atoms {
        cfg.min_num_atoms = n;
    }
    if let Some(n) = args.max_atoms {
        cfg.max_num_atoms = n;
    }
    if let Some(list) = &args.forbidden {
        cfg.forbidden_elements = parse_element_list(list).context("Invalid --forbidden")?;
    }
    if let Some(bounds) = &args.composition {
        cfg.element_composition = parse_composition(bounds).context("Invalid --composition")?;
    }
    if let Some(d) = args.dist_threshold {
        cfg.dist_threshold = d;
    }

    // Checked once, after the command line has had its say.
    cfg.validate().context("Invalid configuration")?;
    Ok(cfg)
}

// --- Main ---

fn main() -> Result<()> {
    // 1. Parsing
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet)?;

    // 2. Configuration
    let cfg = build_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating {} molecule(s) with seed {}", args.molecules, seed);

    // 3. Parallel generation
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build_global()
        .context("Failed to start worker pool")?;

    let results = generate_batch(&cfg, args.molecules, seed, args.max_attempts);

    // 4. Output
    let mut molecules = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (i, res) in results.into_iter().enumerate() {
        match res {
            Ok(mol) => {
                let path = write_molecule(&mol, &args.output)
                    .with_context(|| format!("Failed to write molecule {}", mol.name))?;
                println!("{}", path.display());
                molecules.push(mol);
            }
            Err(e) => {
                error!("Molecule {} failed: {}", i, e);
                failures += 1;
            }
        }
    }

    if let Some(path) = &args.summary {
        write_summary(path, &molecules)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }

    if failures > 0 {
        bail!("{} of {} molecule(s) could not be generated", failures, args.molecules);
    }
    Ok(())
}
