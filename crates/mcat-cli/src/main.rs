use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "mcat")]
#[command(about = "Module catalog reconciler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold every snapshot in the data dir into the combined catalog.
    Rebuild {
        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<PathBuf>,

        /// Snapshot directory (overrides snapshots.dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Catalog output path (default: <data-dir>/<catalog.output_file>)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Scrub personal data from snapshot files (and the catalog) in place.
    Clean {
        #[arg(long = "config")]
        config_paths: Vec<PathBuf>,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Which modules a given intake can take in a given year of study.
    Available {
        /// Combined catalog file
        #[arg(long)]
        catalog: PathBuf,

        /// Calendar year the student started (e.g. 2025 for 2025/6)
        #[arg(long)]
        entry_year: i32,

        /// Year of study, 1-based
        #[arg(long)]
        study_year: u32,

        /// Curriculum rotation in years (overrides availability.cycle_length)
        #[arg(long)]
        cycle_length: Option<u32>,

        #[arg(long = "config")]
        config_paths: Vec<PathBuf>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> site -> local)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Rebuild {
            config_paths,
            data_dir,
            out,
        } => commands::rebuild::rebuild(&config_paths, data_dir, out),

        Commands::Clean {
            config_paths,
            data_dir,
        } => commands::clean::clean(&config_paths, data_dir),

        Commands::Available {
            catalog,
            entry_year,
            study_year,
            cycle_length,
            config_paths,
        } => commands::available::available(
            &config_paths,
            &catalog,
            entry_year,
            study_year,
            cycle_length,
        ),

        Commands::ConfigHash { paths } => {
            let loaded = commands::load_config(&paths)?;
            println!("config_hash={}", loaded.loaded.config_hash);
            println!("{}", loaded.loaded.canonical_json);
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries only `key=value` result lines.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
