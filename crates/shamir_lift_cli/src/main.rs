//! Shamir Lift CLI
//!
//! Exact secret reconstruction from threshold shares.
//!
//! # Usage
//! ```bash
//! # Recover the secret from a share descriptor
//! shamir-lift recover shares.json
//!
//! # Refuse to truncate a non-integral constant term
//! shamir-lift recover shares.json --strict
//!
//! # Decode a single base-encoded share value
//! shamir-lift decode 1a --base 16
//!
//! # Reconstruction scaling benchmark
//! shamir-lift bench --max-k 64 --export results.csv
//! ```

mod bench;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use shamir_lift_core::{radix, IntegralityPolicy, RecoverConfig, ShareSet};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shamir-lift")]
#[command(about = "Exact secret reconstruction from threshold shares")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the secret from a JSON share descriptor
    Recover {
        /// Path to the share descriptor
        input: PathBuf,

        /// Fail instead of truncating a non-integral constant term
        #[arg(long)]
        strict: bool,

        /// Skip substituting the solution back into the system
        #[arg(long)]
        no_verify: bool,
    },

    /// Decode a base-encoded value to decimal
    Decode {
        /// Digit string (0-9, a-z; case-insensitive)
        value: String,

        /// Radix between 2 and 36
        #[arg(long, short)]
        base: u32,
    },

    /// Benchmark reconstruction over random polynomials
    Bench {
        /// Largest threshold to benchmark
        #[arg(long, default_value = "64")]
        max_k: usize,

        /// Bit size of random coefficients
        #[arg(long, default_value = "256")]
        bits: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Export results to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Recover {
            input,
            strict,
            no_verify,
        } => run_recover(input, strict, !no_verify),
        Commands::Decode { value, base } => run_decode(&value, base),
        Commands::Bench {
            max_k,
            bits,
            seed,
            export,
        } => bench::run_scaling_benchmark(max_k, bits, seed, export),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_recover(input: PathBuf, strict: bool, verify: bool) -> Result<()> {
    let set = ShareSet::load(&input).with_context(|| format!("failed to load {}", input.display()))?;
    info!(n = set.n, k = set.k, shares = set.shares.len(), "loaded share descriptor");

    let config = RecoverConfig {
        integrality: if strict {
            IntegralityPolicy::Strict
        } else {
            IntegralityPolicy::Truncate
        },
        verify,
    };

    let reconstruction = set.recover(&config).context("secret reconstruction failed")?;

    let used: Vec<String> = reconstruction.points.iter().map(|p| p.x.to_string()).collect();
    info!(x = %used.join(","), "shares used");
    info!(
        swaps = reconstruction.stats.row_swaps,
        eliminated = reconstruction.stats.eliminated_rows,
        verified = reconstruction.verified,
        ms = reconstruction.stats.total_time * 1000.0,
        "solved {}x{} system",
        reconstruction.threshold(),
        reconstruction.threshold() + 1
    );
    info!(constant_term = %reconstruction.constant_term, "exact constant term");

    if !reconstruction.is_exact() {
        warn!(
            constant_term = %reconstruction.constant_term,
            "constant term is not an integer; reporting truncated value (shares may be inconsistent)"
        );
    }

    println!("c=\"{}\"", reconstruction.secret);
    Ok(())
}

fn run_decode(value: &str, base: u32) -> Result<()> {
    let decoded = radix::decode(value, base).with_context(|| format!("cannot decode \"{}\"", value))?;
    println!("{}", decoded);
    Ok(())
}
