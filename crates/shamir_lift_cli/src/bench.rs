//! Scaling benchmark
//!
//! Plants a secret in random polynomials of growing degree, evaluates shares
//! and times exact reconstruction.

use anyhow::{bail, Context, Result};
use num_bigint::{BigInt, Sign};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use shamir_lift_core::interpolate::evaluate;
use shamir_lift_core::{reconstruct_secret, RecoverConfig, SharePoint};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct BenchResult {
    k: usize,
    total_ms: f64,
    elimination_ms: f64,
    substitution_ms: f64,
    row_swaps: usize,
    recovered: bool,
}

/// Run reconstruction benchmark for thresholds up to `max_k`
pub fn run_scaling_benchmark(max_k: usize, bits: usize, seed: u64, export: Option<PathBuf>) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             Shamir Lift - Reconstruction Benchmark           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Max threshold:     {}", max_k);
    println!("Coefficient bits:  {}", bits);
    println!("Seed:              {}", seed);
    println!();

    let thresholds: Vec<usize> = [2, 4, 8, 16, 32, 64, 128, 256]
        .into_iter()
        .filter(|&k| k <= max_k)
        .collect();
    if thresholds.is_empty() {
        bail!("--max-k must be at least 2");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut hasher = Sha256::new();
    let mut results = Vec::new();

    println!("┌─────────┬────────────┬────────────┬────────────┬──────────┬──────────┐");
    println!("│    k    │  Total(ms) │  Elim(ms)  │  Subst(ms) │  Swaps   │  Secret  │");
    println!("├─────────┼────────────┼────────────┼────────────┼──────────┼──────────┤");

    for &k in &thresholds {
        let (result, secret) = run_single(k, bits, &mut rng)?;
        hasher.update(secret.to_string().as_bytes());
        println!(
            "│ {:>7} │ {:>10.3} │ {:>10.3} │ {:>10.3} │ {:>8} │ {:>8} │",
            result.k,
            result.total_ms,
            result.elimination_ms,
            result.substitution_ms,
            result.row_swaps,
            if result.recovered { "✓" } else { "✗" }
        );
        results.push(result);
    }

    println!("└─────────┴────────────┴────────────┴────────────┴──────────┴──────────┘");
    println!();
    println!("Result hash: {:x}", hasher.finalize());

    if let Some(path) = export {
        export_results(&path, &results)?;
        println!("\nResults exported to: {}", path.display());
    }

    if results.iter().any(|r| !r.recovered) {
        bail!("at least one planted secret was not recovered");
    }
    Ok(())
}

fn run_single(k: usize, bits: usize, rng: &mut StdRng) -> Result<(BenchResult, BigInt)> {
    let coeffs: Vec<BigInt> = (0..k).map(|_| random_bigint(rng, bits)).collect();
    let planted = coeffs[k - 1].clone();

    // Consecutive x values from a random start, possibly crossing zero
    let start: i64 = rng.gen_range(-(k as i64)..=k as i64);
    let points: Vec<SharePoint> = (0..k as i64)
        .map(|i| {
            let x = BigInt::from(start + i);
            let y = evaluate(&coeffs, &x);
            SharePoint { x, y }
        })
        .collect();

    let timer = Instant::now();
    let reconstruction = reconstruct_secret(&points, k, &RecoverConfig::default())
        .with_context(|| format!("reconstruction failed for k = {}", k))?;
    let total_ms = timer.elapsed().as_secs_f64() * 1000.0;

    debug!(k, swaps = reconstruction.stats.row_swaps, "benchmark round complete");

    let recovered = reconstruction.secret == planted && reconstruction.is_exact();
    let result = BenchResult {
        k,
        total_ms,
        elimination_ms: reconstruction.stats.elimination_time * 1000.0,
        substitution_ms: reconstruction.stats.substitution_time * 1000.0,
        row_swaps: reconstruction.stats.row_swaps,
        recovered,
    };
    Ok((result, reconstruction.secret))
}

fn random_bigint(rng: &mut StdRng, bits: usize) -> BigInt {
    let words = bits.div_ceil(32).max(1);
    let mut digits: Vec<u32> = (0..words).map(|_| rng.gen()).collect();
    let spare = words * 32 - bits.max(1);
    if let Some(top) = digits.last_mut() {
        *top >>= spare;
    }
    let sign = if rng.gen_bool(0.5) { Sign::Minus } else { Sign::Plus };
    BigInt::from_slice(sign, &digits)
}

fn export_results(path: &PathBuf, results: &[BenchResult]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "k,total_ms,elimination_ms,substitution_ms,row_swaps,recovered")?;
    for r in results {
        writeln!(
            file,
            "{},{:.6},{:.6},{:.6},{},{}",
            r.k, r.total_ms, r.elimination_ms, r.substitution_ms, r.row_swaps, r.recovered
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Signed;

    #[test]
    fn test_random_bigint_bit_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        for bits in [1usize, 31, 32, 33, 256] {
            for _ in 0..20 {
                let v = random_bigint(&mut rng, bits);
                assert!(v.abs().bits() <= bits as u64);
            }
        }
    }

    #[test]
    fn test_single_round_recovers() {
        let mut rng = StdRng::seed_from_u64(9);
        for k in [1, 2, 5, 12] {
            let (result, _) = run_single(k, 128, &mut rng).unwrap();
            assert!(result.recovered);
        }
    }
}
