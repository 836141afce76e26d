//! Benchmark comparison tool.
//!
//! Compares a baseline result file against a candidate result file and
//! prints a table of throughput deltas per scenario.
//!
//! Usage: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

use geokv_benchmarks::schema::{BenchmarkMetrics, BenchmarkReport, BenchmarkResult};
use std::collections::HashMap;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <baseline.json> <candidate.json>", args[0]);
        std::process::exit(1);
    }

    let baseline = load_report(&args[1]);
    let candidate = load_report(&args[2]);

    // Results are matched by scenario, not by full display name: the variant
    // suffix necessarily differs between the two files.
    let base_map: HashMap<String, &BenchmarkResult> = baseline
        .results
        .iter()
        .map(|r| (scenario_key(&r.benchmark, &baseline.metadata.variant), r))
        .collect();

    eprintln!(
        "Baseline:  {} ({}, {})",
        args[1], baseline.metadata.variant, baseline.metadata.timestamp
    );
    eprintln!(
        "Candidate: {} ({}, {})",
        args[2], candidate.metadata.variant, candidate.metadata.timestamp
    );
    eprintln!();

    println!(
        "{:<24} | {:>14} | {:>14} | {:>16} | {:>12}",
        "Scenario", "Base ops/s", "New ops/s", "Delta", "B/op delta"
    );
    println!("{}", "-".repeat(92));

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    for cand in &candidate.results {
        let key = scenario_key(&cand.benchmark, &candidate.metadata.variant);
        if let Some(base) = base_map.get(&key) {
            matched += 1;
            print_comparison(&key, &base.metrics, &cand.metrics);
        } else {
            only_cand += 1;
        }
    }

    let only_base = baseline.results.len() as u32 - matched;

    println!("{}", "-".repeat(92));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
}

fn load_report(path: &str) -> BenchmarkReport {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Strip the trailing variant label so "incr/blocking/baseline" and
/// "incr/blocking/candidate" compare as the same scenario.
fn scenario_key(benchmark: &str, variant: &str) -> String {
    benchmark
        .strip_suffix(&format!("/{}", variant))
        .unwrap_or(benchmark)
        .to_string()
}

fn print_comparison(name: &str, base: &BenchmarkMetrics, cand: &BenchmarkMetrics) {
    if let (Some(base_ops), Some(cand_ops)) = (base.ops_per_sec, cand.ops_per_sec) {
        let delta_pct = if base_ops > 0.0 {
            (cand_ops - base_ops) / base_ops * 100.0
        } else {
            0.0
        };
        let hint = if delta_pct > 1.0 {
            "faster"
        } else if delta_pct < -1.0 {
            "slower"
        } else {
            "~same"
        };

        let alloc_delta = match (base.bytes_allocated_per_op, cand.bytes_allocated_per_op) {
            (Some(b), Some(c)) => format!("{:+.1}", c - b),
            _ => "-".to_string(),
        };

        println!(
            "{:<24} | {:>14.0} | {:>14.0} | {:>+8.1}% ({}) | {:>12}",
            name, base_ops, cand_ops, delta_pct, hint, alloc_delta
        );
    } else if let (Some(base_p50), Some(cand_p50)) = (base.p50_ns, cand.p50_ns) {
        // Latency-only records: lower is better.
        let delta_pct = if base_p50 > 0 {
            (cand_p50 as f64 - base_p50 as f64) / base_p50 as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "{:<24} | {:>12}ns | {:>12}ns | {:>+8.1}%      | {:>12}",
            name, base_p50, cand_p50, delta_pct, "-"
        );
    }
}
