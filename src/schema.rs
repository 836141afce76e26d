//! Shared benchmark result types.
//!
//! Baseline and candidate runs both produce JSON files matching these types
//! so `bench-compare` can place them side by side.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level benchmark report written to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Metadata about this run (variant, hardware, git, timestamp).
    pub metadata: RunMetadata,
    /// Individual benchmark results.
    pub results: Vec<BenchmarkResult>,
}

/// Metadata captured at the start of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// ISO 8601 timestamp of the run start.
    pub timestamp: String,
    /// Which client build this run exercised ("baseline" or "candidate").
    pub variant: String,
    /// Short git commit hash (omitted if not in a git repo).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    /// Git branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// Whether the working tree had uncommitted changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    /// Harness crate version.
    pub harness_version: String,
    /// Hardware information.
    pub hardware: HardwareInfo,
}

/// Hardware information for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    /// CPU model string.
    pub cpu: String,
    /// Number of logical cores.
    pub cores: usize,
    /// Total RAM in GB.
    pub ram_gb: u64,
    /// Operating system.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
}

/// A single benchmark measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name (e.g. "incr/blocking/candidate").
    pub benchmark: String,
    /// Category (e.g. "throughput").
    pub category: String,
    /// Benchmark-specific parameters.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Measured metrics.
    pub metrics: BenchmarkMetrics,
}

/// Metrics collected from a benchmark measurement.
///
/// All fields are optional so the same shape covers throughput runs with and
/// without the memory diagnoser. Fields that don't apply are omitted from
/// JSON output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Logical operations per second, after applying the scenario's
    /// ops-per-invocation multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops_per_sec: Option<f64>,
    /// How many logical operations one invocation represents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops_per_invocation: Option<u64>,
    /// Measured invocations (excluding warmup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocations: Option<u64>,
    /// Per-invocation wall-clock percentiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ns: Option<u64>,
    /// Allocation statistics per logical operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_allocated_per_op: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocs_per_op: Option<f64>,
}
