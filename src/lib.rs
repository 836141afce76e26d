//! Correctness-gated client benchmarks for a key-value/geo store.
//!
//! Measures operation throughput and memory behavior of two builds of the
//! store client ("baseline" and "candidate") across four workload shapes,
//! each runnable in a blocking and a suspending style. Every measurement is
//! gated by an embedded correctness oracle: a batch whose observed result
//! does not match the independently computed expected result is a failed
//! run, not a timing sample.
//!
//! The crate exposes the benchmark engine — workload generation, dual-mode
//! execution, oracle, fixtures — plus the scenario registry and result
//! schema. The measurement hosts live in `benches/`: a standalone
//! throughput driver and a criterion latency bench.

pub mod client;
pub mod error;
pub mod executor;
pub mod host;
pub mod oracle;
pub mod registry;
pub mod scenario;
pub mod schema;
pub mod workload;

pub use error::{BenchError, BenchResult};
