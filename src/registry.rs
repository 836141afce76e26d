//! Explicit scenario registry.
//!
//! Maps a scenario identifier to its configuration record. The host pairs
//! each entry with a function reference when it wires up its dispatch table;
//! the registry itself stays free of store-type specifics so both the
//! production driver and the hermetic tests can consume it.

use crate::workload::{BULK_MAX, GEO_QUERY_BATCH, INCR_BATCH};

/// Scenario identifiers. One per shape and execution mode.
pub mod ids {
    pub const INCR_BLOCKING: &str = "incr/blocking";
    pub const INCR_SUSPENDING: &str = "incr/suspending";
    pub const GEO_BLOCKING: &str = "geo-radius/blocking";
    pub const GEO_SUSPENDING: &str = "geo-radius/suspending";
    pub const BULK_BLOCKING: &str = "bulk-load/blocking";
    pub const BULK_SUSPENDING: &str = "bulk-load/suspending";
    pub const SAMPLE_BLOCKING: &str = "sample/blocking";
    pub const SAMPLE_SUSPENDING: &str = "sample/suspending";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Blocking,
    Suspending,
}

impl ExecMode {
    pub fn label(&self) -> &'static str {
        match self {
            ExecMode::Blocking => "blocking",
            ExecMode::Suspending => "suspending",
        }
    }
}

/// Which build of the store client a run exercises. A reporting label only:
/// behavior never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Baseline,
    Candidate,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::Candidate => "candidate",
        }
    }

    /// Accepts the long names and the short v1/v2 forms.
    pub fn parse(text: &str) -> Option<Variant> {
        match text {
            "baseline" | "v1" => Some(Variant::Baseline),
            "candidate" | "v2" => Some(Variant::Candidate),
            _ => None,
        }
    }
}

/// Configuration record for one registered scenario entry point.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSpec {
    pub id: &'static str,
    /// Multiplier for per-operation throughput: how many logical operations
    /// one invocation represents.
    pub ops_per_invocation: u64,
    pub mode: ExecMode,
}

impl ScenarioSpec {
    /// Display name for reports, e.g. `incr/blocking/candidate`.
    pub fn display_name(&self, variant: Variant) -> String {
        format!("{}/{}", self.id, variant.label())
    }
}

pub const SCENARIOS: &[ScenarioSpec] = &[
    ScenarioSpec {
        id: ids::INCR_BLOCKING,
        ops_per_invocation: INCR_BATCH as u64,
        mode: ExecMode::Blocking,
    },
    ScenarioSpec {
        id: ids::INCR_SUSPENDING,
        ops_per_invocation: INCR_BATCH as u64,
        mode: ExecMode::Suspending,
    },
    ScenarioSpec {
        id: ids::GEO_BLOCKING,
        ops_per_invocation: GEO_QUERY_BATCH as u64,
        mode: ExecMode::Blocking,
    },
    ScenarioSpec {
        id: ids::GEO_SUSPENDING,
        ops_per_invocation: GEO_QUERY_BATCH as u64,
        mode: ExecMode::Suspending,
    },
    ScenarioSpec {
        id: ids::BULK_BLOCKING,
        ops_per_invocation: BULK_MAX as u64,
        mode: ExecMode::Blocking,
    },
    ScenarioSpec {
        id: ids::BULK_SUSPENDING,
        ops_per_invocation: BULK_MAX as u64,
        mode: ExecMode::Suspending,
    },
    ScenarioSpec {
        id: ids::SAMPLE_BLOCKING,
        ops_per_invocation: BULK_MAX as u64,
        mode: ExecMode::Blocking,
    },
    ScenarioSpec {
        id: ids::SAMPLE_SUSPENDING,
        ops_per_invocation: BULK_MAX as u64,
        mode: ExecMode::Suspending,
    },
];

pub fn find(id: &str) -> Option<&'static ScenarioSpec> {
    SCENARIOS.iter().find(|spec| spec.id == id)
}
