//! Correctness oracle.
//!
//! Compares an observed value against an independently computed expected
//! value and fails fatally on mismatch. A correctness failure aborts the
//! invocation and is never retried: it is the only error condition expected
//! during steady-state benchmarking and signals a defect either in the
//! harness or in the store client under test.

use crate::error::{BenchError, BenchResult};

/// Exact integer equality, used by the increment and bulk-load scenarios.
pub fn check_exact(scenario: &str, expected: i64, actual: i64) -> BenchResult<()> {
    if expected != actual {
        return Err(BenchError::Correctness {
            scenario: scenario.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Per-key round-trip equality, used by the sample scenario. The key is the
/// expected value, so a mismatch message carries both.
pub fn check_round_trip(scenario: &str, expected: i64, actual: i64) -> BenchResult<()> {
    check_exact(scenario, expected, actual)
}

/// Structural stability for geo scenarios: no independently computed expected
/// value exists, so the first observed result-set cardinality is latched and
/// every later observation — in either execution mode — must equal it.
#[derive(Debug, Default)]
pub struct CardinalityWatch {
    expected: Option<usize>,
}

impl CardinalityWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, scenario: &str, cardinality: usize) -> BenchResult<()> {
        match self.expected {
            None => {
                self.expected = Some(cardinality);
                Ok(())
            }
            Some(expected) if expected == cardinality => Ok(()),
            Some(expected) => Err(BenchError::Correctness {
                scenario: scenario.to_string(),
                expected: expected.to_string(),
                actual: cardinality.to_string(),
            }),
        }
    }

    /// The latched cardinality, once one has been observed.
    pub fn latched(&self) -> Option<usize> {
        self.expected
    }
}
