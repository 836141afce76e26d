//! Workload generation.
//!
//! Sequence production is pure with respect to its inputs except where
//! explicitly unseeded: the increment sequence comes from a fixed-seed LCG so
//! its running sum is a known constant, while the sample sequence draws from
//! an unseeded source per invocation — callers must not assume
//! reproducibility for that shape.

use rand::Rng;

use crate::client::{GeoPoint, GeoUnit, RadiusFlags, RadiusQuery};

/// Logical operations per increment invocation.
pub const INCR_BATCH: usize = 500;
/// Seed for the increment delta sequence.
pub const INCR_SEED: u64 = 12345;
/// Deltas are drawn uniformly in [0, INCR_BOUND).
pub const INCR_BOUND: u64 = 50;
/// Radius queries per geo invocation.
pub const GEO_QUERY_BATCH: usize = 500;
/// Keys written by the bulk-load shape and sampled by the sample shape.
pub const BULK_MAX: usize = 100_000;

/// The fixed two-point dataset seeded before geo scenarios run.
pub const GEO_DATASET: [GeoPoint; 2] = [
    GeoPoint {
        member: "Palermo",
        longitude: 13.361389,
        latitude: 38.115556,
    },
    GeoPoint {
        member: "Catania",
        longitude: 15.087269,
        latitude: 37.502669,
    },
];

/// The fixed-parameter radius query issued by geo scenarios: center (15, 37),
/// 200 km, all result fields requested.
pub const GEO_QUERY: RadiusQuery = RadiusQuery {
    longitude: 15.0,
    latitude: 37.0,
    radius: 200.0,
    unit: GeoUnit::Kilometers,
    flags: RadiusFlags::ALL,
};

/// Fast LCG used for the deterministic increment sequence.
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x5DEECE66D,
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Returns a value in [0, bound).
    #[inline]
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// A deterministic delta sequence together with its expected running sum.
pub struct IncrementBatch {
    pub deltas: Vec<i64>,
    pub expected_total: i64,
}

/// Draw `count` deltas in [0, INCR_BOUND) from a fresh LCG seeded with
/// `seed`. The same seed always yields the same sequence and total.
pub fn increment_deltas(seed: u64, count: usize) -> IncrementBatch {
    let mut rng = SeededRng::new(seed);
    let mut deltas = Vec::with_capacity(count);
    let mut expected_total = 0i64;
    for _ in 0..count {
        let delta = rng.next_bounded(INCR_BOUND) as i64;
        expected_total += delta;
        deltas.push(delta);
    }
    IncrementBatch {
        deltas,
        expected_total,
    }
}

/// Integer keys 0..max-1 in ascending order, each paired with itself as the
/// value to store.
pub fn bulk_pairs(max: usize) -> impl Iterator<Item = (String, String)> {
    (0..max).map(|i| {
        let text = i.to_string();
        (text.clone(), text)
    })
}

/// `count` lookup indices drawn uniformly in [0, max-1) from an unseeded
/// source. Intentionally non-deterministic; correctness for this shape is
/// checked by round-trip equality, never against a fixed expected sequence.
pub fn sample_indices(max: usize, count: usize) -> impl Iterator<Item = usize> {
    let mut rng = rand::rng();
    (0..count).map(move |_| rng.random_range(0..max - 1))
}
