//! Scenario fixtures.
//!
//! A fixture owns its store handle for the scenario's lifetime: setup seeds
//! whatever state the shape needs, the run methods execute one invocation of
//! the workload in either mode, and teardown releases the handle. Release is
//! the handle's `Drop`, so it happens exactly once whether the run succeeded,
//! tripped the oracle, or failed during setup; `teardown(self)` only makes
//! the release point explicit for hosts that want one. Key names live on the
//! fixture, never in statics.

use crate::client::{BlockingStore, SuspendingStore};
use crate::error::BenchResult;
use crate::executor;
use crate::oracle::{self, CardinalityWatch};
use crate::registry::ids;
use crate::workload::{
    self, BULK_MAX, GEO_DATASET, GEO_QUERY, GEO_QUERY_BATCH, INCR_BATCH, INCR_SEED,
};

/// Fire-and-forget increments against one shared counter key, gated on the
/// final counter value matching the generated deltas' running sum.
pub struct CounterScenario<S> {
    store: S,
    key: String,
}

impl<S> CounterScenario<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn teardown(self) {
        drop(self);
    }
}

impl<S: BlockingStore> CounterScenario<S> {
    pub fn run_blocking(&mut self) -> BenchResult<i64> {
        let batch = workload::increment_deltas(INCR_SEED, INCR_BATCH);
        self.store.delete(&self.key, true)?;
        let actual = executor::increment_batch(&mut self.store, &self.key, &batch.deltas)?;
        oracle::check_exact(ids::INCR_BLOCKING, batch.expected_total, actual)?;
        Ok(actual)
    }
}

impl<S: SuspendingStore> CounterScenario<S> {
    pub async fn run_suspending(&mut self) -> BenchResult<i64> {
        let batch = workload::increment_deltas(INCR_SEED, INCR_BATCH);
        self.store.delete(&self.key, true).await?;
        let actual =
            executor::increment_batch_suspending(&mut self.store, &self.key, &batch.deltas).await?;
        oracle::check_exact(ids::INCR_SUSPENDING, batch.expected_total, actual)?;
        Ok(actual)
    }
}

/// Fixed-parameter radius queries against the two-point dataset. The dataset
/// is deleted and reseeded once at construction, never per invocation. No
/// independently computed expected value exists, so the oracle latches the
/// first observed cardinality and holds every later query — in either mode —
/// to it.
pub struct GeoScenario<S> {
    store: S,
    key: String,
    watch: CardinalityWatch,
}

impl<S: BlockingStore> GeoScenario<S> {
    pub fn new(mut store: S, key: impl Into<String>) -> BenchResult<Self> {
        let key = key.into();
        store.delete(&key, true)?;
        for point in &GEO_DATASET {
            store.geo_add(&key, point)?;
        }
        Ok(Self {
            store,
            key,
            watch: CardinalityWatch::new(),
        })
    }

    /// Returns the total match count across the batch.
    pub fn run_blocking(&mut self) -> BenchResult<usize> {
        let cardinalities =
            executor::geo_query_batch(&mut self.store, &self.key, &GEO_QUERY, GEO_QUERY_BATCH)?;
        let mut total = 0;
        for cardinality in cardinalities {
            self.watch.observe(ids::GEO_BLOCKING, cardinality)?;
            total += cardinality;
        }
        Ok(total)
    }
}

impl<S: SuspendingStore> GeoScenario<S> {
    pub async fn run_suspending(&mut self) -> BenchResult<usize> {
        let cardinalities = executor::geo_query_batch_suspending(
            &mut self.store,
            &self.key,
            &GEO_QUERY,
            GEO_QUERY_BATCH,
        )
        .await?;
        let mut total = 0;
        for cardinality in cardinalities {
            self.watch.observe(ids::GEO_SUSPENDING, cardinality)?;
            total += cardinality;
        }
        Ok(total)
    }
}

impl<S> GeoScenario<S> {
    pub fn teardown(self) {
        drop(self);
    }
}

/// Writes keys 0..max-1 individually, each key paired with itself as the
/// value. Read-back correctness for this dataset is exercised by the sample
/// scenario, which shares the keyspace.
pub struct BulkLoadScenario<S> {
    store: S,
    max: usize,
}

impl<S> BulkLoadScenario<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max: BULK_MAX,
        }
    }

    pub fn teardown(self) {
        drop(self);
    }
}

impl<S: BlockingStore> BulkLoadScenario<S> {
    pub fn run_blocking(&mut self) -> BenchResult<usize> {
        let written = executor::bulk_set_batch(&mut self.store, workload::bulk_pairs(self.max))?;
        oracle::check_exact(ids::BULK_BLOCKING, self.max as i64, written as i64)?;
        Ok(written)
    }
}

impl<S: SuspendingStore> BulkLoadScenario<S> {
    pub async fn run_suspending(&mut self) -> BenchResult<usize> {
        let written =
            executor::bulk_set_batch_suspending(&mut self.store, workload::bulk_pairs(self.max))
                .await?;
        oracle::check_exact(ids::BULK_SUSPENDING, self.max as i64, written as i64)?;
        Ok(written)
    }
}

/// Random lookups over the bulk keyspace. Setup seeds the full dataset so
/// the fixture is self-contained rather than order-dependent on the
/// bulk-load scenario. The lookup index sequence is intentionally unseeded;
/// each read is gated on round-trip equality as it arrives.
pub struct SampleScenario<S> {
    store: S,
    max: usize,
}

impl<S: BlockingStore> SampleScenario<S> {
    pub fn new(mut store: S) -> BenchResult<Self> {
        executor::bulk_set_batch(&mut store, workload::bulk_pairs(BULK_MAX))?;
        Ok(Self {
            store,
            max: BULK_MAX,
        })
    }

    pub fn run_blocking(&mut self) -> BenchResult<usize> {
        executor::sample_batch(
            &mut self.store,
            ids::SAMPLE_BLOCKING,
            workload::sample_indices(self.max, self.max),
        )
    }
}

impl<S: SuspendingStore> SampleScenario<S> {
    pub async fn run_suspending(&mut self) -> BenchResult<usize> {
        executor::sample_batch_suspending(
            &mut self.store,
            ids::SAMPLE_SUSPENDING,
            workload::sample_indices(self.max, self.max),
        )
        .await
    }
}

impl<S> SampleScenario<S> {
    pub fn teardown(self) {
        drop(self);
    }
}
