//! Operation execution.
//!
//! Each batch shape comes in a blocking and a suspending form with identical
//! semantics: operations are issued strictly in order, one at a time, and the
//! two forms produce numerically identical results for deterministic inputs.
//! The suspending form suspends at each call boundary and resumes before
//! issuing the next call — no overlap, no pipelining.

use crate::client::{BlockingStore, GeoMatch, RadiusQuery, SuspendingStore};
use crate::error::{BenchError, BenchResult};
use crate::oracle;

/// Apply each delta as a fire-and-forget increment against `key`, then read
/// the key back once and return its integer value.
pub fn increment_batch<S: BlockingStore>(
    store: &mut S,
    key: &str,
    deltas: &[i64],
) -> BenchResult<i64> {
    for &delta in deltas {
        store.increment(key, delta, true)?;
    }
    let raw = store.get_string(key)?;
    parse_counter(key, raw)
}

/// Suspending form of [`increment_batch`].
pub async fn increment_batch_suspending<S: SuspendingStore>(
    store: &mut S,
    key: &str,
    deltas: &[i64],
) -> BenchResult<i64> {
    for &delta in deltas {
        store.increment(key, delta, true).await?;
    }
    let raw = store.get_string(key).await?;
    parse_counter(key, raw)
}

/// Issue the radius query `count` times, returning the cardinality of each
/// result set in issue order.
pub fn geo_query_batch<S: BlockingStore>(
    store: &mut S,
    key: &str,
    query: &RadiusQuery,
    count: usize,
) -> BenchResult<Vec<usize>> {
    let mut cardinalities = Vec::with_capacity(count);
    for _ in 0..count {
        let matches: Vec<GeoMatch> = store.geo_radius(key, query)?;
        cardinalities.push(matches.len());
    }
    Ok(cardinalities)
}

/// Suspending form of [`geo_query_batch`].
pub async fn geo_query_batch_suspending<S: SuspendingStore>(
    store: &mut S,
    key: &str,
    query: &RadiusQuery,
    count: usize,
) -> BenchResult<Vec<usize>> {
    let mut cardinalities = Vec::with_capacity(count);
    for _ in 0..count {
        let matches: Vec<GeoMatch> = store.geo_radius(key, query).await?;
        cardinalities.push(matches.len());
    }
    Ok(cardinalities)
}

/// Write every (key, value) pair individually, returning the number written.
pub fn bulk_set_batch<S: BlockingStore>(
    store: &mut S,
    pairs: impl Iterator<Item = (String, String)>,
) -> BenchResult<usize> {
    let mut written = 0;
    for (key, value) in pairs {
        store.set_string(&key, &value)?;
        written += 1;
    }
    Ok(written)
}

/// Suspending form of [`bulk_set_batch`].
pub async fn bulk_set_batch_suspending<S: SuspendingStore>(
    store: &mut S,
    pairs: impl Iterator<Item = (String, String)>,
) -> BenchResult<usize> {
    let mut written = 0;
    for (key, value) in pairs {
        store.set_string(&key, &value).await?;
        written += 1;
    }
    Ok(written)
}

/// Read the key for each lookup index and check round-trip equality as each
/// value arrives. The expected/actual pair is transient; accumulating it
/// across a 100k-lookup batch would distort the memory measurement.
pub fn sample_batch<S: BlockingStore>(
    store: &mut S,
    scenario: &str,
    lookups: impl Iterator<Item = usize>,
) -> BenchResult<usize> {
    let mut read = 0;
    for index in lookups {
        let key = index.to_string();
        let raw = store.get_string(&key)?;
        let actual = parse_counter(&key, raw)?;
        oracle::check_round_trip(scenario, index as i64, actual)?;
        read += 1;
    }
    Ok(read)
}

/// Suspending form of [`sample_batch`].
pub async fn sample_batch_suspending<S: SuspendingStore>(
    store: &mut S,
    scenario: &str,
    lookups: impl Iterator<Item = usize>,
) -> BenchResult<usize> {
    let mut read = 0;
    for index in lookups {
        let key = index.to_string();
        let raw = store.get_string(&key).await?;
        let actual = parse_counter(&key, raw)?;
        oracle::check_round_trip(scenario, index as i64, actual)?;
        read += 1;
    }
    Ok(read)
}

fn parse_counter(key: &str, raw: Option<String>) -> BenchResult<i64> {
    let raw = raw.ok_or_else(|| BenchError::BadValue {
        key: key.to_string(),
        raw: "<missing>".to_string(),
    })?;
    raw.trim().parse().map_err(|_| BenchError::BadValue {
        key: key.to_string(),
        raw,
    })
}
