//! Shared test utilities: an in-memory store double implementing both store
//! traits so scenarios run hermetically, plus fault-injection toggles for
//! the oracle and lifecycle tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use geokv_benchmarks::client::{
    BlockingStore, GeoMatch, GeoPoint, GeoUnit, RadiusQuery, SuspendingStore,
};
use geokv_benchmarks::error::{BenchError, BenchResult};

// Same mean earth radius the server's geo commands use.
const EARTH_RADIUS_M: f64 = 6_372_797.560856;

struct StoredPoint {
    member: String,
    longitude: f64,
    latitude: f64,
}

/// In-memory stand-in for the store. Handle release is observable through a
/// counter bumped exactly once, when the store is dropped.
pub struct MemoryStore {
    strings: HashMap<String, String>,
    geo: HashMap<String, Vec<StoredPoint>>,
    corrupt_increments: bool,
    fail_geo_add: bool,
    released: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            strings: HashMap::new(),
            geo: HashMap::new(),
            corrupt_increments: false,
            fail_geo_add: false,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Injects a store defect: every increment applies delta + 1, so the
    /// counter oracle must trip.
    pub fn corrupt_increments(mut self) -> Self {
        self.corrupt_increments = true;
        self
    }

    /// Makes geo_add fail, simulating a setup failure mid-seeding.
    pub fn failing_geo_add(mut self) -> Self {
        self.fail_geo_add = true;
        self
    }

    /// Counter observing handle release; reads 1 once the store is dropped.
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.released)
    }

    fn do_increment(&mut self, key: &str, delta: i64) -> BenchResult<()> {
        let applied = if self.corrupt_increments { delta + 1 } else { delta };
        let slot = self.strings.entry(key.to_string()).or_insert_with(|| "0".to_string());
        let current: i64 = slot.parse().map_err(|_| BenchError::BadValue {
            key: key.to_string(),
            raw: slot.clone(),
        })?;
        *slot = (current + applied).to_string();
        Ok(())
    }

    fn do_delete(&mut self, key: &str) {
        self.strings.remove(key);
        self.geo.remove(key);
    }

    fn do_geo_add(&mut self, key: &str, point: &GeoPoint) -> BenchResult<()> {
        if self.fail_geo_add {
            return Err(BenchError::Store(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "injected geo_add failure",
            ))));
        }
        let members = self.geo.entry(key.to_string()).or_default();
        members.retain(|p| p.member != point.member);
        members.push(StoredPoint {
            member: point.member.to_string(),
            longitude: point.longitude,
            latitude: point.latitude,
        });
        Ok(())
    }

    fn do_geo_radius(&self, key: &str, query: &RadiusQuery) -> Vec<GeoMatch> {
        let radius_m = to_meters(query.radius, query.unit);
        let unit_factor = to_meters(1.0, query.unit);

        self.geo
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|p| {
                        let dist_m = haversine_m(
                            query.longitude,
                            query.latitude,
                            p.longitude,
                            p.latitude,
                        );
                        if dist_m > radius_m {
                            return None;
                        }
                        Some(GeoMatch {
                            member: p.member.clone(),
                            coordinates: query
                                .flags
                                .coordinates
                                .then_some((p.longitude, p.latitude)),
                            distance: query.flags.distance.then_some(dist_m / unit_factor),
                            geohash: query
                                .flags
                                .geohash
                                .then(|| synthetic_hash(p.longitude, p.latitude)),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl BlockingStore for MemoryStore {
    fn increment(&mut self, key: &str, delta: i64, _fire_and_forget: bool) -> BenchResult<()> {
        self.do_increment(key, delta)
    }

    fn get_string(&mut self, key: &str) -> BenchResult<Option<String>> {
        Ok(self.strings.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()> {
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str, _fire_and_forget: bool) -> BenchResult<()> {
        self.do_delete(key);
        Ok(())
    }

    fn geo_add(&mut self, key: &str, point: &GeoPoint) -> BenchResult<()> {
        self.do_geo_add(key, point)
    }

    fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>> {
        Ok(self.do_geo_radius(key, query))
    }
}

#[async_trait]
impl SuspendingStore for MemoryStore {
    async fn increment(&mut self, key: &str, delta: i64, _fire_and_forget: bool) -> BenchResult<()> {
        self.do_increment(key, delta)
    }

    async fn get_string(&mut self, key: &str) -> BenchResult<Option<String>> {
        Ok(self.strings.get(key).cloned())
    }

    async fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()> {
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&mut self, key: &str, _fire_and_forget: bool) -> BenchResult<()> {
        self.do_delete(key);
        Ok(())
    }

    async fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>> {
        Ok(self.do_geo_radius(key, query))
    }
}

fn to_meters(value: f64, unit: GeoUnit) -> f64 {
    match unit {
        GeoUnit::Meters => value,
        GeoUnit::Kilometers => value * 1000.0,
        GeoUnit::Miles => value * 1609.34,
        GeoUnit::Feet => value * 0.3048,
    }
}

fn haversine_m(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();
    let u = ((lat2r - lat1r) / 2.0).sin();
    let v = ((lon2 - lon1).to_radians() / 2.0).sin();
    2.0 * EARTH_RADIUS_M * (u * u + lat1r.cos() * lat2r.cos() * v * v).sqrt().asin()
}

/// Stand-in for the server's 52-bit cell id; deterministic per position.
fn synthetic_hash(longitude: f64, latitude: f64) -> i64 {
    let lon_bits = (longitude * 100_000.0) as i64;
    let lat_bits = (latitude * 100_000.0) as i64 & 0xFFFF_FFFF;
    (lon_bits << 32) | lat_bits
}
