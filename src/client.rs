//! Store client seam.
//!
//! The store is an external collaborator; the engine only depends on the two
//! traits below. `BlockingStore` issues a command and returns once the reply
//! is in; `SuspendingStore` is the same contract with a suspension point at
//! each call boundary. Both process calls strictly one at a time — no
//! pipelining, no second outstanding call.
//!
//! `RedisStore` is the production implementation: one client, a plain
//! connection for the blocking form and a multiplexed connection for the
//! suspending form, both selecting the same logical database.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Connection, Value};

use crate::error::{BenchError, BenchResult};

/// A named geo member with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub member: &'static str,
    pub longitude: f64,
    pub latitude: f64,
}

/// Distance unit for radius queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl GeoUnit {
    pub fn as_arg(&self) -> &'static str {
        match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        }
    }
}

/// Which per-match fields a radius query should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadiusFlags {
    pub coordinates: bool,
    pub distance: bool,
    pub geohash: bool,
}

impl RadiusFlags {
    pub const ALL: RadiusFlags = RadiusFlags {
        coordinates: true,
        distance: true,
        geohash: true,
    };

    pub fn any(&self) -> bool {
        self.coordinates || self.distance || self.geohash
    }
}

/// A fixed-parameter radius query.
#[derive(Debug, Clone, Copy)]
pub struct RadiusQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
    pub unit: GeoUnit,
    pub flags: RadiusFlags,
}

/// One match returned by a radius query. Optional fields are populated
/// according to the flags the query requested.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    pub member: String,
    pub coordinates: Option<(f64, f64)>,
    pub distance: Option<f64>,
    pub geohash: Option<i64>,
}

/// Blocking store operations. Each call completes before the next begins.
pub trait BlockingStore {
    fn increment(&mut self, key: &str, delta: i64, fire_and_forget: bool) -> BenchResult<()>;
    fn get_string(&mut self, key: &str) -> BenchResult<Option<String>>;
    fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()>;
    fn delete(&mut self, key: &str, fire_and_forget: bool) -> BenchResult<()>;
    fn geo_add(&mut self, key: &str, point: &GeoPoint) -> BenchResult<()>;
    fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>>;
}

/// Suspending store operations. The calling flow suspends until each call's
/// result is available before issuing the next; results are numerically
/// identical to the blocking form for identical inputs.
#[async_trait]
pub trait SuspendingStore: Send {
    async fn increment(&mut self, key: &str, delta: i64, fire_and_forget: bool) -> BenchResult<()>;
    async fn get_string(&mut self, key: &str) -> BenchResult<Option<String>>;
    async fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()>;
    async fn delete(&mut self, key: &str, fire_and_forget: bool) -> BenchResult<()>;
    async fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>>;
}

/// Store handle backed by the `redis` crate.
///
/// Fire-and-forget maps to discarding the reply value without decoding it:
/// the wire protocol always delivers a reply, and not inspecting it is the
/// client-side analog of not waiting for the acknowledgment.
pub struct RedisStore {
    blocking: Connection,
    suspending: MultiplexedConnection,
}

impl RedisStore {
    /// Connect both forms of the handle to `url` (e.g.
    /// `redis://127.0.0.1:6379/3`; the path selects the logical database).
    pub async fn connect(url: &str) -> BenchResult<Self> {
        let client = redis::Client::open(url)?;
        let blocking = client.get_connection()?;
        let suspending = client.get_multiplexed_async_connection().await?;
        Ok(Self {
            blocking,
            suspending,
        })
    }
}

impl BlockingStore for RedisStore {
    fn increment(&mut self, key: &str, delta: i64, fire_and_forget: bool) -> BenchResult<()> {
        let mut cmd = redis::cmd("INCRBY");
        cmd.arg(key).arg(delta);
        if fire_and_forget {
            let _: Value = cmd.query(&mut self.blocking)?;
        } else {
            let _: i64 = cmd.query(&mut self.blocking)?;
        }
        Ok(())
    }

    fn get_string(&mut self, key: &str) -> BenchResult<Option<String>> {
        let value: Option<String> = redis::cmd("GET").arg(key).query(&mut self.blocking)?;
        Ok(value)
    }

    fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()> {
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query(&mut self.blocking)?;
        Ok(())
    }

    fn delete(&mut self, key: &str, fire_and_forget: bool) -> BenchResult<()> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        if fire_and_forget {
            let _: Value = cmd.query(&mut self.blocking)?;
        } else {
            let _: i64 = cmd.query(&mut self.blocking)?;
        }
        Ok(())
    }

    fn geo_add(&mut self, key: &str, point: &GeoPoint) -> BenchResult<()> {
        let _: i64 = redis::cmd("GEOADD")
            .arg(key)
            .arg(point.longitude)
            .arg(point.latitude)
            .arg(point.member)
            .query(&mut self.blocking)?;
        Ok(())
    }

    fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>> {
        let raw: Value = radius_cmd(key, query).query(&mut self.blocking)?;
        parse_radius_reply(raw, query.flags)
    }
}

#[async_trait]
impl SuspendingStore for RedisStore {
    async fn increment(&mut self, key: &str, delta: i64, fire_and_forget: bool) -> BenchResult<()> {
        let mut cmd = redis::cmd("INCRBY");
        cmd.arg(key).arg(delta);
        if fire_and_forget {
            let _: Value = cmd.query_async(&mut self.suspending).await?;
        } else {
            let _: i64 = cmd.query_async(&mut self.suspending).await?;
        }
        Ok(())
    }

    async fn get_string(&mut self, key: &str) -> BenchResult<Option<String>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.suspending)
            .await?;
        Ok(value)
    }

    async fn set_string(&mut self, key: &str, value: &str) -> BenchResult<()> {
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut self.suspending)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, key: &str, fire_and_forget: bool) -> BenchResult<()> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        if fire_and_forget {
            let _: Value = cmd.query_async(&mut self.suspending).await?;
        } else {
            let _: i64 = cmd.query_async(&mut self.suspending).await?;
        }
        Ok(())
    }

    async fn geo_radius(&mut self, key: &str, query: &RadiusQuery) -> BenchResult<Vec<GeoMatch>> {
        let raw: Value = radius_cmd(key, query)
            .query_async(&mut self.suspending)
            .await?;
        parse_radius_reply(raw, query.flags)
    }
}

/// Build the GEORADIUS command by hand so the geohash flag is honored
/// alongside coordinates and distance.
fn radius_cmd(key: &str, query: &RadiusQuery) -> redis::Cmd {
    let mut cmd = redis::cmd("GEORADIUS");
    cmd.arg(key)
        .arg(query.longitude)
        .arg(query.latitude)
        .arg(query.radius)
        .arg(query.unit.as_arg());
    if query.flags.coordinates {
        cmd.arg("WITHCOORD");
    }
    if query.flags.distance {
        cmd.arg("WITHDIST");
    }
    if query.flags.geohash {
        cmd.arg("WITHHASH");
    }
    cmd
}

/// Decode a GEORADIUS reply. With no flags each item is a bare member name;
/// with flags each item is an array of [member, distance?, hash?, coords?]
/// in that order, present according to what was requested.
fn parse_radius_reply(raw: Value, flags: RadiusFlags) -> BenchResult<Vec<GeoMatch>> {
    let items: Vec<Value> = redis::from_redis_value(&raw)?;
    let mut matches = Vec::with_capacity(items.len());

    for item in items {
        if !flags.any() {
            let member: String = redis::from_redis_value(&item)?;
            matches.push(GeoMatch {
                member,
                coordinates: None,
                distance: None,
                geohash: None,
            });
            continue;
        }

        let parts: Vec<Value> = redis::from_redis_value(&item)?;
        let mut parts = parts.into_iter();
        let member: String = redis::from_redis_value(&next_part(&mut parts)?)?;
        let distance = if flags.distance {
            Some(redis::from_redis_value(&next_part(&mut parts)?)?)
        } else {
            None
        };
        let geohash = if flags.geohash {
            Some(redis::from_redis_value(&next_part(&mut parts)?)?)
        } else {
            None
        };
        let coordinates = if flags.coordinates {
            let coord: (f64, f64) = redis::from_redis_value(&next_part(&mut parts)?)?;
            Some(coord)
        } else {
            None
        };

        matches.push(GeoMatch {
            member,
            coordinates,
            distance,
            geohash,
        });
    }

    Ok(matches)
}

fn next_part(parts: &mut impl Iterator<Item = Value>) -> BenchResult<Value> {
    parts.next().ok_or_else(|| {
        BenchError::Store(redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "truncated GEORADIUS reply",
        )))
    })
}
