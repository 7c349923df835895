// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use bb_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod buddy_request;
mod experienced_route;
mod inexperienced_route;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

// Updates and deletes of a single object must hit exactly one row
fn expect_single_row(count: usize) -> Result<()> {
    match count {
        0 => Err(repo::Error::NotFound),
        1 => Ok(()),
        _ => Err(anyhow!("Unexpected number of affected rows: {count}").into()),
    }
}

fn load_point(wkt: &str) -> Result<MapPoint> {
    MapPoint::from_wkt(wkt).map_err(|err| anyhow!("Invalid point '{wkt}': {err}").into())
}

fn load_line(wkt: &str) -> Result<LineString> {
    LineString::from_wkt(wkt).map_err(|err| anyhow!("Invalid route '{wkt}': {err}").into())
}

fn load_time_of_day(s: &str) -> Result<time::Time> {
    parse_time_of_day(s).map_err(|err| anyhow!(err).into())
}

fn load_date_time(s: &str) -> Result<time::OffsetDateTime> {
    parse_date_time(s).map_err(|err| anyhow!(err).into())
}

fn load_count(count: i64) -> u32 {
    u32::try_from(count).unwrap_or_else(|_| {
        // This should never happen
        log::warn!("Invalid counter value: {count}");
        0
    })
}

fn read_only() -> repo::Error {
    anyhow!("Write access through a read-only connection").into()
}
