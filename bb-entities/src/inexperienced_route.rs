use time::OffsetDateTime;

use crate::{geo::MapPoint, id::*};

/// A one-off journey for which the owner is looking for company.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct InexperiencedRoute {
    pub id               : Id,
    pub owner            : Id,
    pub start_point      : MapPoint,
    pub start_point_name : String,
    pub end_point        : MapPoint,
    pub end_point_name   : String,
    pub arrival_datetime : OffsetDateTime,
    /// Search radius in meters
    pub radius           : f64,
    pub notify_owner     : bool,
    /// If not set the route is expected to be consumed by a single match
    pub reusable         : bool,
    pub name             : String,
    pub deleted          : bool,
}
