//! Wire format of bikebuddy.
//!
//! Coordinates are `[lat, lng]` pairs in degrees, times of day are
//! `HH:MM[:SS]` and date-times are RFC 3339 strings. Incoming records are
//! loosely typed: every field is optional and validated by the core.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

pub type Coordinates = [f64; 2];

///////////////////////////////////////////////////////////////////////
// Incoming records
///////////////////////////////////////////////////////////////////////

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id     : Option<String>,
    pub name   : Option<String>,
    pub email  : Option<String>,
    pub bio    : Option<String>,
    pub photo  : Option<String>,
    pub notify : Option<bool>,
}

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewExperiencedRoute {
    pub owner            : Option<String>,
    pub route            : Option<Vec<Vec<f64>>>,
    pub departure_time   : Option<String>,
    pub arrival_time     : Option<String>,
    pub days             : Option<Vec<String>>,
    pub start_point_name : Option<String>,
    pub end_point_name   : Option<String>,
    pub name             : Option<String>,
}

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewInexperiencedRoute {
    pub owner            : Option<String>,
    pub start_point      : Option<Vec<f64>>,
    pub start_point_name : Option<String>,
    pub end_point        : Option<Vec<f64>>,
    pub end_point_name   : Option<String>,
    #[serde(rename = "arrivalDateTime")]
    pub arrival_datetime : Option<String>,
    pub radius           : Option<f64>,
    pub notify_owner     : Option<bool>,
    pub reusable         : Option<bool>,
    pub name             : Option<String>,
}

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewBuddyRequest {
    pub experienced_route   : Option<String>,
    pub inexperienced_route : Option<String>,
    pub meeting_point       : Option<Vec<f64>>,
    pub meeting_point_name  : Option<String>,
    pub meeting_time        : Option<String>,
    pub divorce_point       : Option<Vec<f64>>,
    pub divorce_point_name  : Option<String>,
    pub divorce_time        : Option<String>,
    pub route               : Option<Vec<Vec<f64>>>,
    pub length              : Option<f64>,
}

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct BuddyRequestPatch {
    pub meeting_time       : Option<String>,
    pub divorce_time       : Option<String>,
    pub meeting_point      : Option<Vec<f64>>,
    pub meeting_point_name : Option<String>,
    pub divorce_point      : Option<Vec<f64>>,
    pub divorce_point_name : Option<String>,
    pub reason             : Option<String>,
    pub length             : Option<f64>,
    pub review             : Option<i64>,
}

#[rustfmt::skip]
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub start_point : Option<Vec<f64>>,
    pub end_point   : Option<Vec<f64>>,
    pub radius      : Option<f64>,
    #[serde(rename = "arrivalDateTime")]
    pub arrival     : Option<String>,
}

/// Users and routes for setting up a database.
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase", default)]
pub struct Seed {
    pub users: Vec<NewUser>,
    pub experienced_routes: Vec<NewExperiencedRoute>,
    pub inexperienced_routes: Vec<NewInexperiencedRoute>,
}

///////////////////////////////////////////////////////////////////////
// Outgoing views
///////////////////////////////////////////////////////////////////////

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id           : String,
    pub name         : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email        : Option<String>,
    pub bio          : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo        : Option<String>,
    /// RFC 3339
    pub joined       : String,
    pub distance     : f64,
    pub helped_count : u32,
    pub users_helped : u32,
    pub rating       : f64,
    pub notify       : bool,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id           : String,
    pub name         : String,
    pub bio          : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo        : Option<String>,
    pub joined       : String,
    pub distance     : f64,
    pub helped_count : u32,
    pub users_helped : u32,
    pub rating       : f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct ExperiencedRoute {
    pub id               : String,
    pub owner            : String,
    pub route            : Vec<Coordinates>,
    pub departure_time   : String,
    pub arrival_time     : String,
    pub days             : Vec<String>,
    pub start_point_name : String,
    pub end_point_name   : String,
    pub name             : String,
    /// Meters
    pub length           : f64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct InexperiencedRoute {
    pub id               : String,
    pub owner            : String,
    pub start_point      : Coordinates,
    pub start_point_name : String,
    pub end_point        : Coordinates,
    pub end_point_name   : String,
    #[serde(rename = "arrivalDateTime")]
    pub arrival_datetime : String,
    pub radius           : f64,
    pub notify_owner     : bool,
    pub reusable         : bool,
    pub name             : String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct BuddyRequest {
    pub id                       : String,
    pub owner                    : String,
    pub experienced_user         : String,
    pub experienced_route        : String,
    pub experienced_route_name   : String,
    pub inexperienced_route      : String,
    pub inexperienced_route_name : String,
    pub meeting_point            : Coordinates,
    pub meeting_point_name       : String,
    pub meeting_time             : String,
    pub divorce_point            : Coordinates,
    pub divorce_point_name       : String,
    pub divorce_time             : String,
    pub route                    : Vec<Coordinates>,
    pub length                   : f64,
    /// km/h
    pub average_speed            : f64,
    pub reason                   : String,
    pub review                   : i64,
    pub status                   : String,
    pub created                  : String,
    pub updated                  : String,
}

/// A part of an experienced route that can be ridden together.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    pub experienced_route       : String,
    pub experienced_route_name  : String,
    pub owner                   : PublicProfile,
    pub meeting_point           : Coordinates,
    pub meeting_time            : String,
    pub divorce_point           : Coordinates,
    pub divorce_time            : String,
    pub route                   : Vec<Coordinates>,
    pub length                  : f64,
    pub average_speed           : f64,
    /// Seconds
    pub time_to_meeting_point   : i64,
    /// Seconds
    pub time_from_divorce_point : i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub users: usize,
    pub experienced_routes: usize,
    pub inexperienced_routes: usize,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// HTTP status code
    pub status: u16,
    pub message: String,
}
