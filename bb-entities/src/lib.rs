#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # bb-entities
//!
//! Reusable, agnostic domain entities for bikebuddy.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod buddy_request;
pub mod experienced_route;
pub mod geo;
pub mod id;
pub mod inexperienced_route;
pub mod time;
pub mod user;
pub mod weekday;

#[cfg(any(test, feature = "builders"))]
pub mod builders;

/// Display name of a route that has not been given one explicitly.
pub fn derive_route_name(start_point_name: &str, end_point_name: &str) -> String {
    format!("{start_point_name} to {end_point_name}")
}
