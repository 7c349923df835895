//! # bb-core
//!
//! Business logic of bikebuddy: the storage port, entity validation,
//! route matching and the buddy request lifecycle.

pub mod db;
pub mod entities;
pub mod repositories;
pub mod usecases;
pub mod util;
