// Low-level database access traits.
// Each repository is responsible for a single entity.
// Related entities are only referenced by their id and
// never modified or loaded by another repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn delete_user(&self, id: &str) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        match self.get_user(id) {
            Ok(user) => Ok(Some(user)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

pub trait ExperiencedRouteRepo {
    fn create_experienced_route(&self, route: &ExperiencedRoute) -> Result<()>;
    fn update_experienced_route(&self, route: &ExperiencedRoute) -> Result<()>;

    // Includes soft-deleted routes
    fn get_experienced_route(&self, id: &str) -> Result<ExperiencedRoute>;

    // Only routes that have not been deleted
    fn experienced_routes_of_owner(&self, owner: &str) -> Result<Vec<ExperiencedRoute>>;

    /// Marks all routes of the owner as deleted.
    fn delete_experienced_routes_of_owner(&self, owner: &str) -> Result<usize>;

    /// All routes that have not been deleted, are not owned by the
    /// requester and run on the given day.
    fn experienced_route_candidates(
        &self,
        requester: &str,
        day: Weekday,
    ) -> Result<Vec<ExperiencedRoute>>;
}

pub trait InexperiencedRouteRepo {
    fn create_inexperienced_route(&self, route: &InexperiencedRoute) -> Result<()>;
    fn update_inexperienced_route(&self, route: &InexperiencedRoute) -> Result<()>;

    // Includes soft-deleted routes
    fn get_inexperienced_route(&self, id: &str) -> Result<InexperiencedRoute>;

    // Only routes that have not been deleted
    fn inexperienced_routes_of_owner(&self, owner: &str) -> Result<Vec<InexperiencedRoute>>;

    /// Marks all routes of the owner as deleted.
    fn delete_inexperienced_routes_of_owner(&self, owner: &str) -> Result<usize>;
}

/// An entity that buddy requests refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuddyRequestReference<'a> {
    ExperiencedRoute(&'a str),
    InexperiencedRoute(&'a str),
    /// Either as owner or as experienced user
    User(&'a str),
}

pub trait BuddyRequestRepo {
    fn create_buddy_request(&self, request: &BuddyRequest) -> Result<()>;
    fn update_buddy_request(&self, request: &BuddyRequest) -> Result<()>;

    fn get_buddy_request(&self, id: &str) -> Result<BuddyRequest>;

    /// All requests in which the user takes part, most recently
    /// updated first.
    fn buddy_requests_of_user(&self, user: &str) -> Result<Vec<BuddyRequest>>;

    /// Only pending and accepted requests
    fn active_buddy_requests_referencing(
        &self,
        reference: BuddyRequestReference<'_>,
    ) -> Result<Vec<BuddyRequest>>;

    /// Cancels the given requests unless they already reached
    /// a terminal status.
    fn cancel_buddy_requests(&self, ids: &[&str], reason: &str, updated: Timestamp)
        -> Result<usize>;
}
