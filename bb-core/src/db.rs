use crate::repositories::*;

/// Access to all repositories within a single unit of work.
pub trait Db:
    UserRepo + ExperiencedRouteRepo + InexperiencedRouteRepo + BuddyRequestRepo
{
}

impl<T> Db for T where
    T: UserRepo + ExperiencedRouteRepo + InexperiencedRouteRepo + BuddyRequestRepo
{
}
