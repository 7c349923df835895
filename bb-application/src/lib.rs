#[macro_use]
extern crate log;

mod buddy_requests;
mod import;
mod match_routes;
mod routes;
mod users;

pub mod prelude {
    pub use super::{buddy_requests::*, import::*, match_routes::*, routes::*, users::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use bb_core::{
    entities::*,
    usecases,
    util::validate::{NewBuddyRequest, NewExperiencedRoute, NewInexperiencedRoute, NewUser},
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use bb_db_sqlite::Connections;
}
