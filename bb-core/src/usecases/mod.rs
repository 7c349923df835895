mod buddy_request_status;
mod buddy_requests;
mod delete_routes;
mod delete_user;
mod error;
mod experienced_routes;
mod inexperienced_routes;
mod match_routes;
mod review_buddy_request;
mod update_buddy_request;
mod users;

#[cfg(test)]
pub mod tests;

pub use self::{
    buddy_request_status::*, buddy_requests::*, delete_routes::*, delete_user::*, error::Error,
    experienced_routes::*, inexperienced_routes::*, match_routes::*, review_buddy_request::*,
    update_buddy_request::*, users::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        db::*,
        entities::*,
        repositories::*,
        util::validate::{
            self, NewBuddyRequest, NewExperiencedRoute, NewInexperiencedRoute, NewUser, Validate,
            ValidationError,
        },
    };

    pub(crate) trait OrNotFound<T> {
        /// Reports a missing entity with the given name.
        fn or_not_found(self, what: &str) -> Result<T>;
    }

    impl<T> OrNotFound<T> for std::result::Result<T, crate::repositories::Error> {
        fn or_not_found(self, what: &str) -> Result<T> {
            self.map_err(|err| match err {
                crate::repositories::Error::NotFound => Error::not_found(what),
                err => err.into(),
            })
        }
    }
}
