pub use bb_entities::{
    buddy_request::*, derive_route_name, experienced_route::*, geo::*, id::*,
    inexperienced_route::*, time::*, user::*, weekday::*,
};
