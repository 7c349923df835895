pub mod prelude {

    pub fn new_user(id: &str, name: &str) -> NewUser {
        NewUser {
            id: Some(id.into()),
            name: Some(name.into()),
            email: Some(format!("{id}@example.com")),
            ..Default::default()
        }
    }

    /// Ridden on Tuesday, Friday and Sunday along the equator
    /// from 0° to 6° east.
    pub fn friday_route() -> NewExperiencedRoute {
        NewExperiencedRoute {
            route: Some((0..=6).map(|lng| vec![0.0, f64::from(lng)]).collect()),
            departure_time: Some("12:15".into()),
            arrival_time: Some("13:15".into()),
            days: Some(vec!["tuesday".into(), "friday".into(), "sunday".into()]),
            start_point_name: Some("West end".into()),
            end_point_name: Some("East end".into()),
            ..Default::default()
        }
    }

    pub fn friday_query() -> usecases::NewMatchQuery {
        usecases::NewMatchQuery {
            start_point: Some(vec![0.0, 1.4]),
            end_point: Some(vec![0.0, 4.6]),
            radius: Some(500.0),
            arrival: Some("2026-10-16T13:20:00+01:00".into()),
        }
    }

    pub fn friday_query_route() -> NewInexperiencedRoute {
        let usecases::NewMatchQuery {
            start_point,
            end_point,
            radius,
            arrival,
        } = friday_query();
        NewInexperiencedRoute {
            start_point,
            start_point_name: Some("Station".into()),
            end_point,
            end_point_name: Some("Office".into()),
            arrival_datetime: arrival,
            radius,
            ..Default::default()
        }
    }

    pub fn new_buddy_request(
        route: &InexperiencedRoute,
        m: &usecases::ProjectedMatch,
    ) -> NewBuddyRequest {
        NewBuddyRequest {
            experienced_route: Some(m.experienced_route.to_string()),
            inexperienced_route: Some(route.id.to_string()),
            meeting_point: Some(m.meeting_point.to_coords().to_vec()),
            meeting_point_name: Some(route.start_point_name.clone()),
            meeting_time: Some(format_date_time(m.meeting_time)),
            divorce_point: Some(m.divorce_point.to_coords().to_vec()),
            divorce_point_name: Some(route.end_point_name.clone()),
            divorce_time: Some(format_date_time(m.divorce_time)),
            route: Some(m.route.to_coords().iter().map(|c| c.to_vec()).collect()),
            length: Some(m.length.to_meters()),
            ..Default::default()
        }
    }

    pub use bb_core::{
        entities::*,
        repositories::{Error as RepoError, *},
        usecases,
        util::validate::{NewBuddyRequest, NewExperiencedRoute, NewInexperiencedRoute, NewUser},
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{error::AppError, prelude as flows, Result};

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            bb_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self { db_connections }
        }

        pub fn create_user(&self, id: &str, name: &str) -> User {
            flows::create_user(&self.db_connections, new_user(id, name)).unwrap()
        }

        pub fn create_experienced_route(
            &self,
            owner: &str,
            new_route: NewExperiencedRoute,
        ) -> ExperiencedRoute {
            flows::create_experienced_route(&self.db_connections, owner, new_route).unwrap()
        }

        pub fn create_inexperienced_route(
            &self,
            owner: &str,
            new_route: NewInexperiencedRoute,
        ) -> InexperiencedRoute {
            flows::create_inexperienced_route(&self.db_connections, owner, new_route).unwrap()
        }

        pub fn try_get_user(&self, id: &str) -> Option<User> {
            match self.db_connections.shared().unwrap().get_user(id) {
                Ok(user) => Some(user),
                Err(RepoError::NotFound) => None,
                x => x.map(|_| None).unwrap(),
            }
        }

        pub fn user(&self, id: &str) -> User {
            self.try_get_user(id).unwrap()
        }

        pub fn buddy_request(&self, id: &str) -> BuddyRequest {
            self.db_connections
                .shared()
                .unwrap()
                .get_buddy_request(id)
                .unwrap()
        }
    }
}
