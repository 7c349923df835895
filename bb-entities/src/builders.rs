pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{
    buddy_request_builder::*, experienced_route_builder::*, inexperienced_route_builder::*,
    user_builder::*,
};

fn default_line() -> crate::geo::LineString {
    crate::geo::LineString::try_from_coords(&[[0.0, 0.0], [0.0, 1.0]]).unwrap()
}

pub mod user_builder {

    use super::*;
    use crate::{id::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.user.name = name.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = Some(email.into());
            self
        }
        pub fn statistics(mut self, statistics: UserStatistics) -> Self {
            self.user.statistics = statistics;
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> UserBuild {
            UserBuild {
                user: User {
                    id: Id::new(),
                    name: "Jane Doe".into(),
                    email: None,
                    bio: "".into(),
                    photo: None,
                    joined: Timestamp::now(),
                    statistics: Default::default(),
                    preferences: Default::default(),
                },
            }
        }
    }
}

pub mod experienced_route_builder {

    use super::*;
    use crate::{
        derive_route_name, experienced_route::*, geo::*, id::*, weekday::*,
    };
    use time::{macros::time, Time};

    #[derive(Debug)]
    pub struct ExperiencedRouteBuild {
        route: ExperiencedRoute,
    }

    impl ExperiencedRouteBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.route.id = id.into();
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.route.owner = owner.into();
            self
        }
        /// Also updates the length
        pub fn route(mut self, route: LineString) -> Self {
            self.route.length = route.length();
            self.route.route = route;
            self
        }
        pub fn departure_time(mut self, t: Time) -> Self {
            self.route.departure_time = t;
            self
        }
        pub fn arrival_time(mut self, t: Time) -> Self {
            self.route.arrival_time = t;
            self
        }
        pub fn days(mut self, days: &[Weekday]) -> Self {
            self.route.days = days.iter().copied().collect();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.route.name = name.into();
            self
        }
        pub fn length(mut self, length: Distance) -> Self {
            self.route.length = length;
            self
        }
        pub fn deleted(mut self, deleted: bool) -> Self {
            self.route.deleted = deleted;
            self
        }
        pub fn finish(self) -> ExperiencedRoute {
            self.route
        }
    }

    impl Builder for ExperiencedRoute {
        type Build = ExperiencedRouteBuild;
        fn build() -> ExperiencedRouteBuild {
            let route = default_line();
            ExperiencedRouteBuild {
                route: ExperiencedRoute {
                    id: Id::new(),
                    owner: Id::new(),
                    length: route.length(),
                    route,
                    departure_time: time!(08:00),
                    arrival_time: time!(09:00),
                    days: [Weekday::Monday].into_iter().collect(),
                    start_point_name: "Home".into(),
                    end_point_name: "Work".into(),
                    name: derive_route_name("Home", "Work"),
                    deleted: false,
                },
            }
        }
    }
}

pub mod inexperienced_route_builder {

    use super::*;
    use crate::{geo::*, id::*, inexperienced_route::*};
    use time::{macros::datetime, OffsetDateTime};

    #[derive(Debug)]
    pub struct InexperiencedRouteBuild {
        route: InexperiencedRoute,
    }

    impl InexperiencedRouteBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.route.id = id.into();
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.route.owner = owner.into();
            self
        }
        pub fn start_point(mut self, pos: MapPoint) -> Self {
            self.route.start_point = pos;
            self
        }
        pub fn end_point(mut self, pos: MapPoint) -> Self {
            self.route.end_point = pos;
            self
        }
        pub fn arrival_datetime(mut self, dt: OffsetDateTime) -> Self {
            self.route.arrival_datetime = dt;
            self
        }
        pub fn radius(mut self, radius: f64) -> Self {
            self.route.radius = radius;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.route.name = name.into();
            self
        }
        pub fn deleted(mut self, deleted: bool) -> Self {
            self.route.deleted = deleted;
            self
        }
        pub fn finish(self) -> InexperiencedRoute {
            self.route
        }
    }

    impl Builder for InexperiencedRoute {
        type Build = InexperiencedRouteBuild;
        fn build() -> InexperiencedRouteBuild {
            InexperiencedRouteBuild {
                route: InexperiencedRoute {
                    id: Id::new(),
                    owner: Id::new(),
                    start_point: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    start_point_name: "Station".into(),
                    end_point: MapPoint::from_lat_lng_deg(0.0, 1.0),
                    end_point_name: "Office".into(),
                    arrival_datetime: datetime!(2026-10-16 09:00 UTC),
                    radius: 500.0,
                    notify_owner: false,
                    reusable: false,
                    name: "Station to Office".into(),
                    deleted: false,
                },
            }
        }
    }
}

pub mod buddy_request_builder {

    use super::*;
    use crate::{buddy_request::*, geo::*, id::*, time::*};
    use time::{macros::datetime, OffsetDateTime};

    #[derive(Debug)]
    pub struct BuddyRequestBuild {
        request: BuddyRequest,
    }

    impl BuddyRequestBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.request.id = id.into();
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.request.owner = owner.into();
            self
        }
        pub fn experienced_user(mut self, user: &str) -> Self {
            self.request.experienced_user = user.into();
            self
        }
        pub fn experienced_route(mut self, route: &str) -> Self {
            self.request.experienced_route = route.into();
            self
        }
        pub fn inexperienced_route(mut self, route: &str) -> Self {
            self.request.inexperienced_route = route.into();
            self
        }
        pub fn times(mut self, meeting: OffsetDateTime, divorce: OffsetDateTime) -> Self {
            self.request.meeting_time = meeting;
            self.request.divorce_time = divorce;
            self
        }
        pub fn length(mut self, length: Distance) -> Self {
            self.request.length = length;
            self
        }
        pub fn reason(mut self, reason: &str) -> Self {
            self.request.reason = reason.into();
            self
        }
        pub fn review(mut self, review: ReviewScore) -> Self {
            self.request.review = review;
            self
        }
        pub fn status(mut self, status: BuddyRequestStatus) -> Self {
            self.request.status = status;
            self
        }
        pub fn updated(mut self, updated: Timestamp) -> Self {
            self.request.updated = updated;
            self
        }
        pub fn finish(self) -> BuddyRequest {
            self.request
        }
    }

    impl Builder for BuddyRequest {
        type Build = BuddyRequestBuild;
        fn build() -> BuddyRequestBuild {
            let route = default_line();
            let now = Timestamp::now();
            BuddyRequestBuild {
                request: BuddyRequest {
                    id: Id::new(),
                    owner: Id::new(),
                    experienced_user: Id::new(),
                    experienced_route: Id::new(),
                    experienced_route_name: "Home to Work".into(),
                    inexperienced_route: Id::new(),
                    inexperienced_route_name: "Station to Office".into(),
                    meeting_point: route.first(),
                    meeting_point_name: "Station".into(),
                    meeting_time: datetime!(2026-10-16 08:00 UTC),
                    divorce_point: route.last(),
                    divorce_point_name: "Office".into(),
                    divorce_time: datetime!(2026-10-16 09:00 UTC),
                    length: route.length(),
                    route,
                    average_speed: 12.5,
                    reason: "".into(),
                    review: ReviewScore::unset(),
                    status: BuddyRequestStatus::Pending,
                    created: now,
                    updated: now,
                },
            }
        }
    }
}
