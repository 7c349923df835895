pub use bb_boundary::*;

use bb_application::{error::AppError, prelude as flows};
use bb_core::{usecases, util::validate};

pub mod from_json {
    //! JSON -> Usecase parameters

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the usecase parameters both are outside this crate.

    pub fn new_user(from: NewUser) -> validate::NewUser {
        let NewUser {
            id,
            name,
            email,
            bio,
            photo,
            notify,
        } = from;
        validate::NewUser {
            id,
            name,
            email,
            bio,
            photo,
            notify,
        }
    }

    pub fn new_experienced_route(from: NewExperiencedRoute) -> validate::NewExperiencedRoute {
        let NewExperiencedRoute {
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
        } = from;
        validate::NewExperiencedRoute {
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
            ..Default::default()
        }
    }

    pub fn new_inexperienced_route(
        from: NewInexperiencedRoute,
    ) -> validate::NewInexperiencedRoute {
        let NewInexperiencedRoute {
            owner,
            start_point,
            start_point_name,
            end_point,
            end_point_name,
            arrival_datetime,
            radius,
            notify_owner,
            reusable,
            name,
        } = from;
        validate::NewInexperiencedRoute {
            owner,
            start_point,
            start_point_name,
            end_point,
            end_point_name,
            arrival_datetime,
            radius,
            notify_owner,
            reusable,
            name,
            ..Default::default()
        }
    }

    /// Only the fields a requester is allowed to choose, everything
    /// else is taken from the stored routes.
    pub fn new_buddy_request(from: NewBuddyRequest) -> validate::NewBuddyRequest {
        let NewBuddyRequest {
            experienced_route,
            inexperienced_route,
            meeting_point,
            meeting_point_name,
            meeting_time,
            divorce_point,
            divorce_point_name,
            divorce_time,
            route,
            length,
        } = from;
        validate::NewBuddyRequest {
            experienced_route,
            inexperienced_route,
            meeting_point,
            meeting_point_name,
            meeting_time,
            divorce_point,
            divorce_point_name,
            divorce_time,
            route,
            length,
            ..Default::default()
        }
    }

    pub fn buddy_request_patch(from: BuddyRequestPatch) -> usecases::BuddyRequestPatch {
        let BuddyRequestPatch {
            meeting_time,
            divorce_time,
            meeting_point,
            meeting_point_name,
            divorce_point,
            divorce_point_name,
            reason,
            length,
            review,
        } = from;
        usecases::BuddyRequestPatch {
            meeting_time,
            divorce_time,
            meeting_point,
            meeting_point_name,
            divorce_point,
            divorce_point_name,
            reason,
            length,
            review,
        }
    }

    pub fn match_query(from: MatchQuery) -> usecases::NewMatchQuery {
        let MatchQuery {
            start_point,
            end_point,
            radius,
            arrival,
        } = from;
        usecases::NewMatchQuery {
            start_point,
            end_point,
            radius,
            arrival,
        }
    }

    pub fn seed(from: Seed) -> flows::Seed {
        let Seed {
            users,
            experienced_routes,
            inexperienced_routes,
        } = from;
        flows::Seed {
            users: users.into_iter().map(new_user).collect(),
            experienced_routes: experienced_routes
                .into_iter()
                .map(new_experienced_route)
                .collect(),
            inexperienced_routes: inexperienced_routes
                .into_iter()
                .map(new_inexperienced_route)
                .collect(),
        }
    }
}

pub mod to_json {
    //! Usecase results -> JSON

    use super::*;

    pub fn route_match(from: usecases::ProjectedMatch) -> RouteMatch {
        let usecases::ProjectedMatch {
            experienced_route,
            experienced_route_name,
            owner,
            meeting_point,
            meeting_time,
            divorce_point,
            divorce_time,
            route,
            length,
            average_speed,
            time_to_meeting_point,
            time_from_divorce_point,
        } = from;
        RouteMatch {
            experienced_route: experienced_route.into(),
            experienced_route_name,
            owner: owner.into(),
            meeting_point: meeting_point.to_coords(),
            meeting_time: bb_entities::time::format_date_time(meeting_time),
            divorce_point: divorce_point.to_coords(),
            divorce_time: bb_entities::time::format_date_time(divorce_time),
            route: route.to_coords(),
            length: length.to_meters(),
            average_speed,
            time_to_meeting_point: time_to_meeting_point.whole_seconds(),
            time_from_divorce_point: time_from_divorce_point.whole_seconds(),
        }
    }

    pub fn import_summary(from: flows::ImportSummary) -> ImportSummary {
        let flows::ImportSummary {
            users,
            experienced_routes,
            inexperienced_routes,
        } = from;
        ImportSummary {
            users,
            experienced_routes,
            inexperienced_routes,
        }
    }

    pub fn error(from: &AppError) -> Error {
        Error {
            status: from.status_code(),
            message: from.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_core::entities as e;
    use bb_entities::builders::*;
    use time::{macros::datetime, Duration};

    #[test]
    fn buddy_request_fields_chosen_by_the_system_stay_empty() {
        let json: NewBuddyRequest = serde_json::from_str(
            r#"{
                "experiencedRoute": "er",
                "inexperiencedRoute": "ir",
                "meetingPoint": [0.0, 1.4],
                "meetingTime": "2026-10-16T12:29:00+01:00"
            }"#,
        )
        .unwrap();
        let request = from_json::new_buddy_request(json);
        assert_eq!(request.experienced_route.as_deref(), Some("er"));
        assert_eq!(request.meeting_point, Some(vec![0.0, 1.4]));
        assert!(request.owner.is_none());
        assert!(request.status.is_none());
        assert!(request.average_speed.is_none());
    }

    #[test]
    fn route_match_durations_in_seconds() {
        let owner = e::User::build().id("erika").name("Erika").finish();
        let route = e::LineString::try_from_coords(&[[0.0, 1.4], [0.0, 2.0]]).unwrap();
        let projected = usecases::ProjectedMatch {
            experienced_route: "er".into(),
            experienced_route_name: "Commute".into(),
            owner: e::PublicProfile::from(&owner),
            meeting_point: route.first(),
            meeting_time: datetime!(2026-10-16 12:29 +1),
            divorce_point: route.last(),
            divorce_time: datetime!(2026-10-16 12:35 +1),
            length: route.length(),
            route,
            average_speed: 25.0,
            time_to_meeting_point: Duration::seconds(90),
            time_from_divorce_point: Duration::milliseconds(2_500),
        };
        let json = serde_json::to_value(to_json::route_match(projected)).unwrap();
        assert_eq!(json["owner"]["name"], "Erika");
        assert_eq!(json["meetingTime"], "2026-10-16T12:29:00+01:00");
        assert_eq!(json["timeToMeetingPoint"], 90);
        assert_eq!(json["timeFromDivorcePoint"], 2);
    }
}
