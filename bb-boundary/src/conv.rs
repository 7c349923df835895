use super::*;
use bb_entities as e;
use e::time::{format_date_time, format_time_of_day};

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            id,
            name,
            email,
            bio,
            photo,
            joined,
            statistics,
            preferences,
        } = from;
        Self {
            id: id.into(),
            name,
            email,
            bio,
            photo,
            joined: joined.to_string(),
            distance: statistics.distance,
            helped_count: statistics.helped_count,
            users_helped: statistics.users_helped,
            rating: statistics.rating(),
            notify: preferences.notify,
        }
    }
}

impl From<e::user::PublicProfile> for PublicProfile {
    fn from(from: e::user::PublicProfile) -> Self {
        let e::user::PublicProfile {
            id,
            name,
            bio,
            photo,
            joined,
            distance,
            helped_count,
            users_helped,
            rating,
        } = from;
        Self {
            id: id.into(),
            name,
            bio,
            photo,
            joined: joined.to_string(),
            distance,
            helped_count,
            users_helped,
            rating,
        }
    }
}

impl From<e::experienced_route::ExperiencedRoute> for ExperiencedRoute {
    fn from(from: e::experienced_route::ExperiencedRoute) -> Self {
        let e::experienced_route::ExperiencedRoute {
            id,
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
            length,
            deleted: _,
        } = from;
        Self {
            id: id.into(),
            owner: owner.into(),
            route: route.to_coords(),
            departure_time: format_time_of_day(departure_time),
            arrival_time: format_time_of_day(arrival_time),
            days: days
                .iter()
                .map(|day| e::weekday::weekday_name(day).to_owned())
                .collect(),
            start_point_name,
            end_point_name,
            name,
            length: length.to_meters(),
        }
    }
}

impl From<e::inexperienced_route::InexperiencedRoute> for InexperiencedRoute {
    fn from(from: e::inexperienced_route::InexperiencedRoute) -> Self {
        let e::inexperienced_route::InexperiencedRoute {
            id,
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
            deleted: _,
        } = from;
        Self {
            id: id.into(),
            owner: owner.into(),
            start_point: start_point.to_coords(),
            start_point_name,
            end_point: end_point.to_coords(),
            end_point_name,
            arrival_datetime: format_date_time(arrival_datetime),
            radius,
            notify_owner,
            reusable,
            name,
        }
    }
}

impl From<e::buddy_request::BuddyRequest> for BuddyRequest {
    fn from(from: e::buddy_request::BuddyRequest) -> Self {
        let e::buddy_request::BuddyRequest {
            id,
            owner,
            experienced_user,
            experienced_route,
            experienced_route_name,
            inexperienced_route,
            inexperienced_route_name,
            meeting_point,
            meeting_point_name,
            meeting_time,
            divorce_point,
            divorce_point_name,
            divorce_time,
            route,
            length,
            average_speed,
            reason,
            review,
            status,
            created,
            updated,
        } = from;
        Self {
            id: id.into(),
            owner: owner.into(),
            experienced_user: experienced_user.into(),
            experienced_route: experienced_route.into(),
            experienced_route_name,
            inexperienced_route: inexperienced_route.into(),
            inexperienced_route_name,
            meeting_point: meeting_point.to_coords(),
            meeting_point_name,
            meeting_time: format_date_time(meeting_time),
            divorce_point: divorce_point.to_coords(),
            divorce_point_name,
            divorce_time: format_date_time(divorce_time),
            route: route.to_coords(),
            length: length.to_meters(),
            average_speed,
            reason,
            review: review.into(),
            status: status.to_string(),
            created: created.to_string(),
            updated: updated.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e::builders::*;
    use time::macros::time;

    #[test]
    fn serialize_experienced_route_in_camel_case() {
        let route = e::experienced_route::ExperiencedRoute::build()
            .id("er")
            .owner("erika")
            .departure_time(time!(07:45))
            .days(&[e::weekday::Weekday::Monday, e::weekday::Weekday::Friday])
            .finish();
        let json = serde_json::to_value(ExperiencedRoute::from(route)).unwrap();
        assert_eq!(json["id"], "er");
        assert_eq!(json["departureTime"], "07:45:00");
        assert_eq!(json["days"], serde_json::json!(["monday", "friday"]));
        assert_eq!(json["route"][1], serde_json::json!([0.0, 1.0]));
        assert!(json.get("deleted").is_none());
    }

    #[test]
    fn serialize_buddy_request_status_in_lower_case() {
        let request = e::buddy_request::BuddyRequest::build()
            .status(e::buddy_request::BuddyRequestStatus::Accepted)
            .finish();
        let json = serde_json::to_value(BuddyRequest::from(request)).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["review"], 0);
        assert!(json.get("averageSpeed").is_some());
    }

    #[test]
    fn deserialize_loose_records() {
        let query: MatchQuery = serde_json::from_str(
            r#"{"startPoint":[51.5,-0.12],"radius":250,"arrivalDateTime":"2026-10-16T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(query.start_point, Some(vec![51.5, -0.12]));
        assert!(query.end_point.is_none());
        assert_eq!(query.radius, Some(250.0));

        let seed: Seed = serde_json::from_str(r#"{"users":[{"id":"jane"}]}"#).unwrap();
        assert_eq!(seed.users.len(), 1);
        assert!(seed.experienced_routes.is_empty());
    }
}
