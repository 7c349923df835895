use super::*;

pub fn create_buddy_request(
    connections: &sqlite::Connections,
    owner: &str,
    new_request: NewBuddyRequest,
) -> Result<BuddyRequest> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_buddy_request(conn, owner, new_request).map_err(|err| {
            warn!("Failed to create buddy request of {owner}: {err}");
            err
        })
    })?)
}

pub fn get_buddy_request(
    connections: &sqlite::Connections,
    caller: &str,
    id: &str,
) -> Result<BuddyRequest> {
    let db = connections.shared()?;
    Ok(usecases::get_buddy_request(&db, caller, id)?)
}

pub fn buddy_requests_of_user(
    connections: &sqlite::Connections,
    caller: &str,
) -> Result<Vec<BuddyRequest>> {
    let db = connections.shared()?;
    Ok(usecases::buddy_requests_of_user(&db, caller)?)
}

pub fn change_buddy_request_status(
    connections: &sqlite::Connections,
    caller: &str,
    id: &str,
    status: BuddyRequestStatus,
    reason: Option<String>,
) -> Result<BuddyRequest> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::change_buddy_request_status(conn, caller, id, status, reason).map_err(|err| {
            warn!("Failed to change status of buddy request {id} to {status}: {err}");
            err
        })
    })?)
}

pub fn update_buddy_request(
    connections: &sqlite::Connections,
    caller: &str,
    id: &str,
    patch: usecases::BuddyRequestPatch,
) -> Result<BuddyRequest> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_buddy_request(conn, caller, id, patch))?)
}

/// Stores the review of a completed ride and updates the
/// statistics of the experienced user in the same transaction.
pub fn review_buddy_request(
    connections: &sqlite::Connections,
    reviewer: &str,
    id: &str,
    score: i64,
) -> Result<BuddyRequest> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::review_buddy_request(conn, reviewer, id, score).map_err(|err| {
            warn!("Failed to review buddy request {id}: {err}");
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;
    use BuddyRequestStatus as S;

    struct Ride {
        fixture: BackendFixture,
        experienced_route: ExperiencedRoute,
        request: BuddyRequest,
    }

    fn ride() -> Ride {
        let fixture = BackendFixture::new();
        fixture.create_user("erika", "Erika");
        fixture.create_user("ian", "Ian");
        let experienced_route = fixture.create_experienced_route("erika", friday_route());
        let inexperienced_route = fixture.create_inexperienced_route("ian", friday_query_route());
        let matches = flows::match_inexperienced_route(
            &fixture.db_connections,
            "ian",
            inexperienced_route.id.as_str(),
            None,
        )
        .unwrap();
        let new_request = new_buddy_request(&inexperienced_route, &matches[0]);
        let request =
            flows::create_buddy_request(&fixture.db_connections, "ian", new_request).unwrap();
        Ride {
            fixture,
            experienced_route,
            request,
        }
    }

    fn set_status(ride: &Ride, caller: &str, status: BuddyRequestStatus) -> Result<BuddyRequest> {
        flows::change_buddy_request_status(
            &ride.fixture.db_connections,
            caller,
            ride.request.id.as_str(),
            status,
            Some(format!("{caller} changed the status")),
        )
    }

    #[test]
    fn create_request_from_match() {
        let ride = ride();
        let request = &ride.request;
        assert_eq!(request.status, S::Pending);
        assert_eq!(request.experienced_user, "erika");
        assert_eq!(request.experienced_route, ride.experienced_route.id);
        assert_eq!(request.experienced_route_name, ride.experienced_route.name);
        let loaded = flows::get_buddy_request(
            &ride.fixture.db_connections,
            "erika",
            request.id.as_str(),
        )
        .unwrap();
        assert_eq!(&loaded, request);
        let err = flows::get_buddy_request(
            &ride.fixture.db_connections,
            "stranger",
            request.id.as_str(),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn accept_and_review_twice() {
        let ride = ride();
        set_status(&ride, "erika", S::Accepted).unwrap();
        let reviewed = flows::review_buddy_request(
            &ride.fixture.db_connections,
            "ian",
            ride.request.id.as_str(),
            4,
        )
        .unwrap();
        assert_eq!(reviewed.status, S::Completed);
        flows::review_buddy_request(
            &ride.fixture.db_connections,
            "ian",
            ride.request.id.as_str(),
            2,
        )
        .unwrap();

        // The second review only corrects the rating
        let stats = ride.fixture.user("erika").statistics;
        assert_eq!(stats.users_helped, 1);
        assert_eq!(stats.rating_sum, 2);
        assert_eq!(stats.rating(), 2.0);
        assert!(stats.distance > 0.0);
        assert_eq!(ride.fixture.user("ian").statistics.helped_count, 1);
    }

    #[test]
    fn deny_invalid_transitions() {
        let ride = ride();
        // Only the experienced user may accept
        let err = set_status(&ride, "ian", S::Accepted).unwrap_err();
        assert_eq!(err.status_code(), 400);
        set_status(&ride, "erika", S::Rejected).unwrap();
        let err = set_status(&ride, "ian", S::Canceled).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(ride.fixture.buddy_request(ride.request.id.as_str()).status, S::Rejected);
    }

    #[test]
    fn failed_review_leaves_statistics_untouched() {
        let ride = ride();
        let err = flows::review_buddy_request(
            &ride.fixture.db_connections,
            "ian",
            ride.request.id.as_str(),
            5,
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(ride.fixture.user("erika").statistics, UserStatistics::default());
    }

    #[test]
    fn update_meeting_details() {
        let ride = ride();
        let patch = usecases::BuddyRequestPatch {
            meeting_point_name: Some("Old oak".into()),
            ..Default::default()
        };
        let updated = flows::update_buddy_request(
            &ride.fixture.db_connections,
            "erika",
            ride.request.id.as_str(),
            patch,
        )
        .unwrap();
        assert_eq!(updated.meeting_point_name, "Old oak");
        assert_eq!(
            ride.fixture.buddy_request(ride.request.id.as_str()),
            updated
        );
    }

    #[test]
    fn deleting_the_experienced_route_cancels_the_request() {
        let ride = ride();
        set_status(&ride, "erika", S::Accepted).unwrap();
        let canceled = flows::delete_experienced_route(
            &ride.fixture.db_connections,
            "erika",
            ride.experienced_route.id.as_str(),
        )
        .unwrap();
        assert_eq!(canceled, 1);
        let request = ride.fixture.buddy_request(ride.request.id.as_str());
        assert_eq!(request.status, S::Canceled);
        assert_eq!(
            request.reason,
            format!("Erika has deleted the route \"{}\"", ride.experienced_route.name)
        );
        // Canceling twice is a no-op
        assert_eq!(
            flows::delete_inexperienced_route(
                &ride.fixture.db_connections,
                "ian",
                ride.request.inexperienced_route.as_str(),
            )
            .unwrap(),
            0
        );
        assert_eq!(
            ride.fixture.buddy_request(ride.request.id.as_str()).reason,
            request.reason
        );
    }

    #[test]
    fn deleting_a_user_cancels_requests_on_both_sides() {
        let ride = ride();
        flows::delete_user(&ride.fixture.db_connections, "erika").unwrap();
        let request = ride.fixture.buddy_request(ride.request.id.as_str());
        assert_eq!(request.status, S::Canceled);
        assert_eq!(request.reason, "Erika has deleted their account");
        assert!(ride.fixture.try_get_user("erika").is_none());
        // The remaining party can still see the canceled request
        assert_eq!(
            flows::buddy_requests_of_user(&ride.fixture.db_connections, "ian")
                .unwrap()
                .len(),
            1
        );
    }
}
