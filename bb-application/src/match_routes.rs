use super::*;
use time::OffsetDateTime;

/// Matching only reads and runs on a shared connection.
pub fn match_routes(
    connections: &sqlite::Connections,
    requester: &str,
    query: usecases::NewMatchQuery,
    override_arrival: Option<OffsetDateTime>,
) -> Result<Vec<usecases::ProjectedMatch>> {
    let query = usecases::MatchQuery::try_from(query).map_err(usecases::Error::from)?;
    let db = connections.shared()?;
    let matches = usecases::match_routes(&db, requester, &query, override_arrival)?;
    debug!("Found {} matching routes for {requester}", matches.len());
    Ok(matches)
}

pub fn match_inexperienced_route(
    connections: &sqlite::Connections,
    requester: &str,
    route_id: &str,
    override_arrival: Option<OffsetDateTime>,
) -> Result<Vec<usecases::ProjectedMatch>> {
    let db = connections.shared()?;
    Ok(usecases::match_inexperienced_route(
        &db,
        requester,
        route_id,
        override_arrival,
    )?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;
    use time::macros::{datetime, time};

    #[test]
    fn match_friday_commute() {
        let fixture = BackendFixture::new();
        fixture.create_user("erika", "Erika");
        fixture.create_user("ian", "Ian");
        let route = fixture.create_experienced_route("erika", friday_route());

        let matches =
            flows::match_routes(&fixture.db_connections, "ian", friday_query(), None).unwrap();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.experienced_route, route.id);
        assert_eq!(m.owner.name, "Erika");
        assert!((m.meeting_point.lng() - 1.4).abs() < 1e-6);
        assert!((m.divorce_point.lng() - 4.6).abs() < 1e-6);
        assert!(m.meeting_time < m.divorce_time);
        assert_eq!(m.meeting_time.date(), datetime!(2026-10-16 13:20 +1).date());
        assert!(m.meeting_time.time() > time!(12:15));
        assert!(m.divorce_time.time() < time!(13:15));
    }

    #[test]
    fn the_owner_never_matches_own_routes() {
        let fixture = BackendFixture::new();
        fixture.create_user("erika", "Erika");
        fixture.create_experienced_route("erika", friday_route());
        let matches =
            flows::match_routes(&fixture.db_connections, "erika", friday_query(), None).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn match_stored_inexperienced_route_with_arrival_override() {
        let fixture = BackendFixture::new();
        fixture.create_user("erika", "Erika");
        fixture.create_user("ian", "Ian");
        fixture.create_experienced_route("erika", friday_route());
        let route = fixture.create_inexperienced_route("ian", friday_query_route());

        let on_friday = flows::match_inexperienced_route(
            &fixture.db_connections,
            "ian",
            route.id.as_str(),
            None,
        )
        .unwrap();
        assert_eq!(on_friday.len(), 1);

        // Thursday is not a day of the experienced route
        let on_thursday = flows::match_inexperienced_route(
            &fixture.db_connections,
            "ian",
            route.id.as_str(),
            Some(datetime!(2026-10-15 13:20 +1)),
        )
        .unwrap();
        assert!(on_thursday.is_empty());
    }

    #[test]
    fn reject_radius_out_of_bounds() {
        let fixture = BackendFixture::new();
        let query = usecases::NewMatchQuery {
            radius: Some(2000.001),
            ..friday_query()
        };
        let err = flows::match_routes(&fixture.db_connections, "ian", query, None).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
