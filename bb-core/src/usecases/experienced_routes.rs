use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExperiencedRouteSchedule {
    pub departure_time : Option<String>,
    pub arrival_time   : Option<String>,
    pub days           : Option<Vec<String>>,
    pub name           : Option<String>,
}

pub fn create_experienced_route<R>(
    repo: &R,
    owner: &str,
    new_route: NewExperiencedRoute,
) -> Result<ExperiencedRoute>
where
    R: ExperiencedRouteRepo,
{
    let new_route = NewExperiencedRoute {
        id: None,
        owner: Some(owner.to_owned()),
        deleted: None,
        ..new_route
    };
    let route = ExperiencedRoute::try_from(new_route)?;
    repo.create_experienced_route(&route)?;
    log::info!("Created experienced route {} of {owner}", route.id);
    Ok(route)
}

/// A route of the owner that has not been deleted.
pub fn get_experienced_route<R>(repo: &R, owner: &str, id: &str) -> Result<ExperiencedRoute>
where
    R: ExperiencedRouteRepo,
{
    let route = repo
        .get_experienced_route(id)
        .or_not_found("experienced route")?;
    if route.deleted || route.owner != owner {
        return Err(Error::not_found("experienced route"));
    }
    Ok(route)
}

pub fn experienced_routes_of_owner<R>(repo: &R, owner: &str) -> Result<Vec<ExperiencedRoute>>
where
    R: ExperiencedRouteRepo,
{
    Ok(repo.experienced_routes_of_owner(owner)?)
}

/// Changes the schedule of a route, the path stays as it is.
pub fn update_experienced_route<R>(
    repo: &R,
    owner: &str,
    id: &str,
    schedule: ExperiencedRouteSchedule,
) -> Result<ExperiencedRoute>
where
    R: ExperiencedRouteRepo,
{
    let mut route = get_experienced_route(repo, owner, id)?;
    let ExperiencedRouteSchedule {
        departure_time,
        arrival_time,
        days,
        name,
    } = schedule;
    if let Some(t) = departure_time {
        route.departure_time = validate::time_of_day(&t, "departureTime")?;
    }
    if let Some(t) = arrival_time {
        route.arrival_time = validate::time_of_day(&t, "arrivalTime")?;
    }
    if let Some(days) = days {
        route.days = validate::weekdays(&days, "days")?;
    }
    if let Some(name) = name {
        route.name = name;
    }
    route.validate()?;
    repo.update_experienced_route(&route)?;
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use time::macros::time;

    fn new_route() -> NewExperiencedRoute {
        NewExperiencedRoute {
            id: Some("ignored".into()),
            route: Some(vec![vec![51.5, -0.12], vec![51.51, -0.11]]),
            departure_time: Some("08:00".into()),
            arrival_time: Some("08:30".into()),
            days: Some(vec!["monday".into()]),
            start_point_name: Some("Home".into()),
            end_point_name: Some("Work".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_and_reschedule_route() {
        let db = MockDb::default();
        let route = create_experienced_route(&db, "owner", new_route()).unwrap();
        assert_eq!(route.owner, "owner");
        assert_ne!(route.id, "ignored");

        let schedule = ExperiencedRouteSchedule {
            departure_time: Some("17:00".into()),
            arrival_time: Some("17:40".into()),
            days: Some(vec!["Wednesday".into(), "thursday".into()]),
            name: Some("Way home".into()),
        };
        let updated =
            update_experienced_route(&db, "owner", route.id.as_str(), schedule).unwrap();
        assert_eq!(updated.departure_time, time!(17:00));
        assert!(updated.days.contains(Weekday::Thursday));
        assert!(!updated.days.contains(Weekday::Monday));
        assert_eq!(updated.route, route.route);
        assert_eq!(updated.length, route.length);
        assert_eq!(
            experienced_routes_of_owner(&db, "owner").unwrap(),
            vec![updated]
        );
    }

    #[test]
    fn reject_schedule_ending_before_it_starts() {
        let db = MockDb::default();
        let route = create_experienced_route(&db, "owner", new_route()).unwrap();
        let schedule = ExperiencedRouteSchedule {
            arrival_time: Some("07:00".into()),
            ..Default::default()
        };
        let err = update_experienced_route(&db, "owner", route.id.as_str(), schedule).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ArrivalBeforeDeparture)
        ));
    }

    #[test]
    fn only_the_owner_may_update() {
        let db = MockDb::default();
        let route = create_experienced_route(&db, "owner", new_route()).unwrap();
        let err = update_experienced_route(
            &db,
            "stranger",
            route.id.as_str(),
            ExperiencedRouteSchedule::default(),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
