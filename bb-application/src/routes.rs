use super::*;

pub fn create_experienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    new_route: NewExperiencedRoute,
) -> Result<ExperiencedRoute> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_experienced_route(conn, owner, new_route))?)
}

pub fn get_experienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
) -> Result<ExperiencedRoute> {
    let db = connections.shared()?;
    Ok(usecases::get_experienced_route(&db, owner, id)?)
}

pub fn experienced_routes_of_owner(
    connections: &sqlite::Connections,
    owner: &str,
) -> Result<Vec<ExperiencedRoute>> {
    let db = connections.shared()?;
    Ok(usecases::experienced_routes_of_owner(&db, owner)?)
}

pub fn update_experienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
    schedule: usecases::ExperiencedRouteSchedule,
) -> Result<ExperiencedRoute> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_experienced_route(conn, owner, id, schedule))?)
}

/// Returns the number of canceled buddy requests.
pub fn delete_experienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
) -> Result<usize> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_experienced_route(conn, owner, id).map_err(|err| {
            warn!("Failed to delete experienced route {id}: {err}");
            err
        })
    })?)
}

pub fn create_inexperienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    new_route: NewInexperiencedRoute,
) -> Result<InexperiencedRoute> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_inexperienced_route(conn, owner, new_route))?)
}

pub fn get_inexperienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
) -> Result<InexperiencedRoute> {
    let db = connections.shared()?;
    Ok(usecases::get_inexperienced_route(&db, owner, id)?)
}

pub fn inexperienced_routes_of_owner(
    connections: &sqlite::Connections,
    owner: &str,
) -> Result<Vec<InexperiencedRoute>> {
    let db = connections.shared()?;
    Ok(usecases::inexperienced_routes_of_owner(&db, owner)?)
}

pub fn update_inexperienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
    patch: usecases::InexperiencedRoutePatch,
) -> Result<InexperiencedRoute> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_inexperienced_route(conn, owner, id, patch))?)
}

/// Returns the number of canceled buddy requests.
pub fn delete_inexperienced_route(
    connections: &sqlite::Connections,
    owner: &str,
    id: &str,
) -> Result<usize> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_inexperienced_route(conn, owner, id).map_err(|err| {
            warn!("Failed to delete inexperienced route {id}: {err}");
            err
        })
    })?)
}
