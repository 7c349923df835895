use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InexperiencedRoutePatch {
    pub arrival_datetime : Option<String>,
    pub name             : Option<String>,
    pub notify_owner     : Option<bool>,
    pub radius           : Option<f64>,
}

pub fn create_inexperienced_route<R>(
    repo: &R,
    owner: &str,
    new_route: NewInexperiencedRoute,
) -> Result<InexperiencedRoute>
where
    R: InexperiencedRouteRepo,
{
    let new_route = NewInexperiencedRoute {
        id: None,
        owner: Some(owner.to_owned()),
        deleted: None,
        ..new_route
    };
    let route = InexperiencedRoute::try_from(new_route)?;
    repo.create_inexperienced_route(&route)?;
    log::info!("Created inexperienced route {} of {owner}", route.id);
    Ok(route)
}

/// A route of the owner that has not been deleted.
pub fn get_inexperienced_route<R>(repo: &R, owner: &str, id: &str) -> Result<InexperiencedRoute>
where
    R: InexperiencedRouteRepo,
{
    let route = repo
        .get_inexperienced_route(id)
        .or_not_found("inexperienced route")?;
    if route.deleted || route.owner != owner {
        return Err(Error::not_found("inexperienced route"));
    }
    Ok(route)
}

pub fn inexperienced_routes_of_owner<R>(repo: &R, owner: &str) -> Result<Vec<InexperiencedRoute>>
where
    R: InexperiencedRouteRepo,
{
    Ok(repo.inexperienced_routes_of_owner(owner)?)
}

pub fn update_inexperienced_route<R>(
    repo: &R,
    owner: &str,
    id: &str,
    patch: InexperiencedRoutePatch,
) -> Result<InexperiencedRoute>
where
    R: InexperiencedRouteRepo,
{
    let mut route = get_inexperienced_route(repo, owner, id)?;
    let InexperiencedRoutePatch {
        arrival_datetime,
        name,
        notify_owner,
        radius,
    } = patch;
    if let Some(dt) = arrival_datetime {
        route.arrival_datetime = validate::date_time(&dt, "arrivalDateTime")?;
    }
    if let Some(name) = name {
        route.name = name;
    }
    if let Some(notify_owner) = notify_owner {
        route.notify_owner = notify_owner;
    }
    if let Some(radius) = radius {
        route.radius = radius;
    }
    route.validate()?;
    repo.update_inexperienced_route(&route)?;
    Ok(route)
}
