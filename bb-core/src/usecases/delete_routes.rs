use super::{buddy_requests::cancel_buddy_requests_referencing, prelude::*};

fn owner_name<R: UserRepo>(repo: &R, owner: &str) -> Result<String> {
    Ok(repo.get_user(owner).or_not_found("user")?.name)
}

/// Soft-deletes the route and cancels all active requests for it.
///
/// Returns the number of canceled requests.
pub fn delete_experienced_route<R>(repo: &R, owner: &str, id: &str) -> Result<usize>
where
    R: ExperiencedRouteRepo + BuddyRequestRepo + UserRepo,
{
    let mut route = super::get_experienced_route(repo, owner, id)?;
    let reason = format!(
        "{} has deleted the route \"{}\"",
        owner_name(repo, owner)?,
        route.name
    );
    route.deleted = true;
    repo.update_experienced_route(&route)?;
    log::info!("Deleted experienced route {id}");
    cancel_buddy_requests_referencing(repo, BuddyRequestReference::ExperiencedRoute(id), &reason)
}

/// Soft-deletes the route and cancels all active requests for it.
///
/// Returns the number of canceled requests.
pub fn delete_inexperienced_route<R>(repo: &R, owner: &str, id: &str) -> Result<usize>
where
    R: InexperiencedRouteRepo + BuddyRequestRepo + UserRepo,
{
    let mut route = super::get_inexperienced_route(repo, owner, id)?;
    let reason = format!(
        "{} no longer needs to buddy up with you",
        owner_name(repo, owner)?
    );
    route.deleted = true;
    repo.update_inexperienced_route(&route)?;
    log::info!("Deleted inexperienced route {id}");
    cancel_buddy_requests_referencing(
        repo,
        BuddyRequestReference::InexperiencedRoute(id),
        &reason,
    )
}
