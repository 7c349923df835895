use super::{match_routes::display_speed, prelude::*};

/// Creates a new pending request of the owner for riding along
/// an experienced route.
///
/// References to the experienced user and the names of both routes
/// are taken from the stored routes.
pub fn create_buddy_request<R>(
    repo: &R,
    owner: &str,
    new_request: NewBuddyRequest,
) -> Result<BuddyRequest>
where
    R: BuddyRequestRepo + ExperiencedRouteRepo + InexperiencedRouteRepo,
{
    let inexperienced_route_id = new_request
        .inexperienced_route
        .clone()
        .ok_or(ValidationError::Missing("inexperiencedRoute"))?;
    let experienced_route_id = new_request
        .experienced_route
        .clone()
        .ok_or(ValidationError::Missing("experiencedRoute"))?;
    let inexperienced_route =
        super::get_inexperienced_route(repo, owner, &inexperienced_route_id)?;
    let experienced_route = repo
        .get_experienced_route(&experienced_route_id)
        .or_not_found("experienced route")?;
    if experienced_route.deleted || experienced_route.owner == owner {
        return Err(Error::not_found("experienced route"));
    }
    let new_request = NewBuddyRequest {
        id: None,
        owner: Some(owner.to_owned()),
        experienced_user: Some(experienced_route.owner.to_string()),
        experienced_route_name: Some(experienced_route.name.clone()),
        inexperienced_route_name: Some(inexperienced_route.name),
        average_speed: Some(display_speed(experienced_route.average_speed())),
        reason: None,
        review: None,
        status: None,
        ..new_request
    };
    let request = BuddyRequest::try_from(new_request)?;
    repo.create_buddy_request(&request)?;
    log::info!(
        "Created buddy request {} for route {}",
        request.id,
        experienced_route.id
    );
    Ok(request)
}

pub fn get_buddy_request<R>(repo: &R, caller: &str, id: &str) -> Result<BuddyRequest>
where
    R: BuddyRequestRepo,
{
    let (request, _) =
        super::buddy_request_status::load_buddy_request_of_party(repo, caller, id)?;
    Ok(request)
}

/// All requests in which the caller takes part.
pub fn buddy_requests_of_user<R>(repo: &R, caller: &str) -> Result<Vec<BuddyRequest>>
where
    R: BuddyRequestRepo,
{
    Ok(repo.buddy_requests_of_user(caller)?)
}

/// Cancels all pending and accepted requests that refer
/// to a deleted entity.
pub(crate) fn cancel_buddy_requests_referencing<R>(
    repo: &R,
    reference: BuddyRequestReference<'_>,
    reason: &str,
) -> Result<usize>
where
    R: BuddyRequestRepo,
{
    let requests = repo.active_buddy_requests_referencing(reference)?;
    if requests.is_empty() {
        return Ok(0);
    }
    let ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
    let count = repo.cancel_buddy_requests(&ids, reason, Timestamp::now())?;
    log::info!("Canceled {count} buddy requests: {reason}");
    Ok(count)
}
