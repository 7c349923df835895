use super::{buddy_requests::cancel_buddy_requests_referencing, prelude::*};

/// Removes the account of a user.
///
/// All routes of the user are deleted and all active requests
/// in which the user takes part are canceled.
pub fn delete_user<R>(repo: &R, id: &str) -> Result<()>
where
    R: Db,
{
    let user = repo.get_user(id).or_not_found("user")?;
    let experienced_count = repo.delete_experienced_routes_of_owner(id)?;
    let inexperienced_count = repo.delete_inexperienced_routes_of_owner(id)?;
    log::info!(
        "Deleted {experienced_count} experienced and {inexperienced_count} inexperienced routes of user {id}"
    );
    let reason = format!("{} has deleted their account", user.name);
    cancel_buddy_requests_referencing(repo, BuddyRequestReference::User(id), &reason)?;
    repo.delete_user(id)?;
    log::info!("Deleted user {id}");
    Ok(())
}
