use super::*;

pub fn create_user(connections: &sqlite::Connections, new_user: NewUser) -> Result<User> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_user(conn, new_user).map_err(|err| {
            warn!("Failed to create user: {err}");
            err
        })
    })?)
}

pub fn get_user(connections: &sqlite::Connections, caller: &str, id: &str) -> Result<User> {
    let db = connections.shared()?;
    Ok(usecases::get_user(&db, caller, id)?)
}

pub fn public_profile(connections: &sqlite::Connections, id: &str) -> Result<PublicProfile> {
    let db = connections.shared()?;
    Ok(usecases::public_profile(&db, id)?)
}

pub fn update_user_profile(
    connections: &sqlite::Connections,
    caller: &str,
    patch: usecases::UserProfilePatch,
) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_user_profile(conn, caller, patch))?)
}

/// Deletes the account together with all routes of the user
/// and cancels every active request in which the user takes part.
pub fn delete_user(connections: &sqlite::Connections, id: &str) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_user(conn, id).map_err(|err| {
            warn!("Failed to delete user {id}: {err}");
            err
        })
    })?)
}
