use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserProfilePatch {
    pub name   : Option<String>,
    pub bio    : Option<String>,
    pub photo  : Option<String>,
    pub notify : Option<bool>,
}

pub fn create_user<R>(repo: &R, new_user: NewUser) -> Result<User>
where
    R: UserRepo,
{
    let user = User::try_from(new_user)?;
    if repo.try_get_user(user.id.as_str())?.is_some() {
        return Err(Error::Conflict(format!(
            "An account for user {} already exists",
            user.id
        )));
    }
    repo.create_user(&user)?;
    log::info!("Created user {}", user.id);
    Ok(user)
}

/// The full record of the calling user.
pub fn get_user<R>(repo: &R, caller: &str, id: &str) -> Result<User>
where
    R: UserRepo,
{
    if caller != id {
        return Err(Error::not_found("user"));
    }
    repo.get_user(id).or_not_found("user")
}

pub fn public_profile<R>(repo: &R, id: &str) -> Result<PublicProfile>
where
    R: UserRepo,
{
    let user = repo.get_user(id).or_not_found("user")?;
    Ok(PublicProfile::from(&user))
}

pub fn update_user_profile<R>(repo: &R, caller: &str, patch: UserProfilePatch) -> Result<User>
where
    R: UserRepo,
{
    let mut user = repo.get_user(caller).or_not_found("user")?;
    let UserProfilePatch {
        name,
        bio,
        photo,
        notify,
    } = patch;
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(ValidationError::Missing("name").into());
        }
        user.name = name;
    }
    if let Some(bio) = bio {
        user.bio = bio;
    }
    if let Some(photo) = photo {
        user.photo = Some(photo).filter(|p| !p.is_empty());
    }
    if let Some(notify) = notify {
        user.preferences.notify = notify;
    }
    repo.update_user(&user)?;
    Ok(user)
}
