use super::prelude::*;

/// The part a user plays in a buddy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The inexperienced user who created the request
    Owner,
    ExperiencedUser,
}

impl Role {
    /// `None` if the user takes no part in the request.
    pub fn of(user: &str, request: &BuddyRequest) -> Option<Self> {
        if user.is_empty() {
            None
        } else if request.experienced_user == user {
            Some(Self::ExperiencedUser)
        } else if request.owner == user {
            Some(Self::Owner)
        } else {
            None
        }
    }
}

/// Outcome of looking up a status change in the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Allow,
    /// Allowed with a non-empty reason
    AllowWithReason,
    Deny(String),
}

pub fn transition(
    current: BuddyRequestStatus,
    requested: BuddyRequestStatus,
    role: Role,
) -> Transition {
    use BuddyRequestStatus as S;
    use Transition::*;
    let deny = |msg: &str| Deny(msg.to_owned());
    match (current, requested, role) {
        (_, S::Pending, _) => {
            deny("A buddy request can not be reset to pending")
        }
        (_, S::Completed, _) => {
            deny("A buddy request is completed by reviewing it")
        }
        (S::Pending, S::Accepted | S::Rejected, Role::ExperiencedUser) => Allow,
        (S::Pending, S::Accepted, Role::Owner) => {
            deny("Only the experienced user can accept a buddy request")
        }
        (S::Pending, S::Rejected, Role::Owner) => {
            deny("Only the experienced user can reject a buddy request")
        }
        (S::Pending, S::Canceled, _) => {
            deny("A pending buddy request can not be canceled, the experienced user should reject it instead")
        }
        (S::Accepted, S::Canceled, _) | (S::Canceled, S::Canceled, _) => AllowWithReason,
        (S::Accepted, S::Rejected, _) => {
            deny("An accepted buddy request can not be rejected, cancel it instead")
        }
        (S::Rejected, S::Rejected, Role::ExperiencedUser) => Allow,
        (S::Rejected, S::Canceled, _) => {
            deny("The buddy request has already been rejected")
        }
        (current, requested, _) => Deny(format!(
            "The status of a buddy request can not be changed from {current} to {requested}"
        )),
    }
}

/// Loads a request in which the user takes part.
///
/// Requests of other users are reported as not found.
pub(crate) fn load_buddy_request_of_party<R>(
    repo: &R,
    user: &str,
    id: &str,
) -> Result<(BuddyRequest, Role)>
where
    R: BuddyRequestRepo,
{
    let request = repo.get_buddy_request(id).or_not_found("buddy request")?;
    let role = Role::of(user, &request).ok_or_else(|| Error::not_found("buddy request"))?;
    Ok((request, role))
}

pub fn change_buddy_request_status<R>(
    repo: &R,
    caller: &str,
    id: &str,
    status: BuddyRequestStatus,
    reason: Option<String>,
) -> Result<BuddyRequest>
where
    R: BuddyRequestRepo,
{
    let (mut request, role) = load_buddy_request_of_party(repo, caller, id)?;
    let reason = reason.filter(|r| !r.trim().is_empty());
    match transition(request.status, status, role) {
        Transition::Deny(msg) => return Err(Error::State(msg)),
        Transition::AllowWithReason if reason.is_none() => {
            return Err(ValidationError::Missing("reason").into());
        }
        Transition::Allow | Transition::AllowWithReason => {}
    }
    log::info!(
        "Changing status of buddy request {id} from {} to {status}",
        request.status
    );
    request.status = status;
    if let Some(reason) = reason {
        request.reason = reason;
    }
    request.updated = Timestamp::now();
    repo.update_buddy_request(&request)?;
    Ok(request)
}
