use super::prelude::*;

/// Changes to the mutable fields of a buddy request.
///
/// All other fields of a request are fixed or only changed through
/// status transitions.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuddyRequestPatch {
    pub meeting_time       : Option<String>,
    pub divorce_time       : Option<String>,
    pub meeting_point      : Option<Vec<f64>>,
    pub meeting_point_name : Option<String>,
    pub divorce_point      : Option<Vec<f64>>,
    pub divorce_point_name : Option<String>,
    pub reason             : Option<String>,
    pub length             : Option<f64>,
    pub review             : Option<i64>,
}

impl BuddyRequestPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn assign<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

/// Applies the patch and reports if anything has changed.
fn apply_patch(
    request: &mut BuddyRequest,
    patch: BuddyRequestPatch,
) -> std::result::Result<bool, ValidationError> {
    let BuddyRequestPatch {
        meeting_time,
        divorce_time,
        meeting_point,
        meeting_point_name,
        divorce_point,
        divorce_point_name,
        reason,
        length,
        review,
    } = patch;
    let mut changed = false;
    if let Some(t) = meeting_time {
        changed |= assign(
            &mut request.meeting_time,
            validate::date_time(&t, "meetingTime")?,
        );
    }
    if let Some(t) = divorce_time {
        changed |= assign(
            &mut request.divorce_time,
            validate::date_time(&t, "divorceTime")?,
        );
    }
    if let Some(coords) = meeting_point {
        changed |= assign(
            &mut request.meeting_point,
            validate::point(&coords, "meetingPoint")?,
        );
    }
    if let Some(name) = meeting_point_name {
        changed |= assign(&mut request.meeting_point_name, name);
    }
    if let Some(coords) = divorce_point {
        changed |= assign(
            &mut request.divorce_point,
            validate::point(&coords, "divorcePoint")?,
        );
    }
    if let Some(name) = divorce_point_name {
        changed |= assign(&mut request.divorce_point_name, name);
    }
    if let Some(reason) = reason {
        changed |= assign(&mut request.reason, reason);
    }
    if let Some(meters) = length {
        changed |= assign(&mut request.length, validate::length(meters, "length")?);
    }
    if let Some(score) = review {
        changed |= assign(&mut request.review, validate::review_score(score)?);
    }
    Ok(changed)
}

/// Updates the details of a pending or accepted request.
///
/// Either party may update a request. A patch without any
/// field is accepted silently.
pub fn update_buddy_request<R>(
    repo: &R,
    caller: &str,
    id: &str,
    patch: BuddyRequestPatch,
) -> Result<BuddyRequest>
where
    R: BuddyRequestRepo,
{
    let (mut request, _) =
        super::buddy_request_status::load_buddy_request_of_party(repo, caller, id)?;
    if patch.is_empty() {
        return Ok(request);
    }
    if !request.status.is_editable() {
        return Err(Error::State(format!(
            "A buddy request can not be changed while it is {}",
            request.status
        )));
    }
    if !apply_patch(&mut request, patch)? {
        return Ok(request);
    }
    request.validate()?;
    request.updated = Timestamp::now();
    repo.update_buddy_request(&request)?;
    log::debug!("Updated buddy request {id}");
    Ok(request)
}
