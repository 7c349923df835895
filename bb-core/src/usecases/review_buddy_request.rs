use super::prelude::*;

/// Credits a completed ride to both users. Only the first review
/// of a request counts the ride, subsequent reviews only correct
/// the rating by the difference of the scores.
fn apply_review(
    request: &BuddyRequest,
    score: ReviewScore,
    inexperienced: &mut UserStatistics,
    experienced: &mut UserStatistics,
) {
    let first_review = request.status == BuddyRequestStatus::Accepted;
    let previous_score = if first_review {
        0
    } else {
        i64::from(request.review)
    };
    if first_review {
        let meters = request.length.to_meters();
        inexperienced.helped_count += 1;
        inexperienced.distance += meters;
        experienced.users_helped += 1;
        experienced.distance += meters;
    }
    experienced.rating_sum += i64::from(score) - previous_score;
}

/// Reviews an accepted or completed request, completing it.
pub fn review_buddy_request<R>(
    repo: &R,
    reviewer: &str,
    id: &str,
    score: i64,
) -> Result<BuddyRequest>
where
    R: BuddyRequestRepo + UserRepo,
{
    let score = ReviewScore::try_new_submitted(score)
        .map_err(|_| ValidationError::ReviewOutOfRange { score, min: 1 })?;
    let mut request = repo.get_buddy_request(id).or_not_found("buddy request")?;
    if reviewer.is_empty() || request.owner != reviewer {
        return Err(Error::not_found("buddy request"));
    }
    if !matches!(
        request.status,
        BuddyRequestStatus::Accepted | BuddyRequestStatus::Completed
    ) {
        return Err(Error::State(format!(
            "Only accepted or completed buddy requests can be reviewed, this one is {}",
            request.status
        )));
    }
    if request.owner == request.experienced_user {
        return Err(Error::State(
            "Users can not review rides with themselves".to_owned(),
        ));
    }
    let mut inexperienced = repo.get_user(request.owner.as_str()).or_not_found("user")?;
    let mut experienced = repo
        .get_user(request.experienced_user.as_str())
        .or_not_found("experienced user")?;
    apply_review(
        &request,
        score,
        &mut inexperienced.statistics,
        &mut experienced.statistics,
    );
    repo.update_user(&inexperienced)?;
    repo.update_user(&experienced)?;
    log::info!(
        "Reviewed buddy request {id} with {} (was {})",
        i64::from(score),
        i64::from(request.review)
    );
    request.review = score;
    request.status = BuddyRequestStatus::Completed;
    request.updated = Timestamp::now();
    repo.update_buddy_request(&request)?;
    Ok(request)
}
