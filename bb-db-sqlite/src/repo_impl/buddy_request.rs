use super::*;

static ACTIVE_STATUS: [BuddyRequestStatus; 2] =
    [BuddyRequestStatus::Pending, BuddyRequestStatus::Accepted];

fn active_status() -> impl Iterator<Item = &'static str> {
    ACTIVE_STATUS
        .iter()
        .map(|status: &'static BuddyRequestStatus| -> &'static str { status.as_ref() })
}

impl BuddyRequestRepo for SharedDb<'_> {
    fn create_buddy_request(&self, _request: &BuddyRequest) -> Result<()> {
        Err(read_only())
    }
    fn update_buddy_request(&self, _request: &BuddyRequest) -> Result<()> {
        Err(read_only())
    }

    fn get_buddy_request(&self, id: &str) -> Result<BuddyRequest> {
        get_buddy_request(&mut self.conn.borrow_mut(), id)
    }
    fn buddy_requests_of_user(&self, user: &str) -> Result<Vec<BuddyRequest>> {
        buddy_requests_of_user(&mut self.conn.borrow_mut(), user)
    }
    fn active_buddy_requests_referencing(
        &self,
        reference: BuddyRequestReference<'_>,
    ) -> Result<Vec<BuddyRequest>> {
        active_buddy_requests_referencing(&mut self.conn.borrow_mut(), reference)
    }
    fn cancel_buddy_requests(
        &self,
        _ids: &[&str],
        _reason: &str,
        _updated: Timestamp,
    ) -> Result<usize> {
        Err(read_only())
    }
}

macro_rules! impl_buddy_request_repo {
    ($db:ident) => {
        impl BuddyRequestRepo for $db<'_> {
            fn create_buddy_request(&self, request: &BuddyRequest) -> Result<()> {
                create_buddy_request(&mut self.conn.borrow_mut(), request)
            }
            fn update_buddy_request(&self, request: &BuddyRequest) -> Result<()> {
                update_buddy_request(&mut self.conn.borrow_mut(), request)
            }

            fn get_buddy_request(&self, id: &str) -> Result<BuddyRequest> {
                get_buddy_request(&mut self.conn.borrow_mut(), id)
            }
            fn buddy_requests_of_user(&self, user: &str) -> Result<Vec<BuddyRequest>> {
                buddy_requests_of_user(&mut self.conn.borrow_mut(), user)
            }
            fn active_buddy_requests_referencing(
                &self,
                reference: BuddyRequestReference<'_>,
            ) -> Result<Vec<BuddyRequest>> {
                active_buddy_requests_referencing(&mut self.conn.borrow_mut(), reference)
            }
            fn cancel_buddy_requests(
                &self,
                ids: &[&str],
                reason: &str,
                updated: Timestamp,
            ) -> Result<usize> {
                cancel_buddy_requests(&mut self.conn.borrow_mut(), ids, reason, updated)
            }
        }
    };
}

impl_buddy_request_repo!(ExclusiveDb);
impl_buddy_request_repo!(UnitOfWork);

impl<'a> From<&'a BuddyRequest> for models::NewBuddyRequest<'a> {
    fn from(r: &'a BuddyRequest) -> Self {
        let BuddyRequest {
            id,
            owner,
            experienced_user,
            experienced_route,
            experienced_route_name,
            inexperienced_route,
            inexperienced_route_name,
            meeting_point,
            meeting_point_name,
            meeting_time,
            divorce_point,
            divorce_point_name,
            divorce_time,
            route,
            length,
            average_speed,
            reason,
            review,
            status,
            created,
            updated,
        } = r;
        Self {
            id: id.as_str(),
            owner: owner.as_str(),
            experienced_user: experienced_user.as_str(),
            experienced_route: experienced_route.as_str(),
            experienced_route_name,
            inexperienced_route: inexperienced_route.as_str(),
            inexperienced_route_name,
            meeting_point: meeting_point.to_wkt(),
            meeting_point_name,
            meeting_time: format_date_time(*meeting_time),
            divorce_point: divorce_point.to_wkt(),
            divorce_point_name,
            divorce_time: format_date_time(*divorce_time),
            route: route.to_wkt(),
            length: length.to_meters(),
            average_speed: *average_speed,
            reason,
            review: (*review).into(),
            status: status.as_ref(),
            created_at: created.as_millis(),
            updated_at: updated.as_millis(),
        }
    }
}

fn load_buddy_request(from: models::BuddyRequestEntity) -> Result<BuddyRequest> {
    let models::BuddyRequestEntity {
        rowid: _,
        id,
        owner,
        experienced_user,
        experienced_route,
        experienced_route_name,
        inexperienced_route,
        inexperienced_route_name,
        meeting_point,
        meeting_point_name,
        meeting_time,
        divorce_point,
        divorce_point_name,
        divorce_time,
        route,
        length,
        average_speed,
        reason,
        review,
        status,
        created_at,
        updated_at,
    } = from;
    let status = status
        .parse::<BuddyRequestStatus>()
        .map_err(|_| anyhow!("Invalid buddy request status: {status}"))?;
    let review = ReviewScore::try_from(review).map_err(|err| anyhow!(err))?;
    Ok(BuddyRequest {
        id: id.into(),
        owner: owner.into(),
        experienced_user: experienced_user.into(),
        experienced_route: experienced_route.into(),
        experienced_route_name,
        inexperienced_route: inexperienced_route.into(),
        inexperienced_route_name,
        meeting_point: load_point(&meeting_point)?,
        meeting_point_name,
        meeting_time: load_date_time(&meeting_time)?,
        divorce_point: load_point(&divorce_point)?,
        divorce_point_name,
        divorce_time: load_date_time(&divorce_time)?,
        route: load_line(&route)?,
        length: Distance::from_meters(length),
        average_speed,
        reason,
        review,
        status,
        created: Timestamp::from_millis(created_at),
        updated: Timestamp::from_millis(updated_at),
    })
}

fn create_buddy_request(conn: &mut SqliteConnection, r: &BuddyRequest) -> Result<()> {
    let new_request = models::NewBuddyRequest::from(r);
    diesel::insert_into(schema::buddy_requests::table)
        .values(&new_request)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_buddy_request(conn: &mut SqliteConnection, r: &BuddyRequest) -> Result<()> {
    use schema::buddy_requests::dsl;
    let new_request = models::NewBuddyRequest::from(r);
    let count = diesel::update(dsl::buddy_requests.filter(dsl::id.eq(new_request.id)))
        .set(&new_request)
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_single_row(count)
}

fn get_buddy_request(conn: &mut SqliteConnection, id: &str) -> Result<BuddyRequest> {
    use schema::buddy_requests::dsl;
    let request = dsl::buddy_requests
        .filter(dsl::id.eq(id))
        .first::<models::BuddyRequestEntity>(conn)
        .map_err(from_diesel_err)?;
    load_buddy_request(request)
}

fn buddy_requests_of_user(conn: &mut SqliteConnection, user: &str) -> Result<Vec<BuddyRequest>> {
    use schema::buddy_requests::dsl;
    dsl::buddy_requests
        .filter(dsl::owner.eq(user).or(dsl::experienced_user.eq(user)))
        .order_by((dsl::updated_at.desc(), dsl::rowid.desc()))
        .load::<models::BuddyRequestEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_buddy_request)
        .collect()
}

fn active_buddy_requests_referencing(
    conn: &mut SqliteConnection,
    reference: BuddyRequestReference<'_>,
) -> Result<Vec<BuddyRequest>> {
    use schema::buddy_requests::dsl;
    let mut query = dsl::buddy_requests
        .filter(dsl::status.eq_any(active_status()))
        .into_boxed();
    query = match reference {
        BuddyRequestReference::ExperiencedRoute(id) => {
            query.filter(dsl::experienced_route.eq(id))
        }
        BuddyRequestReference::InexperiencedRoute(id) => {
            query.filter(dsl::inexperienced_route.eq(id))
        }
        BuddyRequestReference::User(id) => {
            query.filter(dsl::owner.eq(id).or(dsl::experienced_user.eq(id)))
        }
    };
    query
        .order_by(dsl::rowid)
        .load::<models::BuddyRequestEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_buddy_request)
        .collect()
}

fn cancel_buddy_requests(
    conn: &mut SqliteConnection,
    ids: &[&str],
    reason: &str,
    updated: Timestamp,
) -> Result<usize> {
    use schema::buddy_requests::dsl;
    if ids.is_empty() {
        return Ok(0);
    }
    diesel::update(
        dsl::buddy_requests
            .filter(dsl::id.eq_any(ids.iter().copied()))
            .filter(dsl::status.eq_any(active_status())),
    )
    .set((
        dsl::status.eq(BuddyRequestStatus::Canceled.as_ref()),
        dsl::reason.eq(reason),
        dsl::updated_at.eq(updated.as_millis()),
    ))
    .execute(conn)
    .map_err(from_diesel_err)
}
