use super::*;

impl ExperiencedRouteRepo for SharedDb<'_> {
    fn create_experienced_route(&self, _route: &ExperiencedRoute) -> Result<()> {
        Err(read_only())
    }
    fn update_experienced_route(&self, _route: &ExperiencedRoute) -> Result<()> {
        Err(read_only())
    }

    fn get_experienced_route(&self, id: &str) -> Result<ExperiencedRoute> {
        get_experienced_route(&mut self.conn.borrow_mut(), id)
    }
    fn experienced_routes_of_owner(&self, owner: &str) -> Result<Vec<ExperiencedRoute>> {
        experienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
    }
    fn delete_experienced_routes_of_owner(&self, _owner: &str) -> Result<usize> {
        Err(read_only())
    }
    fn experienced_route_candidates(
        &self,
        requester: &str,
        day: Weekday,
    ) -> Result<Vec<ExperiencedRoute>> {
        experienced_route_candidates(&mut self.conn.borrow_mut(), requester, day)
    }
}

macro_rules! impl_experienced_route_repo {
    ($db:ident) => {
        impl ExperiencedRouteRepo for $db<'_> {
            fn create_experienced_route(&self, route: &ExperiencedRoute) -> Result<()> {
                create_experienced_route(&mut self.conn.borrow_mut(), route)
            }
            fn update_experienced_route(&self, route: &ExperiencedRoute) -> Result<()> {
                update_experienced_route(&mut self.conn.borrow_mut(), route)
            }

            fn get_experienced_route(&self, id: &str) -> Result<ExperiencedRoute> {
                get_experienced_route(&mut self.conn.borrow_mut(), id)
            }
            fn experienced_routes_of_owner(&self, owner: &str) -> Result<Vec<ExperiencedRoute>> {
                experienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
            }
            fn delete_experienced_routes_of_owner(&self, owner: &str) -> Result<usize> {
                delete_experienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
            }
            fn experienced_route_candidates(
                &self,
                requester: &str,
                day: Weekday,
            ) -> Result<Vec<ExperiencedRoute>> {
                experienced_route_candidates(&mut self.conn.borrow_mut(), requester, day)
            }
        }
    };
}

impl_experienced_route_repo!(ExclusiveDb);
impl_experienced_route_repo!(UnitOfWork);

impl<'a> From<&'a ExperiencedRoute> for models::NewExperiencedRoute<'a> {
    fn from(r: &'a ExperiencedRoute) -> Self {
        let ExperiencedRoute {
            id,
            owner,
            route,
            departure_time,
            arrival_time,
            days,
            start_point_name,
            end_point_name,
            name,
            length,
            deleted,
        } = r;
        Self {
            id: id.as_str(),
            owner: owner.as_str(),
            route: route.to_wkt(),
            departure_time: format_time_of_day(*departure_time),
            arrival_time: format_time_of_day(*arrival_time),
            days: days.bits().into(),
            start_point_name,
            end_point_name,
            name,
            length: length.to_meters(),
            deleted: *deleted,
        }
    }
}

fn load_experienced_route(from: models::ExperiencedRouteEntity) -> Result<ExperiencedRoute> {
    let models::ExperiencedRouteEntity {
        rowid: _,
        id,
        owner,
        route,
        departure_time,
        arrival_time,
        days,
        start_point_name,
        end_point_name,
        name,
        length,
        deleted,
    } = from;
    let days = u8::try_from(days).map_err(|_| anyhow!("Invalid weekdays: {days}"))?;
    Ok(ExperiencedRoute {
        id: id.into(),
        owner: owner.into(),
        route: load_line(&route)?,
        departure_time: load_time_of_day(&departure_time)?,
        arrival_time: load_time_of_day(&arrival_time)?,
        days: Weekdays::from_bits(days),
        start_point_name,
        end_point_name,
        name,
        length: Distance::from_meters(length),
        deleted,
    })
}

fn create_experienced_route(conn: &mut SqliteConnection, r: &ExperiencedRoute) -> Result<()> {
    let new_route = models::NewExperiencedRoute::from(r);
    diesel::insert_into(schema::experienced_routes::table)
        .values(&new_route)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_experienced_route(conn: &mut SqliteConnection, r: &ExperiencedRoute) -> Result<()> {
    use schema::experienced_routes::dsl;
    let new_route = models::NewExperiencedRoute::from(r);
    let count = diesel::update(dsl::experienced_routes.filter(dsl::id.eq(new_route.id)))
        .set(&new_route)
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_single_row(count)
}

fn get_experienced_route(conn: &mut SqliteConnection, id: &str) -> Result<ExperiencedRoute> {
    use schema::experienced_routes::dsl;
    let route = dsl::experienced_routes
        .filter(dsl::id.eq(id))
        .first::<models::ExperiencedRouteEntity>(conn)
        .map_err(from_diesel_err)?;
    load_experienced_route(route)
}

fn experienced_routes_of_owner(
    conn: &mut SqliteConnection,
    owner: &str,
) -> Result<Vec<ExperiencedRoute>> {
    use schema::experienced_routes::dsl;
    dsl::experienced_routes
        .filter(dsl::owner.eq(owner))
        .filter(dsl::deleted.eq(false))
        .order_by(dsl::rowid)
        .load::<models::ExperiencedRouteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_experienced_route)
        .collect()
}

fn delete_experienced_routes_of_owner(conn: &mut SqliteConnection, owner: &str) -> Result<usize> {
    use schema::experienced_routes::dsl;
    diesel::update(
        dsl::experienced_routes
            .filter(dsl::owner.eq(owner))
            .filter(dsl::deleted.eq(false)),
    )
    .set(dsl::deleted.eq(true))
    .execute(conn)
    .map_err(from_diesel_err)
}

fn experienced_route_candidates(
    conn: &mut SqliteConnection,
    requester: &str,
    day: Weekday,
) -> Result<Vec<ExperiencedRoute>> {
    use schema::experienced_routes::dsl;
    let routes = dsl::experienced_routes
        .filter(dsl::deleted.eq(false))
        .filter(dsl::owner.ne(requester))
        .order_by(dsl::rowid)
        .load::<models::ExperiencedRouteEntity>(conn)
        .map_err(from_diesel_err)?;
    // The weekday bit mask is evaluated after loading
    let mut candidates = Vec::with_capacity(routes.len());
    for route in routes {
        let route = load_experienced_route(route)?;
        if route.days.contains(day) {
            candidates.push(route);
        }
    }
    Ok(candidates)
}
