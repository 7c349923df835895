use super::*;

impl InexperiencedRouteRepo for SharedDb<'_> {
    fn create_inexperienced_route(&self, _route: &InexperiencedRoute) -> Result<()> {
        Err(read_only())
    }
    fn update_inexperienced_route(&self, _route: &InexperiencedRoute) -> Result<()> {
        Err(read_only())
    }

    fn get_inexperienced_route(&self, id: &str) -> Result<InexperiencedRoute> {
        get_inexperienced_route(&mut self.conn.borrow_mut(), id)
    }
    fn inexperienced_routes_of_owner(&self, owner: &str) -> Result<Vec<InexperiencedRoute>> {
        inexperienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
    }
    fn delete_inexperienced_routes_of_owner(&self, _owner: &str) -> Result<usize> {
        Err(read_only())
    }
}

macro_rules! impl_inexperienced_route_repo {
    ($db:ident) => {
        impl InexperiencedRouteRepo for $db<'_> {
            fn create_inexperienced_route(&self, route: &InexperiencedRoute) -> Result<()> {
                create_inexperienced_route(&mut self.conn.borrow_mut(), route)
            }
            fn update_inexperienced_route(&self, route: &InexperiencedRoute) -> Result<()> {
                update_inexperienced_route(&mut self.conn.borrow_mut(), route)
            }

            fn get_inexperienced_route(&self, id: &str) -> Result<InexperiencedRoute> {
                get_inexperienced_route(&mut self.conn.borrow_mut(), id)
            }
            fn inexperienced_routes_of_owner(
                &self,
                owner: &str,
            ) -> Result<Vec<InexperiencedRoute>> {
                inexperienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
            }
            fn delete_inexperienced_routes_of_owner(&self, owner: &str) -> Result<usize> {
                delete_inexperienced_routes_of_owner(&mut self.conn.borrow_mut(), owner)
            }
        }
    };
}

impl_inexperienced_route_repo!(ExclusiveDb);
impl_inexperienced_route_repo!(UnitOfWork);

impl<'a> From<&'a InexperiencedRoute> for models::NewInexperiencedRoute<'a> {
    fn from(r: &'a InexperiencedRoute) -> Self {
        let InexperiencedRoute {
            id,
            owner,
            start_point,
            start_point_name,
            end_point,
            end_point_name,
            arrival_datetime,
            radius,
            notify_owner,
            reusable,
            name,
            deleted,
        } = r;
        Self {
            id: id.as_str(),
            owner: owner.as_str(),
            start_point: start_point.to_wkt(),
            start_point_name,
            end_point: end_point.to_wkt(),
            end_point_name,
            arrival_datetime: format_date_time(*arrival_datetime),
            radius: *radius,
            notify_owner: *notify_owner,
            reusable: *reusable,
            name,
            deleted: *deleted,
        }
    }
}

fn load_inexperienced_route(from: models::InexperiencedRouteEntity) -> Result<InexperiencedRoute> {
    let models::InexperiencedRouteEntity {
        rowid: _,
        id,
        owner,
        start_point,
        start_point_name,
        end_point,
        end_point_name,
        arrival_datetime,
        radius,
        notify_owner,
        reusable,
        name,
        deleted,
    } = from;
    Ok(InexperiencedRoute {
        id: id.into(),
        owner: owner.into(),
        start_point: load_point(&start_point)?,
        start_point_name,
        end_point: load_point(&end_point)?,
        end_point_name,
        arrival_datetime: load_date_time(&arrival_datetime)?,
        radius,
        notify_owner,
        reusable,
        name,
        deleted,
    })
}

fn create_inexperienced_route(conn: &mut SqliteConnection, r: &InexperiencedRoute) -> Result<()> {
    let new_route = models::NewInexperiencedRoute::from(r);
    diesel::insert_into(schema::inexperienced_routes::table)
        .values(&new_route)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_inexperienced_route(conn: &mut SqliteConnection, r: &InexperiencedRoute) -> Result<()> {
    use schema::inexperienced_routes::dsl;
    let new_route = models::NewInexperiencedRoute::from(r);
    let count = diesel::update(dsl::inexperienced_routes.filter(dsl::id.eq(new_route.id)))
        .set(&new_route)
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_single_row(count)
}

fn get_inexperienced_route(conn: &mut SqliteConnection, id: &str) -> Result<InexperiencedRoute> {
    use schema::inexperienced_routes::dsl;
    let route = dsl::inexperienced_routes
        .filter(dsl::id.eq(id))
        .first::<models::InexperiencedRouteEntity>(conn)
        .map_err(from_diesel_err)?;
    load_inexperienced_route(route)
}

fn inexperienced_routes_of_owner(
    conn: &mut SqliteConnection,
    owner: &str,
) -> Result<Vec<InexperiencedRoute>> {
    use schema::inexperienced_routes::dsl;
    dsl::inexperienced_routes
        .filter(dsl::owner.eq(owner))
        .filter(dsl::deleted.eq(false))
        .order_by(dsl::rowid)
        .load::<models::InexperiencedRouteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_inexperienced_route)
        .collect()
}

fn delete_inexperienced_routes_of_owner(
    conn: &mut SqliteConnection,
    owner: &str,
) -> Result<usize> {
    use schema::inexperienced_routes::dsl;
    diesel::update(
        dsl::inexperienced_routes
            .filter(dsl::owner.eq(owner))
            .filter(dsl::deleted.eq(false)),
    )
    .set(dsl::deleted.eq(true))
    .execute(conn)
    .map_err(from_diesel_err)
}
