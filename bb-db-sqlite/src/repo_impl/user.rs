use super::*;

impl UserRepo for SharedDb<'_> {
    fn create_user(&self, _user: &User) -> Result<()> {
        Err(read_only())
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        Err(read_only())
    }
    fn delete_user(&self, _id: &str) -> Result<()> {
        Err(read_only())
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
}

macro_rules! impl_user_repo {
    ($db:ident) => {
        impl UserRepo for $db<'_> {
            fn create_user(&self, user: &User) -> Result<()> {
                create_user(&mut self.conn.borrow_mut(), user)
            }
            fn update_user(&self, user: &User) -> Result<()> {
                update_user(&mut self.conn.borrow_mut(), user)
            }
            fn delete_user(&self, id: &str) -> Result<()> {
                delete_user(&mut self.conn.borrow_mut(), id)
            }

            fn get_user(&self, id: &str) -> Result<User> {
                get_user(&mut self.conn.borrow_mut(), id)
            }
        }
    };
}

impl_user_repo!(ExclusiveDb);
impl_user_repo!(UnitOfWork);

impl<'a> From<&'a User> for models::NewUser<'a> {
    fn from(u: &'a User) -> Self {
        let User {
            id,
            name,
            email,
            bio,
            photo,
            joined,
            statistics,
            preferences,
        } = u;
        Self {
            id: id.as_str(),
            name,
            email: email.as_deref(),
            bio,
            photo: photo.as_deref(),
            joined_at: joined.as_millis(),
            distance: statistics.distance,
            helped_count: statistics.helped_count.into(),
            users_helped: statistics.users_helped.into(),
            rating_sum: statistics.rating_sum,
            notify: preferences.notify,
        }
    }
}

impl From<models::UserEntity> for User {
    fn from(from: models::UserEntity) -> Self {
        let models::UserEntity {
            rowid: _,
            id,
            name,
            email,
            bio,
            photo,
            joined_at,
            distance,
            helped_count,
            users_helped,
            rating_sum,
            notify,
        } = from;
        Self {
            id: id.into(),
            name,
            email,
            bio,
            photo,
            joined: Timestamp::from_millis(joined_at),
            statistics: UserStatistics {
                distance,
                helped_count: load_count(helped_count),
                users_helped: load_count(users_helped),
                rating_sum,
            },
            preferences: Preferences { notify },
        }
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = models::NewUser::from(u);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = models::NewUser::from(u);
    let count = diesel::update(dsl::users.filter(dsl::id.eq(new_user.id)))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_single_row(count)
}

fn delete_user(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::delete(dsl::users.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    expect_single_row(count)
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}
