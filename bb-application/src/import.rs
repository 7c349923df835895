use super::*;
use bb_core::{repositories::UserRepo, util::validate::ValidationError};

/// Users and routes to be created at once, e.g. when
/// setting up a new database.
#[derive(Debug, Default, Clone)]
pub struct Seed {
    pub users: Vec<NewUser>,
    pub experienced_routes: Vec<NewExperiencedRoute>,
    pub inexperienced_routes: Vec<NewInexperiencedRoute>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub experienced_routes: usize,
    pub inexperienced_routes: usize,
}

fn seed_owner<R: UserRepo>(
    repo: &R,
    owner: Option<&str>,
) -> std::result::Result<String, usecases::Error> {
    let owner = owner
        .filter(|owner| !owner.trim().is_empty())
        .ok_or(ValidationError::Missing("owner"))?;
    if repo.try_get_user(owner)?.is_none() {
        return Err(usecases::Error::NotFound(format!(
            "The owner {owner} of a route could not be found"
        )));
    }
    Ok(owner.to_owned())
}

/// Imports everything or nothing.
pub fn import_seed(connections: &sqlite::Connections, seed: Seed) -> Result<ImportSummary> {
    let Seed {
        users,
        experienced_routes,
        inexperienced_routes,
    } = seed;
    Ok(connections.exclusive()?.transaction(|conn| {
        let mut summary = ImportSummary::default();
        for new_user in users {
            usecases::create_user(conn, new_user)?;
            summary.users += 1;
        }
        for new_route in experienced_routes {
            let owner = seed_owner(conn, new_route.owner.as_deref())?;
            usecases::create_experienced_route(conn, &owner, new_route)?;
            summary.experienced_routes += 1;
        }
        for new_route in inexperienced_routes {
            let owner = seed_owner(conn, new_route.owner.as_deref())?;
            usecases::create_inexperienced_route(conn, &owner, new_route)?;
            summary.inexperienced_routes += 1;
        }
        info!(
            "Imported {} users, {} experienced and {} inexperienced routes",
            summary.users, summary.experienced_routes, summary.inexperienced_routes
        );
        Ok::<_, usecases::Error>(summary)
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn seed() -> flows::Seed {
        flows::Seed {
            users: vec![new_user("erika", "Erika"), new_user("ian", "Ian")],
            experienced_routes: vec![NewExperiencedRoute {
                owner: Some("erika".into()),
                ..friday_route()
            }],
            inexperienced_routes: vec![NewInexperiencedRoute {
                owner: Some("ian".into()),
                ..friday_query_route()
            }],
        }
    }

    #[test]
    fn import_users_and_routes() {
        let fixture = BackendFixture::new();
        let summary = flows::import_seed(&fixture.db_connections, seed()).unwrap();
        assert_eq!(
            summary,
            flows::ImportSummary {
                users: 2,
                experienced_routes: 1,
                inexperienced_routes: 1,
            }
        );
        assert_eq!(
            flows::experienced_routes_of_owner(&fixture.db_connections, "erika")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn roll_back_incomplete_import() {
        let fixture = BackendFixture::new();
        let mut seed = seed();
        seed.inexperienced_routes[0].owner = Some("nobody".into());
        let err = flows::import_seed(&fixture.db_connections, seed).unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(fixture.try_get_user("erika").is_none());
    }
}
