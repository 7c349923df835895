//! # bb-db-sqlite
//!
//! SQLite storage of bikebuddy.
//!
//! Reads run on a [`SharedDb`], any number of them at once. Every
//! write runs inside [`ExclusiveDb::transaction`] on a [`UnitOfWork`]
//! while no other connection is handed out.

#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use bb_core::{repositories as repo, usecases as uc};
use diesel::{
    connection::SimpleConnection as _,
    r2d2::{self, CustomizeConnection},
    sqlite::SqliteConnection,
    Connection as _,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
    time::Duration,
};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const IN_MEMORY: &str = ":memory:";

/// How long a connection waits for a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// Read access to all repositories.
///
/// Writing through this connection fails.
pub struct SharedDb<'a> {
    _pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// The only connection with write access while it is alive.
pub struct ExclusiveDb<'a> {
    _pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// Repositories inside a running transaction.
pub struct UnitOfWork<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl ExclusiveDb<'_> {
    /// Commits if `f` succeeds and rolls back otherwise.
    ///
    /// The error of `f` is returned as is.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&UnitOfWork) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        let mut rejected = None;
        let conn: &mut SqliteConnection = self.conn.get_mut();
        let result = conn.transaction(|conn| {
            let unit = UnitOfWork {
                conn: RefCell::new(conn),
            };
            f(&unit).map_err(|err| {
                rejected = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        match (result, rejected) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(err)) => {
                log::debug!("Rolled back transaction ({}): {err}", err.status_code());
                Err(err)
            }
            (Err(diesel::result::Error::NotFound), None) => Err(repo::Error::NotFound.into()),
            (Err(err), None) => {
                log::warn!("Transaction failed: {err}");
                Err(repo::Error::Other(err.into()).into())
            }
        }
    }

    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.conn.borrow_mut()
    }
}

/// Settings that SQLite keeps per connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA synchronous = NORMAL;",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Settings that are stored in the database file itself.
fn configure_database(conn: &mut SqliteConnection, in_memory: bool) -> Fallible<()> {
    conn.batch_execute("PRAGMA encoding = 'UTF-8';")?;
    if !in_memory {
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
    }
    Ok(())
}

/// The pool of database connections.
///
/// The pool is locked for writing while an [`ExclusiveDb`] is alive,
/// so that SQLite never reports a locked database to a writer.
#[derive(Clone)]
pub struct Connections {
    pool: Arc<RwLock<ConnectionPool>>,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        if pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        // Every connection to :memory: opens a database of its own
        let in_memory = url == IN_MEMORY;
        let pool_size = if in_memory && pool_size > 1 {
            log::warn!("Using a single connection for the in-memory database instead of {pool_size}");
            1
        } else {
            pool_size
        };
        // r2d2 retries silently on inaccessible files
        SqliteConnection::establish(url)
            .map_err(|err| anyhow!("Failed to open SQLite database {url}: {err}"))?;
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
            }))
            .build(ConnectionManager::new(url))?;
        configure_database(&mut *pool.get()?, in_memory)?;
        log::debug!("Opened SQLite database {url} with {pool_size} connection(s)");
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<SharedDb> {
        let pool = self.pool.read();
        let conn = pool
            .get()
            .map_err(|err| anyhow!("No database connection for reading available: {err}"))?;
        Ok(SharedDb {
            _pool: pool,
            conn: RefCell::new(conn),
        })
    }

    pub fn exclusive(&self) -> Fallible<ExclusiveDb> {
        let pool = self.pool.write();
        let conn = pool
            .get()
            .map_err(|err| anyhow!("No database connection for writing available: {err}"))?;
        Ok(ExclusiveDb {
            _pool: pool,
            conn: RefCell::new(conn),
        })
    }
}

pub fn run_embedded_database_migrations(db: ExclusiveDb<'_>) -> Fallible<()> {
    let mut conn = db.sqlite_conn();
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    if applied.is_empty() {
        log::debug!("The database schema is up to date");
    }
    for version in applied {
        log::info!("Applied database migration {version}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_core::{entities::*, repositories::*};

    fn migrated() -> Connections {
        let connections = Connections::init(IN_MEMORY, 4).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
        connections
    }

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: id.to_owned(),
            email: None,
            bio: String::new(),
            photo: None,
            joined: Timestamp::from_millis(0),
            statistics: UserStatistics::default(),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn commit_successful_transaction() {
        let connections = migrated();
        connections
            .exclusive()
            .unwrap()
            .transaction(|db| db.create_user(&user("jane")))
            .unwrap();
        assert!(connections.shared().unwrap().get_user("jane").is_ok());
    }

    #[test]
    fn roll_back_failed_transaction() {
        let connections = migrated();
        let err = connections
            .exclusive()
            .unwrap()
            .transaction(|db| {
                db.create_user(&user("jane"))?;
                Err::<(), _>(uc::Error::Conflict("stop".into()))
            })
            .unwrap_err();
        assert!(matches!(err, uc::Error::Conflict(_)));
        assert!(matches!(
            connections.shared().unwrap().get_user("jane"),
            Err(repo::Error::NotFound)
        ));
    }

    #[test]
    fn no_writes_through_shared_connection() {
        let connections = migrated();
        assert!(connections
            .shared()
            .unwrap()
            .create_user(&user("jane"))
            .is_err());
    }

    #[test]
    fn reject_empty_pool() {
        assert!(Connections::init(IN_MEMORY, 0).is_err());
    }
}
