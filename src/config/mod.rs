use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "bikebuddy.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db: Db,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
    pub run_migrations: bool,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::try_default()
                }
                _ => Err(err.into()),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db } = from;
        let defaults = raw::Config::try_default()?
            .db
            .ok_or_else(|| anyhow!("Missing default database configuration"))?;
        let raw::Db {
            connection_sqlite,
            connection_pool_size,
            run_migrations,
        } = db.unwrap_or_default();
        let db = Db {
            conn_sqlite: connection_sqlite
                .or(defaults.connection_sqlite)
                .ok_or_else(|| anyhow!("Missing SQLite connection"))?,
            conn_pool_size: connection_pool_size
                .or(defaults.connection_pool_size)
                .unwrap_or(1),
            run_migrations: run_migrations.or(defaults.run_migrations).unwrap_or(true),
        };
        if db.conn_pool_size == 0 {
            return Err(anyhow!("The connection pool size must be at least 1"));
        }
        Ok(Self { db })
    }
}
