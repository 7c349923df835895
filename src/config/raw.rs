use anyhow::Result;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("bikebuddy.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
}

impl Config {
    pub fn try_default() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG_FILE)?)
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: Option<String>,
    pub connection_pool_size: Option<u8>,
    pub run_migrations: Option<bool>,
}
