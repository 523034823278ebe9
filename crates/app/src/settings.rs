//! Handles settings for the application. Configuration is written in
//! `settings.toml`; environment variables prefixed with `PRESAGIO`
//! override the file, so the advisor key can stay out of it
//! (`PRESAGIO__ADVISOR__API_KEY`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Advisor {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub advisor: Advisor,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("PRESAGIO").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
