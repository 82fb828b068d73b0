use std::{env, str::FromStr};

/// Where per-session key/value state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// The `sessions` table, shared by every process using the database.
    Database,
    /// A process-local map; sessions are lost on restart.
    Memory,
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!(
                "SESSION_BACKEND must be `database` or `memory`, got `{other}`"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_backend: SessionBackend,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_backend = match env::var("SESSION_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => SessionBackend::Database,
        };
        Ok(Self {
            port,
            database_url,
            host,
            session_backend,
        })
    }
}
