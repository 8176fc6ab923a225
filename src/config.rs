use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    pub jwt_secret: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_port() -> u16 {
    8000
}

fn load_from_lookup<F>(lookup: F) -> Result<Config, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let database_dsn =
        lookup("PG_DSN").ok_or("PG_DSN environment variable is required")?;

    let jwt_secret =
        lookup("JWT_SECRET").ok_or("JWT_SECRET environment variable is required")?;

    let port = match lookup("PORT") {
        Some(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        None => default_port(),
    };

    Ok(Config {
        database_dsn,
        jwt_secret,
        port,
    })
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    load_from_lookup(|key| env::var(key).ok())
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

const DEFAULT_PATH: &str = "config.yaml";
const EXAMPLE_PATH: &str = "config.example.yaml";

/// Files tried in order: the requested one, then the defaults.
fn config_candidates(requested: &str) -> Vec<&str> {
    let mut candidates = vec![requested];
    for fallback in [DEFAULT_PATH, EXAMPLE_PATH] {
        if !candidates.contains(&fallback) {
            candidates.push(fallback);
        }
    }
    candidates
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let requested = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
    let candidates = config_candidates(&requested);

    if let Some(path) = candidates.iter().find(|path| Path::new(path).exists()) {
        if *path != requested {
            tracing::warn!("Config file '{}' not found, using '{}'", requested, path);
        }
        if *path == EXAMPLE_PATH {
            tracing::warn!("'{}' holds placeholder values and should be replaced", EXAMPLE_PATH);
        }
        return load_from_file(path);
    }

    tracing::info!("No config file found, reading configuration from environment variables");
    load_from_env().map_err(|e| {
        format!(
            "no config file among {candidates:?} and environment variables are incomplete: {e}"
        )
        .into()
    })
}
