//! Application configuration

pub mod menu;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use menu::MenuFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the SQLite database
    pub data_dir: PathBuf,
    /// Optional TOML menu replacing the built-in dishes
    pub menu_file: Option<PathBuf>,
    /// Upsert the catalog into the `dishes` table at startup
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("CUIA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            menu_file: env::var("MENU_FILE").ok().map(PathBuf::from),
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("cuia.db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            menu_file: None,
            seed_on_startup: true,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
    }

    #[test]
    fn test_database_path() {
        let config = Config {
            data_dir: PathBuf::from("/var/lib/cuia"),
            ..Config::default()
        };
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/cuia/cuia.db"));
    }
}
