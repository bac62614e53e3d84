use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default badge color for new categories, matching the web UI.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Path of the local store database file.
    pub store_path: String,
    /// User id all commands run as.
    pub user: String,
    /// Badge color assigned to new categories.
    pub category_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: "notemark.db".to_string(),
            user: "local".to_string(),
            category_color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }
}

pub fn load_config(path: &PathBuf) -> Config {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        fs::write(path, toml).expect("Failed to write default config");
        return config;
    }

    let content = fs::read_to_string(path).expect("Failed to read config file");
    toml::from_str(&content).expect("Failed to parse config file")
}
