use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "INVENTORY_ENV";
const CONFIG_DIR_ENV: &str = "INVENTORY_CONFIG_DIR";

/// Top-level configuration loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay
    /// and `INVENTORY_*` variables (`INVENTORY_API__BASE_URL`, ...).
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{environment}.toml"));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("INVENTORY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        cfg.try_deserialize()
            .with_context(|| "failed to deserialize configuration")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "ApiSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiSettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiSettings {
    fn default_base_url() -> String {
        "http://localhost:8080".to_string()
    }

    fn default_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    /// Pages `books list` loads when `--pages` is not given.
    #[serde(default = "UiSettings::default_pages")]
    pub pages: u32,
}

impl UiSettings {
    fn default_pages() -> u32 {
        1
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            pages: Self::default_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert_eq!(settings.api.timeout_ms, 15000);
        assert_eq!(settings.ui.pages, 1);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[api]\nbase_url = \"http://books.internal:9000\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let settings: Settings = cfg.try_deserialize().unwrap();
        assert_eq!(settings.api.base_url, "http://books.internal:9000");
        assert_eq!(settings.api.timeout_ms, 15000);
        assert_eq!(settings.ui.pages, 1);
    }
}
