//! Конфигурация приложения.
//!
//! Встроенный `DEFAULT_CONFIG` можно переопределить TOML-документом,
//! сохранённым в localStorage под ключом [`STORAGE_KEY`].

use leptos::prelude::*;
use serde::Deserialize;

pub const STORAGE_KEY: &str = "farmacia_config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
    pub table: TableConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    pub filename_prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    /// Колонка, по которой строки группируются в раскрываемые группы
    pub group_column: String,
    pub group_header: String,
    /// Колонки, которые показываются в строке группы (из первой строки группы)
    pub summary_columns: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub default_warehouse_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://127.0.0.1:8000"

[logging]
level = "debug"

[export]
filename_prefix = "Reporte_Farmacia"

[table]
group_column = "Pre_Venta"
group_header = "Pre-Venta"
summary_columns = ["Pre-venta", "Estado", "Fecha", "Vendedor", "Tipo_Receta"]

[search]
default_warehouse_id = "4"
"#;

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    pub fn log_level(&self) -> log::Level {
        self.logging.level.parse().unwrap_or(log::Level::Debug)
    }
}

/// Choose between an override document and the embedded default.
pub fn resolve_config(override_toml: Option<&str>) -> Result<AppConfig, ConfigError> {
    match override_toml {
        Some(contents) => match AppConfig::parse(contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("Ignoring {} override: {}", STORAGE_KEY, e);
                AppConfig::embedded()
            }
        },
        None => AppConfig::embedded(),
    }
}

/// Load configuration
///
/// Search order:
/// 1. localStorage[`farmacia_config`]
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    resolve_config(stored.as_deref())
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig context not found")
}
