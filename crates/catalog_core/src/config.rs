//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve store path, log settings and the admin secret in one place.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `db_path` is never empty.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::product_store::StoreLocation;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CATALOG_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CATALOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";
pub const ADMIN_SECRET_ENV: &str = "CATALOG_ADMIN_SECRET";

const DEFAULT_DB_FILE_NAME: &str = "catalog.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "catalog database path must not be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Explicit values taking precedence over the environment (e.g. CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Effective catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
    /// Mutating admin commands are refused when `None`.
    pub admin_secret: Option<String>,
}

impl CatalogConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), &ConfigOverrides::default())
    }

    /// Resolves settings from the environment, letting `overrides` win.
    pub fn from_env_with(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    /// Resolves settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(lookup, &ConfigOverrides::default())
    }

    /// Resolves settings through `lookup`, then applies `overrides` and validates.
    ///
    /// An overridden value is never read from `lookup`.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let db_path = match &overrides.db_path {
            Some(path) => path.clone(),
            None => value(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
        };

        let log_level = match overrides.log_level.clone().or_else(|| value(LOG_LEVEL_ENV)) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = overrides
            .log_dir
            .clone()
            .or_else(|| value(LOG_DIR_ENV).map(PathBuf::from));

        let config = Self {
            db_path,
            log_level,
            log_dir,
            admin_secret: value(ADMIN_SECRET_ENV),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants a usable configuration must hold.
    ///
    /// An empty `db_path` is rejected: SQLite treats it as a private temporary
    /// database that is discarded on close.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let blank_path = self
            .db_path
            .to_str()
            .map_or(false, |path| path.trim().is_empty());
        if blank_path {
            return Err(ConfigError::EmptyDbPath);
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }

    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::File(self.db_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CatalogConfig, ConfigError, ConfigOverrides, ADMIN_SECRET_ENV, DB_PATH_ENV,
        LOG_LEVEL_ENV,
    };
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(pairs: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = resolve(&[]).unwrap();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("catalog.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.admin_secret, None);
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config = resolve(&[(DB_PATH_ENV, "   "), (ADMIN_SECRET_ENV, "")]).unwrap();
        assert!(config.db_path.ends_with("catalog.sqlite3"));
        assert_eq!(config.admin_secret, None);
    }

    #[test]
    fn explicit_values_are_normalized() {
        let config = resolve(&[
            (DB_PATH_ENV, " /var/lib/catalog/products.db "),
            (LOG_LEVEL_ENV, "Warning"),
            (ADMIN_SECRET_ENV, "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/catalog/products.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.admin_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn invalid_level_and_relative_log_dir_are_rejected() {
        assert!(matches!(
            resolve(&[(LOG_LEVEL_ENV, "loud")]),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            resolve(&[(super::LOG_DIR_ENV, "logs")]),
            Err(ConfigError::RelativeLogDir(_))
        ));
    }

    #[test]
    fn empty_db_path_override_is_rejected() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("")),
            ..ConfigOverrides::default()
        };
        assert_eq!(
            CatalogConfig::resolve(|_| None, &overrides),
            Err(ConfigError::EmptyDbPath)
        );

        let mut config = resolve(&[]).unwrap();
        config.db_path = PathBuf::from("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyDbPath));
    }

    #[test]
    fn overrides_win_over_broken_environment_values() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/srv/catalog.db")),
            log_level: Some("error".to_string()),
            log_dir: None,
        };
        let config = CatalogConfig::resolve(
            |key| (key == LOG_LEVEL_ENV).then(|| "loud".to_string()),
            &overrides,
        )
        .unwrap();
        assert_eq!(config.log_level, "error");
        assert_eq!(config.db_path, PathBuf::from("/srv/catalog.db"));
    }

    #[test]
    fn relative_log_dir_override_is_rejected() {
        let overrides = ConfigOverrides {
            log_dir: Some(PathBuf::from("logs")),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            CatalogConfig::resolve(|_| None, &overrides),
            Err(ConfigError::RelativeLogDir(_))
        ));
    }
}
