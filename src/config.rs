use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::SourceOptions;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "nomina.json";

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Everything the viewer needs to find and read the export. Missing keys
/// fall back to the defaults of the standard payroll layout.
///
/// ```json
/// {
///   "source_path": "SANTA ROSA ASIMILADOS 2025A.csv",
///   "header_row": 7,
///   "encoding": "latin1",
///   "schema": { "shift": "TURNO" },
///   "max_hours": 40
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_path: PathBuf,
    #[serde(flatten)]
    pub source: SourceOptions,
    /// Load ceiling used by the progress bars and card colours.
    pub max_hours: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source_path: PathBuf::from("SANTA ROSA ASIMILADOS 2025A.csv"),
            source: SourceOptions::default(),
            max_hours: 40.0,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(
            config.max_hours > 0.0,
            "max_hours must be positive, got {}",
            config.max_hours
        );
        Ok(config)
    }

    /// Read `nomina.json` from `dir` if it exists, otherwise use defaults.
    /// A broken config is logged and replaced by the defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::data::loader::TextEncoding;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.source.header_row, 7);
        assert_eq!(config.source.encoding, TextEncoding::Latin1);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "source_path": "otro.csv", "encoding": "utf-8", "schema": { "shift": "JORNADA" } }"#,
        )
        .unwrap();

        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.source_path, PathBuf::from("otro.csv"));
        assert_eq!(config.source.encoding, TextEncoding::Utf8);
        assert_eq!(config.source.header_row, 7);
        assert_eq!(config.source.schema.shift, "JORNADA");
        assert_eq!(config.source.schema.subject, "UNIDAD DE APRENDIZAJE CURRICULAR/ASIGNATURA");
        assert_eq!(config.max_hours, 40.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn rejects_non_positive_ceiling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "max_hours": 0 }"#).unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("max_hours"));
    }
}
