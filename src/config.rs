use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Env var naming a JSON config file.
pub const CONFIG_ENV: &str = "AI_JOBS_DASHBOARD_CONFIG";
/// Env var overriding the dataset loaded at startup.
pub const DATA_ENV: &str = "AI_JOBS_DATA";
/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "ai_jobs_dashboard.json";

pub const DEFAULT_DATASET: &str = "AI_job_data.csv";
pub const EXPORT_FILE_NAME: &str = "filtered_ai_jobs.csv";

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset tried at startup before asking the user for a file.
    pub default_dataset: PathBuf,
    /// Suggested name in the export dialog.
    pub export_file_name: String,
    /// Rows shown in the "Sample Data" table.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_dataset: PathBuf::from(DEFAULT_DATASET),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            preview_rows: 5,
        }
    }
}

impl DashboardConfig {
    /// Resolve the config: `$AI_JOBS_DASHBOARD_CONFIG`, else
    /// `./ai_jobs_dashboard.json` if it exists, else defaults.  `$AI_JOBS_DATA`
    /// overrides the dataset path in every case.
    pub fn load() -> Result<Self> {
        let file = match env::var_os(CONFIG_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()),
        };

        let mut cfg = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(data) = env::var_os(DATA_ENV) {
            cfg.default_dataset = PathBuf::from(data);
        }
        Ok(cfg)
    }

    /// Like [`load`](Self::load), but a broken config only costs a warning.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Ignoring dashboard config: {e:#}");
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid dashboard config JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_contract() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.default_dataset, PathBuf::from("AI_job_data.csv"));
        assert_eq!(cfg.export_file_name, "filtered_ai_jobs.csv");
        assert_eq!(cfg.preview_rows, 5);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "preview_rows": 10 }"#).unwrap();
        assert_eq!(cfg.preview_rows, 10);
        assert_eq!(cfg.export_file_name, EXPORT_FILE_NAME);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{ preview_rows: ").is_err());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = DashboardConfig::from_file(Path::new("nope/dashboard.json")).unwrap_err();
        assert!(format!("{err:#}").contains("nope/dashboard.json"));
    }
}
