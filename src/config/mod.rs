use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Keys written by `init`; `config --check` reports the ones a file lacks.
pub const CONFIG_KEYS: [&str; 6] = [
    "export_dir",
    "file_prefix",
    "sheet_label",
    "distance_unit",
    "default_format",
    "color",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_sheet_label")]
    pub sheet_label: String,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
    #[serde(default)]
    pub default_format: ExportFormat,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_export_dir() -> String {
    ".".to_string()
}
fn default_file_prefix() -> String {
    "logbook".to_string()
}
fn default_sheet_label() -> String {
    "Sheet1".to_string()
}
fn default_distance_unit() -> String {
    "KM".to_string()
}
fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            file_prefix: default_file_prefix(),
            sheet_label: default_sheet_label(),
            distance_unit: default_distance_unit(),
            default_format: ExportFormat::default(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("logbook")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".logbook")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("logbook.conf")
    }

    /// `custom` when given, the standard location otherwise
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom.map(PathBuf::from).unwrap_or_else(Self::config_file)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load(custom: Option<&str>) -> AppResult<Self> {
        Self::load_from(&Self::resolve_path(custom))
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Keys of [`CONFIG_KEYS`] absent from the file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let yaml: Value = serde_yaml::from_str(&content)?;

        let missing = match yaml.as_mapping() {
            Some(map) => CONFIG_KEYS
                .iter()
                .copied()
                .filter(|k| !map.contains_key(Value::String(k.to_string())))
                .collect(),
            None => CONFIG_KEYS.to_vec(),
        };

        Ok(missing)
    }
}
