//! Application configuration for the climate robotics map.
//!
//! User config lives at `~/.climatemap/climatemap.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClimateMapError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "climatemap.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".climatemap";

/// Placeholder substituted with the website hostname in icon templates.
const HOST_PLACEHOLDER: &str = "{host}";

// ---------------------------------------------------------------------------
// Config structs (matching climatemap.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Spreadsheet export source.
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Icon service settings.
    #[serde(default)]
    pub icons: IconConfig,

    /// Extra country aliases merged over the built-in coordinate table.
    #[serde(default)]
    pub countries: BTreeMap<String, [f64; 2]>,
}

/// `[sheet]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet host prefix, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public spreadsheet identifier.
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,

    /// Sheet tab id (`gid`); `0` is the first tab.
    #[serde(default = "default_gid")]
    pub gid: String,

    /// Request timeout. Absent means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Largest export body accepted, in bytes. Absent means no cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_bytes: Option<u64>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            spreadsheet_id: default_spreadsheet_id(),
            gid: default_gid(),
            timeout_secs: None,
            max_response_bytes: None,
        }
    }
}

impl SheetConfig {
    /// CSV export URL: `{base_url}/{spreadsheet_id}/export?format=csv&gid={gid}`.
    pub fn export_url(&self) -> String {
        format!(
            "{}/{}/export?format=csv&gid={}",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id,
            self.gid
        )
    }
}

fn default_base_url() -> String {
    "https://docs.google.com/spreadsheets/d".into()
}
fn default_spreadsheet_id() -> String {
    "1rFJPB4g8d21JJkzxu9Ro668cL5H66HUIQCD0pNWwO74".into()
}
fn default_gid() -> String {
    "0".into()
}

/// `[icons]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    /// Icon service URL template; `{host}` is replaced by the website hostname.
    #[serde(default = "default_icon_service")]
    pub service: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            service: default_icon_service(),
        }
    }
}

impl IconConfig {
    /// Check that the template contains the `{host}` placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.service.contains(HOST_PLACEHOLDER) {
            Ok(())
        } else {
            Err(ClimateMapError::config(format!(
                "icons.service must contain {HOST_PLACEHOLDER}: {}",
                self.service
            )))
        }
    }
}

fn default_icon_service() -> String {
    "https://icons.duckduckgo.com/ip3/{host}.ico".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.climatemap/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ClimateMapError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.climatemap/climatemap.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ClimateMapError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ClimateMapError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.icons.validate()?;

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ClimateMapError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ClimateMapError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ClimateMapError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("spreadsheet_id"));
        assert!(toml_str.contains("icons.duckduckgo.com"));
        assert!(!toml_str.contains("timeout_secs"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.sheet.gid, "0");
        assert_eq!(parsed.icons.service, default_icon_service());
    }

    #[test]
    fn export_url_format() {
        let sheet = SheetConfig {
            base_url: "http://127.0.0.1:8080/".into(),
            spreadsheet_id: "abc".into(),
            gid: "42".into(),
            timeout_secs: None,
            max_response_bytes: None,
        };
        assert_eq!(
            sheet.export_url(),
            "http://127.0.0.1:8080/abc/export?format=csv&gid=42"
        );
    }

    #[test]
    fn default_export_url_points_at_public_sheet() {
        let url = SheetConfig::default().export_url();
        assert!(url.starts_with("https://docs.google.com/spreadsheets/d/1rFJPB4g8d21"));
        assert!(url.ends_with("/export?format=csv&gid=0"));
    }

    #[test]
    fn config_with_country_aliases() {
        let toml_str = r#"
[sheet]
gid = "7"
timeout_secs = 15
max_response_bytes = 1048576

[countries]
"Cabo Verde" = [16.0, -24.0]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.sheet.gid, "7");
        assert_eq!(config.sheet.timeout_secs, Some(15));
        assert_eq!(config.sheet.max_response_bytes, Some(1_048_576));
        assert_eq!(config.countries.get("Cabo Verde"), Some(&[16.0, -24.0]));
        assert_eq!(config.sheet.spreadsheet_id, default_spreadsheet_id());
    }

    #[test]
    fn icon_template_requires_host_placeholder() {
        let icons = IconConfig {
            service: "https://icons.example.com/static.ico".into(),
        };
        let err = icons.validate().unwrap_err();
        assert!(err.to_string().contains("{host}"));
        assert!(IconConfig::default().validate().is_ok());
    }
}
