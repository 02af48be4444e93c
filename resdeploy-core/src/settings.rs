//! The `settings.json` deployment document.
//!
//! Read once at startup and validated for mandatory fields before any
//! remote call is attempted. No partial or default-filled configuration is
//! accepted; unknown extra fields are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;

/// File name looked up in the current directory when no explicit path is
/// given.
pub const DEFAULT_FILE: &str = "settings.json";

/// Validated deployment settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the local resource files.
    pub working_folder: PathBuf,
    /// Environment URL of the remote platform.
    pub crm: String,
    pub client_id: String,
    pub client_secret: String,
    /// Relative file path → logical resource name, in name-sorted order.
    pub resources: BTreeMap<String, String>,
    /// Namespace prefix applied to every logical name.
    pub prefix: String,
}

/// Raw document shape; every field optional so validation can name exactly
/// which mandatory field is missing.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(rename = "working-folder")]
    working_folder: Option<PathBuf>,
    crm: Option<String>,
    #[serde(rename = "client-id")]
    client_id: Option<String>,
    #[serde(rename = "client-secret")]
    client_secret: Option<String>,
    resources: Option<BTreeMap<String, String>>,
    prefix: Option<String>,
}

impl Settings {
    /// Load and validate the settings document at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let raw: RawSettings = serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        raw.validate()
    }
}

impl RawSettings {
    fn validate(self) -> Result<Settings, SettingsError> {
        Ok(Settings {
            working_folder: required(self.working_folder, "working-folder")?,
            crm: required_str(self.crm, "crm")?,
            client_id: required_str(self.client_id, "client-id")?,
            client_secret: required_str(self.client_secret, "client-secret")?,
            resources: required(self.resources, "resources")?,
            prefix: required_str(self.prefix, "prefix")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, SettingsError> {
    value.ok_or(SettingsError::MissingField { field })
}

/// String fields must also be non-empty; an empty credential or prefix is
/// as unusable as an absent one.
fn required_str(value: Option<String>, field: &'static str) -> Result<String, SettingsError> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SettingsError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_FILE);
        std::fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn load_missing_file_returns_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = Settings::load(&dir.path().join(DEFAULT_FILE)).unwrap_err();
        assert!(matches!(err, SettingsError::NotFound { .. }), "got: {err}");
        assert!(err.to_string().contains("settings file not found"));
    }

    #[test]
    fn load_corrupt_json_returns_parse_error_with_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_settings(&dir, "{ not json !!");
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn missing_field_is_named_in_the_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_settings(
            &dir,
            r#"{
                "working-folder": "dist",
                "crm": "https://org.example",
                "client-id": "id",
                "client-secret": "secret",
                "resources": {}
            }"#,
        );
        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.to_string(), "missing property \"prefix\" in settings file");
    }

    #[test]
    fn empty_string_field_counts_as_missing() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_settings(
            &dir,
            r#"{
                "working-folder": "dist",
                "crm": "",
                "client-id": "id",
                "client-secret": "secret",
                "resources": {},
                "prefix": "contoso"
            }"#,
        );
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::MissingField { field: "crm" }), "got: {err}");
    }

    #[test]
    fn load_full_document() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_settings(
            &dir,
            r#"{
                "working-folder": "dist",
                "crm": "https://org.crm.dynamics.com",
                "client-id": "app-id",
                "client-secret": "app-secret",
                "resources": { "login.js": "LoginScript", "site.css": "SiteStyles" },
                "prefix": "contoso"
            }"#,
        );
        let settings = Settings::load(&path).expect("load");
        assert_eq!(settings.working_folder, PathBuf::from("dist"));
        assert_eq!(settings.crm, "https://org.crm.dynamics.com");
        assert_eq!(settings.prefix, "contoso");
        assert_eq!(settings.resources.len(), 2);
        assert_eq!(settings.resources["login.js"], "LoginScript");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_settings(
            &dir,
            r#"{
                "working-folder": "dist",
                "crm": "https://org.example",
                "client-id": "id",
                "client-secret": "secret",
                "resources": {},
                "prefix": "p",
                "solution": "not-used"
            }"#,
        );
        let settings = Settings::load(&path).expect("load");
        assert!(settings.resources.is_empty());
    }
}
