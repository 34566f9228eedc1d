//! Section-scoped settings storage
//!
//! Values are stored as strings. Booleans use `TRUE`/`FALSE` and integers
//! their decimal form, so a store written by one plugin version stays
//! readable by the next.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "sndout";
const APP_NAME: &str = "sndout";
const SETTINGS_FILE: &str = "settings.json";

/// Key/value settings addressed by section and name
pub trait SettingsStore {
    fn get(&self, section: &str, name: &str) -> Option<String>;

    fn set(&mut self, section: &str, name: &str, value: String);

    /// Store each default whose key has no value yet
    fn set_defaults(&mut self, section: &str, defaults: &[(&str, &str)]) {
        for (name, value) in defaults {
            if self.get(section, name).is_none() {
                self.set(section, name, (*value).to_string());
            }
        }
    }

    fn get_str(&self, section: &str, name: &str) -> String {
        self.get(section, name).unwrap_or_default()
    }

    fn get_bool(&self, section: &str, name: &str) -> bool {
        self.get(section, name)
            .map(|v| parse_bool(&v))
            .unwrap_or(false)
    }

    fn get_int(&self, section: &str, name: &str) -> i32 {
        self.get(section, name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    fn set_bool(&mut self, section: &str, name: &str, value: bool) {
        let value = if value { "TRUE" } else { "FALSE" };
        self.set(section, name, value.to_string());
    }

    fn set_int(&mut self, section: &str, name: &str, value: i32) {
        self.set(section, name, value.to_string());
    }
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Settings kept in memory and optionally persisted as JSON
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    sections: BTreeMap<String, BTreeMap<String, String>>,
    path: Option<PathBuf>,
}

impl JsonSettings {
    /// Settings that are never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load settings from `path`. A missing file yields empty settings
    /// that will be saved to `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let sections = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            sections,
            path: Some(path),
        })
    }

    /// Load settings from the default file under the user's config directory
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(Self::default_path())
    }

    /// Default settings file under the user's config directory
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(format!("./{}", SETTINGS_FILE)))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the settings back to their file. In-memory settings are left alone.
    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.sections)?;
        fs::write(path, content)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, section: &str, name: &str) -> Option<String> {
        self.sections.get(section)?.get(name).cloned()
    }

    fn set(&mut self, section: &str, name: &str, value: String) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_do_not_overwrite() {
        let mut settings = JsonSettings::in_memory();
        settings.set("oss4", "device", "/dev/dsp1".to_string());
        settings.set_defaults("oss4", &[("device", "/dev/dsp"), ("exclusive", "FALSE")]);

        assert_eq!(settings.get_str("oss4", "device"), "/dev/dsp1");
        assert!(!settings.get_bool("oss4", "exclusive"));
        assert_eq!(settings.get("oss4", "exclusive").as_deref(), Some("FALSE"));
    }

    #[test]
    fn test_typed_accessors() {
        let mut settings = JsonSettings::in_memory();
        settings.set_bool("a", "flag", true);
        settings.set_int("a", "volume", 12850);

        assert!(settings.get_bool("a", "flag"));
        assert_eq!(settings.get_int("a", "volume"), 12850);
        assert_eq!(settings.get_int("a", "missing"), 0);
        assert_eq!(settings.get_str("b", "missing"), "");
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("FALSE"));
        assert!(!parse_bool("yes"));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = JsonSettings::open(&path).unwrap();
        settings.set("oss4", "alt_device", "/dev/dsp2".to_string());
        settings.set_bool("oss4", "use_alt_device", true);
        settings.save().unwrap();

        let reopened = JsonSettings::open(&path).unwrap();
        assert_eq!(reopened.get_str("oss4", "alt_device"), "/dev/dsp2");
        assert!(reopened.get_bool("oss4", "use_alt_device"));
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonSettings::open(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_default_path_names_settings_file() {
        let path = JsonSettings::default_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("settings.json"));
        assert!(path.components().count() > 1);
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let settings = JsonSettings::in_memory();
        assert!(settings.path().is_none());
        assert!(settings.save().is_ok());
    }
}
