use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Path of the tactics manifest, relative to the working directory.
    #[serde(default = "default_tactics_path")]
    pub tactics_path: String,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Override for the annotation export folder. Defaults to an
    /// `annotation_exports` folder next to the executable.
    #[serde(default)]
    pub export_dir: Option<String>,
    /// Last known window size.
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
}

fn default_tactics_path() -> String {
    "tactics.json".to_string()
}

fn default_window_size() -> (f32, f32) {
    (1100.0, 760.0)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tactics_path: default_tactics_path(),
            debug_logging: false,
            export_dir: None,
            window_size: default_window_size(),
        }
    }
}

impl AppSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        let settings = AppSettings::load(path.to_str().expect("utf-8 path")).expect("load");
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn settings_roundtrip_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        let path = path.to_str().expect("utf-8 path");

        let mut settings = AppSettings::default();
        settings.debug_logging = true;
        settings.tactics_path = "playbook.json".into();
        settings.save(path).expect("save");

        assert_eq!(AppSettings::load(path).expect("load"), settings);
    }

    #[test]
    fn unknown_fields_do_not_break_loading() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"debug_logging": true, "retired_option": 3}"#).expect("write");

        let settings = AppSettings::load(path.to_str().expect("utf-8 path")).expect("load");
        assert!(settings.debug_logging);
        assert_eq!(settings.tactics_path, "tactics.json");
    }
}
