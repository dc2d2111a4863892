use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_shell::ShellConfig;
use panel_shell::menu::MenuEntry;
use panel_shell::session::ENTRY_PAGE;
use panel_shell::sidebar::MOBILE_BREAKPOINT;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ConfigError;

const CONFIG_FILE: &str = "panel.json";
const DEFAULT_DEBOUNCE_MS: u64 = 180;

/// Front-end configuration persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PanelConfig {
    /// URL the shell is served from. Menu targets resolve against it.
    pub(crate) location: String,
    pub(crate) entry_page: String,
    pub(crate) breakpoint: f32,
    pub(crate) search_debounce_ms: u64,
    pub(crate) prefers_dark: bool,
    pub(crate) menu: Vec<MenuEntry>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let pages = panel_dir().join("pages").join("panel.html");
        let location = Url::from_file_path(&pages)
            .map(String::from)
            .unwrap_or_else(|()| String::from("file:///panel.html"));

        Self {
            location,
            entry_page: ENTRY_PAGE.to_string(),
            breakpoint: MOBILE_BREAKPOINT,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            prefers_dark: false,
            menu: vec![
                MenuEntry::new("Fiyat Tablosu", "price_table.html"),
                MenuEntry::new("Bakanlık Excel Yükle", "upload.html")
                    .with_role("admin"),
                MenuEntry::new("Uyarı E-postası", "mail.html"),
            ],
        }
    }
}

impl PanelConfig {
    pub(crate) fn location_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.location)?)
    }

    /// Shell boot parameters for a window of `viewport_width`.
    pub(crate) fn shell_config(
        &self,
        viewport_width: f32,
    ) -> Result<ShellConfig, ConfigError> {
        let location = self.location_url().or_else(|err| {
            log::warn!("{err}, falling back to the default location");
            PanelConfig::default().location_url()
        })?;

        Ok(ShellConfig {
            location,
            entry_page: self.entry_page.clone(),
            breakpoint: self.breakpoint,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            viewport_width,
            system_prefers_dark: self.prefers_dark,
        })
    }
}

/// Status describing how the configuration was loaded from disk.
#[derive(Debug, Clone)]
pub(crate) enum ConfigLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading the configuration from disk.
#[derive(Debug, Clone)]
pub(crate) struct ConfigLoad {
    config: PanelConfig,
    status: ConfigLoadStatus,
}

impl ConfigLoad {
    pub(crate) fn new(config: PanelConfig, status: ConfigLoadStatus) -> Self {
        Self { config, status }
    }

    /// Consume the value and return both payload and status.
    pub(crate) fn into_parts(self) -> (PanelConfig, ConfigLoadStatus) {
        (self.config, self.status)
    }
}

/// Load the configuration, falling back to defaults on any failure.
pub(crate) fn load_config() -> PanelConfig {
    let path = panel_dir().join(CONFIG_FILE);
    match load_config_from_path(&path) {
        Ok(load) => {
            let (config, status) = load.into_parts();
            match status {
                ConfigLoadStatus::Loaded => {
                    log::info!("config loaded from {}", path.display());
                },
                ConfigLoadStatus::Missing => {
                    log::info!("no config at {}, defaults", path.display());
                },
                ConfigLoadStatus::Invalid(message) => {
                    log::warn!("config invalid, using defaults: {message}");
                },
            }
            config
        },
        Err(err) => {
            log::warn!("failed to read config, using defaults: {err}");
            PanelConfig::default()
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoad, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigLoad::new(
                PanelConfig::default(),
                ConfigLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<PanelConfig>(&data) {
        Ok(config) => Ok(ConfigLoad::new(config, ConfigLoadStatus::Loaded)),
        Err(err) => Ok(ConfigLoad::new(
            PanelConfig::default(),
            ConfigLoadStatus::Invalid(format!("{err}")),
        )),
    }
}

#[cfg(test)]
fn save_config_to_path(
    path: &Path,
    config: &PanelConfig,
) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let payload = serde_json::to_string_pretty(config)?;
    crate::storage::write_atomic(path, payload.as_bytes())?;
    Ok(())
}

/// Directory holding the configuration and the preference store.
pub(crate) fn panel_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join(".config").join("panel");
    }

    std::env::temp_dir().join("panel")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{
        ConfigLoadStatus, PanelConfig, load_config_from_path,
        save_config_to_path,
    };

    #[test]
    fn given_missing_file_when_load_then_returns_default_with_missing_status()
    {
        let root = test_temp_dir("missing");
        let path = root.join("panel.json");

        let (config, status) = load_config_from_path(&path)
            .expect("missing config should not be an io error")
            .into_parts();

        assert!(matches!(status, ConfigLoadStatus::Missing));
        assert_eq!(config, PanelConfig::default());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_saved_config_when_loaded_then_round_trip_matches() {
        let root = test_temp_dir("round_trip");
        let path = root.join("panel.json");
        let config = PanelConfig {
            location: String::from("https://panel.example/panel.html"),
            breakpoint: 720.0,
            prefers_dark: true,
            ..PanelConfig::default()
        };

        save_config_to_path(&path, &config)
            .expect("config should save successfully");
        let (loaded, status) = load_config_from_path(&path)
            .expect("config should load successfully")
            .into_parts();

        assert!(matches!(status, ConfigLoadStatus::Loaded));
        assert_eq!(loaded, config);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_partial_json_when_loaded_then_missing_fields_use_defaults() {
        let root = test_temp_dir("partial");
        let path = root.join("panel.json");
        fs::write(
            &path,
            r#"{"menu": [{"label": "Raporlar", "target": "reports.html"}]}"#,
        )
        .expect("partial test payload should be written");

        let (loaded, _) = load_config_from_path(&path)
            .expect("config should load successfully")
            .into_parts();

        assert_eq!(loaded.menu.len(), 1);
        assert_eq!(loaded.search_debounce_ms, 180);
        assert_eq!(loaded.entry_page, "index.html");

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_load_then_returns_default_with_invalid_status() {
        let root = test_temp_dir("invalid_json");
        let path = root.join("panel.json");
        fs::write(&path, "{ this is not valid json")
            .expect("invalid test payload should be written");

        let (loaded, status) = load_config_from_path(&path)
            .expect("loading invalid config should not fail with io error")
            .into_parts();

        assert_eq!(loaded, PanelConfig::default());
        match status {
            ConfigLoadStatus::Invalid(message) => {
                assert!(!message.is_empty());
            },
            other => panic!("expected invalid status, got {other:?}"),
        }

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_config_when_converted_then_shell_config_carries_values() {
        let config = PanelConfig {
            location: String::from("https://panel.example/panel.html"),
            search_debounce_ms: 50,
            ..PanelConfig::default()
        };

        let shell = config
            .shell_config(640.0)
            .expect("valid location should convert");

        assert_eq!(shell.location.as_str(), "https://panel.example/panel.html");
        assert_eq!(shell.search_debounce, Duration::from_millis(50));
        assert_eq!(shell.viewport_width, 640.0);
    }

    #[test]
    fn given_invalid_location_when_converted_then_default_location_is_used() {
        let config = PanelConfig {
            location: String::from("not a url"),
            ..PanelConfig::default()
        };

        let shell = config
            .shell_config(640.0)
            .expect("default location should parse");

        assert_eq!(shell.location.scheme(), "file");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "panel-config-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
