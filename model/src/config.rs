use serde::{Deserialize, Serialize};

use crate::{HistoryRetention, SettingsRegistry};

/// One entry of the device roster.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeviceConfig {
    pub id: String,
    /// Display name, the id is shown when absent.
    #[serde(default)]
    pub name: Option<String>,
}

impl DeviceConfig {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<&str> for DeviceConfig {
    fn from(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
        }
    }
}

/// Which meaning the history chart of every device tracks, and how much of it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub meaning: String,
    pub max_samples: Option<usize>,
    pub max_age_secs: Option<u64>,
}

impl HistoryConfig {
    pub fn retention(&self) -> HistoryRetention {
        HistoryRetention {
            max_samples: self.max_samples,
            max_age_secs: self.max_age_secs,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let retention = HistoryRetention::default();
        Self {
            meaning: "temperature".into(),
            max_samples: retention.max_samples,
            max_age_secs: retention.max_age_secs,
        }
    }
}

/// Startup configuration: the fixed device roster plus the presentation settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DashboardConfig {
    pub devices: Vec<DeviceConfig>,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub meanings: SettingsRegistry,
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The configuration shipped with the dashboard.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(std::include_str!("./dashboard.json"))
    }
}

#[test]
fn test_embedded_config() {
    let config = DashboardConfig::embedded().unwrap();

    assert!(!config.devices.is_empty());
    assert_eq!(config.history.meaning, "temperature");
    assert!(config.meanings.range("temperature").is_some());
    assert!(config.meanings.range("humidity").is_some());
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config = DashboardConfig::from_json(r#"{ "devices": [ { "id": "d1" } ] }"#).unwrap();

    assert_eq!(config.devices, vec![DeviceConfig::from("d1")]);
    assert_eq!(config.devices[0].label(), "d1");
    assert_eq!(config.history, HistoryConfig::default());
    assert_eq!(config.history.meaning, "temperature");
    assert_eq!(config.history.max_samples, Some(500));
    assert_eq!(config.history.max_age_secs, None);
    assert_eq!(config.history.retention(), HistoryRetention::default());
    assert!(config.meanings.is_empty());
}

#[test]
fn test_unbounded_history_config() {
    let config = DashboardConfig::from_json(
        r#"{ "devices": [], "history": { "meaning": "humidity", "max_samples": null } }"#,
    )
    .unwrap();

    assert_eq!(config.history.meaning, "humidity");
    assert_eq!(config.history.retention(), HistoryRetention::unbounded());
}
