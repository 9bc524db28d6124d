//! Dispatcher configuration types
//!
//! A dispatcher needs almost no configuration. The label shows up in log
//! messages and `Debug` output so that several dispatchers in one program can be
//! told apart, and the initial capacity avoids regrowth when the number of
//! listeners is known up front.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Optional human-readable name used in log output
    #[serde(default)]
    pub label: Option<String>,

    /// Number of entries to reserve room for on construction
    #[serde(default)]
    pub initial_capacity: usize,
}

impl DispatcherConfig {
    /// Create a new dispatcher configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder method: reserve room for `capacity` entries
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Label for log messages ("unnamed" if none was set)
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("unnamed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_config_builder() {
        let config = DispatcherConfig::new()
            .with_label("on_damage")
            .with_initial_capacity(8);

        assert_eq!(config.label.as_deref(), Some("on_damage"));
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.display_label(), "on_damage");
    }

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::new();
        assert_eq!(config.label, None);
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.display_label(), "unnamed");
    }

    #[test]
    fn test_config_deserialization() {
        let config: DispatcherConfig = toml::from_str(r#"label = "on_tick""#).unwrap();
        assert_eq!(config, DispatcherConfig::new().with_label("on_tick"));

        let empty: DispatcherConfig = toml::from_str("").unwrap();
        assert_eq!(empty, DispatcherConfig::default());
    }
}
