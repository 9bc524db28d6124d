//! Scenario loading and parsing

use anyhow::{Context, Result};
use multicast_event::DispatcherConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A scripted run against one dispatcher (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyConfig {
    pub name: String,
    #[serde(default = "default_health")]
    pub health: i32,
}

fn default_health() -> i32 {
    100
}

/// One operation on the dispatcher or the scenario world
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepConfig {
    Attach { target: String },
    Detach { target: String },
    DetachAll { target: String },
    Clear,
    Invoke { value: i32 },
    Prune,
    DropEnemy { enemy: String },
}

/// Parse a scenario from TOML text
pub fn parse_scenario(content: &str) -> Result<ScenarioConfig> {
    let scenario: ScenarioConfig =
        toml::from_str(content).context("Failed to parse scenario")?;
    Ok(scenario)
}

/// Load a scenario from a TOML file
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

    parse_scenario(&content).with_context(|| format!("Invalid scenario file: {:?}", path))
}
