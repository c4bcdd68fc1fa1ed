// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game configuration and player identities

use crate::Color;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings fixed for the lifetime of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Color that places the first stone
    pub first_mover: Color,
    /// Display name of the red player
    pub red_name: String,
    /// Display name of the blue player
    pub blue_name: String,
    /// Keep a record of every committed move
    pub record_history: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_mover: Color::Red,
            red_name: "Red Player".to_string(),
            blue_name: "Blue Player".to_string(),
            record_history: true,
        }
    }
}

impl GameConfig {
    /// Load a TOML config file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "Loaded game config");
        Ok(config)
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid game config")
    }

    /// Render the config as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize game config")
    }

    /// The player bound to `color`
    pub fn player(&self, color: Color) -> Player {
        let name = match color {
            Color::Red => &self.red_name,
            Color::Blue => &self.blue_name,
        };
        Player {
            name: name.clone(),
            color,
        }
    }
}

/// A participant and the color they play for the whole game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name
    pub name: String,
    /// Stone color
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameConfig::from_toml_str("first_mover = \"blue\"\n").unwrap();
        assert_eq!(config.first_mover, Color::Blue);
        assert_eq!(config.red_name, "Red Player");
        assert!(config.record_history);
    }

    #[test]
    fn toml_roundtrip() {
        let config = GameConfig {
            first_mover: Color::Blue,
            red_name: "Ada".to_string(),
            blue_name: "Grace".to_string(),
            record_history: false,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GameConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn player_names_follow_color() {
        let config = GameConfig::default();
        assert_eq!(config.player(Color::Blue).name, "Blue Player");
        assert_eq!(config.player(Color::Red).color, Color::Red);
    }
}
