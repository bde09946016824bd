// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    #[serde(default = "default_roles_file")]
    pub roles_file: String,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("state")
}

fn default_roles_file() -> String {
    "roles.yaml".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            roles_file: default_roles_file(),
        }
    }
}

impl RegistryConfig {
    /// An absent config file means defaults; a present but broken one is
    /// an error, never a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::LoadError(format!("Failed to read config file: {}", err)))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|err| {
            ConfigError::LoadError(format!("Failed to parse config file: {}", err))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roles_file.is_empty() {
            return Err(ConfigError::ValidationError(
                "roles_file must not be empty".to_string(),
            ));
        }
        // The roles file is a bare name inside the state directory, never
        // a path that could escape it.
        if self.roles_file.contains('/')
            || self.roles_file.contains('\\')
            || self.roles_file.contains("..")
        {
            return Err(ConfigError::ValidationError(format!(
                "roles_file must be a plain file name, got '{}'",
                self.roles_file
            )));
        }
        Ok(())
    }

    pub fn roles_path(&self) -> PathBuf {
        self.state_dir.join(&self.roles_file)
    }
}
