// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::roles::{validate_role_name, UserRole, MAX_ROLE_COUNT};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_TEMP_ATTEMPTS: u32 = 100;

#[derive(Debug)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StoreError {}

/// Persistence trigger port. The registry calls `commit` synchronously
/// after each successful mutation and does not roll back in-memory state
/// when the commit fails.
pub trait RoleSink: Send {
    fn commit(&self, roles: &[UserRole]) -> Result<(), StoreError>;
}

/// Sink for deployments that wire persistence elsewhere.
#[derive(Debug, Default)]
pub struct NullRoleSink;

impl RoleSink for NullRoleSink {
    fn commit(&self, _roles: &[UserRole]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// YAML-file role storage. Writes go through a temp file in the same
/// directory, fsync, then rename, so a crash never leaves a torn file.
pub struct YamlRoleStore {
    roles_file: PathBuf,
}

impl YamlRoleStore {
    pub fn new(roles_file: PathBuf) -> Self {
        Self { roles_file }
    }

    pub fn load(&self) -> Result<Vec<UserRole>, StoreError> {
        if !self.roles_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.roles_file)
            .map_err(|err| StoreError::new(format!("Failed to read roles file: {}", err)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let roles: Vec<UserRole> = serde_yaml::from_str(&content)
            .map_err(|err| StoreError::new(format!("Failed to parse roles file: {}", err)))?;
        if roles.len() > MAX_ROLE_COUNT {
            return Err(StoreError::new(format!(
                "Roles must be at most {} entries",
                MAX_ROLE_COUNT
            )));
        }
        for (index, role) in roles.iter().enumerate() {
            validate_role_name(&role.name)
                .map_err(|err| StoreError::new(format!("Invalid role at entry {}: {}", index, err)))?;
            let duplicate = roles[..index].iter().any(|other| other.matches(&role.name));
            if duplicate {
                return Err(StoreError::new(format!(
                    "Duplicate role name \"{}\" in roles file",
                    role.name
                )));
            }
        }
        Ok(roles)
    }

    fn write_atomic(&self, content: &str) -> Result<(), StoreError> {
        let parent = self
            .roles_file
            .parent()
            .ok_or_else(|| StoreError::new("Roles file path has no parent directory"))?;
        let (mut file, temp_path) = create_temp_file(parent, &self.roles_file)?;
        if let Err(err) = file.write_all(content.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::new(format!(
                "Failed to write roles temp file: {}",
                err
            )));
        }
        if let Err(err) = file.sync_all() {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::new(format!(
                "Failed to sync roles temp file: {}",
                err
            )));
        }
        if let Err(err) = fs::rename(&temp_path, &self.roles_file) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::new(format!(
                "Failed to replace roles file: {}",
                err
            )));
        }
        #[cfg(unix)]
        {
            if let Err(err) = sync_parent_dir(parent) {
                log::warn!("Roles directory sync failed: {}", err);
            }
        }
        Ok(())
    }
}

impl RoleSink for YamlRoleStore {
    fn commit(&self, roles: &[UserRole]) -> Result<(), StoreError> {
        let content = serde_yaml::to_string(roles)
            .map_err(|err| StoreError::new(format!("Failed to serialize roles: {}", err)))?;
        self.write_atomic(&content)
    }
}

fn create_temp_file(parent: &Path, target: &Path) -> Result<(fs::File, PathBuf), StoreError> {
    let file_name = target
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| StoreError::new("Roles file name is not valid UTF-8"))?;
    for attempt in 0..MAX_TEMP_ATTEMPTS {
        let temp_name = format!(".{}.tmp.{}.{}", file_name, std::process::id(), attempt);
        let temp_path = parent.join(temp_name);
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path);
        match file {
            Ok(file) => return Ok((file, temp_path)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(StoreError::new(format!(
                    "Failed to create temp roles file: {}",
                    err
                )));
            }
        }
    }
    Err(StoreError::new(
        "Failed to create temp roles file after multiple attempts",
    ))
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> Result<(), std::io::Error> {
    let dir = fs::File::open(parent)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_empty_for_absent_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = YamlRoleStore::new(temp.path().join("roles.yaml"));
        let roles = store.load().expect("load");
        assert!(roles.is_empty());
    }

    #[test]
    fn commit_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = YamlRoleStore::new(temp.path().join("roles.yaml"));

        let mut role = UserRole::new("Mods");
        role.commands.insert("mod.kick".to_string());
        role.users.insert("bob".to_string());
        store.commit(&[role]).expect("commit");

        let loaded = store.load().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Mods");
        assert!(loaded[0].commands.contains("mod.kick"));
        assert!(loaded[0].users.contains("bob"));
    }

    #[test]
    fn load_rejects_duplicate_role_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roles.yaml");
        fs::write(&path, "- name: Mods\n- name: mods\n").expect("write");
        let store = YamlRoleStore::new(path);
        let err = store.load().expect_err("duplicate rejected");
        assert!(err.to_string().contains("Duplicate role name"));
    }

    #[test]
    fn load_tolerates_missing_sets() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roles.yaml");
        fs::write(&path, "- name: Mods\n").expect("write");
        let store = YamlRoleStore::new(path);
        let roles = store.load().expect("load");
        assert!(roles[0].commands.is_empty());
        assert!(roles[0].users.is_empty());
    }
}
