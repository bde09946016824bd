// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::catalog::CommandCatalog;
use crate::errors::CommandError;
use crate::roles::{validate_role_name, UserRole, MAX_ROLE_COUNT};
use crate::store::RoleSink;

/// Owns the role registry and the command catalog. Every operation
/// validates before it mutates, and every successful mutation triggers
/// exactly one commit through the sink. The commit outcome is not
/// surfaced to the caller; in-memory state is already updated when the
/// sink runs.
pub struct CommandManager {
    roles: Vec<UserRole>,
    catalog: CommandCatalog,
    sink: Box<dyn RoleSink>,
}

impl CommandManager {
    pub fn new(catalog: CommandCatalog, sink: Box<dyn RoleSink>) -> Self {
        Self::with_roles(Vec::new(), catalog, sink)
    }

    pub fn with_roles(roles: Vec<UserRole>, catalog: CommandCatalog, sink: Box<dyn RoleSink>) -> Self {
        Self {
            roles,
            catalog,
            sink,
        }
    }

    /// Roles in insertion order.
    pub fn roles(&self) -> &[UserRole] {
        &self.roles
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn is_valid_command(&self, id: &str) -> bool {
        self.catalog.is_valid(id)
    }

    /// Role names are unique case-insensitively: "Mods" and "mods" would
    /// be indistinguishable to every lookup, so the duplicate check folds
    /// case too.
    pub fn create_role(&mut self, name: &str) -> Result<(), CommandError> {
        validate_role_name(name).map_err(|err| CommandError::Validation(err.to_string()))?;
        if self.roles.len() >= MAX_ROLE_COUNT {
            return Err(CommandError::Validation(format!(
                "Roles must be at most {} entries",
                MAX_ROLE_COUNT
            )));
        }
        if self.find_role(name).is_some() {
            return Err(CommandError::DuplicateRole(name.to_string()));
        }
        self.roles.push(UserRole::new(name));
        self.update_roles();
        Ok(())
    }

    pub fn describe_role(&self, name: &str) -> Result<&UserRole, CommandError> {
        self.find_role(name)
            .ok_or_else(|| CommandError::RoleNotFound(name.to_string()))
    }

    /// A role keeping command grants cannot be deleted; user enrollment
    /// does not block deletion.
    pub fn delete_role(&mut self, name: &str) -> Result<(), CommandError> {
        let index = self
            .roles
            .iter()
            .position(|role| role.matches(name))
            .ok_or_else(|| CommandError::RoleNotFound(name.to_string()))?;
        if !self.roles[index].commands.is_empty() {
            return Err(CommandError::RoleHasCommands(self.roles[index].name.clone()));
        }
        self.roles.remove(index);
        self.update_roles();
        Ok(())
    }

    /// Idempotent; returns the role's stored name for response text.
    pub fn enroll_user(&mut self, user: &str, role_name: &str) -> Result<String, CommandError> {
        let role = self
            .find_role_mut(role_name)
            .ok_or_else(|| CommandError::RoleNotFound(role_name.to_string()))?;
        role.users.insert(user.to_string());
        let name = role.name.clone();
        self.update_roles();
        Ok(name)
    }

    /// Idempotent; removing an absent user is a no-op success.
    pub fn unenroll_user(&mut self, user: &str, role_name: &str) -> Result<String, CommandError> {
        let role = self
            .find_role_mut(role_name)
            .ok_or_else(|| CommandError::RoleNotFound(role_name.to_string()))?;
        role.users.remove(user);
        let name = role.name.clone();
        self.update_roles();
        Ok(name)
    }

    pub fn restrict_command(
        &mut self,
        command_id: &str,
        role_name: &str,
    ) -> Result<String, CommandError> {
        if !self.catalog.is_valid(command_id) {
            return Err(CommandError::InvalidCommand(command_id.to_string()));
        }
        let role = self
            .find_role_mut(role_name)
            .ok_or_else(|| CommandError::RoleNotFound(role_name.to_string()))?;
        role.commands.insert(command_id.to_string());
        let name = role.name.clone();
        self.update_roles();
        Ok(name)
    }

    pub fn unrestrict_command(
        &mut self,
        command_id: &str,
        role_name: &str,
    ) -> Result<String, CommandError> {
        if !self.catalog.is_valid(command_id) {
            return Err(CommandError::InvalidCommand(command_id.to_string()));
        }
        let role = self
            .find_role_mut(role_name)
            .ok_or_else(|| CommandError::RoleNotFound(role_name.to_string()))?;
        role.commands.remove(command_id);
        let name = role.name.clone();
        self.update_roles();
        Ok(name)
    }

    fn find_role(&self, name: &str) -> Option<&UserRole> {
        self.roles.iter().find(|role| role.matches(name))
    }

    fn find_role_mut(&mut self, name: &str) -> Option<&mut UserRole> {
        self.roles.iter_mut().find(|role| role.matches(name))
    }

    fn update_roles(&mut self) {
        if let Err(err) = self.sink.commit(&self.roles) {
            log::error!("Failed to persist roles: {}", err);
        }
    }
}
