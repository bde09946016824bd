// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub(crate) mod parse_utils;

pub mod feature;

use crate::errors::RegistryError;
use crate::manager::CommandManager;
use std::collections::BTreeMap;

/// Closed set of administrative operations. The dispatcher resolves chat
/// text to one of these and hands over the remaining text plus the
/// invoking user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ListRoles,
    CreateRole,
    DescribeRole,
    DeleteRole,
    EnrollUser,
    UnenrollUser,
    ListCommands,
    RestrictCommand,
    UnrestrictCommand,
}

pub struct HandlerSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static [&'static str],
    pub action: AdminAction,
}

/// A named group of handlers. The module name prefixes handler names to
/// form the qualified command identifiers fed into the catalog.
pub trait CommandModule {
    fn name(&self) -> &'static str;
    fn handlers(&self) -> Vec<HandlerSpec>;
}

/// Lookup table from canonical names and aliases (case-insensitive) to
/// operations. Registration rejects duplicates so two modules cannot
/// silently shadow each other.
pub struct AdminRegistry {
    actions: BTreeMap<String, AdminAction>,
    command_ids: Vec<String>,
}

impl Default for AdminRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
            command_ids: Vec::new(),
        }
    }

    pub fn register_module(&mut self, module: &dyn CommandModule) -> Result<(), RegistryError> {
        for spec in module.handlers() {
            self.command_ids
                .push(format!("{}.{}", module.name(), spec.name));
            self.register_key(spec.name, spec.action)?;
            for alias in spec.aliases {
                self.register_key(alias, spec.action)?;
            }
        }
        Ok(())
    }

    fn register_key(&mut self, key: &str, action: AdminAction) -> Result<(), RegistryError> {
        let lower = key.to_ascii_lowercase();
        if self.actions.contains_key(&lower) {
            return Err(RegistryError::new(format!(
                "Duplicate command name or alias '{}'",
                key
            )));
        }
        self.actions.insert(lower, action);
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Option<AdminAction> {
        self.actions.get(&token.to_ascii_lowercase()).copied()
    }

    /// Qualified `<module>.<handler>` identifiers for catalog seeding.
    pub fn command_ids(&self) -> &[String] {
        &self.command_ids
    }

    pub fn execute(
        &self,
        action: AdminAction,
        manager: &mut CommandManager,
        data: &str,
        user: &str,
    ) -> Vec<String> {
        feature::execute(action, manager, data, user)
    }
}

pub fn build_registry() -> Result<AdminRegistry, RegistryError> {
    let mut registry = AdminRegistry::new();
    registry.register_module(&feature::FeatureManagement)?;
    Ok(registry)
}
