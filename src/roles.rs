// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

pub const MAX_ROLE_COUNT: usize = 64;
pub const MAX_ROLE_CHARS: usize = 64;

/// A named group owning the set of command identifiers its members may
/// invoke and the set of enrolled user identifiers. The stored name keeps
/// its original case; lookups match case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub name: String,
    #[serde(default)]
    pub commands: BTreeSet<String>,
    #[serde(default)]
    pub users: BTreeSet<String>,
}

impl UserRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: BTreeSet::new(),
            users: BTreeSet::new(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug)]
pub struct RoleValidationError {
    message: String,
}

impl RoleValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RoleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RoleValidationError {}

/// Role names arrive verbatim from chat text, so embedded spaces are legal;
/// only empty names and oversized names are rejected.
pub fn validate_role_name(name: &str) -> Result<(), RoleValidationError> {
    if name.is_empty() {
        return Err(RoleValidationError::new("Role name is required"));
    }
    if name.chars().count() > MAX_ROLE_CHARS {
        return Err(RoleValidationError::new(format!(
            "Role name must be at most {} characters",
            MAX_ROLE_CHARS
        )));
    }
    Ok(())
}
