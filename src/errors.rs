// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::error::Error;
use std::fmt;

/// Failure kinds for registry queries, mutations and argument parsing.
/// Display renders the human-readable message without the `Error: ` marker;
/// the admin layer prepends the marker when turning a failure into a
/// response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    DuplicateRole(String),
    RoleNotFound(String),
    RoleHasCommands(String),
    InvalidCommand(String),
    MalformedArguments {
        first: &'static str,
        second: &'static str,
    },
    EmptyFirstArgument(&'static str),
    EmptySecondArgument(&'static str),
    Validation(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::DuplicateRole(name) => {
                write!(f, "Unable to create role, \"{}\" already exists.", name)
            }
            CommandError::RoleNotFound(name) => {
                write!(f, "No role with name \"{}\" was found.", name)
            }
            CommandError::RoleHasCommands(_) => {
                write!(f, "Unable to delete role, please remove all commands first.")
            }
            CommandError::InvalidCommand(id) => {
                write!(f, "Command \"{}\" does not match any commands.", id)
            }
            CommandError::MalformedArguments { first, second } => write!(
                f,
                "Invalid number of parameters. Expected parameters: {{{}}} {{{}}}.",
                first, second
            ),
            CommandError::EmptyFirstArgument(label) => {
                write!(f, "{} cannot be empty.", title_case(label))
            }
            CommandError::EmptySecondArgument(label) => {
                write!(f, "{} cannot be empty.", title_case(label))
            }
            CommandError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl Error for CommandError {}

/// Registration-time failure (duplicate operation name or alias). These are
/// wiring mistakes surfaced at startup, never chat responses.
#[derive(Debug)]
pub struct RegistryError {
    message: String,
}

impl RegistryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry error: {}", self.message)
    }
}

impl Error for RegistryError {}

pub(crate) fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
