// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::{BTreeMap, BTreeSet};

/// The authoritative set of command identifiers known to the system.
/// Identifiers use the dotted form `<module>.<command>`; identifiers
/// without a dot are ungrouped.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    ids: BTreeSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CommandGroup<'a> {
    /// `None` is the ungrouped bucket.
    pub module: Option<&'a str>,
    pub members: Vec<&'a str>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extend<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Exact identifiers match directly; `<module>.*` matches when the
    /// module has at least one catalog entry.
    pub fn is_valid(&self, id: &str) -> bool {
        if self.ids.contains(id) {
            return true;
        }
        match id.strip_suffix(".*") {
            Some(module) if !module.is_empty() => self
                .ids
                .iter()
                .any(|known| module_of(known) == Some(module)),
            _ => false,
        }
    }

    /// Identifiers grouped by the text before the first `.`, modules in
    /// sorted order, the ungrouped bucket last.
    pub fn groups(&self) -> Vec<CommandGroup<'_>> {
        let mut modules: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut ungrouped = Vec::new();
        for id in &self.ids {
            match module_of(id) {
                Some(module) => modules.entry(module).or_default().push(id.as_str()),
                None => ungrouped.push(id.as_str()),
            }
        }
        let mut groups: Vec<CommandGroup<'_>> = modules
            .into_iter()
            .map(|(module, members)| CommandGroup {
                module: Some(module),
                members,
            })
            .collect();
        if !ungrouped.is_empty() {
            groups.push(CommandGroup {
                module: None,
                members: ungrouped,
            });
        }
        groups
    }

    /// Distinct modules; the ungrouped bucket is not a module.
    pub fn module_count(&self) -> usize {
        self.ids
            .iter()
            .filter_map(|id| module_of(id))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn module_of(id: &str) -> Option<&str> {
    match id.split_once('.') {
        Some((module, _)) if !module.is_empty() => Some(module),
        _ => None,
    }
}
