// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::errors::CommandError;

/// Splits free-form chat text on the FIRST space into `(first, remainder)`.
/// The remainder is taken verbatim and may itself contain spaces, so names
/// with embedded spaces are supported as the second argument only.
pub(crate) fn split_pair<'a>(
    data: &'a str,
    first_label: &'static str,
    second_label: &'static str,
) -> Result<(&'a str, &'a str), CommandError> {
    let space = data.find(' ').ok_or(CommandError::MalformedArguments {
        first: first_label,
        second: second_label,
    })?;
    let first = &data[..space];
    if first.is_empty() {
        return Err(CommandError::EmptyFirstArgument(first_label));
    }
    let rest = &data[space + 1..];
    if rest.is_empty() {
        return Err(CommandError::EmptySecondArgument(second_label));
    }
    Ok((first, rest))
}
