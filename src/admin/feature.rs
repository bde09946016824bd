// This file is part of the product ChatWarden.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::parse_utils::split_pair;
use super::{AdminAction, CommandModule, HandlerSpec};
use crate::errors::CommandError;
use crate::manager::CommandManager;

/// The feature-management module: list/create/describe/delete roles,
/// enroll/unenroll users, list commands, restrict/unrestrict commands.
/// The invoking user is accepted by every operation for future
/// authorization checks and currently unused.
pub struct FeatureManagement;

impl CommandModule for FeatureManagement {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn handlers(&self) -> Vec<HandlerSpec> {
        vec![
            HandlerSpec {
                name: "ListRoles",
                aliases: &["list-roles"],
                usage: &["ListRoles"],
                action: AdminAction::ListRoles,
            },
            HandlerSpec {
                name: "CreateRole",
                aliases: &["create-role"],
                usage: &["CreateRole <role>"],
                action: AdminAction::CreateRole,
            },
            HandlerSpec {
                name: "DescribeRole",
                aliases: &["describe-role"],
                usage: &["DescribeRole <role>"],
                action: AdminAction::DescribeRole,
            },
            HandlerSpec {
                name: "DeleteRole",
                aliases: &["delete-role"],
                usage: &["DeleteRole <role>"],
                action: AdminAction::DeleteRole,
            },
            HandlerSpec {
                name: "EnrollUser",
                aliases: &["enroll-user"],
                usage: &["EnrollUser <user> <role>"],
                action: AdminAction::EnrollUser,
            },
            HandlerSpec {
                name: "UnenrollUser",
                aliases: &["unenroll-user"],
                usage: &["UnenrollUser <user> <role>"],
                action: AdminAction::UnenrollUser,
            },
            HandlerSpec {
                name: "ListCommands",
                aliases: &["list-commands"],
                usage: &["ListCommands"],
                action: AdminAction::ListCommands,
            },
            HandlerSpec {
                name: "RestrictCommand",
                aliases: &["restrict-command"],
                usage: &["RestrictCommand <command> <role>"],
                action: AdminAction::RestrictCommand,
            },
            HandlerSpec {
                name: "UnrestrictCommand",
                aliases: &["unrestrict-command"],
                usage: &["UnrestrictCommand <command> <role>"],
                action: AdminAction::UnrestrictCommand,
            },
        ]
    }
}

/// Runs one operation to completion. Always returns at least one line;
/// failures become a single `Error: `-prefixed line, never a panic or an
/// error value.
pub fn execute(
    action: AdminAction,
    manager: &mut CommandManager,
    data: &str,
    user: &str,
) -> Vec<String> {
    let result = match action {
        AdminAction::ListRoles => list_roles(manager, data, user),
        AdminAction::CreateRole => create_role(manager, data, user),
        AdminAction::DescribeRole => describe_role(manager, data, user),
        AdminAction::DeleteRole => delete_role(manager, data, user),
        AdminAction::EnrollUser => enroll_user(manager, data, user),
        AdminAction::UnenrollUser => unenroll_user(manager, data, user),
        AdminAction::ListCommands => list_commands(manager, data, user),
        AdminAction::RestrictCommand => restrict_command(manager, data, user),
        AdminAction::UnrestrictCommand => unrestrict_command(manager, data, user),
    };
    match result {
        Ok(lines) => lines,
        Err(err) => vec![format!("Error: {}", err)],
    }
}

fn list_roles(
    manager: &mut CommandManager,
    _data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let names: Vec<&str> = manager
        .roles()
        .iter()
        .map(|role| role.name.as_str())
        .collect();
    Ok(vec![format!(
        "There are {} roles: {}",
        names.len(),
        names.join(", ")
    )])
}

fn create_role(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    manager.create_role(data)?;
    Ok(vec![format!("Role \"{}\" created successfully!", data)])
}

fn describe_role(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let role = manager.describe_role(data)?;
    Ok(vec![
        format!(
            "Role \"{}\" contains the following commands: {}",
            role.name,
            join(role.commands.iter())
        ),
        format!(
            "Role \"{}\" contains the following users: {}",
            role.name,
            join(role.users.iter())
        ),
    ])
}

fn delete_role(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    manager.delete_role(data)?;
    Ok(vec![format!("Role \"{}\" removed successfully!", data)])
}

fn enroll_user(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let (user_name, role_name) = split_pair(data, "username", "role name")?;
    let role = manager.enroll_user(user_name, role_name)?;
    Ok(vec![format!(
        "User \"{}\" was added to role \"{}\" successfully!",
        user_name, role
    )])
}

fn unenroll_user(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let (user_name, role_name) = split_pair(data, "username", "role name")?;
    let role = manager.unenroll_user(user_name, role_name)?;
    Ok(vec![format!(
        "User \"{}\" was removed from role \"{}\" successfully!",
        user_name, role
    )])
}

fn list_commands(
    manager: &mut CommandManager,
    _data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let catalog = manager.catalog();
    let mut lines = vec![format!(
        "There are {} commands across {} modules.",
        catalog.len(),
        catalog.module_count()
    )];
    for group in catalog.groups() {
        let label = group.module.unwrap_or("(ungrouped)");
        lines.push(format!(
            "{} ({}): {}",
            label,
            group.members.len(),
            group.members.join(", ")
        ));
    }
    Ok(lines)
}

fn restrict_command(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let (command_id, role_name) = split_pair(data, "command name", "role name")?;
    let role = manager.restrict_command(command_id, role_name)?;
    Ok(vec![format!(
        "Command \"{}\" was added to the role \"{}\" successfully!",
        command_id, role
    )])
}

fn unrestrict_command(
    manager: &mut CommandManager,
    data: &str,
    _user: &str,
) -> Result<Vec<String>, CommandError> {
    let (command_id, role_name) = split_pair(data, "command name", "role name")?;
    let role = manager.unrestrict_command(command_id, role_name)?;
    Ok(vec![format!(
        "Command \"{}\" was removed from the role \"{}\" successfully!",
        command_id, role
    )])
}

fn join<'a, I>(items: I) -> String
where
    I: Iterator<Item = &'a String>,
{
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CommandCatalog;
    use crate::store::NullRoleSink;

    fn manager() -> CommandManager {
        let catalog = CommandCatalog::from_ids(["mod.kick", "mod.ban", "fun.roll"]);
        CommandManager::new(catalog, Box::new(NullRoleSink))
    }

    #[test]
    fn list_roles_reports_count_and_names() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        execute(AdminAction::CreateRole, &mut manager, "Admins", "streamer");
        let lines = execute(AdminAction::ListRoles, &mut manager, "", "streamer");
        assert_eq!(lines, vec!["There are 2 roles: Mods, Admins".to_string()]);
    }

    #[test]
    fn create_role_success_line() {
        let mut manager = manager();
        let lines = execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        assert_eq!(lines, vec!["Role \"Mods\" created successfully!".to_string()]);
    }

    #[test]
    fn create_duplicate_role_reports_error_line() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        let lines = execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        assert_eq!(
            lines,
            vec!["Error: Unable to create role, \"Mods\" already exists.".to_string()]
        );
    }

    #[test]
    fn describe_role_renders_two_lines() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        execute(AdminAction::EnrollUser, &mut manager, "bob Mods", "streamer");
        execute(
            AdminAction::RestrictCommand,
            &mut manager,
            "mod.kick Mods",
            "streamer",
        );
        let lines = execute(AdminAction::DescribeRole, &mut manager, "Mods", "streamer");
        assert_eq!(
            lines,
            vec![
                "Role \"Mods\" contains the following commands: mod.kick".to_string(),
                "Role \"Mods\" contains the following users: bob".to_string(),
            ]
        );
    }

    #[test]
    fn describe_absent_role_reports_error_line() {
        let mut manager = manager();
        let lines = execute(AdminAction::DescribeRole, &mut manager, "Mods", "streamer");
        assert_eq!(
            lines,
            vec!["Error: No role with name \"Mods\" was found.".to_string()]
        );
    }

    #[test]
    fn delete_role_success_line() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        let lines = execute(AdminAction::DeleteRole, &mut manager, "Mods", "streamer");
        assert_eq!(lines, vec!["Role \"Mods\" removed successfully!".to_string()]);
    }

    #[test]
    fn enroll_user_success_line_uses_stored_role_name() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        let lines = execute(AdminAction::EnrollUser, &mut manager, "bob mods", "streamer");
        assert_eq!(
            lines,
            vec!["User \"bob\" was added to role \"Mods\" successfully!".to_string()]
        );
    }

    #[test]
    fn unenroll_user_success_line() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        execute(AdminAction::EnrollUser, &mut manager, "bob Mods", "streamer");
        let lines = execute(AdminAction::UnenrollUser, &mut manager, "bob Mods", "streamer");
        assert_eq!(
            lines,
            vec!["User \"bob\" was removed from role \"Mods\" successfully!".to_string()]
        );
    }

    #[test]
    fn enroll_parse_failures_match_the_contract() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");

        let lines = execute(AdminAction::EnrollUser, &mut manager, "bobmods", "streamer");
        assert_eq!(
            lines,
            vec![
                "Error: Invalid number of parameters. Expected parameters: {username} {role name}."
                    .to_string()
            ]
        );

        let lines = execute(AdminAction::EnrollUser, &mut manager, " bob mods", "streamer");
        assert_eq!(lines, vec!["Error: Username cannot be empty.".to_string()]);

        let lines = execute(AdminAction::EnrollUser, &mut manager, "bob ", "streamer");
        assert_eq!(lines, vec!["Error: Role name cannot be empty.".to_string()]);
    }

    #[test]
    fn list_commands_renders_summary_and_module_lines() {
        let mut manager = manager();
        let lines = execute(AdminAction::ListCommands, &mut manager, "", "streamer");
        assert_eq!(
            lines,
            vec![
                "There are 3 commands across 2 modules.".to_string(),
                "fun (1): fun.roll".to_string(),
                "mod (2): mod.ban, mod.kick".to_string(),
            ]
        );
    }

    #[test]
    fn restrict_command_success_line() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        let lines = execute(
            AdminAction::RestrictCommand,
            &mut manager,
            "mod.kick Mods",
            "streamer",
        );
        assert_eq!(
            lines,
            vec!["Command \"mod.kick\" was added to the role \"Mods\" successfully!".to_string()]
        );
    }

    #[test]
    fn unrestrict_command_removes_and_reports() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Mods", "streamer");
        execute(
            AdminAction::RestrictCommand,
            &mut manager,
            "mod.kick Mods",
            "streamer",
        );
        let lines = execute(
            AdminAction::UnrestrictCommand,
            &mut manager,
            "mod.kick Mods",
            "streamer",
        );
        assert_eq!(
            lines,
            vec!["Command \"mod.kick\" was removed from the role \"Mods\" successfully!".to_string()]
        );
        assert!(manager
            .describe_role("Mods")
            .expect("describe")
            .commands
            .is_empty());
    }

    #[test]
    fn restrict_unknown_command_reports_error_line() {
        let mut manager = manager();
        execute(AdminAction::CreateRole, &mut manager, "Admins", "streamer");
        let lines = execute(
            AdminAction::RestrictCommand,
            &mut manager,
            "bogus.cmd Admins",
            "streamer",
        );
        assert_eq!(
            lines,
            vec!["Error: Command \"bogus.cmd\" does not match any commands.".to_string()]
        );
    }

    #[test]
    fn every_invocation_yields_at_least_one_line() {
        let mut manager = manager();
        let actions = [
            AdminAction::ListRoles,
            AdminAction::CreateRole,
            AdminAction::DescribeRole,
            AdminAction::DeleteRole,
            AdminAction::EnrollUser,
            AdminAction::UnenrollUser,
            AdminAction::ListCommands,
            AdminAction::RestrictCommand,
            AdminAction::UnrestrictCommand,
        ];
        for action in actions {
            let lines = execute(action, &mut manager, "", "streamer");
            assert!(!lines.is_empty());
        }
    }
}
