//! Terminal front end.

mod commands;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{DepartmentStatus, LeaveCategory, LeaveStatus, Role};

pub use commands::run;

/// Leave and leave-encashment management.
#[derive(Parser)]
#[command(name = "smart-leave", version)]
pub struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    pub dev: bool,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the session user and unread notifications
    Whoami,
    /// Create an account that can log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long, default_value = "employee")]
        role: Role,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Show or edit your profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, conflicts_with = "clear_phone")]
        phone: Option<String>,
        #[arg(long)]
        clear_phone: bool,
        #[arg(long)]
        department: Option<String>,
    },
    /// Apply for leave
    Apply {
        #[arg(long)]
        category: LeaveCategory,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: String,
        /// Supporting document file name
        #[arg(long)]
        document: Option<String>,
    },
    /// Request to sell unused leave days
    Encash {
        #[arg(long)]
        days: u32,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        document: Option<String>,
    },
    /// Your own requests
    History {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Show encashment requests instead of leave
        #[arg(long)]
        encashments: bool,
    },
    /// Review queue (Admin/HR)
    Requests {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<LeaveStatus>,
        #[arg(long, conflicts_with = "encashments")]
        category: Option<LeaveCategory>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        encashments: bool,
    },
    /// Approve a request (Admin/HR)
    Approve {
        id: String,
        #[arg(long)]
        encashment: bool,
    },
    /// Reject a request (Admin/HR)
    Reject {
        id: String,
        #[arg(long)]
        encashment: bool,
    },
    /// Book approved leave for an employee (Admin/HR)
    Assign {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        category: LeaveCategory,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        document: Option<String>,
    },
    /// Your inbox
    Notifications,
    /// Mark your whole inbox as read
    MarkRead,
    /// Dashboard for your role
    Dashboard,
    /// Department administration (Admin/HR)
    Departments {
        #[command(subcommand)]
        action: DepartmentCommand,
    },
    /// Employee directory (Admin/HR)
    Employees {
        #[command(subcommand)]
        action: EmployeeCommand,
    },
    /// Public holidays
    Holidays {
        /// Show a calendar for YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Show, set, or toggle the display theme
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },
    /// Write an Excel report
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DepartmentCommand {
    List,
    /// Department details and roster
    Show {
        id: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        head: String,
        #[arg(long, default_value = "active")]
        status: DepartmentStatus,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        head: Option<String>,
        #[arg(long)]
        status: Option<DepartmentStatus>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long, default_value = "employee")]
        role: Role,
        #[arg(long)]
        phone: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, conflicts_with = "clear_phone")]
        phone: Option<String>,
        #[arg(long)]
        clear_phone: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
    Toggle,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportKind {
    Leaves,
    Encashments,
    Employees,
}

impl ExportKind {
    fn file_prefix(&self) -> &'static str {
        match self {
            ExportKind::Leaves => "leave_requests",
            ExportKind::Encashments => "encashments",
            ExportKind::Employees => "employees",
        }
    }
}

impl Command {
    /// Whether the command writes to the store and so waits out the
    /// processing delay first.
    pub fn commits(&self) -> bool {
        match self {
            Command::Login { .. }
            | Command::Logout
            | Command::Register { .. }
            | Command::Apply { .. }
            | Command::Encash { .. }
            | Command::Approve { .. }
            | Command::Reject { .. }
            | Command::Assign { .. }
            | Command::MarkRead => true,
            Command::Profile {
                name,
                email,
                phone,
                clear_phone,
                department,
            } => name.is_some() || email.is_some() || phone.is_some() || *clear_phone || department.is_some(),
            Command::Departments { action } => {
                !matches!(action, DepartmentCommand::List | DepartmentCommand::Show { .. })
            }
            Command::Employees { action } => !matches!(action, EmployeeCommand::List { .. }),
            Command::Theme { mode } => mode.is_some(),
            Command::Whoami
            | Command::History { .. }
            | Command::Requests { .. }
            | Command::Notifications
            | Command::Dashboard
            | Command::Holidays { .. }
            | Command::Export { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "smart-leave",
            "apply",
            "--category",
            "annual",
            "--start",
            "2026-07-01",
            "--end",
            "2026-07-01",
            "--reason",
            "Wedding",
        ])
        .unwrap();
        match cli.command {
            Command::Apply { category, .. } => assert_eq!(category, LeaveCategory::Annual),
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_parse_role_and_status_labels() {
        let cli = Cli::try_parse_from(["smart-leave", "employees", "list", "--role", "hr-manager"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Employees {
                action: EmployeeCommand::List {
                    role: Some(Role::HrManager),
                    ..
                }
            }
        ));

        let cli = Cli::try_parse_from(["smart-leave", "requests", "--status", "pending"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Requests {
                status: Some(LeaveStatus::Pending),
                ..
            }
        ));
    }

    #[test]
    fn test_commits() {
        let read_only = Cli::try_parse_from(["smart-leave", "departments", "list"]).unwrap();
        assert!(!read_only.command.commits());

        let profile_view = Cli::try_parse_from(["smart-leave", "profile"]).unwrap();
        assert!(!profile_view.command.commits());

        let approve = Cli::try_parse_from(["smart-leave", "approve", "req2"]).unwrap();
        assert!(approve.command.commits());
    }
}
