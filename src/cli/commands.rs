//! Command handlers.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;

use super::render;
use super::{Command, DepartmentCommand, EmployeeCommand, ExportKind, ThemeMode};
use crate::access::{Route, resolve};
use crate::calendar::{holidays_in_month, past_holidays, upcoming_holidays};
use crate::directory::department_name_exists;
use crate::error::AppError;
use crate::export;
use crate::models::{
    CreateDepartment, CreateUser, EncashmentDraft, EncashmentRequest, LeaveCategory, LeaveDraft, LeaveRequest,
    LeaveStatus, ProfileUpdate, RegisterUser, UpdateDepartment, UpdateUser, User,
};
use crate::query::{EncashmentFilter, LeaveFilter, UserFilter};
use crate::reports::department_approved_leaves;
use crate::service::LeaveDesk;
use crate::state::Theme;
use crate::storage::KeyValueStore;

/// Run one command against the desk, printing the result to stdout.
pub fn run<S: KeyValueStore>(desk: &mut LeaveDesk<S>, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = desk.login(&email, &password)?;
            println!("Welcome back, {}.", user.full_name);
            println!("{}", render::user_line(&user));
        }
        Command::Logout => match desk.logout()? {
            Some(user) => println!("Logged out {}.", user.full_name),
            None => println!("Not logged in."),
        },
        Command::Whoami => match desk.current_user() {
            Some(user) => {
                println!("{}", render::user_line(user));
                println!("Unread notifications: {}", desk.unread_count());
            }
            None => println!("Not logged in."),
        },
        Command::Register {
            name,
            email,
            department,
            role,
            phone,
            password,
            confirm,
        } => {
            let user = desk.register(RegisterUser {
                full_name: name,
                email,
                department,
                role,
                phone_number: phone,
                password,
                confirm_password: confirm,
            })?;
            println!("Account created for {}. You can now log in.", user.email);
        }
        Command::Profile {
            name,
            email,
            phone,
            clear_phone,
            department,
        } => {
            let changes = ProfileUpdate {
                full_name: name,
                email,
                phone_number: phone_change(phone, clear_phone),
                department,
            };
            let user = if has_profile_changes(&changes) {
                let user = desk.update_profile(changes)?;
                println!("Profile updated.");
                user
            } else {
                desk.require_route(Route::Profile)?
            };
            println!("{}", render::profile(&user));
        }
        Command::Apply {
            category,
            start,
            end,
            reason,
            document,
        } => {
            let request = desk.submit_leave(leave_draft(category, start, end, reason, document))?;
            println!(
                "Leave request {} submitted: {} from {} to {}.",
                request.id, request.category, request.start_date, request.end_date
            );
            println!("Your application has been successfully sent to HR.");
        }
        Command::Encash {
            days,
            reason,
            document,
        } => {
            let request = desk.submit_encashment(EncashmentDraft {
                days_to_sell: days,
                reason,
                supporting_doc: document,
            })?;
            let policy = &desk.config().policy;
            println!(
                "Encashment request {} submitted: {} days, estimated payout {}.",
                request.id,
                request.days_to_sell,
                render::money(request.payout(policy.encashment_rate), &policy.currency)
            );
        }
        Command::History {
            search,
            page,
            encashments,
        } => {
            if encashments {
                let page = desk.encashment_history_page(&search, page)?;
                print_encashments(desk, &page);
            } else {
                println!("{}", render::leave_table(&desk.history_page(&search, page)?));
            }
        }
        Command::Requests {
            search,
            status,
            category,
            page,
            encashments,
        } => {
            if encashments {
                let filter = EncashmentFilter { search, status };
                let page = desk.encashment_page(&filter, page)?;
                print_encashments(desk, &page);
            } else {
                let filter = LeaveFilter {
                    search,
                    status,
                    category,
                };
                println!("{}", render::leave_table(&desk.leave_page(&filter, page)?));
            }
        }
        Command::Approve { id, encashment } => decide(desk, &id, encashment, LeaveStatus::Approved)?,
        Command::Reject { id, encashment } => decide(desk, &id, encashment, LeaveStatus::Rejected)?,
        Command::Assign {
            employee,
            category,
            start,
            end,
            reason,
            document,
        } => {
            let draft = leave_draft(category, start, end, reason, document);
            let Some(request) = desk.assign_leave(&employee, draft)? else {
                bail!("No employee with id {employee}");
            };
            println!(
                "Assigned {} to {} from {} to {} ({}).",
                request.category, request.full_name, request.start_date, request.end_date, request.id
            );
        }
        Command::Notifications => {
            println!("{}", render::notifications(&desk.notifications()?));
        }
        Command::MarkRead => {
            let changed = desk.mark_all_read()?;
            println!("Marked {changed} notifications as read.");
        }
        Command::Dashboard => dashboard(desk)?,
        Command::Departments { action } => departments(desk, action)?,
        Command::Employees { action } => employees(desk, action)?,
        Command::Holidays { month } => holidays(desk, month.as_deref())?,
        Command::Theme { mode } => {
            let theme = match mode {
                None => desk.theme(),
                Some(ThemeMode::Light) => desk.set_theme(Theme::Light)?,
                Some(ThemeMode::Dark) => desk.set_theme(Theme::Dark)?,
                Some(ThemeMode::Toggle) => desk.toggle_theme()?,
            };
            println!("Theme: {theme}");
        }
        Command::Export { kind, output } => export_report(desk, kind, output)?,
    }
    Ok(())
}

fn leave_draft(
    category: LeaveCategory,
    start: String,
    end: String,
    reason: String,
    document: Option<String>,
) -> LeaveDraft {
    LeaveDraft {
        category,
        start_date: start,
        end_date: end,
        reason,
        supporting_doc: document,
    }
}

fn phone_change(phone: Option<String>, clear: bool) -> Option<Option<String>> {
    if clear { Some(None) } else { phone.map(Some) }
}

fn has_profile_changes(changes: &ProfileUpdate) -> bool {
    changes.full_name.is_some()
        || changes.email.is_some()
        || changes.phone_number.is_some()
        || changes.department.is_some()
}

fn print_encashments<S: KeyValueStore>(desk: &LeaveDesk<S>, page: &crate::query::Page<&EncashmentRequest>) {
    let policy = &desk.config().policy;
    println!("{}", render::encashment_table(page, policy.encashment_rate, &policy.currency));
}

fn decide<S: KeyValueStore>(desk: &mut LeaveDesk<S>, id: &str, encashment: bool, status: LeaveStatus) -> Result<()> {
    let verb = status.label().to_lowercase();
    if encashment {
        let Some(request) = desk.set_encashment_status(id, status)? else {
            bail!("No encashment request with id {id}");
        };
        println!("Encashment request {} from {} {verb}.", request.id, request.full_name);
    } else {
        let Some(request) = desk.set_leave_status(id, status)? else {
            bail!("No leave request with id {id}");
        };
        println!("Leave request {} from {} {verb}.", request.id, request.full_name);
    }
    Ok(())
}

fn dashboard<S: KeyValueStore>(desk: &LeaveDesk<S>) -> Result<()> {
    let user = desk.current_user().cloned();
    match resolve(Route::Home, user.as_ref()) {
        Route::AdminDashboard => {
            println!("{}", render::admin_dashboard(&desk.admin_stats()?, desk.today()));
        }
        Route::Dashboard => {
            let stats = desk.employee_stats()?;
            println!(
                "{}",
                render::employee_dashboard(&stats, desk.today(), desk.config().policy.soon_window_days)
            );
        }
        _ => bail!("Please log in first"),
    }
    Ok(())
}

fn departments<S: KeyValueStore>(desk: &mut LeaveDesk<S>, action: DepartmentCommand) -> Result<()> {
    match action {
        DepartmentCommand::List => {
            let rows: Vec<_> = desk
                .departments()?
                .iter()
                .map(|d| (d, desk.member_count(&d.name)))
                .collect();
            println!("{}", render::department_table(&rows));
        }
        DepartmentCommand::Show { id, search, page } => {
            let Some(department) = desk.departments()?.iter().find(|d| d.id == id) else {
                bail!("No department with id {id}");
            };
            println!("{} ({})", department.name, department.status);
            println!("Head: {}", department.head);
            println!("Members: {}", desk.member_count(&department.name));
            println!(
                "Approved leaves: {}",
                department_approved_leaves(desk.state(), &department.name)
            );
            println!();
            println!("{}", render::employee_table(&desk.roster_page(&department.name, &search, page)?));
        }
        DepartmentCommand::Add { name, head, status } => {
            if department_name_exists(desk.state(), name.trim(), None) {
                println!("Note: a department named {} already exists.", name.trim());
            }
            let department = desk.create_department(CreateDepartment { name, head, status })?;
            println!("Created department {} ({}).", department.name, department.id);
        }
        DepartmentCommand::Edit { id, name, head, status } => {
            let Some(department) = desk.update_department(&id, UpdateDepartment { name, head, status })? else {
                bail!("No department with id {id}");
            };
            println!("Updated department {} ({}).", department.name, department.id);
        }
        DepartmentCommand::Delete { id } => {
            if !desk.delete_department(&id)? {
                bail!("No department with id {id}");
            }
            println!("Deleted department {id}.");
        }
    }
    Ok(())
}

fn employees<S: KeyValueStore>(desk: &mut LeaveDesk<S>, action: EmployeeCommand) -> Result<()> {
    match action {
        EmployeeCommand::List {
            search,
            department,
            role,
            page,
        } => {
            let filter = UserFilter {
                search,
                department,
                role,
            };
            println!("{}", render::employee_table(&desk.employee_page(&filter, page)?));
        }
        EmployeeCommand::Add {
            name,
            email,
            department,
            role,
            phone,
        } => {
            let user = desk.create_user(CreateUser {
                full_name: name,
                email,
                department,
                role,
                phone_number: phone,
            })?;
            println!("Added {} ({}).", render::user_line(&user), user.id);
        }
        EmployeeCommand::Edit {
            id,
            name,
            email,
            department,
            role,
            phone,
            clear_phone,
        } => {
            let changes = UpdateUser {
                full_name: name,
                email,
                department,
                role,
                phone_number: phone_change(phone, clear_phone),
            };
            let Some(user) = desk.update_user(&id, changes)? else {
                bail!("No employee with id {id}");
            };
            println!("Updated {}.", render::user_line(&user));
        }
        EmployeeCommand::Delete { id } => {
            if !desk.delete_user(&id)? {
                bail!("No employee with id {id}");
            }
            println!("Deleted employee {id}.");
        }
    }
    Ok(())
}

fn holidays<S: KeyValueStore>(desk: &LeaveDesk<S>, month: Option<&str>) -> Result<()> {
    desk.require_route(Route::Holidays)?;
    let today = desk.today();
    let window = desk.config().policy.soon_window_days;

    match month {
        Some(month) => {
            let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
                .with_context(|| format!("Invalid month {month}, expected YYYY-MM"))?;
            let listed = holidays_in_month(first.year(), first.month());
            println!("{}", render::month_calendar(first.year(), first.month(), &listed));
        }
        None => {
            println!("Upcoming");
            print!("{}", render::holiday_lines(&upcoming_holidays(today, None), today, window));
            println!("\nPast");
            print!("{}", render::holiday_lines(&past_holidays(today), today, window));
        }
    }
    Ok(())
}

fn export_report<S: KeyValueStore>(desk: &LeaveDesk<S>, kind: ExportKind, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(export::generate_export_filename(kind.file_prefix())));
    let state = desk.state();

    let written = match kind {
        ExportKind::Leaves => {
            desk.require_route(Route::LeaveManage)?;
            let leaves: Vec<&LeaveRequest> = state.leave_requests.iter().collect();
            export::export_leave_requests_to_excel(&leaves, &path)
        }
        ExportKind::Encashments => {
            desk.require_route(Route::LeaveManage)?;
            let policy = &desk.config().policy;
            let requests: Vec<&EncashmentRequest> = state.encashments.iter().collect();
            export::export_encashments_to_excel(&requests, policy.encashment_rate, &policy.currency, &path)
        }
        ExportKind::Employees => {
            desk.require_route(Route::Employees)?;
            let users: Vec<&User> = state.users.iter().collect();
            export::export_employees_to_excel(&users, &path)
        }
    };
    written
        .map_err(AppError::from)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported to {}", path.display());
    Ok(())
}
