//! Plain-text rendering of views for the terminal.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{GRID_CELLS, MONTH_NAMES, days_until, duration_days, is_soon, month_grid};
use crate::models::{Department, EncashmentRequest, Holiday, LeaveRequest, Notification, User};
use crate::query::Page;
use crate::reports::{AdminStats, EmployeeStats};

/// Cut to `width` characters, marking the cut with `..`.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(2)).collect();
        format!("{kept}..")
    }
}

fn footer<T>(page: &Page<T>) -> String {
    if page.total_items == 0 {
        return "No entries found.".to_string();
    }
    let mut line = format!(
        "Showing {} to {} of {} entries (page {} of {})",
        page.first_index(),
        page.last_index(),
        page.total_items,
        page.page,
        page.total_pages.max(1)
    );
    if page.has_next() {
        line.push_str(&format!(", next: --page {}", page.page + 1));
    }
    line
}

pub fn user_line(user: &User) -> String {
    format!("{} <{}> | {} | {}", user.full_name, user.email, user.role, user.department)
}

pub fn profile(user: &User) -> String {
    [
        format!("ID:         {}", user.id),
        format!("Name:       {}", user.full_name),
        format!("Email:      {}", user.email),
        format!("Department: {}", user.department),
        format!("Role:       {}", user.role),
        format!("Phone:      {}", user.phone_number.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

pub fn leave_table(page: &Page<&LeaveRequest>) -> String {
    let mut out = format!(
        "{:<10} {:<18} {:<16} {:<23} {:>4}  {:<9} {:<10}\n",
        "ID", "Employee", "Category", "Dates", "Days", "Status", "Applied"
    );
    for leave in &page.items {
        out.push_str(&format!(
            "{:<10} {:<18} {:<16} {:<23} {:>4}  {:<9} {:<10}\n",
            leave.id,
            clip(&leave.full_name, 18),
            clip(leave.category.label(), 16),
            format!("{} to {}", leave.start_date, leave.end_date),
            duration_days(&leave.start_date, &leave.end_date),
            leave.status,
            leave.applied_date
        ));
    }
    out.push_str(&footer(page));
    out
}

pub fn encashment_table(page: &Page<&EncashmentRequest>, rate: u64, currency: &str) -> String {
    let mut out = format!(
        "{:<10} {:<18} {:>4}  {:>14}  {:<9} {:<10}\n",
        "ID", "Employee", "Days", "Payout", "Status", "Applied"
    );
    for request in &page.items {
        out.push_str(&format!(
            "{:<10} {:<18} {:>4}  {:>14}  {:<9} {:<10}\n",
            request.id,
            clip(&request.full_name, 18),
            request.days_to_sell,
            money(request.payout(rate), currency),
            request.status,
            request.applied_date
        ));
    }
    out.push_str(&footer(page));
    out
}

/// Thousands-separated amount with currency code.
pub fn money(amount: u64, currency: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} {currency}")
}

pub fn employee_table(page: &Page<&User>) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<26} {:<16} {:<11}\n",
        "ID", "Name", "Email", "Department", "Role"
    );
    for user in &page.items {
        out.push_str(&format!(
            "{:<10} {:<20} {:<26} {:<16} {:<11}\n",
            user.id,
            clip(&user.full_name, 20),
            clip(&user.email, 26),
            clip(&user.department, 16),
            user.role
        ));
    }
    out.push_str(&footer(page));
    out
}

/// Departments with their live member counts.
pub fn department_table(departments: &[(&Department, usize)]) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<20} {:>7}  {:<8}\n",
        "ID", "Name", "Head", "Members", "Status"
    );
    for (department, members) in departments {
        out.push_str(&format!(
            "{:<10} {:<20} {:<20} {:>7}  {:<8}\n",
            department.id,
            clip(&department.name, 20),
            clip(&department.head, 20),
            members,
            department.status
        ));
    }
    out.trim_end().to_string()
}

pub fn notifications(list: &[&Notification]) -> String {
    if list.is_empty() {
        return "No notifications.".to_string();
    }
    list.iter()
        .map(|n| {
            let marker = if n.read { " " } else { "*" };
            format!("{marker} [{}] {} ({})\n    {}", n.kind, n.title, n.time, n.desc)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn admin_dashboard(stats: &AdminStats, today: NaiveDate) -> String {
    let mut out = String::from("Management Center\n");
    if stats.pending.needs_attention() {
        out.push_str(&format!(
            "! {} new requests waiting for processing ({} leave, {} encashment)\n",
            stats.pending.total(),
            stats.pending.leaves,
            stats.pending.encashments
        ));
    }
    out.push_str(&format!("Total employees:   {}\n", stats.total_employees));
    out.push_str(&format!("Departments:       {}\n", stats.total_departments));
    out.push_str(&format!(
        "Leaves this month: {} ({} {})\n",
        stats.monthly_leaves,
        MONTH_NAMES[today.month0() as usize],
        today.year()
    ));
    out.push_str(&format!("Approved leaves:   {}\n", stats.active_leaves));
    out.push_str("\nLeave requests by department\n");
    let widest = stats.department_tallies.iter().map(|t| t.count).max().unwrap_or(0);
    for tally in &stats.department_tallies {
        out.push_str(&format!("  {:<18} {:>3} {}\n", clip(&tally.name, 18), tally.count, bar(tally.count, widest)));
    }
    out.trim_end().to_string()
}

pub fn employee_dashboard(stats: &EmployeeStats, today: NaiveDate, soon_window_days: i64) -> String {
    let mut out = format!(
        "Requests: {} total, {} pending, {} approved, {} rejected\nRemaining days: {}\n",
        stats.total, stats.pending, stats.approved, stats.rejected, stats.remaining_days
    );

    if !stats.categories.is_empty() {
        out.push_str("\nBy category\n");
        for entry in &stats.categories {
            out.push_str(&format!("  {:<16} {}\n", entry.category, entry.count));
        }
    }

    out.push_str("\nApproved leaves by month\n");
    let widest = stats.monthly_trend.iter().map(|m| m.count).max().unwrap_or(0);
    for entry in &stats.monthly_trend {
        out.push_str(&format!("  {} {:>2} {}\n", entry.month, entry.count, bar(entry.count, widest)));
    }

    out.push_str("\nUpcoming holidays\n");
    out.push_str(&holiday_lines(&stats.upcoming_holidays, today, soon_window_days));
    out.trim_end().to_string()
}

fn bar(count: usize, widest: usize) -> String {
    const WIDTH: usize = 20;
    if widest == 0 {
        return String::new();
    }
    "#".repeat((count * WIDTH).div_ceil(widest))
}

pub fn holiday_lines(holidays: &[Holiday], today: NaiveDate, soon_window_days: i64) -> String {
    if holidays.is_empty() {
        return "  None\n".to_string();
    }
    holidays
        .iter()
        .map(|h| {
            let days = days_until(h.date, today);
            let when = if is_soon(h.date, today, soon_window_days) {
                match days {
                    0 => " (today)".to_string(),
                    1 => " (tomorrow, soon)".to_string(),
                    n => format!(" (in {n} days, soon)"),
                }
            } else {
                String::new()
            };
            format!("  {} {}{}\n", h.date.format("%a %d %b %Y"), h.name, when)
        })
        .collect()
}

/// Sunday-first month calendar; holiday days are starred.
pub fn month_calendar(year: i32, month: u32, holidays: &[Holiday]) -> String {
    let mut out = format!("{} {year}\n Su  Mo  Tu  We  Th  Fr  Sa\n", MONTH_NAMES[(month - 1) as usize]);
    let grid = month_grid(year, month);
    for week in 0..GRID_CELLS / 7 {
        let cells = &grid[week * 7..week * 7 + 7];
        if week > 0 && cells.iter().all(Option::is_none) {
            break;
        }
        let line: String = cells
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let starred = holidays.iter().any(|h| h.date.day() == *day);
                    format!("{day:>3}{}", if starred { "*" } else { " " })
                }
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    for holiday in holidays {
        out.push_str(&format!("  * {:>2} {}\n", holiday.date.day(), holiday.name));
    }
    out.trim_end().to_string()
}
