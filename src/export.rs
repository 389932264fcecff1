//! Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::calendar::duration_days;
use crate::models::{EncashmentRequest, LeaveRequest, User};

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Bold header row with column widths, plus a frozen top row.
fn write_headers(worksheet: &mut Worksheet, columns: &[(&str, f64)]) -> Result<(), XlsxError> {
    let header_format = header_format();
    for (col, (header, width)) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn finish(worksheet: &mut Worksheet, rows: usize, columns: usize) -> Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, (columns - 1) as u16)?;
    }
    Ok(())
}

/// Export leave requests to Excel file.
pub fn export_leave_requests_to_excel(data: &[&LeaveRequest], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Leave Requests")?;

    let columns = [
        ("Employee", 25.0),
        ("Category", 18.0),
        ("Start Date", 12.0),
        ("End Date", 12.0),
        ("Days", 8.0),
        ("Reason", 40.0),
        ("Status", 10.0),
        ("Applied", 12.0),
        ("Document", 20.0),
    ];
    write_headers(worksheet, &columns)?;

    for (idx, leave) in data.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &leave.full_name)?;
        worksheet.write_string(row, 1, leave.category.label())?;
        worksheet.write_string(row, 2, &leave.start_date)?;
        worksheet.write_string(row, 3, &leave.end_date)?;
        worksheet.write_number(row, 4, duration_days(&leave.start_date, &leave.end_date) as f64)?;
        worksheet.write_string(row, 5, &leave.reason)?;
        worksheet.write_string(row, 6, leave.status.label())?;
        worksheet.write_string(row, 7, &leave.applied_date)?;
        worksheet.write_string(row, 8, leave.supporting_doc.as_deref().unwrap_or(""))?;
    }

    finish(worksheet, data.len(), columns.len())?;
    workbook.save(path)?;
    Ok(())
}

/// Export encashment requests to Excel file, with the payout each one is worth.
pub fn export_encashments_to_excel(
    data: &[&EncashmentRequest],
    rate: u64,
    currency: &str,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Encashments")?;

    let amount_format = Format::new().set_num_format("#,##0");
    let payout_header = format!("Payout ({currency})");

    let columns = [
        ("Employee", 25.0),
        ("Days", 8.0),
        (payout_header.as_str(), 16.0),
        ("Reason", 40.0),
        ("Status", 10.0),
        ("Applied", 12.0),
        ("Document", 20.0),
    ];
    write_headers(worksheet, &columns)?;

    for (idx, request) in data.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &request.full_name)?;
        worksheet.write_number(row, 1, f64::from(request.days_to_sell))?;
        worksheet.write_number_with_format(row, 2, request.payout(rate) as f64, &amount_format)?;
        worksheet.write_string(row, 3, &request.reason)?;
        worksheet.write_string(row, 4, request.status.label())?;
        worksheet.write_string(row, 5, &request.applied_date)?;
        worksheet.write_string(row, 6, request.supporting_doc.as_deref().unwrap_or(""))?;
    }

    finish(worksheet, data.len(), columns.len())?;
    workbook.save(path)?;
    Ok(())
}

/// Export the employee directory to Excel file. Passwords are never written.
pub fn export_employees_to_excel(users: &[&User], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Employees")?;

    let columns = [
        ("Full Name", 30.0),
        ("Email", 30.0),
        ("Department", 25.0),
        ("Role", 14.0),
        ("Phone", 18.0),
        ("Can Log In", 10.0),
    ];
    write_headers(worksheet, &columns)?;

    for (idx, user) in users.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &user.full_name)?;
        worksheet.write_string(row, 1, &user.email)?;
        worksheet.write_string(row, 2, &user.department)?;
        worksheet.write_string(row, 3, user.role.label())?;
        worksheet.write_string(row, 4, user.phone_number.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 5, if user.password.is_some() { "Yes" } else { "No" })?;
    }

    finish(worksheet, users.len(), columns.len())?;
    workbook.save(path)?;
    Ok(())
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::seeded(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_export_leave_requests() {
        let state = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaves.xlsx");
        let leaves: Vec<&LeaveRequest> = state.leave_requests.iter().collect();

        export_leave_requests_to_excel(&leaves, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_empty_encashments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encashments.xlsx");
        export_encashments_to_excel(&[], 25_000, "RWF", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_employees() {
        let state = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.xlsx");
        let users: Vec<&User> = state.users.iter().collect();
        export_employees_to_excel(&users, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("leave_requests");
        assert!(name.starts_with("leave_requests_"));
        assert!(name.ends_with(".xlsx"));
    }
}
