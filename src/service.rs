//! Leave desk service: the engine bound to a store and a session.
//!
//! Every mutating call gates on the session user's route access, runs the
//! pure engine function, then persists exactly the collections it touched
//! in the order they changed.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::access::{Access, Route, authorize};
use crate::auth;
use crate::calendar::{format_date, parse_date};
use crate::config::AppConfig;
use crate::directory::{self, require};
use crate::error::{AppError, Result};
use crate::lifecycle;
use crate::models::{
    CreateDepartment, CreateUser, Department, EncashmentDraft, EncashmentRequest, LeaveDraft, LeaveRequest,
    LeaveStatus, Notification, ProfileUpdate, RegisterUser, UpdateDepartment, UpdateUser, User,
};
use crate::notify;
use crate::query::{self, EncashmentFilter, LeaveFilter, Page, UserFilter, paginate};
use crate::reports::{self, AdminStats, EmployeeStats};
use crate::state::{AppState, Collection, Theme};
use crate::storage::KeyValueStore;

/// Persisted leave-management session.
pub struct LeaveDesk<S: KeyValueStore> {
    store: S,
    state: AppState,
    config: AppConfig,
    today: NaiveDate,
}

impl<S: KeyValueStore> LeaveDesk<S> {
    /// Load state from `store`, seeding missing collections.
    ///
    /// A store that lacks any seeded collection gets every collection
    /// written back, so the seed requests keep the dates of the first run.
    pub fn open(mut store: S, config: AppConfig, today: NaiveDate) -> Result<Self> {
        let state = AppState::load(&store, today)?;
        if AppState::seed_pending(&store)? {
            info!("Writing initial data set");
            state.persist_all(&mut store)?;
        }
        Ok(Self {
            store,
            state,
            config,
            today,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, collections: &[Collection]) -> Result<()> {
        debug!("Persisting {:?}", collections);
        self.state.persist(&mut self.store, collections)
    }

    /// Gate a route for the session user.
    pub fn authorize(&self, route: Route) -> Access {
        authorize(route, self.current_user())
    }

    /// Fail unless the session user may open `route`; returns that user.
    pub fn require_route(&self, route: Route) -> Result<User> {
        let user = self
            .current_user()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Please log in first"))?;
        match self.authorize(route) {
            Access::Allow => Ok(user),
            Access::Redirect(_) => Err(AppError::unauthorized(format!(
                "{} ({}) cannot access {route}",
                user.full_name, user.role
            ))),
        }
    }

    // Session

    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = auth::login(&mut self.state, email, password)?;
        self.persist(&[Collection::CurrentUser])?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<Option<User>> {
        let user = auth::logout(&mut self.state);
        self.persist(&[Collection::CurrentUser])?;
        Ok(user)
    }

    /// Self-registration; only available while signed out.
    pub fn register(&mut self, form: RegisterUser) -> Result<User> {
        if self.authorize(Route::Register) != Access::Allow {
            return Err(AppError::unauthorized("Log out before registering a new account"));
        }
        let user = auth::register(&mut self.state, form, self.config.policy.min_password_len)?;
        self.persist(&[Collection::Users])?;
        Ok(user)
    }

    pub fn update_profile(&mut self, changes: ProfileUpdate) -> Result<User> {
        self.require_route(Route::Profile)?;
        let user = auth::update_profile(&mut self.state, changes)?;
        self.persist(&[Collection::Users, Collection::CurrentUser])?;
        Ok(user)
    }

    // Requests

    pub fn submit_leave(&mut self, draft: LeaveDraft) -> Result<LeaveRequest> {
        let user = self.require_route(Route::ApplyLeave)?;
        let draft = normalize_leave_draft(draft)?;
        let request = lifecycle::submit_leave_request(&mut self.state, &user, draft, self.today);
        self.persist(&[Collection::LeaveRequests, Collection::Notifications])?;
        Ok(request)
    }

    /// Submit an encashment; days outside 1..=max are clamped.
    pub fn submit_encashment(&mut self, draft: EncashmentDraft) -> Result<EncashmentRequest> {
        let user = self.require_route(Route::ApplyLeave)?;
        require("Reason", &draft.reason)?;
        let draft = draft.clamped(self.config.policy.max_encashment_days);
        let request = lifecycle::submit_encashment_request(&mut self.state, &user, draft, self.today);
        self.persist(&[Collection::Encashments, Collection::Notifications])?;
        Ok(request)
    }

    /// Decide a leave request. `Ok(None)` when the id is unknown.
    pub fn set_leave_status(&mut self, request_id: &str, status: LeaveStatus) -> Result<Option<LeaveRequest>> {
        self.require_route(Route::LeaveManage)?;
        let Some(request) = lifecycle::set_leave_status(&mut self.state, request_id, status) else {
            info!("Leave request {request_id} not found");
            return Ok(None);
        };
        self.persist(&[Collection::LeaveRequests, Collection::Notifications])?;
        Ok(Some(request))
    }

    /// Decide an encashment request. `Ok(None)` when the id is unknown.
    pub fn set_encashment_status(
        &mut self,
        request_id: &str,
        status: LeaveStatus,
    ) -> Result<Option<EncashmentRequest>> {
        self.require_route(Route::LeaveManage)?;
        let Some(request) = lifecycle::set_encashment_status(&mut self.state, request_id, status) else {
            info!("Encashment request {request_id} not found");
            return Ok(None);
        };
        self.persist(&[Collection::Encashments, Collection::Notifications])?;
        Ok(Some(request))
    }

    /// Book approved leave for an employee. `Ok(None)` when the employee is unknown.
    pub fn assign_leave(&mut self, employee_id: &str, draft: LeaveDraft) -> Result<Option<LeaveRequest>> {
        let manager = self.require_route(Route::Departments)?;
        let draft = normalize_leave_draft(draft)?;
        let Some(employee) = self.state.find_user(employee_id).cloned() else {
            info!("Employee {employee_id} not found");
            return Ok(None);
        };
        let request = lifecycle::assign_leave_directly(&mut self.state, &manager, &employee, draft, self.today);
        self.persist(&[Collection::LeaveRequests, Collection::Notifications])?;
        Ok(Some(request))
    }

    /// Requests in the management view.
    pub fn leave_page(&self, filter: &LeaveFilter, page: usize) -> Result<Page<&LeaveRequest>> {
        self.require_route(Route::LeaveManage)?;
        Ok(paginate(
            filter.apply(&self.state.leave_requests),
            page,
            self.config.ui.requests_page_size,
        ))
    }

    pub fn encashment_page(&self, filter: &EncashmentFilter, page: usize) -> Result<Page<&EncashmentRequest>> {
        self.require_route(Route::LeaveManage)?;
        Ok(paginate(
            filter.apply(&self.state.encashments),
            page,
            self.config.ui.requests_page_size,
        ))
    }

    /// The session user's own leave requests.
    pub fn history_page(&self, search: &str, page: usize) -> Result<Page<&LeaveRequest>> {
        let user = self.require_route(Route::History)?;
        Ok(paginate(
            query::leave_history(&self.state.leave_requests, &user.id, search),
            page,
            self.config.ui.history_page_size,
        ))
    }

    pub fn encashment_history_page(&self, search: &str, page: usize) -> Result<Page<&EncashmentRequest>> {
        let user = self.require_route(Route::History)?;
        Ok(paginate(
            query::encashment_history(&self.state.encashments, &user.id, search),
            page,
            self.config.ui.history_page_size,
        ))
    }

    // Notifications

    /// The session user's inbox, newest first.
    pub fn notifications(&self) -> Result<Vec<&Notification>> {
        let user = self.require_route(Route::Profile)?;
        Ok(notify::notifications_for(&self.state, &user.id))
    }

    pub fn unread_count(&self) -> usize {
        self.current_user()
            .map(|u| notify::unread_count(&self.state, &u.id))
            .unwrap_or(0)
    }

    pub fn mark_all_read(&mut self) -> Result<usize> {
        let user = self.require_route(Route::Profile)?;
        let changed = notify::mark_all_read(&mut self.state, &user.id);
        if changed > 0 {
            self.persist(&[Collection::Notifications])?;
        }
        Ok(changed)
    }

    // Dashboards

    pub fn admin_stats(&self) -> Result<AdminStats> {
        self.require_route(Route::AdminDashboard)?;
        Ok(reports::admin_stats(&self.state, self.today))
    }

    pub fn employee_stats(&self) -> Result<EmployeeStats> {
        let user = self.require_route(Route::Dashboard)?;
        Ok(reports::employee_stats(&self.state, &user.id, &self.config.policy, self.today))
    }

    // Directory

    pub fn employee_page(&self, filter: &UserFilter, page: usize) -> Result<Page<&User>> {
        self.require_route(Route::Employees)?;
        Ok(paginate(
            filter.apply(&self.state.users),
            page,
            self.config.ui.employees_page_size,
        ))
    }

    pub fn create_user(&mut self, data: CreateUser) -> Result<User> {
        self.require_route(Route::Employees)?;
        let user = directory::create_user(&mut self.state, data)?;
        self.persist(&[Collection::Users])?;
        Ok(user)
    }

    pub fn update_user(&mut self, id: &str, data: UpdateUser) -> Result<Option<User>> {
        self.require_route(Route::Employees)?;
        let user = directory::update_user(&mut self.state, id, data)?;
        if user.is_some() {
            self.persist(&[Collection::Users])?;
        }
        Ok(user)
    }

    pub fn delete_user(&mut self, id: &str) -> Result<bool> {
        self.require_route(Route::Employees)?;
        let removed = directory::delete_user(&mut self.state, id);
        if removed {
            self.persist(&[Collection::Users])?;
        }
        Ok(removed)
    }

    pub fn departments(&self) -> Result<&[Department]> {
        self.require_route(Route::Departments)?;
        Ok(&self.state.departments)
    }

    pub fn member_count(&self, department: &str) -> usize {
        directory::member_count(&self.state, department)
    }

    pub fn roster_page(&self, department: &str, search: &str, page: usize) -> Result<Page<&User>> {
        self.require_route(Route::Departments)?;
        let members = directory::roster(&self.state, department);
        Ok(paginate(
            query::search_roster(members, search),
            page,
            self.config.ui.roster_page_size,
        ))
    }

    pub fn create_department(&mut self, data: CreateDepartment) -> Result<Department> {
        self.require_route(Route::Departments)?;
        let department = directory::create_department(&mut self.state, data)?;
        self.persist(&[Collection::Departments])?;
        Ok(department)
    }

    pub fn update_department(&mut self, id: &str, data: UpdateDepartment) -> Result<Option<Department>> {
        self.require_route(Route::Departments)?;
        let department = directory::update_department(&mut self.state, id, data)?;
        if department.is_some() {
            self.persist(&[Collection::Departments])?;
        }
        Ok(department)
    }

    pub fn delete_department(&mut self, id: &str) -> Result<bool> {
        self.require_route(Route::Departments)?;
        let removed = directory::delete_department(&mut self.state, id);
        if removed {
            self.persist(&[Collection::Departments])?;
        }
        Ok(removed)
    }

    // Theme

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.state.theme = theme;
        self.persist(&[Collection::Theme])?;
        info!("Theme set to {theme}");
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.state.theme.toggled())
    }
}

/// Required fields present and dates in stored form. Date order is not checked.
fn normalize_leave_draft(mut draft: LeaveDraft) -> Result<LeaveDraft> {
    require("Reason", &draft.reason)?;
    draft.start_date = normalize_date("Start date", &draft.start_date)?;
    draft.end_date = normalize_date("End date", &draft.end_date)?;
    Ok(draft)
}

fn normalize_date(label: &str, input: &str) -> Result<String> {
    require(label, input)?;
    parse_date(input)
        .map(format_date)
        .ok_or_else(|| AppError::validation(format!("{label} is not a valid date: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveCategory;
    use crate::storage::{MemoryStore, keys};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn desk() -> LeaveDesk<MemoryStore> {
        LeaveDesk::open(MemoryStore::new(), AppConfig::default(), today()).unwrap()
    }

    fn draft(start: &str, end: &str) -> LeaveDraft {
        LeaveDraft {
            category: LeaveCategory::Annual,
            start_date: start.to_string(),
            end_date: end.to_string(),
            reason: "Trip".to_string(),
            supporting_doc: None,
        }
    }

    #[test]
    fn test_login_persists_session() {
        let mut desk = desk();
        desk.login("john@company.com", "password123").unwrap();
        assert!(desk.store().get(keys::CURRENT_USER).unwrap().is_some());

        desk.logout().unwrap();
        assert!(desk.store().get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_failed_login_writes_nothing() {
        let mut desk = desk();
        let before = desk.store().clone();
        assert!(desk.login("john@company.com", "nope").is_err());
        assert_eq!(desk.store(), &before);
    }

    #[test]
    fn test_open_writes_seed_once() {
        let store = LeaveDesk::open(MemoryStore::new(), AppConfig::default(), today())
            .unwrap()
            .store
            .clone();
        let seeded = store.get(keys::REQUESTS).unwrap().unwrap();
        assert!(store.get(keys::USERS).unwrap().is_some());
        assert!(store.get(keys::DEPARTMENTS).unwrap().is_some());

        let later = today() + chrono::Days::new(3);
        let reopened = LeaveDesk::open(store, AppConfig::default(), later).unwrap();
        assert_eq!(reopened.store().get(keys::REQUESTS).unwrap().unwrap(), seeded);
        assert_eq!(reopened.state(), &AppState::seeded(today()));
    }

    #[test]
    fn test_submit_requires_session_and_employee_role() {
        let mut desk = desk();
        assert!(matches!(
            desk.submit_leave(draft("2026-11-02", "2026-11-02")),
            Err(AppError::Unauthorized(_))
        ));

        desk.login("admin@company.com", "password123").unwrap();
        assert!(matches!(
            desk.submit_leave(draft("2026-11-02", "2026-11-02")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_submit_normalizes_dates_and_persists_in_order() {
        let mut desk = desk();
        desk.login("john@company.com", "password123").unwrap();
        let request = desk.submit_leave(draft("2026/11/02", "2026.11.03")).unwrap();
        assert_eq!(request.start_date, "2026-11-02");
        assert_eq!(request.end_date, "2026-11-03");
        assert!(desk.store().get(keys::REQUESTS).unwrap().unwrap().contains(&request.id));
        assert!(desk.store().get(keys::NOTIFICATIONS).unwrap().is_some());

        assert!(matches!(
            desk.submit_leave(draft("soon", "2026-11-03")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_encashment_days_are_clamped() {
        let mut desk = desk();
        desk.login("john@company.com", "password123").unwrap();
        let request = desk
            .submit_encashment(EncashmentDraft {
                days_to_sell: 45,
                reason: "Rent".to_string(),
                supporting_doc: None,
            })
            .unwrap();
        assert_eq!(request.days_to_sell, 31);
    }

    #[test]
    fn test_unknown_request_writes_nothing() {
        let mut desk = desk();
        desk.login("jane@company.com", "password123").unwrap();
        let before = desk.store().clone();
        assert!(desk.set_leave_status("missing", LeaveStatus::Approved).unwrap().is_none());
        assert_eq!(desk.store(), &before);
    }

    #[test]
    fn test_assign_leave_unknown_employee() {
        let mut desk = desk();
        desk.login("jane@company.com", "password123").unwrap();
        assert!(desk.assign_leave("missing", draft("2026-11-02", "2026-11-02")).unwrap().is_none());
        let assigned = desk.assign_leave("5", draft("2026-11-02", "2026-11-04")).unwrap().unwrap();
        assert_eq!(assigned.status, LeaveStatus::Approved);
    }

    #[test]
    fn test_register_only_when_signed_out() {
        let mut desk = desk();
        desk.login("john@company.com", "password123").unwrap();
        let form = RegisterUser {
            full_name: "New Person".to_string(),
            email: "new@company.com".to_string(),
            department: "Sales".to_string(),
            role: crate::models::Role::Employee,
            phone_number: None,
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert!(desk.register(form.clone()).is_err());

        desk.logout().unwrap();
        desk.register(form).unwrap();
        assert!(desk.login("new@company.com", "secret1").is_ok());
    }

    #[test]
    fn test_theme_toggle_persists_raw_value() {
        let mut desk = desk();
        assert_eq!(desk.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(desk.store().get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_pages_use_configured_sizes() {
        let mut desk = desk();
        desk.login("admin@company.com", "password123").unwrap();
        let page = desk.employee_page(&UserFilter::default(), 2).unwrap();
        assert_eq!(page.per_page, 5);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
    }
}
