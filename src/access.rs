//! Screen routing and role gating.

use std::fmt;

use crate::models::User;

/// Every screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    ApplyLeave,
    History,
    Holidays,
    Profile,
    AdminDashboard,
    LeaveManage,
    Employees,
    Departments,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    Anyone,
    Guest,
    Employee,
    Manager,
    SignedIn,
}

/// Result of gating a route for the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::ApplyLeave,
        Route::History,
        Route::Holidays,
        Route::Profile,
        Route::AdminDashboard,
        Route::LeaveManage,
        Route::Employees,
        Route::Departments,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::ApplyLeave => "/apply",
            Route::History => "/history",
            Route::Holidays => "/holidays",
            Route::Profile => "/profile",
            Route::AdminDashboard => "/admin",
            Route::LeaveManage => "/leave-manage",
            Route::Employees => "/employees",
            Route::Departments => "/departments",
        }
    }

    fn audience(&self) -> Audience {
        match self {
            Route::Home => Audience::Anyone,
            Route::Login | Route::Register => Audience::Guest,
            Route::Dashboard | Route::ApplyLeave | Route::History => Audience::Employee,
            Route::AdminDashboard | Route::LeaveManage | Route::Employees | Route::Departments => Audience::Manager,
            Route::Holidays | Route::Profile => Audience::SignedIn,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

/// The dashboard a user lands on.
pub fn home_for(user: &User) -> Route {
    if user.role.is_manager() {
        Route::AdminDashboard
    } else {
        Route::Dashboard
    }
}

/// Gate one navigation step.
///
/// Signed-out users are sent to Login and signed-in users away from
/// Login/Register. A role mismatch also goes to Login, which in turn
/// bounces a signed-in user Home; see [`resolve`].
pub fn authorize(route: Route, user: Option<&User>) -> Access {
    match (route.audience(), user) {
        (Audience::Anyone, None) => Access::Redirect(Route::Login),
        (Audience::Anyone, Some(user)) => Access::Redirect(home_for(user)),
        (Audience::Guest, None) => Access::Allow,
        (Audience::Guest, Some(_)) => Access::Redirect(Route::Home),
        (_, None) => Access::Redirect(Route::Login),
        (Audience::SignedIn, Some(_)) => Access::Allow,
        (Audience::Employee, Some(user)) if !user.role.is_manager() => Access::Allow,
        (Audience::Manager, Some(user)) if user.role.is_manager() => Access::Allow,
        (Audience::Employee | Audience::Manager, Some(_)) => Access::Redirect(Route::Login),
    }
}

/// Follow redirects until a route is allowed.
pub fn resolve(route: Route, user: Option<&User>) -> Route {
    let mut current = route;
    // Every chain settles within a few hops; the bound guards the loop.
    for _ in 0..Route::ALL.len() {
        match authorize(current, user) {
            Access::Allow => return current,
            Access::Redirect(next) => current = next,
        }
    }
    current
}
