//! Search, filter and pagination for list views.

use serde::Serialize;

use crate::models::{EncashmentRequest, LeaveCategory, LeaveRequest, LeaveStatus, Role, User};

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first item shown, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out a 1-based page. Page 0 is treated as page 1; pages past the
/// end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let items = items.into_iter().skip((page - 1) * per_page).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Management view filter over leave requests.
#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    /// Matches the requester name or category label.
    pub search: String,
    pub status: Option<LeaveStatus>,
    pub category: Option<LeaveCategory>,
}

impl LeaveFilter {
    pub fn matches(&self, leave: &LeaveRequest) -> bool {
        let search = self.search.trim();
        (contains(&leave.full_name, search) || contains(leave.category.label(), search))
            && self.status.is_none_or(|s| leave.status == s)
            && self.category.is_none_or(|c| leave.category == c)
    }

    pub fn apply<'a>(&self, leaves: &'a [LeaveRequest]) -> Vec<&'a LeaveRequest> {
        leaves.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Management view filter over encashment requests.
#[derive(Debug, Clone, Default)]
pub struct EncashmentFilter {
    /// Matches the requester name.
    pub search: String,
    pub status: Option<LeaveStatus>,
}

impl EncashmentFilter {
    pub fn matches(&self, request: &EncashmentRequest) -> bool {
        contains(&request.full_name, self.search.trim()) && self.status.is_none_or(|s| request.status == s)
    }

    pub fn apply<'a>(&self, requests: &'a [EncashmentRequest]) -> Vec<&'a EncashmentRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

/// A user's own leave requests matching `search` on category, reason or status.
pub fn leave_history<'a>(leaves: &'a [LeaveRequest], user_id: &str, search: &str) -> Vec<&'a LeaveRequest> {
    let search = search.trim();
    leaves
        .iter()
        .filter(|l| l.user_id == user_id)
        .filter(|l| {
            contains(l.category.label(), search) || contains(&l.reason, search) || contains(l.status.label(), search)
        })
        .collect()
}

/// A user's own encashment requests matching `search` on reason or status.
pub fn encashment_history<'a>(
    requests: &'a [EncashmentRequest],
    user_id: &str,
    search: &str,
) -> Vec<&'a EncashmentRequest> {
    let search = search.trim();
    requests
        .iter()
        .filter(|r| r.user_id == user_id)
        .filter(|r| contains(&r.reason, search) || contains(r.status.label(), search))
        .collect()
}

/// Employee directory filter.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matches name or email.
    pub search: String,
    pub department: Option<String>,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let search = self.search.trim();
        (contains(&user.full_name, search) || contains(&user.email, search))
            && self.department.as_deref().is_none_or(|d| user.department == d)
            && self.role.is_none_or(|r| user.role == r)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Narrow a department roster by name or email.
pub fn search_roster<'a>(roster: Vec<&'a User>, search: &str) -> Vec<&'a User> {
    let search = search.trim();
    roster
        .into_iter()
        .filter(|u| contains(&u.full_name, search) || contains(&u.email, search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::roster;
    use crate::state::AppState;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::seeded(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=12).collect::<Vec<_>>(), 2, 5);
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.first_index(), page.last_index()), (6, 10));
        assert!(page.has_next());

        let last = paginate((1..=12).collect::<Vec<_>>(), 3, 5);
        assert_eq!(last.items, vec![11, 12]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_edges() {
        let beyond = paginate(vec![1, 2, 3], 9, 8);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_pages, 1);
        assert_eq!(beyond.first_index(), 0);

        let empty: Page<i32> = paginate(Vec::new(), 1, 8);
        assert_eq!(empty.total_pages, 0);

        let zero = paginate(vec![1, 2], 0, 5);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, vec![1, 2]);
    }

    #[test]
    fn test_leave_filter() {
        let state = state();
        let all = LeaveFilter::default().apply(&state.leave_requests);
        assert_eq!(all.len(), 3);

        let by_name = LeaveFilter {
            search: "JOHN".to_string(),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&state.leave_requests).len(), 2);

        let by_category_text = LeaveFilter {
            search: "emergency".to_string(),
            ..Default::default()
        };
        assert_eq!(by_category_text.apply(&state.leave_requests)[0].id, "req3");

        let pending_sick = LeaveFilter {
            search: String::new(),
            status: Some(LeaveStatus::Pending),
            category: Some(LeaveCategory::Sick),
        };
        let ids: Vec<_> = pending_sick.apply(&state.leave_requests).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["req2"]);
    }

    #[test]
    fn test_encashment_filter() {
        let requests = vec![EncashmentRequest {
            id: "e1".to_string(),
            user_id: "1".to_string(),
            full_name: "John Doe".to_string(),
            days_to_sell: 4,
            reason: "School fees".to_string(),
            status: LeaveStatus::Pending,
            applied_date: "2026-10-18".to_string(),
            supporting_doc: None,
        }];
        let filter = EncashmentFilter {
            search: "doe".to_string(),
            status: Some(LeaveStatus::Pending),
        };
        assert_eq!(filter.apply(&requests).len(), 1);

        let approved_only = EncashmentFilter {
            status: Some(LeaveStatus::Approved),
            ..Default::default()
        };
        assert!(approved_only.apply(&requests).is_empty());

        assert_eq!(encashment_history(&requests, "1", "school").len(), 1);
        assert!(encashment_history(&requests, "2", "").is_empty());
    }

    #[test]
    fn test_leave_history_is_scoped_to_user() {
        let state = state();
        assert_eq!(leave_history(&state.leave_requests, "1", "").len(), 2);
        let approved = leave_history(&state.leave_requests, "1", "approved");
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, "req1");
        assert_eq!(leave_history(&state.leave_requests, "1", "flu")[0].id, "req2");
        assert!(leave_history(&state.leave_requests, "1", "emergency").is_empty());
    }

    #[test]
    fn test_user_filter() {
        let state = state();
        let engineers = UserFilter {
            department: Some("Engineering".to_string()),
            ..Default::default()
        };
        assert_eq!(engineers.apply(&state.users).len(), 2);

        let hr = UserFilter {
            role: Some(Role::HrManager),
            ..Default::default()
        };
        assert_eq!(hr.apply(&state.users)[0].full_name, "Jane Smith");

        let by_email = UserFilter {
            search: "@company.com".to_string(),
            ..Default::default()
        };
        assert_eq!(by_email.apply(&state.users).len(), 6);
    }

    #[test]
    fn test_search_roster() {
        let state = state();
        let members = roster(&state, "Engineering");
        let found = search_roster(members, "bob@");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "5");
    }
}
