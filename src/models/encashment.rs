//! Requests to sell unused leave days.

use serde::{Deserialize, Serialize};

use super::LeaveStatus;

/// A request to convert unused leave days into pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncashmentRequest {
    pub id: String,
    pub user_id: String,
    /// Display name at time of submission.
    pub full_name: String,
    pub days_to_sell: u32,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_doc: Option<String>,
}

impl EncashmentRequest {
    /// Payout for this request; computed for display, never stored.
    pub fn payout(&self, rate: u64) -> u64 {
        u64::from(self.days_to_sell) * rate
    }
}

/// Form data for a new encashment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncashmentDraft {
    pub days_to_sell: u32,
    pub reason: String,
    pub supporting_doc: Option<String>,
}

impl EncashmentDraft {
    /// Clamp the day count into `1..=max_days`, like the form stepper does.
    pub fn clamped(mut self, max_days: u32) -> Self {
        self.days_to_sell = self.days_to_sell.clamp(1, max_days.max(1));
        self
    }
}
