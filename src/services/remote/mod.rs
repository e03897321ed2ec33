//! Remote schedule authority.
//!
//! The backend owns the schedule and decides whether an override is accepted.
//! This module defines the request/response contracts and the [`ScheduleAuthority`]
//! seam; [`client::HttpAuthority`] talks to the real backend and
//! [`worker::AuthorityWorker`] keeps those calls off the interface thread.

pub mod client;
pub mod worker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event::{EventPatch, ScheduleEvent};
use crate::models::faculty::Faculty;
use crate::models::room::RoomCategories;
use crate::models::time_slot::TimeWindow;

pub use client::HttpAuthority;
pub use worker::{AuthorityWorker, OverrideCompletion};

/// Status value the backend uses for an accepted override.
pub const STATUS_SUCCESS: &str = "success";

/// Request to move one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRequest {
    pub schedule_id: String,
    /// 24-hour `HH:MM`.
    pub new_start: String,
    pub new_room: String,
    pub new_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideResponse {
    pub status: String,
    #[serde(default)]
    pub event: Option<EventPatch>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl OverrideResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysResponse {
    #[serde(default)]
    pub days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server responded with HTTP {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Http { status: u16, detail: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AuthorityError {
    /// Server-supplied reason, if the backend gave one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthorityError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Backend operations the scheduler consumes.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleAuthority {
    fn fetch_rooms(&self) -> Result<RoomCategories, AuthorityError>;
    fn fetch_days(&self) -> Result<DaysResponse, AuthorityError>;
    fn fetch_time_window(&self) -> Result<TimeWindow, AuthorityError>;
    fn fetch_schedule(&self) -> Result<Vec<ScheduleEvent>, AuthorityError>;
    fn fetch_faculty(&self) -> Result<Vec<Faculty>, AuthorityError>;
    fn submit_override(&self, request: &OverrideRequest) -> Result<OverrideResponse, AuthorityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_request_serializes_null_day() {
        let request = OverrideRequest {
            schedule_id: "7".into(),
            new_start: "09:00".into(),
            new_room: "R102".into(),
            new_day: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "schedule_id": "7",
                "new_start": "09:00",
                "new_room": "R102",
                "new_day": null
            })
        );
    }

    #[test]
    fn test_override_response_variants() {
        let ok: OverrideResponse = serde_json::from_str(
            r#"{"status": "success", "event": {"room": "R102", "period": "9:00 AM - 10:00 AM"}}"#,
        )
        .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.event.unwrap().room.as_deref(), Some("R102"));

        let rejected: OverrideResponse =
            serde_json::from_str(r#"{"status": "conflict", "detail": "Room occupied"}"#).unwrap();
        assert!(!rejected.is_success());
        assert_eq!(rejected.detail.as_deref(), Some("Room occupied"));
    }

    #[test]
    fn test_error_messages() {
        let err = AuthorityError::Http {
            status: 409,
            detail: Some("Faculty busy".into()),
        };
        assert_eq!(err.to_string(), "server responded with HTTP 409: Faculty busy");
        assert_eq!(err.detail(), Some("Faculty busy"));

        let bare = AuthorityError::Http { status: 500, detail: None };
        assert_eq!(bare.to_string(), "server responded with HTTP 500");
        assert_eq!(AuthorityError::Transport("timed out".into()).detail(), None);
    }
}
