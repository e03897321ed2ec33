use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{AuthorityError, DaysResponse, OverrideRequest, OverrideResponse, ScheduleAuthority};
use crate::models::event::ScheduleEvent;
use crate::models::faculty::Faculty;
use crate::models::room::RoomCategories;
use crate::models::settings::AppConfig;
use crate::models::time_slot::TimeWindow;

const ROOMS_PATH: &str = "rooms";
const DAYS_PATH: &str = "days";
const TIME_SETTINGS_PATH: &str = "time-settings";
const SCHEDULE_PATH: &str = "schedule";
const FACULTY_PATH: &str = "faculty";
const OVERRIDE_PATH: &str = "schedule/override";

/// Blocking HTTP client for the schedule backend.
pub struct HttpAuthority {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpAuthority {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build schedule backend HTTP client")?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            max_retries: 2,
            retry_delay_ms: 400,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_token.as_deref() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    /// GET with retries. Reads are idempotent, so transport failures are retried.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AuthorityError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            let result = self
                .authorize(self.client.get(&url))
                .send()
                .map_err(|err| AuthorityError::Transport(err.to_string()))
                .and_then(decode::<T>);

            match result {
                Err(AuthorityError::Transport(reason)) if attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!("GET {} attempt {} failed: {}", url, attempt, reason);
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                }
                other => return other,
            }
        }
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AuthorityError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.client.post(self.url(path)).json(body))
            .send()
            .map_err(|err| AuthorityError::Transport(err.to_string()))?;
        decode(response)
    }
}

impl ScheduleAuthority for HttpAuthority {
    fn fetch_rooms(&self) -> Result<RoomCategories, AuthorityError> {
        self.get_json(ROOMS_PATH)
    }

    fn fetch_days(&self) -> Result<DaysResponse, AuthorityError> {
        self.get_json(DAYS_PATH)
    }

    fn fetch_time_window(&self) -> Result<TimeWindow, AuthorityError> {
        self.get_json(TIME_SETTINGS_PATH)
    }

    fn fetch_schedule(&self) -> Result<Vec<ScheduleEvent>, AuthorityError> {
        self.get_json::<SchedulePayload>(SCHEDULE_PATH)
            .map(SchedulePayload::into_events)
    }

    fn fetch_faculty(&self) -> Result<Vec<Faculty>, AuthorityError> {
        self.get_json(FACULTY_PATH)
    }

    fn submit_override(&self, request: &OverrideRequest) -> Result<OverrideResponse, AuthorityError> {
        log::info!(
            "Submitting override for event {}: {} {} {:?}",
            request.schedule_id,
            request.new_room,
            request.new_start,
            request.new_day
        );
        self.post_json(OVERRIDE_PATH, request)
    }
}

/// The schedule endpoint answers with either a bare list or `{ "schedule": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchedulePayload {
    List(Vec<ScheduleEvent>),
    Wrapped { schedule: Vec<ScheduleEvent> },
}

impl SchedulePayload {
    fn into_events(self) -> Vec<ScheduleEvent> {
        match self {
            SchedulePayload::List(events) => events,
            SchedulePayload::Wrapped { schedule } => schedule,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AuthorityError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .text()
            .ok()
            .and_then(|body| error_detail(&body));
        return Err(AuthorityError::Http {
            status: status.as_u16(),
            detail,
        });
    }

    response
        .json::<T>()
        .map_err(|err| AuthorityError::Decode(err.to_string()))
}

/// Pull a human-readable `detail` out of an error body, if there is one.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
