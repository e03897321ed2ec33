//! Start-up loading.
//!
//! The grid needs three pieces of configuration (rooms, days, time window) before
//! anything can be drawn. A failed fetch never stops the application: each piece
//! falls back to an empty or configured default and a single error notice is posted
//! for the whole group.

use crate::models::event::ScheduleEvent;
use crate::models::faculty::Faculty;
use crate::models::room::RoomAxis;
use crate::models::settings::AppConfig;
use crate::models::time_slot::{TimeSlot, TimeWindow};
use crate::services::notice::NoticeBoard;
use crate::services::remote::ScheduleAuthority;
use crate::services::schedule::ScheduleMirror;

pub const CONFIG_LOAD_FAILURE_MESSAGE: &str = "Failed to load scheduling configuration";
pub const SCHEDULE_LOAD_FAILURE_MESSAGE: &str = "Failed to load schedule";
pub const FACULTY_LOAD_FAILURE_MESSAGE: &str = "Failed to load faculty list";

/// Everything the grid is laid out from. Not changed by drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub rooms: RoomAxis,
    pub days: Vec<String>,
    pub window: TimeWindow,
}

impl GridConfig {
    /// Layout shown until the backend answers: no rooms, no days, the configured window.
    pub fn fallback(config: &AppConfig) -> Self {
        Self {
            rooms: RoomAxis::default(),
            days: Vec::new(),
            window: config.fallback_window(),
        }
    }

    pub fn slots(&self) -> Vec<TimeSlot> {
        self.window.slots()
    }

    /// `preferred` if the backend knows it, else the first configured day.
    pub fn initial_day(&self, preferred: Option<&str>) -> Option<String> {
        preferred
            .filter(|day| self.days.iter().any(|known| known == day))
            .map(str::to_string)
            .or_else(|| self.days.first().cloned())
    }
}

/// Everything loaded at start-up.
#[derive(Debug, Clone)]
pub struct InitialData {
    pub grid: GridConfig,
    pub schedule: ScheduleMirror,
    pub faculty: Vec<Faculty>,
}

/// Fetch rooms, days and the time window.
pub fn load_grid_config<A>(authority: &A, config: &AppConfig, notices: &mut NoticeBoard) -> GridConfig
where
    A: ScheduleAuthority + ?Sized,
{
    let mut failed = false;

    let rooms = match authority.fetch_rooms() {
        Ok(categories) => RoomAxis::from_categories(&categories),
        Err(err) => {
            log::warn!("Failed to fetch rooms: {}", err);
            failed = true;
            RoomAxis::default()
        }
    };

    let days = match authority.fetch_days() {
        Ok(response) => response.days,
        Err(err) => {
            log::warn!("Failed to fetch days: {}", err);
            failed = true;
            Vec::new()
        }
    };

    let window = match authority.fetch_time_window() {
        Ok(window) if window.slots_per_day() > 0 => window,
        Ok(window) => {
            log::warn!(
                "Backend time window {}..{} is empty, using fallback",
                window.start_hour,
                window.end_hour
            );
            config.fallback_window()
        }
        Err(err) => {
            log::warn!("Failed to fetch time settings: {}", err);
            failed = true;
            config.fallback_window()
        }
    };

    if failed {
        notices.error(CONFIG_LOAD_FAILURE_MESSAGE);
    }

    log::info!(
        "Grid configured with {} rooms, {} days, {} slots per day",
        rooms.len(),
        days.len(),
        window.slots_per_day()
    );

    GridConfig { rooms, days, window }
}

/// Fetch the schedule, ordered by `days`. Empty on failure.
pub fn load_schedule<A>(authority: &A, days: &[String], notices: &mut NoticeBoard) -> ScheduleMirror
where
    A: ScheduleAuthority + ?Sized,
{
    let events: Vec<ScheduleEvent> = match authority.fetch_schedule() {
        Ok(events) => events,
        Err(err) => {
            log::warn!("Failed to fetch schedule: {}", err);
            notices.error(SCHEDULE_LOAD_FAILURE_MESSAGE);
            Vec::new()
        }
    };

    let mut mirror = ScheduleMirror::new(events);
    mirror.sort_by_day_order(days);
    log::info!("Loaded {} scheduled sessions", mirror.len());
    mirror
}

pub fn load_faculty<A>(authority: &A, notices: &mut NoticeBoard) -> Vec<Faculty>
where
    A: ScheduleAuthority + ?Sized,
{
    authority.fetch_faculty().unwrap_or_else(|err| {
        log::warn!("Failed to fetch faculty: {}", err);
        notices.error(FACULTY_LOAD_FAILURE_MESSAGE);
        Vec::new()
    })
}

pub fn load_initial<A>(authority: &A, config: &AppConfig, notices: &mut NoticeBoard) -> InitialData
where
    A: ScheduleAuthority + ?Sized,
{
    let grid = load_grid_config(authority, config, notices);
    let schedule = load_schedule(authority, &grid.days, notices);
    let faculty = load_faculty(authority, notices);

    InitialData {
        grid,
        schedule,
        faculty,
    }
}
