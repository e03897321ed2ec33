//! Drag-and-drop rescheduling.
//!
//! The controller holds at most one event at a time. Dropping it releases the
//! hold unconditionally and, if the target differs from where the event already
//! sits, produces an [`OverrideRequest`] for the backend. The backend's answer is
//! folded back into the [`ScheduleMirror`] by [`DragDropController::resolve`].
//!
//! Targets are not checked against the local grid before submission; the backend
//! decides what is allowed.

use std::fmt;

use thiserror::Error;

use crate::models::event::{EventPatch, ScheduleEvent};
use crate::models::time_slot::TimeSlot;
use crate::services::notice::NoticeBoard;
use crate::services::remote::{AuthorityError, OverrideRequest, OverrideResponse, ScheduleAuthority};
use crate::services::schedule::ScheduleMirror;
use crate::utils::period::{TimeRange, PERIOD_SEPARATOR};
use crate::utils::time::{display_to_24h, format_minutes, minutes_to_24h, parse_24h_to_minutes};

pub const OVERRIDE_SUCCESS_MESSAGE: &str = "Schedule updated";
pub const OVERRIDE_FAILURE_MESSAGE: &str = "Failed to update schedule";

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Snapshot of the event being moved, taken when the gesture starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldEvent {
    pub schedule_id: String,
    pub course_code: String,
    pub room: String,
    pub day: String,
    /// `None` when the event's period could not be parsed.
    pub start_minutes: Option<u32>,
}

impl HeldEvent {
    pub fn from_event(event: &ScheduleEvent) -> Self {
        Self {
            schedule_id: event.schedule_id.clone(),
            course_code: event.course_code.clone(),
            room: event.room.clone(),
            day: event.day.clone(),
            start_minutes: event.start_minutes().ok(),
        }
    }

    /// Dropping here would leave the event where it is.
    pub fn is_at(&self, target: &DropTarget) -> bool {
        self.room == target.room
            && self.day == target.day
            && self.start_minutes == Some(target.slot.minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(HeldEvent),
}

/// A grid cell an event was dropped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub room: String,
    pub day: String,
    pub slot: TimeSlot,
}

impl DropTarget {
    pub fn new(room: impl Into<String>, day: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            room: room.into(),
            day: day.into(),
            slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("event {0} is already being moved")]
    AlreadyDragging(String),
}

/// Result of releasing the held event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was held.
    NothingHeld,
    /// Dropped back onto its own cell; no request is made.
    Cancelled,
    Submit(OverrideRequest),
}

/// Result of applying the backend's answer to an override.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    NothingHeld,
    Cancelled,
    /// Accepted and merged; carries the updated event.
    Applied(ScheduleEvent),
    /// Accepted, but the event is no longer in the local list.
    Stale,
    /// Rejected or failed; carries the message shown to the user.
    Rejected(String),
}

type RefreshHook = Box<dyn FnMut(&ScheduleEvent)>;

#[derive(Default)]
pub struct DragDropController {
    state: DragState,
    on_refresh: Option<RefreshHook>,
}

impl fmt::Debug for DragDropController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropController")
            .field("state", &self.state)
            .field("on_refresh", &self.on_refresh.is_some())
            .finish()
    }
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the merged event after every accepted override.
    pub fn with_refresh_hook(mut self, hook: impl FnMut(&ScheduleEvent) + 'static) -> Self {
        self.on_refresh = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn held(&self) -> Option<&HeldEvent> {
        match &self.state {
            DragState::Dragging(held) => Some(held),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.held().is_some()
    }

    /// Start moving `event`.
    pub fn begin(&mut self, event: &ScheduleEvent) -> Result<(), DragError> {
        if let Some(held) = self.held() {
            return Err(DragError::AlreadyDragging(held.schedule_id.clone()));
        }

        log::debug!("Drag started for event {} ({})", event.schedule_id, event.course_code);
        self.state = DragState::Dragging(HeldEvent::from_event(event));
        Ok(())
    }

    /// Abandon the gesture without dropping.
    pub fn cancel(&mut self) -> Option<HeldEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(held) => Some(held),
            DragState::Idle => None,
        }
    }

    /// Release the held event over `target`. Always leaves the controller idle.
    pub fn drop_on(&mut self, target: &DropTarget) -> DropOutcome {
        let Some(held) = self.cancel() else {
            return DropOutcome::NothingHeld;
        };

        if held.is_at(target) {
            log::debug!("Event {} dropped on its own cell", held.schedule_id);
            return DropOutcome::Cancelled;
        }

        let new_start = display_to_24h(&target.slot.label).unwrap_or_else(|err| {
            log::warn!("Slot label {:?} not parseable ({}), using slot offset", target.slot.label, err);
            minutes_to_24h(target.slot.minutes)
        });

        DropOutcome::Submit(OverrideRequest {
            schedule_id: held.schedule_id,
            new_start,
            new_room: target.room.clone(),
            new_day: Some(target.day.clone()).filter(|day| !day.is_empty()),
        })
    }

    /// Fold the backend's answer to `request` into `mirror` and post a notice.
    ///
    /// On any failure the mirror is left untouched.
    pub fn resolve(
        &mut self,
        mirror: &mut ScheduleMirror,
        notices: &mut NoticeBoard,
        request: &OverrideRequest,
        result: Result<OverrideResponse, AuthorityError>,
    ) -> CommitOutcome {
        match result {
            Ok(response) if response.is_success() => {
                let patch = match response.event {
                    Some(patch) if !patch.is_empty() => patch,
                    _ => patch_from_request(request, mirror.get(&request.schedule_id)),
                };

                let Some(updated) = mirror.merge(&request.schedule_id, &patch).cloned() else {
                    log::warn!(
                        "Override for event {} accepted, but it is no longer loaded",
                        request.schedule_id
                    );
                    notices.success(OVERRIDE_SUCCESS_MESSAGE);
                    return CommitOutcome::Stale;
                };

                log::info!(
                    "Event {} moved to {} {} {}",
                    updated.schedule_id,
                    updated.room,
                    updated.day,
                    updated.period
                );
                notices.success(OVERRIDE_SUCCESS_MESSAGE);
                if let Some(hook) = self.on_refresh.as_mut() {
                    hook(&updated);
                }
                CommitOutcome::Applied(updated)
            }
            Ok(response) => {
                let message = response
                    .detail
                    .filter(|detail| !detail.trim().is_empty())
                    .unwrap_or_else(|| OVERRIDE_FAILURE_MESSAGE.to_string());
                log::warn!(
                    "Override for event {} rejected ({}): {}",
                    request.schedule_id,
                    response.status,
                    message
                );
                notices.error(message.clone());
                CommitOutcome::Rejected(message)
            }
            Err(err) => {
                let message = failure_message(&err);
                log::error!("Override for event {} failed: {}", request.schedule_id, err);
                notices.error(message.clone());
                CommitOutcome::Rejected(message)
            }
        }
    }

    /// Drop, submit synchronously and resolve in one step.
    pub fn commit<A>(
        &mut self,
        target: &DropTarget,
        authority: &A,
        mirror: &mut ScheduleMirror,
        notices: &mut NoticeBoard,
    ) -> CommitOutcome
    where
        A: ScheduleAuthority + ?Sized,
    {
        let request = match self.drop_on(target) {
            DropOutcome::NothingHeld => return CommitOutcome::NothingHeld,
            DropOutcome::Cancelled => return CommitOutcome::Cancelled,
            DropOutcome::Submit(request) => request,
        };

        let result = authority.submit_override(&request);
        self.resolve(mirror, notices, &request, result)
    }
}

/// Most specific message for a failed call: server detail, then the error itself.
fn failure_message(err: &AuthorityError) -> String {
    if let Some(detail) = err.detail().filter(|d| !d.trim().is_empty()) {
        return detail.to_string();
    }
    let text = err.to_string();
    if text.trim().is_empty() {
        OVERRIDE_FAILURE_MESSAGE.to_string()
    } else {
        text
    }
}

/// Patch used when the backend accepts a move without echoing the event.
/// The period keeps its original length unless it would reach midnight,
/// in which case only the start is written.
fn patch_from_request(request: &OverrideRequest, current: Option<&ScheduleEvent>) -> EventPatch {
    let period = parse_24h_to_minutes(&request.new_start).ok().map(|start| {
        match current.and_then(|event| event.time_range().ok()) {
            Some(range) if start + range.duration_minutes() < MINUTES_PER_DAY => {
                let moved = TimeRange::new(start, start + range.duration_minutes());
                format!(
                    "{}{}{}",
                    format_minutes(moved.start),
                    PERIOD_SEPARATOR,
                    format_minutes(moved.end)
                )
            }
            _ => format_minutes(start),
        }
    });

    EventPatch {
        room: Some(request.new_room.clone()),
        day: request.new_day.clone(),
        period,
        ..EventPatch::default()
    }
}
