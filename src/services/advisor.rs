//! Advisory conflict checks.
//!
//! Nothing here blocks an action; results are shown to the scheduler as hints.
//! The backend remains the only authority on what is allowed.

use crate::models::event::ScheduleEvent;
use crate::models::faculty::Faculty;
use crate::models::room::{RoomAxis, RoomCategory};

/// Upper bounds (inclusive) of the green and yellow bands.
pub const PART_TIME_THRESHOLDS: (f64, f64) = (14.0, 23.0);
pub const FULL_TIME_THRESHOLDS: (f64, f64) = (21.0, 35.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadLevel {
    Green,
    Yellow,
    Red,
}

impl LoadLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadLevel::Green => "green",
            LoadLevel::Yellow => "yellow",
            LoadLevel::Red => "red",
        }
    }
}

/// Classify a teaching load against the member's employment status.
pub fn faculty_load_level(faculty: &Faculty, units: f64) -> LoadLevel {
    let (green_max, yellow_max) = if faculty.is_part_time() {
        PART_TIME_THRESHOLDS
    } else {
        FULL_TIME_THRESHOLDS
    };

    if units <= green_max {
        LoadLevel::Green
    } else if units <= yellow_max {
        LoadLevel::Yellow
    } else {
        LoadLevel::Red
    }
}

/// Whether `faculty` could take every event of `candidate_group`.
///
/// Events already in a candidate's own group are not counted against it.
/// Events with malformed periods are skipped.
pub fn is_faculty_available_for_group(
    faculty: &str,
    candidate_group: &[ScheduleEvent],
    schedule: &[ScheduleEvent],
) -> bool {
    candidate_group.iter().all(|candidate| {
        let Ok(candidate_range) = candidate.time_range() else {
            return true;
        };
        let group_key = candidate.group_key();

        !schedule
            .iter()
            .filter(|other| other.group_key() != group_key)
            .filter(|other| other.day == candidate.day && other.is_assigned_to(faculty))
            .filter_map(|other| other.time_range().ok())
            .any(|other_range| other_range.overlaps(&candidate_range))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Two sessions in the same room at overlapping times.
    Room,
    /// One faculty member teaching two sessions at overlapping times.
    Faculty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConflict {
    pub kind: ConflictKind,
    pub first_id: String,
    pub second_id: String,
    pub day: String,
    pub overlap_minutes: i64,
}

/// Overlapping sessions sharing a room on the same day.
pub fn find_room_conflicts(schedule: &[ScheduleEvent]) -> Vec<ScheduleConflict> {
    find_pairwise(schedule, ConflictKind::Room, |a, b| {
        !a.room.is_empty() && a.room == b.room
    })
}

/// Overlapping sessions assigned to the same faculty member on the same day.
pub fn find_faculty_conflicts(schedule: &[ScheduleEvent]) -> Vec<ScheduleConflict> {
    find_pairwise(schedule, ConflictKind::Faculty, |a, b| {
        matches!((&a.faculty, &b.faculty), (Some(x), Some(y)) if x == y)
    })
}

fn find_pairwise<F>(schedule: &[ScheduleEvent], kind: ConflictKind, shares: F) -> Vec<ScheduleConflict>
where
    F: Fn(&ScheduleEvent, &ScheduleEvent) -> bool,
{
    let ranged: Vec<_> = schedule
        .iter()
        .filter_map(|event| event.time_range().ok().map(|range| (event, range)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, (a, a_range)) in ranged.iter().enumerate() {
        for (b, b_range) in &ranged[i + 1..] {
            if a.day != b.day || !shares(*a, *b) {
                continue;
            }
            let overlap = a_range.overlap_minutes(b_range);
            if overlap > 0 {
                conflicts.push(ScheduleConflict {
                    kind,
                    first_id: a.schedule_id.clone(),
                    second_id: b.schedule_id.clone(),
                    day: a.day.clone(),
                    overlap_minutes: overlap,
                });
            }
        }
    }
    conflicts
}

/// Whether the event's session kind fits the category of the room at `room_index`:
/// lectures in lecture rooms, laboratories in lab rooms. `None` if the index is off the axis.
pub fn room_category_matches(event: &ScheduleEvent, rooms: &RoomAxis, room_index: usize) -> Option<bool> {
    let expected = if event.session.is_lab() {
        RoomCategory::Lab
    } else {
        RoomCategory::Lecture
    };
    rooms.category(room_index).map(|category| category == expected)
}
