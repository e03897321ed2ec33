//! Room x time-slot occupancy grid for one day.
//!
//! An event of N slots starting at slot S in room R produces one start record at
//! `(S, R)` with span N and continuation records with span 0 at `(S+1..S+N-1, R)`.
//! Continuations only tell a row-major renderer to skip that cell.
//!
//! The grid is a pure function of (events, day, room axis, slots) and is rebuilt
//! from scratch whenever any of them changes.

use std::collections::HashMap;

use crate::models::event::{ScheduleEvent, SessionKind};
use crate::models::room::RoomAxis;
use crate::models::time_slot::{TimeSlot, SLOT_MINUTES};
use crate::utils::time::TimeParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub slot: usize,
    pub room: usize,
}

impl CellKey {
    pub fn new(slot: usize, room: usize) -> Self {
        Self { slot, room }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord<'a> {
    pub event: &'a ScheduleEvent,
    /// Slot count on the start record, 0 on continuations.
    pub span: usize,
}

impl CellRecord<'_> {
    pub fn is_start(&self) -> bool {
        self.span > 0
    }

    pub fn is_continuation(&self) -> bool {
        self.span == 0
    }
}

/// Why an event could not be put on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnplacedReason {
    UnknownRoom(String),
    MalformedPeriod(TimeParseError),
    /// No slot starts at this minute offset.
    NoMatchingSlot(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placed { key: CellKey, span: usize },
    Unplaced(UnplacedReason),
}

/// Two events that claimed the same cell; the later one in iteration order won.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision<'a> {
    pub key: CellKey,
    pub displaced: &'a ScheduleEvent,
    pub winner: &'a ScheduleEvent,
}

/// Number of grid rows a session kind covers.
pub fn span_for(kind: SessionKind) -> usize {
    kind.grid_minutes().div_ceil(SLOT_MINUTES) as usize
}

/// Locate an event's start cell. Does not look at the event's day.
pub fn place_event(event: &ScheduleEvent, rooms: &RoomAxis, slots: &[TimeSlot]) -> Placement {
    let Some(room) = rooms.index_of(&event.room) else {
        return Placement::Unplaced(UnplacedReason::UnknownRoom(event.room.clone()));
    };

    let start = match event.start_minutes() {
        Ok(start) => start,
        Err(err) => return Placement::Unplaced(UnplacedReason::MalformedPeriod(err)),
    };

    match slots.iter().position(|slot| slot.minutes == start) {
        Some(slot) => Placement::Placed {
            key: CellKey::new(slot, room),
            span: span_for(event.session),
        },
        None => Placement::Unplaced(UnplacedReason::NoMatchingSlot(start)),
    }
}

#[derive(Debug, Default)]
pub struct OccupancyGrid<'a> {
    cells: HashMap<CellKey, CellRecord<'a>>,
    unplaced: Vec<(&'a ScheduleEvent, UnplacedReason)>,
    collisions: Vec<Collision<'a>>,
}

impl<'a> OccupancyGrid<'a> {
    /// Build the grid for `day`. Events on other days are ignored; events that
    /// cannot be placed are listed in [`unplaced`](Self::unplaced).
    pub fn build(
        events: &'a [ScheduleEvent],
        day: &str,
        rooms: &RoomAxis,
        slots: &[TimeSlot],
    ) -> Self {
        let mut grid = Self::default();

        for event in events.iter().filter(|event| event.day == day) {
            match place_event(event, rooms, slots) {
                Placement::Placed { key, span } => {
                    grid.insert(key, CellRecord { event, span });
                    for offset in 1..span {
                        let slot = key.slot + offset;
                        if slot >= slots.len() {
                            break;
                        }
                        grid.insert(CellKey::new(slot, key.room), CellRecord { event, span: 0 });
                    }
                }
                Placement::Unplaced(reason) => {
                    log::debug!(
                        "Event {} ({}) not placed on {}: {:?}",
                        event.schedule_id,
                        event.course_code,
                        day,
                        reason
                    );
                    grid.unplaced.push((event, reason));
                }
            }
        }

        grid
    }

    fn insert(&mut self, key: CellKey, record: CellRecord<'a>) {
        if let Some(previous) = self.cells.insert(key, record) {
            if previous.event.schedule_id != record.event.schedule_id {
                log::warn!(
                    "Events {} and {} both occupy slot {} of room {}",
                    previous.event.schedule_id,
                    record.event.schedule_id,
                    key.slot,
                    key.room
                );
                self.collisions.push(Collision {
                    key,
                    displaced: previous.event,
                    winner: record.event,
                });
            }
        }
    }

    pub fn cell(&self, slot: usize, room: usize) -> Option<&CellRecord<'a>> {
        self.cells.get(&CellKey::new(slot, room))
    }

    pub fn is_occupied(&self, slot: usize, room: usize) -> bool {
        self.cells.contains_key(&CellKey::new(slot, room))
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &CellRecord<'a>)> {
        self.cells.iter()
    }

    /// Start records only, ordered by (slot, room).
    pub fn starts(&self) -> Vec<(CellKey, CellRecord<'a>)> {
        let mut starts: Vec<_> = self
            .cells
            .iter()
            .filter(|(_, record)| record.is_start())
            .map(|(key, record)| (*key, *record))
            .collect();
        starts.sort_by_key(|(key, _)| *key);
        starts
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn unplaced(&self) -> &[(&'a ScheduleEvent, UnplacedReason)] {
        &self.unplaced
    }

    pub fn collisions(&self) -> &[Collision<'a>] {
        &self.collisions
    }
}
