//! Local working copy of the schedule.
//!
//! Written only by the initial load and by merges of backend-confirmed overrides.

use crate::models::event::{EventPatch, ScheduleEvent};

#[derive(Debug, Clone, Default)]
pub struct ScheduleMirror {
    events: Vec<ScheduleEvent>,
}

impl ScheduleMirror {
    pub fn new(events: Vec<ScheduleEvent>) -> Self {
        Self { events }
    }

    /// Replace the whole list, e.g. after a reload.
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn get(&self, schedule_id: &str) -> Option<&ScheduleEvent> {
        self.events.iter().find(|e| e.schedule_id == schedule_id)
    }

    /// Merge `patch` into the event with `schedule_id`. `None` if no such event.
    pub fn merge(&mut self, schedule_id: &str, patch: &EventPatch) -> Option<&ScheduleEvent> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.schedule_id == schedule_id)?;
        event.apply_patch(patch);
        Some(&*event)
    }

    /// Order by position of the day in `days`, then by start time.
    /// Unknown days and unparseable periods go last; the sort is stable.
    pub fn sort_by_day_order(&mut self, days: &[String]) {
        self.events.sort_by_key(|event| {
            let day_rank = days
                .iter()
                .position(|day| *day == event.day)
                .unwrap_or(usize::MAX);
            let start = event.start_minutes().unwrap_or(u32::MAX);
            (day_rank, start)
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct faculty names currently assigned, sorted.
    pub fn assigned_faculty(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .events
            .iter()
            .filter_map(|e| e.faculty.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(id: &str, day: &str, period: &str) -> ScheduleEvent {
        ScheduleEvent::builder()
            .id(id)
            .course_code("CS101")
            .room("R101")
            .day(day)
            .period(period)
            .build()
            .unwrap()
    }

    #[test]
    fn test_merge_by_identifier() {
        let mut mirror = ScheduleMirror::new(vec![
            event("1", "Monday", "9:00 AM - 10:00 AM"),
            event("2", "Monday", "10:00 AM - 11:00 AM"),
        ]);
        let patch = EventPatch {
            room: Some("R202".into()),
            ..EventPatch::default()
        };

        let merged = mirror.merge("2", &patch).unwrap();
        assert_eq!(merged.room, "R202");
        assert_eq!(mirror.get("1").unwrap().room, "R101");
        assert!(mirror.merge("99", &patch).is_none());
    }

    #[test]
    fn test_sort_by_day_order() {
        let days = vec!["Monday".to_string(), "Tuesday".to_string()];
        let mut mirror = ScheduleMirror::new(vec![
            event("late", "Tuesday", "1:00 PM - 2:00 PM"),
            event("unknown", "Sunday", "7:00 AM - 8:00 AM"),
            event("tue", "Tuesday", "8:00 AM - 9:00 AM"),
            event("mon", "Monday", "3:00 PM - 4:00 PM"),
            event("broken", "Monday", "TBA"),
        ]);
        mirror.sort_by_day_order(&days);

        let ids: Vec<&str> = mirror.events().iter().map(|e| e.schedule_id.as_str()).collect();
        assert_eq!(ids, vec!["mon", "broken", "tue", "late", "unknown"]);
    }

    #[test]
    fn test_assigned_faculty_is_distinct() {
        let mut a = event("1", "Monday", "9:00 AM - 10:00 AM");
        a.faculty = Some("Dr. Cruz".into());
        let mut b = event("2", "Monday", "9:00 AM - 10:00 AM");
        b.faculty = Some("Dr. Cruz".into());
        let c = event("3", "Monday", "9:00 AM - 10:00 AM");
        let mirror = ScheduleMirror::new(vec![a, b, c]);
        assert_eq!(mirror.assigned_faculty(), vec!["Dr. Cruz".to_string()]);
    }
}
