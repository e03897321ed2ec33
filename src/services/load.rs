//! Unit metrics.
//!
//! Two deliberately different numbers live here:
//! - [`compute_event_units`]: credit-hour weight of one event, duration in hours
//!   times the number of distinct weekdays in its day string.
//! - [`calculate_faculty_units`]: teaching load, a flat 1 per lecture and 1.5 per
//!   laboratory regardless of duration.

use crate::models::event::ScheduleEvent;
use crate::models::faculty::Faculty;
use crate::services::advisor::{faculty_load_level, LoadLevel};
use crate::utils::period::parse_day_tokens;

/// Credit-hour weight of an event; 0 when its period cannot be parsed.
pub fn compute_event_units(event: &ScheduleEvent) -> f64 {
    match event.time_range() {
        Ok(range) => range.duration_hours() * parse_day_tokens(&event.day).len() as f64,
        Err(err) => {
            log::debug!("No units for event {}: {}", event.schedule_id, err);
            0.0
        }
    }
}

/// Teaching load of `faculty` over `schedule`.
pub fn calculate_faculty_units(faculty: &str, schedule: &[ScheduleEvent]) -> f64 {
    schedule
        .iter()
        .filter(|event| event.is_assigned_to(faculty))
        .map(|event| event.session.faculty_weight())
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacultyLoad {
    pub name: String,
    pub units: f64,
    pub level: LoadLevel,
}

/// Load and load level for every faculty member, in the order given.
pub fn faculty_load_summary(faculty: &[Faculty], schedule: &[ScheduleEvent]) -> Vec<FacultyLoad> {
    faculty
        .iter()
        .map(|member| {
            let units = calculate_faculty_units(&member.name, schedule);
            FacultyLoad {
                name: member.name.clone(),
                units,
                level: faculty_load_level(member, units),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::SessionKind;

    fn assigned(id: &str, session: SessionKind, faculty: &str) -> ScheduleEvent {
        ScheduleEvent::builder()
            .id(id)
            .course_code("IT200")
            .session(session)
            .day("Monday")
            .period("9:00 AM - 10:00 AM")
            .faculty(faculty)
            .build()
            .unwrap()
    }

    #[test]
    fn test_faculty_units_use_flat_weights() {
        let schedule = vec![
            assigned("1", SessionKind::Lecture, "Dr. Santos"),
            assigned("2", SessionKind::Lecture, "Dr. Santos"),
            assigned("3", SessionKind::Laboratory, "Dr. Santos"),
            assigned("4", SessionKind::Laboratory, "Dr. Lim"),
        ];
        assert!((calculate_faculty_units("Dr. Santos", &schedule) - 3.5).abs() < f64::EPSILON);
        assert!((calculate_faculty_units("Dr. Lim", &schedule) - 1.5).abs() < f64::EPSILON);
        assert_eq!(calculate_faculty_units("Nobody", &schedule), 0.0);
    }

    #[test]
    fn test_event_units_multiply_hours_by_days() {
        let mut event = assigned("1", SessionKind::Lecture, "Dr. Santos");
        event.day = "MWF".to_string();
        event.period = "9:00 AM - 10:30 AM".to_string();
        assert!((compute_event_units(&event) - 4.5).abs() < f64::EPSILON);

        event.day = "TTh".to_string();
        assert!((compute_event_units(&event) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_event_units_differ_from_faculty_weight() {
        let mut lab = assigned("1", SessionKind::Laboratory, "Dr. Santos");
        lab.day = "W".to_string();
        lab.period = "1:00 PM - 4:00 PM".to_string();
        assert!((compute_event_units(&lab) - 3.0).abs() < f64::EPSILON);
        assert!((calculate_faculty_units("Dr. Santos", &[lab]) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_period_has_no_units() {
        let mut event = assigned("1", SessionKind::Lecture, "Dr. Santos");
        event.period = "9:00 AM".to_string();
        assert_eq!(compute_event_units(&event), 0.0);
    }

    #[test]
    fn test_summary_classifies_each_member() {
        let schedule = vec![assigned("1", SessionKind::Lecture, "Dr. Santos")];
        let faculty = vec![
            Faculty::new("Dr. Santos").with_status("Full-time"),
            Faculty::new("Dr. Lim").with_status("Part-time"),
        ];
        let summary = faculty_load_summary(&faculty, &schedule);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].units, 1.0);
        assert_eq!(summary[0].level, LoadLevel::Green);
        assert_eq!(summary[1].units, 0.0);
    }
}
