// Test fixtures - reusable test data
// A small department: two lecture rooms, one lab, three days, four sessions

#![allow(dead_code)]

use room_scheduler::models::event::{ScheduleEvent, SessionKind};
use room_scheduler::models::faculty::Faculty;
use room_scheduler::models::room::{RoomAxis, RoomCategories};
use room_scheduler::models::time_slot::TimeWindow;

/// Rooms as the backend groups them
pub mod rooms {
    use super::*;

    pub fn categories() -> RoomCategories {
        RoomCategories {
            lecture: vec!["R101".to_string(), "R102".to_string()],
            lab: vec!["LAB1".to_string()],
        }
    }

    pub fn axis() -> RoomAxis {
        RoomAxis::from_categories(&categories())
    }
}

/// Configured days and window
pub mod calendar {
    use super::*;

    pub fn days() -> Vec<String> {
        ["Monday", "Wednesday", "Friday"]
            .iter()
            .map(|day| day.to_string())
            .collect()
    }

    /// 7:00 AM to 12:00 PM, ten slots
    pub fn morning() -> TimeWindow {
        TimeWindow::new(7, 12)
    }
}

/// Sample sessions
pub mod events {
    use super::*;

    /// CS101 lecture, Monday 7:00-8:00 in R101
    pub fn cs101_lecture() -> ScheduleEvent {
        ScheduleEvent::builder()
            .id("1")
            .course_code("CS101A")
            .base_course_code("CS101")
            .title("Intro to Computing")
            .section("BSCS", "1", "A")
            .room("R101")
            .day("Monday")
            .period("7:00 AM - 8:00 AM")
            .faculty("Dr. Cruz")
            .build()
            .unwrap()
    }

    /// CS101 laboratory, Monday 8:00-9:30 in LAB1
    pub fn cs101_lab() -> ScheduleEvent {
        ScheduleEvent::builder()
            .id("2")
            .course_code("CS101L")
            .base_course_code("CS101")
            .title("Intro to Computing Lab")
            .section("BSCS", "1", "A")
            .session(SessionKind::Laboratory)
            .room("LAB1")
            .day("Monday")
            .period("8:00 AM - 9:30 AM")
            .faculty("Dr. Cruz")
            .build()
            .unwrap()
    }

    /// MATH1 lecture, Monday 9:00-10:00 in R102, part-timer
    pub fn math_lecture() -> ScheduleEvent {
        ScheduleEvent::builder()
            .id("3")
            .course_code("MATH1")
            .title("College Algebra")
            .section("BSCS", "1", "B")
            .room("R102")
            .day("Monday")
            .period("9:00 AM - 10:00 AM")
            .faculty("Prof. Dizon")
            .build()
            .unwrap()
    }

    /// Wednesday session, never on Monday's grid
    pub fn wednesday_lecture() -> ScheduleEvent {
        ScheduleEvent::builder()
            .id("4")
            .course_code("IT200")
            .section("BSIT", "2", "A")
            .room("R101")
            .day("Wednesday")
            .period("10:00 AM - 11:00 AM")
            .build()
            .unwrap()
    }

    pub fn department() -> Vec<ScheduleEvent> {
        vec![cs101_lecture(), cs101_lab(), math_lecture(), wednesday_lecture()]
    }
}

pub mod faculty {
    use super::*;

    pub fn roster() -> Vec<Faculty> {
        vec![
            Faculty::new("Dr. Cruz").with_status("Full-time"),
            Faculty::new("Prof. Dizon").with_status("Part-time"),
        ]
    }
}
