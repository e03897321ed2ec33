// Event module
// Scheduled class session as delivered by the schedule backend

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::period::{parse_period, period_start, TimeRange};
use crate::utils::time::TimeParseError;

/// Grid footprint of each session kind, in minutes.
///
/// Grid placement uses this table rather than the end of the event's period.
pub const GRID_DURATION_MINUTES: [(SessionKind, u32); 2] = [
    (SessionKind::Lecture, 60),
    (SessionKind::Laboratory, 90),
];

/// Lecture or laboratory session.
///
/// Any label other than `"Laboratory"` is treated as a lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionKind {
    #[default]
    Lecture,
    Laboratory,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lecture",
            SessionKind::Laboratory => "Laboratory",
        }
    }

    pub fn is_lab(&self) -> bool {
        matches!(self, SessionKind::Laboratory)
    }

    /// Minutes this kind of session covers on the room grid.
    pub fn grid_minutes(&self) -> u32 {
        GRID_DURATION_MINUTES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, minutes)| *minutes)
            .unwrap_or(60)
    }

    /// Flat faculty-load weight: 1 per lecture, 1.5 per laboratory.
    pub fn faculty_weight(&self) -> f64 {
        match self {
            SessionKind::Lecture => 1.0,
            SessionKind::Laboratory => 1.5,
        }
    }

    /// Suffix the backend appends to the course code of split courses.
    pub fn code_suffix(&self) -> char {
        match self {
            SessionKind::Lecture => 'A',
            SessionKind::Laboratory => 'L',
        }
    }
}

impl From<String> for SessionKind {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("laboratory") {
            SessionKind::Laboratory
        } else {
            SessionKind::Lecture
        }
    }
}

impl From<SessionKind> for String {
    fn from(kind: SessionKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One scheduled class session.
///
/// The surrounding view owns the list; these records change only through
/// [`ScheduleEvent::apply_patch`] after the backend confirms an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub schedule_id: String,
    #[serde(rename = "courseCode")]
    pub course_code: String,
    #[serde(
        rename = "baseCourseCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub base_course_code: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub program: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub session: SessionKind,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub faculty: Option<String>,
}

impl ScheduleEvent {
    /// Create a builder for constructing events with optional fields
    pub fn builder() -> ScheduleEventBuilder {
        ScheduleEventBuilder::new()
    }

    /// Course code without the lecture/lab suffix.
    ///
    /// Uses `baseCourseCode` when the backend supplied one, otherwise strips a
    /// trailing `A` or `L` that follows a digit (`CS101L` -> `CS101`).
    pub fn base_course_code(&self) -> &str {
        match self.base_course_code.as_deref() {
            Some(base) if !base.trim().is_empty() => base,
            _ => strip_session_suffix(&self.course_code),
        }
    }

    /// Identity shared by the lecture and lab sections of one course offering:
    /// `baseCourseCode-program-year-block`.
    pub fn group_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.base_course_code(),
            self.program,
            self.year,
            self.block
        )
    }

    pub fn start_minutes(&self) -> Result<u32, TimeParseError> {
        period_start(&self.period)
    }

    pub fn time_range(&self) -> Result<TimeRange, TimeParseError> {
        parse_period(&self.period)
    }

    pub fn is_assigned_to(&self, faculty: &str) -> bool {
        self.faculty.as_deref() == Some(faculty)
    }

    /// Grid label, given the base codes that have both session kinds.
    pub fn display_code(&self, split_codes: &HashSet<String>) -> String {
        let base = self.base_course_code();
        display_course_code(base, self.session, split_codes.contains(base))
    }

    /// Merge the fields present in `patch`; the identifier never changes.
    pub fn apply_patch(&mut self, patch: &EventPatch) {
        if let Some(ref code) = patch.course_code {
            self.course_code = code.clone();
        }
        if let Some(ref base) = patch.base_course_code {
            self.base_course_code = Some(base.clone());
        }
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref program) = patch.program {
            self.program = program.clone();
        }
        if let Some(ref year) = patch.year {
            self.year = year.clone();
        }
        if let Some(ref block) = patch.block {
            self.block = block.clone();
        }
        if let Some(session) = patch.session {
            self.session = session;
        }
        if let Some(ref room) = patch.room {
            self.room = room.clone();
        }
        if let Some(ref day) = patch.day {
            self.day = day.clone();
        }
        if let Some(ref period) = patch.period {
            self.period = period.clone();
        }
        if let Some(ref faculty) = patch.faculty {
            self.faculty = faculty.clone();
        }
    }
}

/// Course code as the backend displays it: split courses get `A` (lecture) or
/// `L` (laboratory) appended, single-kind courses keep the bare code.
pub fn display_course_code(base_code: &str, session: SessionKind, has_both_kinds: bool) -> String {
    if has_both_kinds {
        format!("{}{}", base_code, session.code_suffix())
    } else {
        base_code.to_string()
    }
}

/// Base codes that are offered as both a lecture and a laboratory in `events`.
pub fn split_course_codes(events: &[ScheduleEvent]) -> HashSet<String> {
    let mut lectures = HashSet::new();
    let mut labs = HashSet::new();
    for event in events {
        let base = event.base_course_code().to_string();
        if event.session.is_lab() {
            labs.insert(base);
        } else {
            lectures.insert(base);
        }
    }
    lectures.intersection(&labs).cloned().collect()
}

fn strip_session_suffix(code: &str) -> &str {
    let mut chars = code.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('A' | 'L'), Some(prev)) if prev.is_ascii_digit() => &code[..code.len() - 1],
        _ => code,
    }
}

/// Partial event fields returned by the backend after an override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(rename = "courseCode", default, skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(rename = "baseCourseCode", default, skip_serializing_if = "Option::is_none")]
    pub base_course_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// `Some(None)` clears the assignment.
    #[serde(
        default,
        deserialize_with = "present_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub faculty: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawScalar> for String {
    fn from(raw: RawScalar) -> Self {
        match raw {
            RawScalar::Text(text) => text,
            RawScalar::Integer(n) => n.to_string(),
            RawScalar::Float(f) => f.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawScalar::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.map(String::from))
}

fn present_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Builder for creating events with optional fields
#[derive(Debug, Default)]
pub struct ScheduleEventBuilder {
    schedule_id: Option<String>,
    course_code: Option<String>,
    base_course_code: Option<String>,
    title: String,
    program: String,
    year: String,
    block: String,
    session: SessionKind,
    room: String,
    day: String,
    period: String,
    faculty: Option<String>,
}

impl ScheduleEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.schedule_id = Some(id.into());
        self
    }

    pub fn course_code(mut self, code: impl Into<String>) -> Self {
        self.course_code = Some(code.into());
        self
    }

    pub fn base_course_code(mut self, code: impl Into<String>) -> Self {
        self.base_course_code = Some(code.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set program, year and block in one go
    pub fn section(
        mut self,
        program: impl Into<String>,
        year: impl Into<String>,
        block: impl Into<String>,
    ) -> Self {
        self.program = program.into();
        self.year = year.into();
        self.block = block.into();
        self
    }

    pub fn session(mut self, session: SessionKind) -> Self {
        self.session = session;
        self
    }

    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn day(mut self, day: impl Into<String>) -> Self {
        self.day = day.into();
        self
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    pub fn faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<ScheduleEvent, String> {
        let schedule_id = self.schedule_id.ok_or("Schedule id is required")?;
        if schedule_id.trim().is_empty() {
            return Err("Schedule id cannot be empty".to_string());
        }
        let course_code = self.course_code.ok_or("Course code is required")?;

        Ok(ScheduleEvent {
            schedule_id,
            course_code,
            base_course_code: self.base_course_code,
            title: self.title,
            program: self.program,
            year: self.year,
            block: self.block,
            session: self.session,
            room: self.room,
            day: self.day,
            period: self.period,
            faculty: self.faculty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lab_event() -> ScheduleEvent {
        ScheduleEvent::builder()
            .id("12")
            .course_code("CS101L")
            .section("BSCS", "1", "A")
            .session(SessionKind::Laboratory)
            .room("Lab 1")
            .day("Monday")
            .period("7:00 AM - 8:30 AM")
            .build()
            .unwrap()
    }

    #[test]
    fn test_group_key_strips_suffix_without_base_code() {
        let lab = lab_event();
        let mut lecture = lab.clone();
        lecture.course_code = "CS101A".to_string();
        assert_eq!(lab.group_key(), "CS101-BSCS-1-A");
        assert_eq!(lab.group_key(), lecture.group_key());
    }

    #[test]
    fn test_group_key_prefers_base_code() {
        let mut event = lab_event();
        event.base_course_code = Some("CS-INTRO".to_string());
        assert_eq!(event.group_key(), "CS-INTRO-BSCS-1-A");
    }

    #[test]
    fn test_suffix_only_stripped_after_digit() {
        assert_eq!(strip_session_suffix("CS101L"), "CS101");
        assert_eq!(strip_session_suffix("CS101"), "CS101");
        assert_eq!(strip_session_suffix("GENERAL"), "GENERAL");
        assert_eq!(strip_session_suffix("L"), "L");
        assert_eq!(strip_session_suffix(""), "");
    }

    #[test]
    fn test_session_kind_table() {
        assert_eq!(SessionKind::Lecture.grid_minutes(), 60);
        assert_eq!(SessionKind::Laboratory.grid_minutes(), 90);
        assert_eq!(SessionKind::from("laboratory".to_string()), SessionKind::Laboratory);
        assert_eq!(SessionKind::from("Seminar".to_string()), SessionKind::Lecture);
    }

    #[test]
    fn test_display_course_code() {
        assert_eq!(display_course_code("CS101", SessionKind::Lecture, true), "CS101A");
        assert_eq!(display_course_code("CS101", SessionKind::Laboratory, true), "CS101L");
        assert_eq!(display_course_code("MATH1", SessionKind::Lecture, false), "MATH1");
    }

    #[test]
    fn test_split_course_codes() {
        let lecture = ScheduleEvent::builder().id("1").course_code("CS101A").build().unwrap();
        let lab = ScheduleEvent::builder()
            .id("2")
            .course_code("CS101L")
            .session(SessionKind::Laboratory)
            .build()
            .unwrap();
        let single = ScheduleEvent::builder().id("3").course_code("MATH1").build().unwrap();
        let events = vec![lecture.clone(), lab.clone(), single.clone()];

        let split = split_course_codes(&events);
        assert_eq!(split.len(), 1);
        assert_eq!(lecture.display_code(&split), "CS101A");
        assert_eq!(lab.display_code(&split), "CS101L");
        assert_eq!(single.display_code(&split), "MATH1");
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "schedule_id": 42,
            "courseCode": "CS101L",
            "baseCourseCode": "CS101",
            "title": "Intro to Computing",
            "program": "BSCS",
            "year": 1,
            "session": "Laboratory",
            "block": "A",
            "day": "Monday",
            "period": "7:00 AM - 8:30 AM",
            "room": "Lab 1"
        }"#;
        let event: ScheduleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.schedule_id, "42");
        assert_eq!(event.year, "1");
        assert_eq!(event.session, SessionKind::Laboratory);
        assert_eq!(event.faculty, None);
        assert_eq!(event.start_minutes(), Ok(420));
    }

    #[test]
    fn test_apply_patch_keeps_identifier() {
        let mut event = lab_event();
        let patch: EventPatch = serde_json::from_str(
            r#"{"schedule_id": "999", "room": "Lab 2", "day": "Tuesday", "period": "9:00 AM - 10:30 AM", "faculty": null}"#,
        )
        .unwrap();
        event.faculty = Some("Dr. Reyes".to_string());
        event.apply_patch(&patch);

        assert_eq!(event.schedule_id, "12");
        assert_eq!(event.room, "Lab 2");
        assert_eq!(event.day, "Tuesday");
        assert_eq!(event.period, "9:00 AM - 10:30 AM");
        assert_eq!(event.faculty, None);
        assert_eq!(event.course_code, "CS101L");
    }

    #[test]
    fn test_empty_patch() {
        assert!(EventPatch::default().is_empty());
        let patch: EventPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.faculty, None);
    }

    #[test]
    fn test_builder_requires_id() {
        assert!(ScheduleEvent::builder().course_code("X1").build().is_err());
        assert!(ScheduleEvent::builder().id(" ").course_code("X1").build().is_err());
    }
}
