// Faculty module
// Faculty member as listed by the backend; only the fields load advice needs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub name: String,
    /// Free-form employment status, e.g. "Full-time" or "Part-time".
    #[serde(default, alias = "employmentStatus", alias = "employment_status")]
    pub status: Option<String>,
}

impl Faculty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Any status text containing "part" (case-insensitive) counts as part-time.
    pub fn is_part_time(&self) -> bool {
        self.status
            .as_deref()
            .map(|status| status.to_lowercase().contains("part"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_time_detection() {
        assert!(Faculty::new("A").with_status("Part-time").is_part_time());
        assert!(Faculty::new("B").with_status("PART TIME").is_part_time());
        assert!(!Faculty::new("C").with_status("Full-time").is_part_time());
        assert!(!Faculty::new("D").is_part_time());
    }

    #[test]
    fn test_deserialize_status_alias() {
        let faculty: Faculty =
            serde_json::from_str(r#"{"name": "Dr. Cruz", "employmentStatus": "Part-Time"}"#)
                .unwrap();
        assert!(faculty.is_part_time());
    }
}
