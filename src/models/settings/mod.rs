// Settings module
// Application configuration persisted as TOML

use serde::{Deserialize, Serialize};

use crate::models::time_slot::TimeWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the schedule backend.
    pub backend_url: String,
    /// Bearer token attached to every backend request.
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    /// Day window used when the backend's time settings cannot be fetched.
    pub fallback_start_hour: u32,
    pub fallback_end_hour: u32,
    /// Day selected on start-up; the first backend day when unset.
    pub default_day: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            auth_token: None,
            request_timeout_secs: 20,
            fallback_start_hour: 7,
            fallback_end_hour: 21,
            default_day: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.backend_url.trim().is_empty() {
            return Err("Backend URL cannot be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0 seconds".to_string());
        }

        if self.fallback_start_hour > 24 || self.fallback_end_hour > 24 {
            return Err("Fallback hours must be between 0 and 24".to_string());
        }

        if self.fallback_start_hour >= self.fallback_end_hour {
            return Err("Fallback start hour must be before fallback end hour".to_string());
        }

        Ok(())
    }

    pub fn fallback_window(&self) -> TimeWindow {
        TimeWindow::new(self.fallback_start_hour, self.fallback_end_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fallback_window(), TimeWindow::new(7, 21));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig {
            backend_url: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.backend_url = "http://scheduler.local".to_string();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 5;
        config.fallback_start_hour = 22;
        config.fallback_end_hour = 8;
        assert!(config.validate().is_err());

        config.fallback_end_hour = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("backend_url = \"https://sched.example.edu\"").unwrap();
        assert_eq!(config.backend_url, "https://sched.example.edu");
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.default_day, None);
    }
}
