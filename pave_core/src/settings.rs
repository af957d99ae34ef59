//! # Design Settings
//!
//! Options that apply to every design in a run, plus optional job metadata
//! echoed into reports.
//!
//! ```rust
//! use pave_core::settings::DesignSettings;
//!
//! let settings: DesignSettings = serde_json::from_str("{}").unwrap();
//! assert!(!settings.throw_on_error);
//!
//! let strict = DesignSettings::strict();
//! assert!(strict.throw_on_error);
//! ```

use serde::{Deserialize, Serialize};

/// Settings shared by all designs in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Return the first validation or convergence error instead of a
    /// degraded result with the error listed in its warnings.
    pub throw_on_error: bool,

    /// Job metadata printed in report headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
}

impl DesignSettings {
    /// Settings with strict error propagation enabled
    pub fn strict() -> Self {
        DesignSettings {
            throw_on_error: true,
            ..Default::default()
        }
    }

    /// Attach job metadata
    pub fn with_project(mut self, project: ProjectInfo) -> Self {
        self.project = Some(project);
        self
    }
}

/// Job metadata for report headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    /// Responsible engineer
    pub engineer: String,
    /// Job number (e.g., "26-014")
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl ProjectInfo {
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>) -> Self {
        ProjectInfo {
            engineer: engineer.into(),
            job_id: job_id.into(),
            client: None,
        }
    }

    /// One-line summary for report headers: "Job 26-014 | Engineer: J. Doe"
    pub fn header_line(&self) -> String {
        let mut line = format!("Job {} | Engineer: {}", self.job_id, self.engineer);
        if let Some(client) = &self.client {
            line.push_str(&format!(" | Client: {}", client));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let settings = DesignSettings::default();
        assert!(!settings.throw_on_error);
        assert!(settings.project.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: DesignSettings =
            serde_json::from_str(r#"{"project": {"engineer": "J. Doe"}}"#).unwrap();
        assert!(!settings.throw_on_error);
        let project = settings.project.unwrap();
        assert_eq!(project.engineer, "J. Doe");
        assert_eq!(project.job_id, "");
    }

    #[test]
    fn test_header_line() {
        let mut info = ProjectInfo::new("J. Doe", "26-014");
        assert_eq!(info.header_line(), "Job 26-014 | Engineer: J. Doe");
        info.client = Some("County Roads".to_string());
        assert_eq!(info.header_line(), "Job 26-014 | Engineer: J. Doe | Client: County Roads");
    }

    #[test]
    fn test_serialization_skips_empty_project() {
        let json = serde_json::to_string(&DesignSettings::strict()).unwrap();
        assert_eq!(json, r#"{"throw_on_error":true}"#);
    }
}
