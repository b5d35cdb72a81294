use serde::{Deserialize, Serialize};

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_ERROR: &str = "error";

/// Body of `GET /api/health`, or a locally built error status when the call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            version: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_HEALTHY)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(ref version) = self.version {
            write!(f, " (v{})", version)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_health() {
        let json = r#"{"status": "healthy", "message": "API is running", "version": "1.0.0", "endpoints": []}"#;
        let health: HealthStatus = serde_json::from_str(json).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.to_string(), "healthy (v1.0.0): API is running");
    }

    #[test]
    fn error_status_is_not_healthy() {
        let health = HealthStatus::error("connection refused");
        assert!(!health.is_healthy());
        assert_eq!(health.message.as_deref(), Some("connection refused"));
    }
}
