use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_SERIOUSNESS: i64 = 1;
pub const MAX_SERIOUSNESS: i64 = 5;

/// Form data describing the excuse to draft.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcuseRequest {
    pub category: String,
    pub tone: String,
    /// 1 (lighthearted) to 5 (grave), inclusive.
    pub seriousness: i64,
    pub recipient_name: String,
    pub sender_name: String,
    pub eta_when: String,
}

impl ExcuseRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_SERIOUSNESS..=MAX_SERIOUSNESS).contains(&self.seriousness) {
            return Err(AppError::UnprocessableEntity(format!(
                "seriousness must be between {MIN_SERIOUSNESS} and {MAX_SERIOUSNESS}, got {}",
                self.seriousness
            )));
        }
        Ok(())
    }
}

/// The envelope returned by `POST /api/generate-excuse` on every
/// non-HTTP-error path, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcuseResponse {
    pub subject: String,
    pub body: String,
    pub success: bool,
    pub error: Option<String>,
}

impl ExcuseResponse {
    pub fn drafted(subject: String, body: String) -> Self {
        Self {
            subject,
            body,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            subject: "Error".to_string(),
            body: "Sorry, there was an error generating your email. Please try again.".to_string(),
            success: false,
            error: Some(error.into()),
        }
    }
}
