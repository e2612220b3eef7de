//! Standardized response envelope returned by every data-service call.

use serde::{Deserialize, Serialize};

/// Uniform result container for all repository and service operations.
///
/// Absence and failure are distinct: a lookup miss is a *successful*
/// response with `data: None` (see [`ApiResponse::missing`]), while a
/// failed write resolves with `success: false` and a descriptive message.
/// Faults never cross the service boundary any other way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// A successful response carrying no data, e.g. a lookup that found
    /// nothing. The message explains what was absent.
    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// A failure that still carries a payload, e.g. `delete` resolving
    /// with `false` when the record was not found.
    pub fn fail_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Carry `success` and `message` across a change of payload type,
    /// dropping any data. Used when a derived query propagates an upstream
    /// failure under its own response type.
    pub fn cast<U>(self) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: None,
            message: self.message,
        }
    }
}
