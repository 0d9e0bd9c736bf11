//! RAID backend interface
//!
//! The backend reports expected failures through `ApiResponse::success`
//! rather than errors. `ApiError` is reserved for calls that did not produce
//! a response at all.

use async_trait::async_trait;
use raidchat_core::{NewRaidItem, RaidItem, RaidItemUpdate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result-object envelope returned by every backend call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// A backend call that failed without producing an `ApiResponse`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed backend response: {0}")]
    InvalidResponse(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Typed RAID item endpoints, scoped by project
#[async_trait]
pub trait RaidApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` only when no response was obtained.
    async fn create_raid_item(
        &self,
        project_key: &str,
        payload: NewRaidItem,
    ) -> Result<ApiResponse<RaidItem>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` only when no response was obtained.
    async fn update_raid_item(
        &self,
        project_key: &str,
        raid_id: &str,
        updates: RaidItemUpdate,
    ) -> Result<ApiResponse<RaidItem>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` only when no response was obtained.
    async fn list_raid_items(
        &self,
        project_key: &str,
    ) -> Result<ApiResponse<Vec<RaidItem>>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let ok = serde_json::to_value(ApiResponse::ok(3)).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "data": 3 }));

        let err = serde_json::to_value(ApiResponse::<u8>::err("Network error")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({ "success": false, "error": "Network error" })
        );
    }

    #[test]
    fn test_response_deserializes_without_optional_fields() {
        let resp: ApiResponse<u8> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert!(resp.error.is_none());
    }
}
