use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RECORDS_KEY: &str = "Records";
pub const STATUS_OK: &str = "ok";
pub const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);

/// One entry of an SQS partial batch response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}

/// Response returned to the Lambda invoker.
///
/// Serializes to either `{"batchItemFailures": [...]}` or `{"status": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InvocationResponse {
    BatchAcknowledgment {
        #[serde(rename = "batchItemFailures")]
        batch_item_failures: Vec<BatchItemFailure>,
    },
    Status {
        status: String,
    },
}

impl InvocationResponse {
    /// Reports every item of a queue batch as processed.
    pub fn acknowledge_all() -> Self {
        Self::BatchAcknowledgment {
            batch_item_failures: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::Status {
            status: STATUS_OK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    QueueBatch,
    Direct,
}

impl EventShape {
    pub fn response(self) -> InvocationResponse {
        match self {
            Self::QueueBatch => InvocationResponse::acknowledge_all(),
            Self::Direct => InvocationResponse::ok(),
        }
    }
}

/// An event is a queue batch when it is a JSON object carrying a `Records`
/// key, whatever that key holds.
pub fn classify_event(event: &Value) -> EventShape {
    match event.as_object() {
        Some(object) if object.contains_key(RECORDS_KEY) => EventShape::QueueBatch,
        _ => EventShape::Direct,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PresignRequest {
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub presigned_url: String,
    pub key: String,
    pub bucket_name: String,
    pub expires_at: String,
}

/// Object a presigned `PUT` should authorize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignTarget {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub expires_in: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresignError {
    #[error("{0}")]
    Validation(String),
    #[error("Error generating presigned URL: {0}")]
    Presign(String),
}

impl PresignError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Presign(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Presign(_) => "presign_failed",
        }
    }
}

pub fn validate_presign_request(request: &PresignRequest) -> Result<(), PresignError> {
    if request.file_name.is_empty() {
        return Err(PresignError::Validation(
            "File name is required".to_string(),
        ));
    }

    if request.file_size <= 0 {
        return Err(PresignError::Validation(
            "File size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
