use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;
pub type SubmissionId = u64;
pub type TimerToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StanceCode {
    Pro,
    Anti,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPairRecord {
    pub branch: String,
    pub facebook_post: String,
    pub tweet: String,
}

/// One entry of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryJobRecord {
    pub id: String,
    pub created_at: String,
    pub source_url: String,
    pub stance: StanceCode,
    #[serde(default)]
    pub content_pairs: Vec<ContentPairRecord>,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequestBody {
    pub url: String,
    pub stance: StanceCode,
}

/// Failure body the service may send with a non-success status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid service address: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {status}{}", message_suffix(.message))]
    HttpStatus {
        status: u16,
        /// The `error` field of the failure body, when it had one.
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Decode(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HistoryFetched {
        request_id: RequestId,
        result: Result<Vec<HistoryJobRecord>, ServiceError>,
    },
    GenerationCompleted {
        submission_id: SubmissionId,
        result: Result<(), ServiceError>,
    },
    TimerFired {
        token: TimerToken,
    },
}
