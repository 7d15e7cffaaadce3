use std::time::Duration;

use console_logging::{console_debug, console_warn};
use reqwest::Url;

use crate::types::ErrorBody;
use crate::{GenerateRequestBody, HistoryJobRecord, ServiceError};

const HISTORY_PATH: &str = "api/history";
const GENERATE_PATH: &str = "api/generate";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Base address of the generation service, e.g. `https://api.example.com`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ServiceSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The remote generation/history service.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Returns the job history in the order the service wants it shown.
    async fn fetch_history(&self) -> Result<Vec<HistoryJobRecord>, ServiceError>;

    /// Requests a new generation. Only the response status is inspected.
    async fn submit_generation(&self, body: &GenerateRequestBody) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationService {
    client: reqwest::Client,
    history_url: Url,
    generate_url: Url,
}

impl ReqwestGenerationService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let history_url = endpoint(&settings.base_url, HISTORY_PATH)?;
        let generate_url = endpoint(&settings.base_url, GENERATE_PATH)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::Network(err.to_string()))?;

        Ok(Self {
            client,
            history_url,
            generate_url,
        })
    }
}

#[async_trait::async_trait]
impl GenerationService for ReqwestGenerationService {
    async fn fetch_history(&self) -> Result<Vec<HistoryJobRecord>, ServiceError> {
        let response = self
            .client
            .get(self.history_url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(ServiceError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let jobs: Vec<HistoryJobRecord> =
            serde_json::from_slice(&body).map_err(|err| ServiceError::Decode(err.to_string()))?;
        console_debug!("Fetched {} history jobs", jobs.len());
        Ok(jobs)
    }

    async fn submit_generation(&self, body: &GenerateRequestBody) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.generate_url.clone())
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let message = error_message(&body);
        console_warn!(
            "Generate request failed with status {} ({:?})",
            status,
            message
        );
        Err(ServiceError::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, ServiceError> {
    let base = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{base}/{path}"))
        .map_err(|err| ServiceError::InvalidBaseUrl(format!("{base_url}: {err}")))
}

/// Pulls `error` out of a JSON failure body. Anything else yields `None`.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    if err.is_decode() {
        return ServiceError::Decode(err.to_string());
    }
    ServiceError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let plain = endpoint("https://api.example.com", HISTORY_PATH).unwrap();
        let slashed = endpoint("https://api.example.com/", HISTORY_PATH).unwrap();
        assert_eq!(plain, slashed);
        assert_eq!(plain.as_str(), "https://api.example.com/api/history");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = endpoint("https://example.com/console", GENERATE_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.com/console/api/generate");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        assert!(matches!(
            endpoint("not a url", HISTORY_PATH),
            Err(ServiceError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn error_message_reads_only_error_field() {
        assert_eq!(
            error_message(br#"{"error":"bad url"}"#),
            Some("bad url".to_string())
        );
        assert_eq!(error_message(br#"{"detail":"x"}"#), None);
        assert_eq!(error_message(br#"{"error":""}"#), None);
        assert_eq!(error_message(b"<html>502</html>"), None);
        assert_eq!(error_message(b""), None);
    }

    #[test]
    fn http_status_display_includes_message() {
        let with = ServiceError::HttpStatus {
            status: 400,
            message: Some("bad url".to_string()),
        };
        let without = ServiceError::HttpStatus {
            status: 502,
            message: None,
        };
        assert_eq!(with.to_string(), "http status 400: bad url");
        assert_eq!(without.to_string(), "http status 502");
    }
}
