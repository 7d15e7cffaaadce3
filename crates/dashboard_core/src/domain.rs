use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Political orientation requested for generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    #[default]
    Pro,
    Anti,
}

impl Stance {
    /// Wire and display code, `PRO` or `ANTI`.
    pub fn code(self) -> &'static str {
        match self {
            Stance::Pro => "PRO",
            Stance::Anti => "ANTI",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stance::Pro => "Supportive of Datuk Seri Anwar Ibrahim",
            Stance::Anti => "Critical of Perikatan Nasional",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stance {0:?}, expected PRO or ANTI")]
pub struct ParseStanceError(pub String);

impl FromStr for Stance {
    type Err = ParseStanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("pro") {
            Ok(Stance::Pro)
        } else if trimmed.eq_ignore_ascii_case("anti") {
            Ok(Stance::Anti)
        } else {
            Err(ParseStanceError(trimmed.to_string()))
        }
    }
}

/// One generated variant of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPair {
    pub branch: String,
    pub facebook_post: String,
    pub tweet: String,
}

/// A completed generation task as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryJob {
    pub id: String,
    /// Timestamp exactly as the service sent it.
    pub created_at: String,
    pub source_url: String,
    pub stance: Stance,
    pub content_pairs: Vec<ContentPair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub url: String,
    pub stance: Stance,
}

/// Accepts absolute `http`/`https` URLs with a host, the same shape a URL
/// input field enforces before a form can be submitted.
pub fn is_submittable_url(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stance_parses_case_insensitively() {
        assert_eq!("pro".parse::<Stance>(), Ok(Stance::Pro));
        assert_eq!(" ANTI ".parse::<Stance>(), Ok(Stance::Anti));
        assert_eq!(
            "neutral".parse::<Stance>(),
            Err(ParseStanceError("neutral".to_string()))
        );
    }

    #[test]
    fn submittable_urls_need_scheme_and_host() {
        assert!(is_submittable_url("https://x.test/a"));
        assert!(is_submittable_url("  http://example.com  "));
        assert!(!is_submittable_url(""));
        assert!(!is_submittable_url("   "));
        assert!(!is_submittable_url("example.com/article"));
        assert!(!is_submittable_url("mailto:someone@example.com"));
        assert!(!is_submittable_url("ftp://example.com/file"));
    }
}
