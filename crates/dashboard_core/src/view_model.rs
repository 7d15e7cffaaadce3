use crate::{ContentPair, Stance};

/// Everything a renderer needs; derived from [`crate::AppState`], never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub stance: Stance,
    pub is_loading: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub success: Option<String>,
    pub service_configured: bool,
    pub history: Vec<HistoryRowView>,
    /// Set only when there is no history to list.
    pub empty_notice: Option<&'static str>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub source_url: String,
    pub stance: Stance,
    pub created_at: String,
    pub expanded: bool,
    /// Content pairs of the expanded row; `None` for collapsed rows.
    pub details: Option<Vec<ContentPair>>,
}
