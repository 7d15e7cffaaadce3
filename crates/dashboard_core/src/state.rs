use url::Url;

use crate::messages;
use crate::view_model::{AppViewModel, HistoryRowView};
use crate::{BannerToken, HistoryJob, RequestId, Stance, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SuccessBanner {
    token: BannerToken,
    text: String,
    timer_scheduled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionPhase {
    Writing,
    /// The write succeeded; waiting for the latest history read, which is at least this one.
    Refreshing { request_id: RequestId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Submission {
    id: SubmissionId,
    phase: SubmissionPhase,
}

/// The controller's whole UI state. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    service: Option<Url>,
    url: String,
    stance: Stance,
    error: Option<String>,
    success: Option<SuccessBanner>,
    history: Vec<HistoryJob>,
    expanded: Option<String>,
    submission: Option<Submission>,
    last_request_id: RequestId,
    last_submission_id: SubmissionId,
    last_banner_token: BannerToken,
    dirty: bool,
}

impl AppState {
    /// `service` is the base address of the generation service; `None` keeps
    /// every network action disabled.
    pub fn new(service: Option<Url>) -> Self {
        Self {
            service,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let is_loading = self.is_loading();
        let history = self
            .history
            .iter()
            .map(|job| {
                let expanded = self.expanded.as_deref() == Some(job.id.as_str());
                HistoryRowView {
                    id: job.id.clone(),
                    source_url: job.source_url.clone(),
                    stance: job.stance,
                    created_at: job.created_at.clone(),
                    expanded,
                    details: expanded.then(|| job.content_pairs.clone()),
                }
            })
            .collect::<Vec<_>>();

        AppViewModel {
            url: self.url.clone(),
            stance: self.stance,
            is_loading,
            submit_enabled: !is_loading && self.service.is_some(),
            submit_label: if is_loading {
                messages::SUBMIT_BUSY
            } else {
                messages::SUBMIT_IDLE
            },
            error: self.error.clone(),
            success: self.success.as_ref().map(|banner| banner.text.clone()),
            service_configured: self.service.is_some(),
            empty_notice: history.is_empty().then_some(messages::NO_HISTORY),
            history,
            dirty: self.dirty,
        }
    }

    pub fn service(&self) -> Option<&Url> {
        self.service.as_ref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_loading(&self) -> bool {
        self.submission.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.as_ref().map(|banner| banner.text.as_str())
    }

    pub fn history(&self) -> &[HistoryJob] {
        &self.history
    }

    pub fn expanded_item_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Returns whether anything visible changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.url != url {
            self.url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_stance(&mut self, stance: Stance) {
        if self.stance != stance {
            self.stance = stance;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_history(&mut self, jobs: Vec<HistoryJob>) {
        self.history = jobs;
        self.mark_dirty();
    }

    pub(crate) fn toggle_expansion(&mut self, job_id: String) {
        if self.expanded.as_deref() == Some(job_id.as_str()) {
            self.expanded = None;
        } else {
            self.expanded = Some(job_id);
        }
        self.mark_dirty();
    }

    pub(crate) fn issue_history_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn is_latest_history_request(&self, request_id: RequestId) -> bool {
        request_id == self.last_request_id
    }

    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.last_submission_id += 1;
        self.submission = Some(Submission {
            id: self.last_submission_id,
            phase: SubmissionPhase::Writing,
        });
        self.mark_dirty();
        self.last_submission_id
    }

    /// True while `submission_id` is in flight and still waiting for its write.
    pub(crate) fn is_writing(&self, submission_id: SubmissionId) -> bool {
        matches!(
            self.submission,
            Some(Submission { id, phase: SubmissionPhase::Writing }) if id == submission_id
        )
    }

    pub(crate) fn await_refresh(&mut self, request_id: RequestId) {
        if let Some(submission) = self.submission.as_mut() {
            submission.phase = SubmissionPhase::Refreshing { request_id };
        }
    }

    /// True if a history response for `request_id` lets the in-flight submission settle.
    /// Only the latest read qualifies, so the submission never ends on a list
    /// that a newer read is about to replace.
    pub(crate) fn settles_refresh(&self, request_id: RequestId) -> bool {
        matches!(
            self.submission,
            Some(Submission {
                phase: SubmissionPhase::Refreshing { request_id: awaited },
                ..
            }) if request_id >= awaited && self.is_latest_history_request(request_id)
        )
    }

    pub(crate) fn end_submission(&mut self) {
        if self.submission.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn show_success(&mut self, text: impl Into<String>) -> BannerToken {
        self.last_banner_token += 1;
        self.success = Some(SuccessBanner {
            token: self.last_banner_token,
            text: text.into(),
            timer_scheduled: false,
        });
        self.mark_dirty();
        self.last_banner_token
    }

    /// Marks the current banner's timer as scheduled and returns its token,
    /// or `None` if there is no banner waiting for one.
    pub(crate) fn take_unscheduled_banner(&mut self) -> Option<BannerToken> {
        let banner = self.success.as_mut()?;
        if banner.timer_scheduled {
            return None;
        }
        banner.timer_scheduled = true;
        Some(banner.token)
    }

    /// Removes the current banner. Returns its token if a timer is pending for it.
    pub(crate) fn dismiss_success(&mut self) -> Option<BannerToken> {
        let banner = self.success.take()?;
        self.mark_dirty();
        banner.timer_scheduled.then_some(banner.token)
    }

    /// Clears the banner only if `token` still names it.
    pub(crate) fn expire_success(&mut self, token: BannerToken) -> bool {
        match &self.success {
            Some(banner) if banner.token == token => {
                self.success = None;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }
}
