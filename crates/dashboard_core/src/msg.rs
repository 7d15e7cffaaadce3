use crate::{BannerToken, HistoryJob, RequestId, Stance, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The console was shown for the first time.
    Started,
    /// User edited the URL field.
    UrlChanged(String),
    /// User picked a stance.
    StanceChanged(Stance),
    /// User submitted the form with the current URL and stance.
    SubmitClicked,
    /// User or the periodic trigger asked for a fresh history list.
    RefreshRequested,
    /// User clicked a history row header.
    ToggleExpansion(String),
    /// A history read settled.
    HistoryLoaded {
        request_id: RequestId,
        outcome: HistoryOutcome,
    },
    /// A generation request settled.
    GenerationFinished {
        submission_id: SubmissionId,
        outcome: GenerationOutcome,
    },
    /// The timer for a success banner fired.
    SuccessBannerExpired { token: BannerToken },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    Loaded(Vec<HistoryJob>),
    /// Network failure, non-success status or an unreadable body.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Accepted,
    /// The service answered with a non-success status. `message` is the
    /// `error` field of its body, if there was one.
    Rejected { message: Option<String> },
    /// The request never produced a usable answer (network, timeout, decode).
    Failed { reason: String },
}
