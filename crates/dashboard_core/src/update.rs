use console_logging::{console_debug, console_info, console_warn};

use crate::{
    is_submittable_url, messages, AppState, Effect, GenerationOutcome, GenerationRequest,
    HistoryOutcome, Msg, RequestId, SubmissionId, SUCCESS_BANNER_TTL,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started | Msg::RefreshRequested => load_history(&mut state).into_iter().collect(),
        Msg::UrlChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::StanceChanged(stance) => {
            state.set_stance(stance);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::ToggleExpansion(job_id) => {
            state.toggle_expansion(job_id);
            Vec::new()
        }
        Msg::HistoryLoaded {
            request_id,
            outcome,
        } => apply_history(&mut state, request_id, outcome),
        Msg::GenerationFinished {
            submission_id,
            outcome,
        } => finish_generation(&mut state, submission_id, outcome),
        Msg::SuccessBannerExpired { token } => {
            if !state.expire_success(token) {
                console_debug!("Ignoring stale success banner timer token={}", token);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_history(state: &mut AppState) -> Option<Effect> {
    if state.service().is_none() {
        state.set_error(messages::CONFIG_MISSING);
        return None;
    }
    let request_id = state.issue_history_request();
    Some(Effect::LoadHistory { request_id })
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.is_loading() {
        console_warn!("Submit ignored: a generation request is already in flight");
        return Vec::new();
    }
    if state.service().is_none() {
        state.set_error(messages::CONFIG_MISSING);
        return Vec::new();
    }
    let url = state.url().trim().to_string();
    if !is_submittable_url(&url) {
        state.set_error(messages::INVALID_URL);
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    if let Some(token) = state.dismiss_success() {
        effects.push(Effect::CancelBannerClear { token });
    }
    state.clear_error();
    let submission_id = state.begin_submission();
    console_info!(
        "SubmitGeneration submission_id={} stance={} url={}",
        submission_id,
        state.stance(),
        url
    );
    effects.push(Effect::SubmitGeneration {
        submission_id,
        request: GenerationRequest {
            url,
            stance: state.stance(),
        },
    });
    effects
}

fn finish_generation(
    state: &mut AppState,
    submission_id: SubmissionId,
    outcome: GenerationOutcome,
) -> Vec<Effect> {
    if !state.is_writing(submission_id) {
        console_warn!(
            "Ignoring generation result for submission {} that is not in flight",
            submission_id
        );
        return Vec::new();
    }

    match outcome {
        GenerationOutcome::Accepted => {
            state.show_success(messages::GENERATION_SUCCEEDED);
            state.set_url(String::new());
            match load_history(state) {
                Some(Effect::LoadHistory { request_id }) => {
                    state.await_refresh(request_id);
                    vec![Effect::LoadHistory { request_id }]
                }
                // Unreachable while submissions require a configured service.
                _ => settle_submission(state),
            }
        }
        GenerationOutcome::Rejected { message } => {
            let message = message
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| messages::UNKNOWN_ERROR.to_string());
            console_warn!("Submission {} rejected: {}", submission_id, message);
            state.set_error(message);
            settle_submission(state)
        }
        GenerationOutcome::Failed { reason } => {
            console_warn!("Submission {} failed: {}", submission_id, reason);
            state.set_error(reason);
            settle_submission(state)
        }
    }
}

fn apply_history(
    state: &mut AppState,
    request_id: RequestId,
    outcome: HistoryOutcome,
) -> Vec<Effect> {
    if state.is_latest_history_request(request_id) {
        match outcome {
            HistoryOutcome::Loaded(jobs) => {
                console_debug!("History request {} loaded {} jobs", request_id, jobs.len());
                state.replace_history(jobs);
            }
            HistoryOutcome::Unavailable => state.set_error(messages::HISTORY_UNAVAILABLE),
        }
    } else {
        console_debug!("Discarding superseded history response {}", request_id);
    }

    if state.settles_refresh(request_id) {
        settle_submission(state)
    } else {
        Vec::new()
    }
}

/// Ends the in-flight submission and starts the timer for its banner, if any.
fn settle_submission(state: &mut AppState) -> Vec<Effect> {
    state.end_submission();
    state
        .take_unscheduled_banner()
        .map(|token| Effect::ScheduleBannerClear {
            token,
            after: SUCCESS_BANNER_TTL,
        })
        .into_iter()
        .collect()
}
