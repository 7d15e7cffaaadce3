#![allow(dead_code)]

use std::sync::Once;

use dashboard_core::{
    update, AppState, ContentPair, Effect, GenerationOutcome, HistoryJob, HistoryOutcome, Msg,
    RequestId, Stance, SubmissionId,
};
use url::Url;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

pub fn configured() -> AppState {
    AppState::new(Some(Url::parse("https://api.example.test").unwrap()))
}

pub fn job(id: &str, pairs: usize) -> HistoryJob {
    HistoryJob {
        id: id.to_string(),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        source_url: format!("https://news.example.com/{id}"),
        stance: Stance::Pro,
        content_pairs: (0..pairs)
            .map(|n| ContentPair {
                branch: format!("branch-{n}"),
                facebook_post: format!("post {n}"),
                tweet: format!("tweet {n}"),
            })
            .collect(),
    }
}

pub fn history_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadHistory { request_id } => Some(*request_id),
            _ => None,
        })
        .expect("load history effect")
}

pub fn submission(effects: &[Effect]) -> SubmissionId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitGeneration { submission_id, .. } => Some(*submission_id),
            _ => None,
        })
        .expect("submit effect")
}

pub fn count_history_loads(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::LoadHistory { .. }))
        .count()
}

/// Starts the console and answers the initial history read with `jobs`.
pub fn started_with(jobs: Vec<HistoryJob>) -> AppState {
    let (state, effects) = update(configured(), Msg::Started);
    let request_id = history_request(&effects);
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            request_id,
            outcome: HistoryOutcome::Loaded(jobs),
        },
    );
    state
}

/// Types `url` into the form and submits it.
pub fn submit_url(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlChanged(url.to_string()));
    update(state, Msg::SubmitClicked)
}

pub fn finish(
    state: AppState,
    submission_id: SubmissionId,
    outcome: GenerationOutcome,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::GenerationFinished {
            submission_id,
            outcome,
        },
    )
}
