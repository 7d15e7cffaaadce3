//! Dashboard core: pure controller state machine and view-model helpers.
mod domain;
mod effect;
pub mod messages;
mod msg;
mod state;
mod update;
mod view_model;

pub use domain::{
    is_submittable_url, ContentPair, GenerationRequest, HistoryJob, ParseStanceError, Stance,
};
pub use effect::{BannerToken, Effect, RequestId, SubmissionId, SUCCESS_BANNER_TTL};
pub use msg::{GenerationOutcome, HistoryOutcome, Msg};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView};
