//! Dashboard engine: talks to the generation service and runs timers off the UI thread.
mod engine;
mod service;
mod types;

pub use engine::{EngineCommand, EngineEvents, EngineHandle};
pub use service::{GenerationService, ReqwestGenerationService, ServiceSettings};
pub use types::{
    ContentPairRecord, EngineEvent, GenerateRequestBody, HistoryJobRecord, RequestId,
    ServiceError, StanceCode, SubmissionId, TimerToken,
};
