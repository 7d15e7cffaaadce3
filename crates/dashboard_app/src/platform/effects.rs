use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use console_logging::{console_info, console_warn};
use dashboard_core::{
    ContentPair, Effect, GenerationOutcome, HistoryJob, HistoryOutcome, Msg, Stance,
};
use dashboard_engine::{
    EngineCommand, EngineEvent, EngineEvents, EngineHandle, GenerateRequestBody, HistoryJobRecord,
    ReqwestGenerationService, ServiceError, ServiceSettings, StanceCode,
};

use super::app::LoopEvent;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn start(
        settings: ServiceSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> anyhow::Result<Self> {
        console_info!("Connecting to generation service at {}", settings.base_url);
        let service = ReqwestGenerationService::new(settings).context("building service client")?;
        let (engine, events) =
            EngineHandle::start(Arc::new(service)).context("starting engine runtime")?;
        spawn_event_loop(events, loop_tx)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            if !self.engine.send(to_command(effect)) {
                console_warn!("Engine stopped; dropping effect");
            }
        }
    }
}

fn spawn_event_loop(
    events: EngineEvents,
    loop_tx: mpsc::Sender<LoopEvent>,
) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("dashboard-engine-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if loop_tx.send(LoopEvent::Dispatch(to_msg(event))).is_err() {
                    break;
                }
            }
        })
        .context("spawning engine event thread")?;
    Ok(())
}

pub(crate) fn to_command(effect: Effect) -> EngineCommand {
    match effect {
        Effect::LoadHistory { request_id } => EngineCommand::LoadHistory { request_id },
        Effect::SubmitGeneration {
            submission_id,
            request,
        } => EngineCommand::Submit {
            submission_id,
            body: GenerateRequestBody {
                url: request.url,
                stance: stance_code(request.stance),
            },
        },
        Effect::ScheduleBannerClear { token, after } => EngineCommand::StartTimer {
            token,
            delay: after,
        },
        Effect::CancelBannerClear { token } => EngineCommand::CancelTimer { token },
    }
}

pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HistoryFetched { request_id, result } => Msg::HistoryLoaded {
            request_id,
            outcome: match result {
                Ok(records) => HistoryOutcome::Loaded(records.into_iter().map(map_job).collect()),
                Err(err) => {
                    console_warn!("History request {} failed: {}", request_id, err);
                    HistoryOutcome::Unavailable
                }
            },
        },
        EngineEvent::GenerationCompleted {
            submission_id,
            result,
        } => Msg::GenerationFinished {
            submission_id,
            outcome: match result {
                Ok(()) => GenerationOutcome::Accepted,
                Err(ServiceError::HttpStatus { message, .. }) => {
                    GenerationOutcome::Rejected { message }
                }
                Err(err) => GenerationOutcome::Failed {
                    reason: err.to_string(),
                },
            },
        },
        EngineEvent::TimerFired { token } => Msg::SuccessBannerExpired { token },
    }
}

fn map_job(record: HistoryJobRecord) -> HistoryJob {
    HistoryJob {
        id: record.id,
        created_at: record.created_at,
        source_url: record.source_url,
        stance: map_stance(record.stance),
        content_pairs: record
            .content_pairs
            .into_iter()
            .map(|pair| ContentPair {
                branch: pair.branch,
                facebook_post: pair.facebook_post,
                tweet: pair.tweet,
            })
            .collect(),
    }
}

fn map_stance(code: StanceCode) -> Stance {
    match code {
        StanceCode::Pro => Stance::Pro,
        StanceCode::Anti => Stance::Anti,
    }
}

fn stance_code(stance: Stance) -> StanceCode {
    match stance {
        Stance::Pro => StanceCode::Pro,
        Stance::Anti => StanceCode::Anti,
    }
}
