use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use console_logging::{console_debug, console_info};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::{
    EngineEvent, GenerateRequestBody, GenerationService, RequestId, SubmissionId, TimerToken,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    LoadHistory {
        request_id: RequestId,
    },
    Submit {
        submission_id: SubmissionId,
        body: GenerateRequestBody,
    },
    /// Emit `EngineEvent::TimerFired { token }` after `delay`.
    StartTimer { token: TimerToken, delay: Duration },
    /// A cancelled timer never fires. Unknown tokens are ignored.
    CancelTimer { token: TimerToken },
}

type TimerRegistry = Arc<Mutex<HashMap<TimerToken, CancellationToken>>>;

/// Sends commands to the engine thread. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receives the results of commands. Every `LoadHistory` and `Submit` yields
/// exactly one event.
#[derive(Debug)]
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the engine thread and its tokio runtime.
    ///
    /// The thread exits once every `EngineHandle` clone has been dropped.
    pub fn start(
        service: Arc<dyn GenerationService>,
    ) -> io::Result<(EngineHandle, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("dashboard-engine")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("dashboard-engine-commands".to_string())
            .spawn(move || {
                let worker = Worker {
                    runtime,
                    service,
                    event_tx,
                    timers: TimerRegistry::default(),
                };
                while let Ok(command) = cmd_rx.recv() {
                    worker.dispatch(command);
                }
                console_info!("Engine command channel closed; shutting down");
            })?;

        Ok((EngineHandle { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Queues a command. Returns `false` if the engine has already stopped.
    pub fn send(&self, command: EngineCommand) -> bool {
        self.cmd_tx.send(command).is_ok()
    }
}

impl EngineEvents {
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

struct Worker {
    runtime: Runtime,
    service: Arc<dyn GenerationService>,
    event_tx: mpsc::Sender<EngineEvent>,
    timers: TimerRegistry,
}

impl Worker {
    /// Timer bookkeeping happens here, on the command thread, so a cancel can
    /// never overtake the start it refers to.
    fn dispatch(&self, command: EngineCommand) {
        let event_tx = self.event_tx.clone();
        match command {
            EngineCommand::LoadHistory { request_id } => {
                let service = self.service.clone();
                self.runtime.spawn(async move {
                    let result = service.fetch_history().await;
                    let _ = event_tx.send(EngineEvent::HistoryFetched { request_id, result });
                });
            }
            EngineCommand::Submit {
                submission_id,
                body,
            } => {
                let service = self.service.clone();
                self.runtime.spawn(async move {
                    let result = service.submit_generation(&body).await;
                    let _ = event_tx.send(EngineEvent::GenerationCompleted {
                        submission_id,
                        result,
                    });
                });
            }
            EngineCommand::StartTimer { token, delay } => {
                let cancel = CancellationToken::new();
                if let Ok(mut registry) = self.timers.lock() {
                    if let Some(previous) = registry.insert(token, cancel.clone()) {
                        previous.cancel();
                    }
                }
                let timers = self.timers.clone();
                self.runtime.spawn(run_timer(token, delay, cancel, timers, event_tx));
            }
            EngineCommand::CancelTimer { token } => {
                if let Ok(mut registry) = self.timers.lock() {
                    if let Some(cancel) = registry.remove(&token) {
                        cancel.cancel();
                    }
                }
            }
        }
    }
}

async fn run_timer(
    token: TimerToken,
    delay: Duration,
    cancel: CancellationToken,
    timers: TimerRegistry,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            console_debug!("Timer {} cancelled", token);
        }
        _ = tokio::time::sleep(delay) => {
            if let Ok(mut registry) = timers.lock() {
                registry.remove(&token);
            }
            let _ = event_tx.send(EngineEvent::TimerFired { token });
        }
    }
}
