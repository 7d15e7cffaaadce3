use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use console_logging::{console_info, console_warn};
use dashboard_core::{update, AppState, Effect, Msg};

use super::config::ConsoleConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::{parse_command, resolve_toggle_target, ConsoleCommand};

/// Everything the main loop reacts to, funnelled through one channel so state
/// changes happen on a single thread in arrival order.
#[derive(Debug)]
pub(crate) enum LoopEvent {
    Dispatch(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(config: ConsoleConfig) -> anyhow::Result<()> {
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();

    let runner = match config.service_settings() {
        Some(settings) => Some(EffectRunner::start(settings, loop_tx.clone())?),
        None => {
            console_warn!("No service address configured; network actions are disabled");
            None
        }
    };

    spawn_stdin_reader(loop_tx.clone())?;
    if let Some(interval) = config.auto_refresh {
        spawn_auto_refresh(interval, loop_tx.clone())?;
    }
    drop(loop_tx);

    let mut console = Console {
        state: AppState::new(config.service_url.clone()),
        runner,
        out: io::stdout(),
    };
    console.dispatch(Msg::Started)?;
    console.render()?;

    for event in loop_rx {
        let keep_running = match event {
            LoopEvent::Dispatch(msg) => {
                console.dispatch(msg)?;
                true
            }
            LoopEvent::Line(line) => console.handle_line(&line)?,
            LoopEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    console_info!("Console closed");
    Ok(())
}

struct Console {
    state: AppState,
    runner: Option<EffectRunner>,
    out: io::Stdout,
}

impl Console {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);

        if self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        match &self.runner {
            Some(runner) => runner.enqueue(effects),
            None => console_warn!("Dropping {} effects: no service configured", effects.len()),
        }
    }

    /// Returns `false` when the operator asked to quit.
    fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                self.print(&format!("{err}\n"))?;
                return Ok(true);
            }
        };

        match command {
            ConsoleCommand::SetUrl(url) => self.dispatch(Msg::UrlChanged(url))?,
            ConsoleCommand::SetStance(stance) => self.dispatch(Msg::StanceChanged(stance))?,
            ConsoleCommand::Submit => self.dispatch(Msg::SubmitClicked)?,
            ConsoleCommand::Refresh => self.dispatch(Msg::RefreshRequested)?,
            ConsoleCommand::Toggle(arg) => {
                let row_ids: Vec<String> =
                    self.state.history().iter().map(|job| job.id.clone()).collect();
                let job_id = resolve_toggle_target(&arg, &row_ids);
                self.dispatch(Msg::ToggleExpansion(job_id))?;
            }
            ConsoleCommand::Show => self.render()?,
            ConsoleCommand::Help => self.print(&format!("{}\n", ui::constants::HELP))?,
            ConsoleCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self) -> io::Result<()> {
        let text = ui::render::render(&self.state.view());
        self.print(&text)?;
        self.print("> ")
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("dashboard-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let event = match line {
                    Ok(line) => LoopEvent::Line(line),
                    Err(err) => {
                        console_warn!("Failed to read stdin: {}", err);
                        break;
                    }
                };
                if loop_tx.send(event).is_err() {
                    return;
                }
            }
            let _ = loop_tx.send(LoopEvent::InputClosed);
        })
        .context("spawning stdin reader")?;
    Ok(())
}

fn spawn_auto_refresh(interval: Duration, loop_tx: mpsc::Sender<LoopEvent>) -> anyhow::Result<()> {
    console_info!("Auto-refreshing history every {:?}", interval);
    thread::Builder::new()
        .name("dashboard-auto-refresh".to_string())
        .spawn(move || loop {
            thread::sleep(interval);
            if loop_tx
                .send(LoopEvent::Dispatch(Msg::RefreshRequested))
                .is_err()
            {
                break;
            }
        })
        .context("spawning auto-refresh timer")?;
    Ok(())
}
