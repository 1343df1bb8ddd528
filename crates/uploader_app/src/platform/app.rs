use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use upload_logging::{upload_debug, upload_info, upload_warn};
use uploader_core::{update, AppState, LocalFile, Msg, Notice, SessionPhase};
use uploader_engine::{EngineHandle, TransportSettings};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::input::local_file;
use super::logging;
use super::ui::constants::TICK_INTERVAL;
use super::ui::render::render;
use super::ui::terminal::Terminal;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);
    upload_info!(
        "Starting uploader server={} files={} level={}",
        cli.server,
        cli.files.len(),
        logging::level_filter(cli.verbose)
    );

    let engine = EngineHandle::new(TransportSettings::with_base_url(cli.server.clone()))
        .context("starting upload engine")?;
    let mut event_loop = EventLoop::new(EffectRunner::new(engine), Terminal::stdio());

    event_loop.dispatch(Msg::Started)?;
    for path in &cli.files {
        let file = match local_file(path) {
            Ok(file) => file,
            Err(err) => {
                upload_warn!("Skipping {}: {}", path.display(), err);
                event_loop.show_notice(&Notice::validation(format!(
                    "{}: {err}",
                    path.display()
                )))?;
                continue;
            }
        };
        event_loop.submit(file, &cli.user_id)?;
    }

    // Single-threaded loop: one message at a time, in arrival order.
    while !event_loop.state.view().is_settled() {
        let msg = event_loop
            .runner
            .next_msg(TICK_INTERVAL)
            .unwrap_or(Msg::Tick);
        event_loop.dispatch(msg)?;
    }

    let failed = event_loop
        .state
        .view()
        .sessions
        .iter()
        .filter(|session| session.phase == SessionPhase::Failed)
        .count();
    if failed > 0 {
        bail!("{failed} upload(s) failed");
    }
    Ok(())
}

struct EventLoop<W: std::io::Write, E: std::io::Write> {
    state: AppState,
    runner: EffectRunner,
    terminal: Terminal<W, E>,
}

impl<W: std::io::Write, E: std::io::Write> EventLoop<W, E> {
    fn new(runner: EffectRunner, terminal: Terminal<W, E>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            terminal,
        }
    }

    fn submit(&mut self, file: LocalFile, user_id: &str) -> anyhow::Result<()> {
        self.dispatch(Msg::FileSubmitted {
            file,
            user_id: user_id.to_string(),
            submitted_at_millis: now_millis(),
        })
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        for notice in state.take_notices() {
            self.show_notice(&notice)?;
        }
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            if !view.unmatched_records.is_empty() {
                upload_debug!(
                    "Listing has records from this user with no local session: {:?}",
                    view.unmatched_records
                );
            }
            self.terminal
                .apply(render(&view))
                .context("writing to terminal")?;
        }
        Ok(())
    }

    fn show_notice(&mut self, notice: &Notice) -> anyhow::Result<()> {
        self.terminal.notice(notice).context("writing notice")
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
