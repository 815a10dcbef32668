//! Terminal Tetris runner.
//!
//! Reads configuration from the environment, then runs a single-threaded loop:
//! render, wait for a key until the next gravity deadline, apply what arrived,
//! and run gravity if it is due.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use classic_tetris::core::GameState;
use classic_tetris::event_log::FileEventLog;
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::{GameConfig, Session};

/// Upper bound on how long one input wait may block.
const MAX_IDLE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let seed = config.seed_or_random();
    let log = FileEventLog::open_or_disabled(config.log_path.as_deref());

    let mut session = Session::new(GameState::new(seed), log, Instant::now())
        .with_restart_anytime(config.restart_anytime);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let end = session.shutdown();
    if let Some(e) = end.log_error {
        eprintln!("[Tetris] event log write failed, logging stopped: {e}");
    }
    println!(
        "[Tetris] seed {seed}: score {} lines {} level {}",
        end.state.score(),
        end.state.lines(),
        end.state.level()
    );
    result
}

fn run<W: Write>(
    term: &mut TerminalRenderer,
    session: &mut Session<W>,
    config: &GameConfig,
) -> Result<()> {
    let view = GameView::new(config.cell_width, 1);
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&session.state().snapshot(), Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        let timeout = session
            .next_wakeup(Instant::now())
            .map_or(MAX_IDLE, |d| d.min(MAX_IDLE));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, session.state().game_over()) {
                        dirty |= session.handle(action, Instant::now());
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        dirty |= session.on_timer(Instant::now());
    }
}
