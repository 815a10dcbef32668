//! Session: the shell around the pure engine.
//!
//! A [`Session`] owns the single current [`GameState`] (replaced wholesale on
//! every accepted action), the [`GravityTimer`] that drives automatic drops,
//! and the event log. The terminal loop feeds it key actions and the current
//! time; it never touches the engine directly.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::core::{drop_interval_ms, GameState};
use crate::event_log::{EventLog, SessionEvent};
use crate::types::GameAction;

/// Periodic gravity deadline.
///
/// Armed with the interval for a level; [`poll`](Self::poll) fires once per
/// elapsed interval. Re-arming replaces the previous schedule, so at most one
/// schedule is ever live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityTimer {
    /// A disarmed timer
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(drop_interval_ms(0) as u64),
            deadline: None,
        }
    }

    /// (Re)start the schedule for `level`, first firing one interval after `now`.
    pub fn arm(&mut self, now: Instant, level: u32) {
        self.interval = Duration::from_millis(drop_interval_ms(level) as u64);
        self.deadline = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next firing, or `None` when disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whether the deadline has passed. Firing schedules the next deadline;
    /// a caller that fell several intervals behind gets one firing, not a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.interval;
                self.deadline = Some(if next > now { next } else { now + self.interval });
                true
            }
            _ => false,
        }
    }
}

/// What a finished session hands back to the caller.
#[derive(Debug)]
pub struct SessionEnd {
    pub state: GameState,
    /// Write error that stopped the event log, to report after the terminal
    /// is restored
    pub log_error: Option<io::Error>,
}

/// The interactive game: state cell, gravity timer, and event log.
#[derive(Debug)]
pub struct Session<W: Write> {
    state: GameState,
    timer: GravityTimer,
    /// Level the timer was last armed for
    armed_level: u32,
    log: EventLog<W>,
    restart_anytime: bool,
}

impl<W: Write> Session<W> {
    /// Start a session on `state` and arm gravity at `now`.
    pub fn new(state: GameState, log: EventLog<W>, now: Instant) -> Self {
        let mut session = Self {
            armed_level: state.level(),
            state,
            timer: GravityTimer::new(),
            log,
            restart_anytime: false,
        };
        session.log.record(&SessionEvent::session_start(&session.state));
        if !session.state.game_over() {
            session.timer.arm(now, session.armed_level);
        }
        session
    }

    /// Forward restart requests during play, not only after game over.
    pub fn with_restart_anytime(mut self, enabled: bool) -> Self {
        self.restart_anytime = enabled;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    /// How long the caller may wait for input before the next gravity step.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Apply a player action. Returns whether the state changed.
    pub fn handle(&mut self, action: GameAction, now: Instant) -> bool {
        if action == GameAction::Restart && !self.restart_anytime && !self.state.game_over() {
            return false;
        }
        match self.state.step(action) {
            Some(next) => {
                self.commit(next, action == GameAction::Restart, now);
                true
            }
            None => false,
        }
    }

    /// Run gravity if the timer fired. Returns whether the state changed.
    ///
    /// While paused the timer keeps its schedule but the drop is refused by
    /// the engine.
    pub fn on_timer(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        match self.state.step(GameAction::SoftDrop) {
            Some(next) => {
                self.commit(next, false, now);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, next: GameState, restarted: bool, now: Instant) {
        self.state = next;

        if restarted {
            self.timer.disarm();
            self.log.record(&SessionEvent::restart(&self.state));
        }
        if let Some(event) = self.state.last_event() {
            self.log.record(&SessionEvent::lock(&self.state, event));
            if event.game_over {
                self.log.record(&SessionEvent::game_over(&self.state));
            }
        }

        if self.state.game_over() {
            self.timer.disarm();
        } else if restarted || self.state.level() != self.armed_level {
            self.armed_level = self.state.level();
            self.timer.arm(now, self.armed_level);
        }
    }

    /// Stop gravity, write the closing record, and return the final state.
    pub fn shutdown(mut self) -> SessionEnd {
        self.finish();
        SessionEnd {
            log_error: self.log.take_error(),
            state: self.state,
        }
    }

    fn finish(&mut self) {
        self.timer.disarm();
        self.log.record(&SessionEvent::session_end(&self.state));
        self.log.flush();
    }
}
