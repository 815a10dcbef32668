//! JSON-lines session event log.
//!
//! One JSON object per line, tagged by `"type"`. Writes are best effort: the
//! first write error closes the log and the game keeps running. The error is
//! kept for the caller to report once the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameState, LockEvent};

/// One line of the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStart { episode: u32, seed: u64 },
    Lock {
        episode: u32,
        #[serde(flatten)]
        event: LockEvent,
        score: u32,
        lines: u32,
    },
    GameOver { episode: u32, score: u32, lines: u32, level: u32 },
    Restart { episode: u32, seed: u64 },
    SessionEnd { episode: u32, score: u32, lines: u32, level: u32 },
}

impl SessionEvent {
    pub fn session_start(state: &GameState) -> Self {
        Self::SessionStart {
            episode: state.episode(),
            seed: state.seed(),
        }
    }

    pub fn lock(state: &GameState, event: LockEvent) -> Self {
        Self::Lock {
            episode: state.episode(),
            event,
            score: state.score(),
            lines: state.lines(),
        }
    }

    pub fn game_over(state: &GameState) -> Self {
        Self::GameOver {
            episode: state.episode(),
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
        }
    }

    pub fn restart(state: &GameState) -> Self {
        Self::Restart {
            episode: state.episode(),
            seed: state.seed(),
        }
    }

    pub fn session_end(state: &GameState) -> Self {
        Self::SessionEnd {
            episode: state.episode(),
            score: state.score(),
            lines: state.lines(),
            level: state.level(),
        }
    }
}

/// Event log backed by a file
pub type FileEventLog = EventLog<BufWriter<File>>;

/// Append-only JSON-lines writer. A disabled log drops every record.
#[derive(Debug)]
pub struct EventLog<W: Write> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl<W: Write> EventLog<W> {
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            error: None,
        }
    }

    pub fn from_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Append one record. Returns whether a line was written.
    ///
    /// A record that fails to serialize is skipped; a failed write closes the
    /// log and keeps the error for [`take_error`](Self::take_error).
    pub fn record<E: Serialize>(&mut self, event: &E) -> bool {
        let Some(out) = self.out.as_mut() else {
            return false;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, event).is_err() {
            return false;
        }
        self.buf.push(b'\n');

        if let Err(e) = out.write_all(&self.buf) {
            self.error = Some(e);
            self.out = None;
            return false;
        }
        true
    }

    /// The write error that closed the log, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = out.flush();
        }
    }

    /// Take the underlying writer back (flushes first).
    pub fn into_inner(mut self) -> Option<W> {
        self.flush();
        self.out.take()
    }
}

impl FileEventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Open `path` if given; on failure report once and run without a log.
    pub fn open_or_disabled(path: Option<&str>) -> Self {
        match path {
            Some(path) => match Self::open(path) {
                Ok(log) => {
                    println!("[Tetris] logging events to {path}");
                    log
                }
                Err(e) => {
                    eprintln!("[Tetris] {e:#}; continuing without event log");
                    Self::disabled()
                }
            },
            None => Self::disabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameAction;

    fn lines(log: EventLog<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = log.into_inner().unwrap_or_default();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn records_are_tagged_json_lines() {
        let state = GameState::new(99);
        let mut log = EventLog::from_writer(Vec::new());
        assert!(log.record(&SessionEvent::session_start(&state)));
        assert!(log.record(&SessionEvent::session_end(&state)));

        let records = lines(log);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "session_start");
        assert_eq!(records[0]["seed"], 99);
        assert_eq!(records[1]["type"], "session_end");
        assert_eq!(records[1]["score"], 0);
    }

    #[test]
    fn lock_record_flattens_event() {
        let state = GameState::new(3).apply(GameAction::HardDrop);
        let event = state.last_event().unwrap();
        let mut log = EventLog::from_writer(Vec::new());
        log.record(&SessionEvent::lock(&state, event));

        let records = lines(log);
        assert_eq!(records[0]["type"], "lock");
        assert_eq!(records[0]["lines_cleared"], 0);
        assert_eq!(records[0]["score_gained"], 0);
        assert_eq!(records[0]["game_over"], false);
    }

    #[test]
    fn disabled_log_drops_records() {
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        assert!(!log.is_enabled());
        assert!(!log.record(&SessionEvent::session_start(&GameState::new(1))));
        assert!(log.into_inner().is_none());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_closes_log_and_is_kept() {
        let mut log = EventLog::from_writer(FailingWriter);
        assert!(!log.record(&SessionEvent::session_start(&GameState::new(1))));
        assert!(!log.is_enabled());

        let err = log.take_error().unwrap();
        assert_eq!(err.to_string(), "disk full");
        assert!(log.take_error().is_none());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no json form"))
        }
    }

    #[test]
    fn serialize_error_skips_record() {
        let mut log = EventLog::from_writer(Vec::new());
        assert!(!log.record(&Unserializable));
        assert!(log.is_enabled());
        assert!(log.take_error().is_none());

        assert!(log.record(&SessionEvent::session_start(&GameState::new(4))));
        let records = lines(log);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "session_start");
    }

    #[test]
    fn open_appends_to_file() {
        let name = format!("classic-tetris-log-{}.jsonl", std::process::id());
        let path = std::env::temp_dir().join(name);
        let _ = std::fs::remove_file(&path);

        let state = GameState::new(5);
        for _ in 0..2 {
            let mut log = FileEventLog::open(&path).unwrap();
            log.record(&SessionEvent::session_start(&state));
            log.flush();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
