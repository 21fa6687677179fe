//! Session tracker: an advisory side channel mirroring match activity to an
//! external service. Failures are logged by the engine and never change a
//! simulation outcome.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use bastion_core::types::UnitId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("tracker unavailable: {0}")]
    Unavailable(String),
    #[error("tracker rejected notification: {0}")]
    Rejected(String),
}

pub trait SessionTracker: Send {
    fn notify_session_start(&mut self, session_id: u64) -> Result<(), TrackerError>;
    /// A unit of the given template level entered play.
    fn notify_spawn(&mut self, level: u32) -> Result<(), TrackerError>;
    fn notify_attack(&mut self, unit: UnitId) -> Result<(), TrackerError>;
    fn notify_session_end(&mut self) -> Result<(), TrackerError>;
}

/// No tracker configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTracker;

impl SessionTracker for NullTracker {
    fn notify_session_start(&mut self, _session_id: u64) -> Result<(), TrackerError> {
        Ok(())
    }

    fn notify_spawn(&mut self, _level: u32) -> Result<(), TrackerError> {
        Ok(())
    }

    fn notify_attack(&mut self, _unit: UnitId) -> Result<(), TrackerError> {
        Ok(())
    }

    fn notify_session_end(&mut self) -> Result<(), TrackerError> {
        Ok(())
    }
}

/// Writes every notification to the log at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTracker;

impl SessionTracker for LoggingTracker {
    fn notify_session_start(&mut self, session_id: u64) -> Result<(), TrackerError> {
        tracing::debug!(session_id, "tracker: session start");
        Ok(())
    }

    fn notify_spawn(&mut self, level: u32) -> Result<(), TrackerError> {
        tracing::debug!(level, "tracker: spawn");
        Ok(())
    }

    fn notify_attack(&mut self, unit: UnitId) -> Result<(), TrackerError> {
        tracing::debug!(%unit, "tracker: attack");
        Ok(())
    }

    fn notify_session_end(&mut self) -> Result<(), TrackerError> {
        tracing::debug!("tracker: session end");
        Ok(())
    }
}

/// A notification as seen by a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerNotification {
    SessionStart(u64),
    Spawn(u32),
    Attack(UnitId),
    SessionEnd,
}

/// Records notifications into a shared log. With `failing()` it records and
/// then reports every call as rejected.
#[derive(Debug, Default, Clone)]
pub struct RecordingTracker {
    log: Arc<Mutex<Vec<TrackerNotification>>>,
    fail: bool,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Copy of everything recorded so far.
    pub fn notifications(&self) -> Vec<TrackerNotification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn record(&mut self, notification: TrackerNotification) -> Result<(), TrackerError> {
        if let Ok(mut log) = self.log.lock() {
            log.push(notification);
        }
        if self.fail {
            Err(TrackerError::Unavailable("recording tracker set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl SessionTracker for RecordingTracker {
    fn notify_session_start(&mut self, session_id: u64) -> Result<(), TrackerError> {
        self.record(TrackerNotification::SessionStart(session_id))
    }

    fn notify_spawn(&mut self, level: u32) -> Result<(), TrackerError> {
        self.record(TrackerNotification::Spawn(level))
    }

    fn notify_attack(&mut self, unit: UnitId) -> Result<(), TrackerError> {
        self.record(TrackerNotification::Attack(unit))
    }

    fn notify_session_end(&mut self) -> Result<(), TrackerError> {
        self.record(TrackerNotification::SessionEnd)
    }
}

/// Log a failed notification and carry on.
pub(crate) fn mirror(what: &'static str, result: Result<(), TrackerError>) {
    if let Err(error) = result {
        tracing::warn!(%error, notification = what, "session tracker failed, ignoring");
    }
}
