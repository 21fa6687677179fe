//! Fire-and-forget session tracker backed by a background thread.
//!
//! The engine's notifications are pushed onto an mpsc channel and never
//! wait on the consumer. A closed channel surfaces as `Unavailable`, which
//! the engine logs and ignores.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;

use bastion_core::types::UnitId;
use bastion_sim::tracker::{SessionTracker, TrackerError, TrackerNotification};

pub struct ChannelTracker {
    tx: mpsc::Sender<TrackerNotification>,
}

impl ChannelTracker {
    pub fn new(tx: mpsc::Sender<TrackerNotification>) -> Self {
        Self { tx }
    }

    fn send(&self, notification: TrackerNotification) -> Result<(), TrackerError> {
        self.tx
            .send(notification)
            .map_err(|_| TrackerError::Unavailable("tracker thread has stopped".into()))
    }
}

impl SessionTracker for ChannelTracker {
    fn notify_session_start(&mut self, session_id: u64) -> Result<(), TrackerError> {
        self.send(TrackerNotification::SessionStart(session_id))
    }

    fn notify_spawn(&mut self, level: u32) -> Result<(), TrackerError> {
        self.send(TrackerNotification::Spawn(level))
    }

    fn notify_attack(&mut self, unit: UnitId) -> Result<(), TrackerError> {
        self.send(TrackerNotification::Attack(unit))
    }

    fn notify_session_end(&mut self) -> Result<(), TrackerError> {
        self.send(TrackerNotification::SessionEnd)
    }
}

/// Counts of what the consumer thread saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerTally {
    pub sessions: u32,
    pub spawns: u32,
    pub attacks: u32,
    pub session_ends: u32,
}

/// Start the consumer thread. It runs until every sender is dropped and
/// returns what it saw.
pub fn spawn_tracker_thread() -> io::Result<(ChannelTracker, JoinHandle<TrackerTally>)> {
    let (tx, rx) = mpsc::channel::<TrackerNotification>();

    let handle = std::thread::Builder::new()
        .name("bastion-tracker".into())
        .spawn(move || {
            let mut tally = TrackerTally::default();
            for notification in rx {
                match notification {
                    TrackerNotification::SessionStart(session_id) => {
                        tally.sessions += 1;
                        tracing::info!(session_id, "session started");
                    }
                    TrackerNotification::Spawn(level) => {
                        tally.spawns += 1;
                        tracing::debug!(level, "spawn mirrored");
                    }
                    TrackerNotification::Attack(unit) => {
                        tally.attacks += 1;
                        tracing::trace!(%unit, "attack mirrored");
                    }
                    TrackerNotification::SessionEnd => {
                        tally.session_ends += 1;
                        tracing::info!("session ended");
                    }
                }
            }
            tally
        })?;

    Ok((ChannelTracker::new(tx), handle))
}
