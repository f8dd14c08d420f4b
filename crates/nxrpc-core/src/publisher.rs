//! Pushes activity records to the presence transport.
//!
//! A single worker task owns the transport and applies commands in the
//! order they were queued, so publishes never overtake each other. A
//! separate refresh task, held in a [`TaskSlot`], periodically asks the
//! worker to re-send the last record.

use std::sync::Arc;
use std::time::Duration;

use nxrpc_common::ActivityRecord;
use nxrpc_discord::{ActivityPayload, PresenceTransport, TransportError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::normalizer::ActivityNormalizer;
use crate::slot::TaskSlot;

#[derive(Debug)]
pub(crate) enum PublishCommand {
    /// A new current record; artwork is resolved before sending.
    Publish(ActivityRecord),
    /// Re-send the last record as-is.
    Refresh,
    /// Stop the worker and hand back the transport.
    Shutdown,
}

/// Cheap, cloneable sender side of the publisher.
#[derive(Debug, Clone)]
pub struct PublishHandle {
    tx: mpsc::UnboundedSender<PublishCommand>,
}

impl PublishHandle {
    /// Queue a record for publication. Never blocks.
    pub fn publish(&self, record: ActivityRecord) {
        if self.tx.send(PublishCommand::Publish(record)).is_err() {
            warn!("Presence publisher is gone, dropping activity update");
        }
    }

    fn refresh(&self) -> bool {
        self.tx.send(PublishCommand::Refresh).is_ok()
    }

    /// A handle whose commands land in the returned receiver.
    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<PublishCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Owner of the publish worker and the periodic refresh.
pub struct PresencePublisher {
    handle: PublishHandle,
    worker: Option<JoinHandle<Box<dyn PresenceTransport>>>,
    refresh: TaskSlot,
}

impl PresencePublisher {
    /// Start the worker on an already logged-in transport.
    pub fn spawn(
        transport: Box<dyn PresenceTransport>,
        normalizer: Arc<ActivityNormalizer>,
        status_text: String,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(publish_worker(transport, normalizer, status_text, rx));
        Self {
            handle: PublishHandle { tx },
            worker: Some(worker),
            refresh: TaskSlot::new(),
        }
    }

    pub fn handle(&self) -> PublishHandle {
        self.handle.clone()
    }

    /// Re-send the current record every `every`, replacing any previous refresh.
    pub fn start_refresh(&mut self, every: Duration) {
        let handle = self.handle.clone();
        self.refresh.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !handle.refresh() {
                    break;
                }
            }
        });
    }

    pub fn stop_refresh(&mut self) {
        self.refresh.cancel();
    }

    /// Drain queued commands, stop the worker, and close the remote session.
    ///
    /// The worker gets `grace` to finish; past that it is aborted and the
    /// transport is dropped without a closing frame.
    pub async fn close(mut self, grace: Duration) -> Result<(), TransportError> {
        self.stop_refresh();
        let Some(mut worker) = self.worker.take() else {
            return Ok(());
        };
        let _ = self.handle.tx.send(PublishCommand::Shutdown);

        match tokio::time::timeout(grace, &mut worker).await {
            Ok(Ok(mut transport)) => transport.destroy().await,
            Ok(Err(e)) => {
                warn!(error = %e, "Presence worker ended abnormally");
                Ok(())
            }
            Err(_) => {
                worker.abort();
                warn!(grace_secs = grace.as_secs(), "Presence worker did not stop in time");
                Err(TransportError::Timeout(grace))
            }
        }
    }
}

async fn publish_worker(
    mut transport: Box<dyn PresenceTransport>,
    normalizer: Arc<ActivityNormalizer>,
    status_text: String,
    mut rx: mpsc::UnboundedReceiver<PublishCommand>,
) -> Box<dyn PresenceTransport> {
    let mut current: Option<ActivityRecord> = None;

    while let Some(command) = rx.recv().await {
        match command {
            PublishCommand::Publish(mut record) => {
                if !record.is_home_menu() && record.artwork.is_none() {
                    record.artwork = Some(normalizer.resolve_artwork(&record).await);
                }
                apply(transport.as_mut(), &record, &status_text).await;
                current = Some(record);
            }
            PublishCommand::Refresh => match &current {
                Some(record) => apply(transport.as_mut(), record, &status_text).await,
                None => debug!("Nothing to refresh"),
            },
            PublishCommand::Shutdown => break,
        }
    }

    transport
}

async fn apply(transport: &mut dyn PresenceTransport, record: &ActivityRecord, status_text: &str) {
    if record.is_home_menu() {
        if let Err(e) = transport.clear_activity().await {
            warn!(error = %e, "Failed to clear presence");
        }
        return;
    }

    let payload = ActivityPayload::new(
        record.kind,
        record.display_name.as_str(),
        status_text,
        record.started_at_millis(),
        record.artwork.clone().unwrap_or_default(),
    );
    match transport.set_activity(&payload).await {
        Ok(()) => debug!(name = %record.display_name, kind = %record.kind, "Presence updated"),
        Err(e) => warn!(name = %record.display_name, error = %e, "Failed to update presence"),
    }
}
