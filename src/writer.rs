//! Snapshot writer
//!
//! A single background task owns every write for a storage key. Snapshots are
//! handled strictly in the order they were enqueued; when several are waiting,
//! only the newest is written.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace};

use crate::storage::CartStorage;

#[derive(Debug)]
enum Command {
    Write(String),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

/// Handle to the background task persisting snapshots.
#[derive(Debug)]
pub struct SnapshotWriter {
    sender: mpsc::UnboundedSender<Command>,
    failed_writes: Arc<AtomicU64>,
}

impl SnapshotWriter {
    /// Spawn the writer task for `key` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let failed_writes = Arc::new(AtomicU64::new(0));

        tokio::spawn(run(storage, key.into(), receiver, Arc::clone(&failed_writes)));

        Self {
            sender,
            failed_writes,
        }
    }

    /// Queue a snapshot for writing. Never blocks and never reports failure.
    pub fn enqueue(&self, snapshot: String) {
        if self.sender.send(Command::Write(snapshot)).is_err() {
            trace!("snapshot writer stopped; dropping snapshot");
        }
    }

    /// Wait until every snapshot enqueued before this call has been handled.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();

        if self.sender.send(Command::Flush(done)).is_ok() {
            _ = wait.await;
        }
    }

    /// Flush outstanding snapshots and stop the task.
    pub async fn shutdown(&self) {
        let (done, wait) = oneshot::channel();

        if self.sender.send(Command::Shutdown(done)).is_ok() {
            _ = wait.await;
        }
    }

    /// Number of writes that failed since the writer started.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

async fn run(
    storage: Arc<dyn CartStorage>,
    key: String,
    mut receiver: mpsc::UnboundedReceiver<Command>,
    failed_writes: Arc<AtomicU64>,
) {
    while let Some(first) = receiver.recv().await {
        let mut latest = None;
        let mut waiters = Vec::new();
        let mut stop = None;

        let mut next = Some(first);

        while let Some(command) = next {
            match command {
                Command::Write(snapshot) => {
                    if latest.replace(snapshot).is_some() {
                        trace!(key = %key, "superseded queued snapshot");
                    }
                }
                Command::Flush(done) => waiters.push(done),
                Command::Shutdown(done) => {
                    stop = Some(done);

                    break;
                }
            }

            next = receiver.try_recv().ok();
        }

        if let Some(snapshot) = latest {
            let bytes = snapshot.len();

            match storage.write(&key, snapshot).await {
                Ok(()) => debug!(key = %key, bytes, "persisted cart snapshot"),
                Err(write_error) => {
                    failed_writes.fetch_add(1, Ordering::Relaxed);

                    error!(key = %key, error = %write_error, "failed to persist cart snapshot");
                }
            }
        }

        for done in waiters {
            _ = done.send(());
        }

        if let Some(done) = stop {
            receiver.close();
            _ = done.send(());

            debug!(key = %key, "snapshot writer stopped");

            return;
        }
    }
}
