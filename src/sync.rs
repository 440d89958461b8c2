//! Persistence Sync
//!
//! Keeps the board store eventually consistent with the in-memory board.
//! Committed boards are queued to a single background worker which saves the
//! newest one after the debounce window. Saves always carry the full board,
//! so the last one issued is what ends up stored. Failed saves are logged and
//! dropped; the next commit carries the same changes.

use std::sync::Arc;
use std::time::Duration;

use board_store::{Board, BoardStore, UserId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum SyncCommand {
    Save(Board),
    Flush(oneshot::Sender<()>),
}

/// Handle to the save worker of one user's board
#[derive(Clone)]
pub struct PersistenceSync {
    user_id: UserId,
    tx: mpsc::UnboundedSender<SyncCommand>,
}

impl PersistenceSync {
    /// Spawn the save worker. Must be called inside a tokio runtime.
    pub fn spawn(user_id: UserId, store: Arc<dyn BoardStore>, debounce: Duration) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(user_id, store, debounce, rx));
        (Self { user_id, tx }, worker)
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Queue a save of `board`. Never blocks.
    pub fn schedule(&self, board: Board) {
        if self.tx.send(SyncCommand::Save(board)).is_err() {
            tracing::warn!(user_id = self.user_id, "save worker stopped, board change not persisted");
        }
    }

    /// Wait until every save scheduled before this call has been attempted
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(SyncCommand::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }
}

async fn run_worker(
    user_id: UserId,
    store: Arc<dyn BoardStore>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<SyncCommand>,
) {
    while let Some(command) = rx.recv().await {
        let mut pending = match command {
            SyncCommand::Save(board) => board,
            SyncCommand::Flush(ack) => {
                let _ = ack.send(());
                continue;
            }
        };

        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }

        // Coalesce everything queued meanwhile down to the newest board
        let mut acks = Vec::new();
        let mut coalesced = 0usize;
        while let Ok(command) = rx.try_recv() {
            match command {
                SyncCommand::Save(board) => {
                    pending = board;
                    coalesced += 1;
                }
                SyncCommand::Flush(ack) => acks.push(ack),
            }
        }

        match store.save(user_id, &pending).await {
            Ok(()) => tracing::debug!(user_id, coalesced, "board saved"),
            Err(e) => tracing::warn!(user_id, error = %e, "board save failed, will retry on next change"),
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }
    tracing::debug!(user_id, "save worker finished");
}
