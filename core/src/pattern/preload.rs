use super::{BuildMethod, DisjointPatternDatabase, PatternConfig};
use crate::error::{PuzzleError, Result};
use crate::puzzle::Board;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// A disjoint pattern database building on a background thread.
///
/// The result is delivered once; after it has been taken, further calls to
/// [`PatternPreload::try_take`] or [`PatternPreload::wait`] return `None`.
/// [`PatternPreload::cancel`] makes the build stop at its next BFS level and
/// deliver a `BuildFailed` error instead of a database.
pub struct PatternPreload {
    receiver: Receiver<Result<DisjointPatternDatabase>>,
    cancel: Arc<AtomicBool>,
}

impl PatternPreload {
    pub fn spawn(
        goal: Board,
        partitions: Vec<Vec<u8>>,
        method: BuildMethod,
        config: PatternConfig,
    ) -> Result<Self> {
        let cancel = Arc::new(AtomicBool::new(false));
        let config = config.with_cancel_flag(Arc::clone(&cancel));
        let (sender, receiver) = crossbeam_channel::bounded(1);

        thread::Builder::new()
            .name("pdb-preload".into())
            .spawn(move || {
                let result = DisjointPatternDatabase::build(&goal, &partitions, method, &config)
                    .and_then(|database| {
                        if config.is_cancelled() {
                            Err(PuzzleError::BuildFailed("cancelled".into()))
                        } else {
                            Ok(database)
                        }
                    });
                match &result {
                    Ok(database) => info!(exact = database.is_exact(), "pattern preload finished"),
                    Err(error) => debug!(%error, "pattern preload ended without a database"),
                }
                // the handle may already be gone
                let _ = sender.send(result);
            })?;

        Ok(Self { receiver, cancel })
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Non-blocking poll.
    pub fn try_take(&self) -> Option<Result<DisjointPatternDatabase>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks up to `timeout` for the result.
    pub fn wait(&self, timeout: Duration) -> Option<Result<DisjointPatternDatabase>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
