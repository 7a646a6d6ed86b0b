//! Hard time limit around a move computation.
//!
//! The search already polls its deadline, but a harness cannot trust that
//! alone. The supervisor runs the job on tokio's blocking pool and waits for
//! at most `limit`. When the limit passes it raises the job's stop flag and
//! walks away: the task is detached, winds down on its own and whatever it
//! eventually returns is dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reversi_core::{Board, Engine, Move, SearchResult, StopFlag};
use tracing::warn;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    limit: Duration,
}

impl Supervisor {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Runs `job` on the blocking pool, handing it the flag raised on timeout.
    pub async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(StopFlag) -> T + Send + 'static,
        T: Send + 'static,
    {
        let stop = StopFlag::new();
        let task_stop = stop.clone();
        let handle = tokio::task::spawn_blocking(move || job(task_stop));

        match tokio::time::timeout(self.limit, handle).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(EngineError::SearchFailed(err.to_string())),
            Err(_) => {
                stop.stop();
                warn!(limit_ms = self.limit.as_millis() as u64, "move computation timed out");
                Err(EngineError::Timeout(self.limit))
            }
        }
    }

    /// [`Supervisor::run`] for callers outside any async runtime.
    ///
    /// The private runtime is shut down in the background, so a timed-out job
    /// never holds up the caller.
    pub fn run_blocking<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(StopFlag) -> T + Send + 'static,
        T: Send + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let result = runtime.block_on(self.run(job));
        runtime.shutdown_background();
        result
    }

    /// Asks `engine` for a move under the time limit.
    ///
    /// The engine stays locked until its search has actually returned, so a
    /// timed-out search can never overlap the next one.
    pub async fn choose_move<E>(
        &self,
        engine: Arc<Mutex<E>>,
        board: Board,
        legal_moves: Vec<Move>,
    ) -> Result<SearchResult>
    where
        E: Engine + 'static,
    {
        self.run(move |stop| {
            let mut engine = engine.lock().map_err(|_| EngineError::Poisoned)?;
            Ok(engine.choose_move_with_stop(&board, &legal_moves, &stop))
        })
        .await?
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod supervisor_tests;
