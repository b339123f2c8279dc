use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::executor::{BatchOutcome, ExecuteBatch};

/// Fixed pause between batches, on top of the executor's own per-item
/// pacing
const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    /// Operator requested a stop; offset retained for manual resume
    Paused,
    /// The executor invocation itself failed; progress through the last
    /// successful batch is retained
    Errored,
    Completed,
}

/// Client-held run progress. Reset when a run starts, mutated after
/// each batch response, discarded with the runner.
#[derive(Debug, Default)]
pub struct RunState {
    pub offset: usize,
    pub batch_size: usize,
    /// Catalog length, learned from the first batch response
    pub total_queries: usize,
    pub cumulative_inserted: usize,
    pub cumulative_skipped: usize,
    pub log: Vec<String>,
}

impl RunState {
    fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Default::default()
        }
    }
}

/// Sequential run driver over an [`ExecuteBatch`] implementation.
///
/// Batches run strictly one at a time. Pausing is cooperative: the flag
/// is checked between iterations, so an in-flight batch always
/// completes before the loop exits.
pub struct Runner {
    executor: Arc<dyn ExecuteBatch>,
    dataset_variant: String,
    batch_size: usize,
    inter_batch_delay: Duration,
    pause: Arc<AtomicBool>,
    phase: RunPhase,
    state: RunState,
}

impl Runner {
    pub fn new(
        executor: Arc<dyn ExecuteBatch>,
        dataset_variant: impl Into<String>,
        batch_size: usize,
    ) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            executor,
            dataset_variant: dataset_variant.into(),
            batch_size,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
            pause: Arc::new(AtomicBool::new(false)),
            phase: RunPhase::Idle,
            state: RunState::new(batch_size),
        }
    }

    /// Override the inter-batch delay (tests run with `Duration::ZERO`)
    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    /// Shareable pause flag; set it to stop the loop after the in-flight
    /// batch completes
    pub fn pause_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.pause)
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Start a run from offset 0, clearing counters and the log.
    pub async fn start(&mut self) -> RunPhase {
        self.start_from(0).await
    }

    /// Start a fresh run from a manually noted offset. Counters and the
    /// log still reset; this is how an operator resumes after a crash.
    pub async fn start_from(&mut self, offset: usize) -> RunPhase {
        self.state = RunState::new(self.batch_size);
        self.state.offset = offset;
        self.pause.store(false, Ordering::SeqCst);
        self.phase = RunPhase::Running;
        tracing::info!(
            "Starting ingest run for '{}' at offset {}",
            self.dataset_variant,
            offset
        );
        self.drive().await
    }

    /// Continue a paused run from the retained offset.
    pub async fn resume(&mut self) -> RunPhase {
        if self.phase != RunPhase::Paused {
            return self.phase;
        }
        self.pause.store(false, Ordering::SeqCst);
        self.phase = RunPhase::Running;
        tracing::info!(
            "Resuming ingest run for '{}' at offset {}",
            self.dataset_variant,
            self.state.offset
        );
        self.drive().await
    }

    async fn drive(&mut self) -> RunPhase {
        loop {
            if self.pause.load(Ordering::SeqCst) {
                self.phase = RunPhase::Paused;
                self.push_log(format!("Run paused at offset {}", self.state.offset));
                break;
            }

            let outcome = match self
                .executor
                .execute(&self.dataset_variant, self.state.offset, self.batch_size)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.phase = RunPhase::Errored;
                    self.push_log(format!(
                        "Run halted at offset {}: {}",
                        self.state.offset, e
                    ));
                    break;
                }
            };

            self.apply(&outcome);

            if !outcome.has_more() {
                self.phase = RunPhase::Completed;
                self.push_log(format!(
                    "Run completed: {} inserted, {} skipped of {} queries",
                    self.state.cumulative_inserted,
                    self.state.cumulative_skipped,
                    self.state.total_queries
                ));
                break;
            }

            if !self.inter_batch_delay.is_zero() {
                tokio::time::sleep(self.inter_batch_delay).await;
            }
        }
        self.phase
    }

    fn apply(&mut self, outcome: &BatchOutcome) {
        for record in &outcome.results {
            self.push_log(format!("Inserted: {} (id {})", record.title, record.id));
        }
        for skipped in &outcome.skipped {
            self.push_log(format!("Skipped: {}", skipped));
        }
        for error in &outcome.errors {
            self.push_log(format!("Error: {}", error));
        }

        self.state.cumulative_inserted += outcome.success;
        self.state.cumulative_skipped += outcome.skipped_count;
        self.state.total_queries = outcome.total_books;
        self.state.offset = outcome.end_index;
    }

    fn push_log(&mut self, line: String) {
        tracing::info!("{}", line);
        self.state.log.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::executor::{BatchInvokeError, InsertedRecord};

    /// Replays a fixed script of outcomes and records invocations.
    /// Can trip the pause flag during a call, emulating an operator
    /// stopping while a batch is in flight.
    struct ScriptedExecutor {
        script: Mutex<Vec<Result<BatchOutcome, BatchInvokeError>>>,
        calls: Mutex<Vec<(usize, usize)>>,
        pause_on_call: Mutex<Option<(usize, Arc<AtomicBool>)>>,
    }

    impl ScriptedExecutor {
        fn new(script: Vec<Result<BatchOutcome, BatchInvokeError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
                pause_on_call: Mutex::new(None),
            })
        }

        fn set_pause_on_call(&self, call: usize, flag: Arc<AtomicBool>) {
            *self.pause_on_call.lock().unwrap() = Some((call, flag));
        }
    }

    #[async_trait]
    impl ExecuteBatch for ScriptedExecutor {
        async fn execute(
            &self,
            _dataset_variant: &str,
            start_index: usize,
            batch_size: usize,
        ) -> Result<BatchOutcome, BatchInvokeError> {
            let call_index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((start_index, batch_size));
                calls.len() - 1
            };
            if let Some((call, flag)) = self.pause_on_call.lock().unwrap().as_ref() {
                if *call == call_index {
                    flag.store(true, Ordering::SeqCst);
                }
            }
            self.script.lock().unwrap().remove(0)
        }
    }

    fn outcome(start: usize, size: usize, total: usize, success: usize) -> BatchOutcome {
        BatchOutcome {
            success,
            skipped_count: size - success,
            total_books: total,
            start_index: start,
            end_index: start + size,
            results: (0..success)
                .map(|i| InsertedRecord {
                    id: (start + i) as i64,
                    title: format!("Book {}", start + i),
                })
                .collect(),
            skipped: (success..size)
                .map(|i| format!("not found: query {}", start + i))
                .collect(),
            errors: vec![],
        }
    }

    fn runner(executor: Arc<ScriptedExecutor>, batch_size: usize) -> Runner {
        Runner::new(executor, "classicos-brasileiros", batch_size)
            .with_inter_batch_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn runs_to_completion_and_aggregates_totals() {
        let executor = ScriptedExecutor::new(vec![
            Ok(outcome(0, 10, 23, 8)),
            Ok(outcome(10, 10, 23, 10)),
            Ok(outcome(20, 10, 23, 3)),
        ]);
        let mut runner = runner(executor, 10);

        let phase = runner.start().await;

        assert_eq!(phase, RunPhase::Completed);
        let state = runner.state();
        assert_eq!(state.offset, 30);
        assert_eq!(state.total_queries, 23);
        assert_eq!(state.cumulative_inserted, 21);
        assert_eq!(state.cumulative_skipped, 9);
        // Per-item lines plus the completion line
        assert!(state.log.last().unwrap().starts_with("Run completed"));
    }

    #[tokio::test]
    async fn batches_advance_sequentially_by_batch_size() {
        let executor = ScriptedExecutor::new(vec![
            Ok(outcome(0, 10, 23, 10)),
            Ok(outcome(10, 10, 23, 10)),
            Ok(outcome(20, 10, 23, 3)),
        ]);
        let mut r = runner(Arc::clone(&executor), 10);
        r.start().await;

        assert_eq!(
            *executor.calls.lock().unwrap(),
            vec![(0, 10), (10, 10), (20, 10)]
        );
    }

    #[tokio::test]
    async fn invocation_failure_halts_and_retains_progress() {
        let executor = ScriptedExecutor::new(vec![
            Ok(outcome(0, 10, 23, 9)),
            Err(BatchInvokeError::Api {
                status_code: 502,
                message: "bad gateway".to_string(),
            }),
        ]);
        let mut runner = runner(executor, 10);

        let phase = runner.start().await;

        assert_eq!(phase, RunPhase::Errored);
        let state = runner.state();
        // Progress through the last successful batch is retained
        assert_eq!(state.offset, 10);
        assert_eq!(state.cumulative_inserted, 9);
        assert!(state.log.last().unwrap().starts_with("Run halted at offset 10"));
    }

    #[tokio::test]
    async fn pause_takes_effect_after_the_inflight_batch() {
        let executor = ScriptedExecutor::new(vec![
            Ok(outcome(0, 10, 23, 10)),
            Ok(outcome(10, 10, 23, 10)),
            Ok(outcome(20, 10, 23, 3)),
        ]);
        let mut runner = runner(Arc::clone(&executor), 10);
        executor.set_pause_on_call(0, runner.pause_flag());

        let phase = runner.start().await;

        // The first batch completed, then the loop observed the flag
        assert_eq!(phase, RunPhase::Paused);
        assert_eq!(runner.state().offset, 10);
        assert_eq!(runner.state().cumulative_inserted, 10);

        // Manual resume picks up at the retained offset and finishes
        let phase = runner.resume().await;
        assert_eq!(phase, RunPhase::Completed);
        assert_eq!(runner.state().offset, 30);
        assert_eq!(runner.state().cumulative_inserted, 23);
    }

    #[tokio::test]
    async fn start_resets_state_from_a_previous_run() {
        let executor = ScriptedExecutor::new(vec![
            Ok(outcome(0, 10, 5, 5)),
            Ok(outcome(0, 10, 5, 5)),
        ]);
        let mut runner = runner(executor, 10);

        runner.start().await;
        let first_log_len = runner.state().log.len();
        runner.start().await;

        assert_eq!(runner.phase(), RunPhase::Completed);
        assert_eq!(runner.state().cumulative_inserted, 5);
        assert_eq!(runner.state().log.len(), first_log_len);
    }

    #[tokio::test]
    async fn resume_is_a_no_op_unless_paused() {
        let executor = ScriptedExecutor::new(vec![Ok(outcome(0, 10, 5, 5))]);
        let mut runner = runner(executor, 10);

        runner.start().await;
        assert_eq!(runner.resume().await, RunPhase::Completed);
    }
}
