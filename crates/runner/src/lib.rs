//! Run orchestrator for catalog ingestion.
//!
//! Drives the batch executor across a whole dataset variant: one batch
//! in flight at a time, advancing offsets, pacing itself between
//! batches, and aggregating totals into a client-held [`RunState`].
//! The state is not persisted anywhere; a crashed operator process
//! loses its resume point unless the last offset was noted.

mod executor;
mod http;
mod run;

pub use executor::{BatchInvokeError, BatchOutcome, ExecuteBatch, InsertedRecord};
pub use http::HttpBatchClient;
pub use run::{RunPhase, RunState, Runner};
