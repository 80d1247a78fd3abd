//! Concurrent chunk pipeline.
//!
//! One producer thread records chunks and feeds a bounded crossbeam channel;
//! a fixed pool of consumer threads transcribes, extracts questions (with
//! retry) and answers them. The channel provides backpressure and the
//! closed-and-drained termination signal for consumers.

pub mod consumer;
pub mod error;
pub mod log;
pub mod orchestrator;
pub mod types;

pub use error::{ChunkFailure, ErrorReporter, LogReporter, MemoryReporter};
pub use log::ResultLog;
pub use orchestrator::{Canceller, Pipeline, PipelineConfig, PipelineHandle};
pub use types::{Chunk, QuestionAnswer, Transcript};
