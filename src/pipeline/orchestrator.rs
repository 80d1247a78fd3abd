//! Chunk pipeline that runs from startup until every chunk is processed.

use crate::answer::Answerer;
use crate::defaults;
use crate::error::{OverhearError, Result};
use crate::extract::{QuestionExtractor, RetryPolicy};
use crate::pipeline::consumer::ChunkWorker;
use crate::pipeline::error::{ChunkFailure, ErrorReporter, LogReporter};
use crate::pipeline::log::ResultLog;
use crate::pipeline::types::Chunk;
use crate::record::Recorder;
use crate::stt::Transcriber;
use crossbeam_channel::bounded;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many chunks the producer records before closing the queue.
    pub total_chunks: u32,
    /// Duration of each chunk in seconds.
    pub chunk_duration_secs: u32,
    /// Number of consumer workers.
    pub consumer_count: usize,
    /// Capacity of the chunk queue (producer blocks when full).
    pub queue_capacity: usize,
    /// Directory chunk files are written to.
    pub chunk_dir: PathBuf,
    /// Pause between producer iterations.
    pub inter_chunk_delay: Duration,
    /// Backoff policy for the extraction call.
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            total_chunks: defaults::TOTAL_CHUNKS,
            chunk_duration_secs: defaults::CHUNK_DURATION_SECS,
            consumer_count: defaults::CONSUMER_COUNT,
            queue_capacity: defaults::QUEUE_CAPACITY,
            chunk_dir: PathBuf::from("."),
            inter_chunk_delay: Duration::from_millis(defaults::INTER_CHUNK_DELAY_MS),
            retry: RetryPolicy::default(),
        }
    }
}

/// Cooperative cancellation signal for a running pipeline.
///
/// Cancelling stops the producer from scheduling further chunks; in-flight
/// work runs to completion and consumers drain the queue naturally.
#[derive(Debug, Clone)]
pub struct Canceller {
    running: Arc<AtomicBool>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }
}

/// Handle to a running pipeline.
pub struct PipelineHandle {
    running: Arc<AtomicBool>,
    producer: Option<JoinHandle<()>>,
    consumers: Vec<JoinHandle<()>>,
}

impl PipelineHandle {
    /// Cancellation signal usable from another task or a signal handler.
    pub fn canceller(&self) -> Canceller {
        Canceller {
            running: self.running.clone(),
        }
    }

    /// Returns true while the pipeline has not been cancelled.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Block until the producer and every consumer have terminated.
    ///
    /// Completes only after the queue is closed AND all consumers observed
    /// the drained state. Worker panics are logged as they are joined and
    /// the first one is surfaced as an error afterwards.
    pub fn wait(mut self) -> Result<()> {
        let mut first_panic: Option<String> = None;

        if let Some(handle) = self.producer.take() {
            join_worker("producer", handle, &mut first_panic);
        }
        for (i, handle) in self.consumers.drain(..).enumerate() {
            join_worker(&format!("consumer-{}", i), handle, &mut first_panic);
        }

        match first_panic {
            Some(worker) => Err(OverhearError::WorkerPanicked { worker }),
            None => Ok(()),
        }
    }
}

fn join_worker(name: &str, handle: JoinHandle<()>, first_panic: &mut Option<String>) {
    if let Err(panic_info) = handle.join() {
        let msg = panic_info
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("unknown panic");
        eprintln!("overhear: pipeline worker {} panicked: {}", name, msg);
        if first_panic.is_none() {
            *first_panic = Some(name.to_string());
        }
    }
}

/// Chunk pipeline: Recorder → queue → Transcriber → Extractor → Answerer → ResultLog.
pub struct Pipeline {
    config: PipelineConfig,
    error_reporter: Arc<dyn ErrorReporter>,
}

impl Pipeline {
    /// Creates a new pipeline with the default stderr error reporter.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            error_reporter: Arc::new(LogReporter),
        }
    }

    /// Sets a custom error reporter.
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = reporter;
        self
    }

    /// Starts the producer and the consumer pool.
    ///
    /// # Arguments
    /// * `recorder` - records one chunk per producer iteration
    /// * `transcriber` - converts chunk files to text
    /// * `extractor` - finds questions in transcripts (retried on transient failure)
    /// * `answerer` - answers one question per invocation
    /// * `log` - shared result log entries are appended to
    ///
    /// # Returns
    /// Handle whose `wait()` resolves once every worker has terminated.
    pub fn start(
        self,
        recorder: Arc<dyn Recorder>,
        transcriber: Arc<dyn Transcriber>,
        extractor: Arc<dyn QuestionExtractor>,
        answerer: Arc<dyn Answerer>,
        log: Arc<ResultLog>,
    ) -> Result<PipelineHandle> {
        if self.config.consumer_count == 0 {
            return Err(OverhearError::ConfigInvalidValue {
                key: "consumer_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        std::fs::create_dir_all(&self.config.chunk_dir)?;

        let running = Arc::new(AtomicBool::new(true));
        let (tx, rx) = bounded::<Chunk>(self.config.queue_capacity.max(1));

        // Producer: records chunks sequentially. It owns the only Sender, so
        // the queue closes exactly once, on every exit path including
        // cancellation and unwind.
        let producer = {
            let running = running.clone();
            let reporter = self.error_reporter.clone();
            let config = self.config.clone();
            thread::spawn(move || {
                for index in 0..u64::from(config.total_chunks) {
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let path = config.chunk_dir.join(format!(
                        "{}{:03}.wav",
                        defaults::CHUNK_FILE_PREFIX,
                        index
                    ));
                    match recorder.capture(&path, config.chunk_duration_secs) {
                        Ok(()) => {
                            // Blocks when the queue is full (backpressure).
                            // Send fails only when every consumer is gone;
                            // the rejected chunk drops and deletes its file.
                            if tx.send(Chunk::new(index, path)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            // The time window has passed; the chunk is lost.
                            reporter.report(
                                "producer",
                                &ChunkFailure::Recoverable(format!(
                                    "recording failed for chunk {}: {}",
                                    index, e
                                )),
                            );
                        }
                    }

                    if !config.inter_chunk_delay.is_zero() {
                        thread::sleep(config.inter_chunk_delay);
                    }
                }
                // tx drops here: closed-and-drained is now observable.
            })
        };

        // Consumers: share the receiver; each chunk is delivered to exactly
        // one of them.
        let consumers = (0..self.config.consumer_count)
            .map(|_| {
                let rx = rx.clone();
                let worker = ChunkWorker {
                    transcriber: transcriber.clone(),
                    extractor: extractor.clone(),
                    answerer: answerer.clone(),
                    log: log.clone(),
                    retry: self.config.retry.clone(),
                    reporter: self.error_reporter.clone(),
                };
                thread::spawn(move || worker.run(rx))
            })
            .collect();

        Ok(PipelineHandle {
            running,
            producer: Some(producer),
            consumers,
        })
    }
}
