//! Composition root: wires configuration to the concrete components and
//! runs the pipeline under signal handling.

use crate::answer::OllamaAnswerer;
use crate::config::Config;
use crate::defaults;
use crate::error::{OverhearError, Result};
use crate::extract::{HttpQuestionExtractor, RetryPolicy};
use crate::output;
use crate::pipeline::{Pipeline, PipelineConfig, ResultLog};
use crate::record::FfmpegRecorder;
use crate::stt::WhisperCliTranscriber;
use std::sync::Arc;
use std::time::Duration;

/// Record, transcribe, extract and answer until all chunks are processed
/// or Ctrl+C arrives, then print the accumulated question log.
///
/// Fails fast on incomplete configuration before any audio is recorded.
pub async fn run_listen_command(config: Config, json: bool, quiet: bool, verbose: u8) -> Result<()> {
    let api_url = config
        .extraction
        .api_url
        .clone()
        .ok_or(OverhearError::MissingApiUrl)?;
    let model_path =
        config
            .stt
            .model_path
            .clone()
            .ok_or_else(|| OverhearError::ConfigInvalidValue {
                key: "stt.model_path".to_string(),
                message: "set MODEL_PATH or stt.model_path in the config file".to_string(),
            })?;

    if verbose >= 1 {
        eprintln!(
            "overhear: {} chunk(s) x {}s, {} consumer(s), chunk dir {}",
            config.recording.total_chunks,
            config.recording.chunk_duration_secs,
            config.recording.consumer_count,
            config.recording.chunk_dir.display()
        );
        eprintln!("overhear: extraction endpoint {}", api_url);
        eprintln!(
            "overhear: transcribing with {} ({})",
            config.stt.whisper_cli,
            model_path.display()
        );
        eprintln!(
            "overhear: answering with {} run {}",
            config.answer.tool, config.answer.model
        );
    }

    let recorder = Arc::new(FfmpegRecorder::system(
        &config.recording.input_format,
        &config.recording.input_device,
    ));
    let transcriber = Arc::new(WhisperCliTranscriber::system(
        &config.stt.whisper_cli,
        model_path,
    ));
    let extractor = Arc::new(HttpQuestionExtractor::new(Some(api_url)));
    let answerer = Arc::new(OllamaAnswerer::system(
        &config.answer.tool,
        &config.answer.model,
    ));
    let log = Arc::new(ResultLog::new());

    let pipeline_config = PipelineConfig {
        total_chunks: config.recording.total_chunks,
        chunk_duration_secs: config.recording.chunk_duration_secs,
        consumer_count: config.recording.consumer_count,
        queue_capacity: defaults::QUEUE_CAPACITY,
        chunk_dir: config.recording.chunk_dir.clone(),
        inter_chunk_delay: Duration::from_millis(defaults::INTER_CHUNK_DELAY_MS),
        retry: RetryPolicy {
            max_attempts: config.extraction.max_attempts,
            initial_delay: Duration::from_millis(config.extraction.initial_backoff_ms),
        },
    };

    if !quiet {
        eprintln!(
            "overhear: listening ({} chunks of {}s, Ctrl+C to stop early)",
            config.recording.total_chunks, config.recording.chunk_duration_secs
        );
    }

    let handle = Pipeline::new(pipeline_config).start(
        recorder,
        transcriber,
        extractor,
        answerer,
        log.clone(),
    )?;
    let canceller = handle.canceller();

    // The pipeline is thread-based; park its join on the blocking pool so
    // the signal handler stays responsive.
    let mut pipeline_done = tokio::task::spawn_blocking(move || handle.wait());

    let pipeline_result = tokio::select! {
        joined = &mut pipeline_done => flatten_join(joined),
        _ = tokio::signal::ctrl_c() => {
            if !quiet {
                eprintln!("overhear: shutting down, finishing chunks in flight...");
            }
            canceller.cancel();
            flatten_join(pipeline_done.await)
        }
    };

    // Whatever accumulated gets printed even when a worker died.
    print_log_then(pipeline_result, &log.snapshot(), json)
}

/// Print the accumulated log, then surface the pipeline outcome.
fn print_log_then(
    result: Result<()>,
    entries: &[crate::pipeline::QuestionAnswer],
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", output::render_json(entries)?);
    } else {
        output::render_results(entries);
    }
    result
}

fn flatten_join(
    joined: std::result::Result<Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(OverhearError::Other(format!("pipeline task failed: {}", e))),
    }
}
