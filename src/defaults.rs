//! Default configuration constants for overhear.
//!
//! Shared constants used across configuration types to ensure consistency
//! and eliminate duplication.

/// Default duration of one recorded audio chunk in seconds.
///
/// Ten seconds keeps transcription latency low while giving the extraction
/// service enough context to spot complete question sentences.
pub const CHUNK_DURATION_SECS: u32 = 10;

/// Default number of chunks to record before the producer stops.
pub const TOTAL_CHUNKS: u32 = 2;

/// Default number of consumer workers processing chunks concurrently.
///
/// Two workers let transcription of one chunk overlap with the extraction
/// and answering of the previous one on typical hardware.
pub const CONSUMER_COUNT: usize = 2;

/// Default capacity of the chunk queue between producer and consumers.
///
/// Bounded so a stalled transcription backend exerts backpressure on the
/// producer instead of piling recordings up on disk.
pub const QUEUE_CAPACITY: usize = 16;

/// Delay between producer iterations in milliseconds.
///
/// Small gap between one chunk finishing and the next recording starting.
pub const INTER_CHUNK_DELAY_MS: u64 = 100;

/// Maximum attempts for one question-extraction call.
pub const MAX_EXTRACTION_ATTEMPTS: u32 = 3;

/// Initial backoff before the first extraction retry, in milliseconds.
///
/// Doubles after each failed attempt: 1s, 2s, 4s.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Default recording tool.
pub const RECORDER_TOOL: &str = "ffmpeg";

/// Default ffmpeg input format on Linux.
pub const INPUT_FORMAT: &str = "alsa";

/// Default ffmpeg input device.
pub const INPUT_DEVICE: &str = "default";

/// Default transcription CLI, overridable via `WHISPER_CLI`.
pub const WHISPER_CLI: &str = "whisper-cli";

/// Default answering tool.
pub const ANSWER_TOOL: &str = "ollama";

/// Default local model handed to the answering tool.
pub const ANSWER_MODEL: &str = "granite3.2";

/// File name prefix for recorded chunks.
pub const CHUNK_FILE_PREFIX: &str = "chunk_";
