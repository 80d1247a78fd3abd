//! Error types for overhear.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverhearError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("API_URL is not set. Export API_URL or set extraction.api_url in the config file")]
    MissingApiUrl,

    // External tool errors
    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("Tool {tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    // Recording errors
    #[error("Recording produced no file at {path}")]
    RecordingFailed { path: String },

    // Transcription errors
    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Question extraction errors
    #[error("Extraction request failed: {message}")]
    ExtractionRequest { message: String },

    #[error("Extraction service returned status {status}")]
    ExtractionStatus { status: u16 },

    #[error("Extraction response unreadable: {message}")]
    ExtractionResponse { message: String },

    // Answering errors
    #[error("Answering failed: {message}")]
    Answer { message: String },

    // Pipeline errors
    #[error("Pipeline worker panicked: {worker}")]
    WorkerPanicked { worker: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl OverhearError {
    /// Whether a retry can plausibly succeed.
    ///
    /// Only network-layer extraction failures qualify. Misconfiguration
    /// (missing endpoint) and contract mismatches (undecodable body) will
    /// fail the same way on every attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OverhearError::ExtractionRequest { .. } | OverhearError::ExtractionStatus { .. }
        )
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, OverhearError>;
