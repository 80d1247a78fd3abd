use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub recording: RecordingConfig,
    pub stt: SttConfig,
    pub extraction: ExtractionConfig,
    pub answer: AnswerConfig,
}

/// Audio recording configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecordingConfig {
    /// Duration of each recorded chunk in seconds
    pub chunk_duration_secs: u32,
    /// How many chunks to record before stopping
    pub total_chunks: u32,
    /// Number of concurrent consumer workers
    pub consumer_count: usize,
    /// Directory where chunk files are written (and deleted from)
    pub chunk_dir: PathBuf,
    /// ffmpeg input format (e.g. "alsa", "pulse", "avfoundation")
    pub input_format: String,
    /// ffmpeg input device
    pub input_device: String,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Transcription CLI binary (overridable via WHISPER_CLI)
    pub whisper_cli: String,
    /// Path to the speech model handed to the CLI (overridable via MODEL_PATH)
    pub model_path: Option<PathBuf>,
}

/// Question extraction service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Endpoint URL of the extraction service (overridable via API_URL).
    /// Required at runtime; its absence is a fatal misconfiguration.
    pub api_url: Option<String>,
    /// Maximum attempts per extraction call
    pub max_attempts: u32,
    /// Initial retry backoff in milliseconds, doubled after each failure
    pub initial_backoff_ms: u64,
}

/// Local answering model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnswerConfig {
    /// Answering tool binary
    pub tool: String,
    /// Model name passed to the tool
    pub model: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            chunk_duration_secs: defaults::CHUNK_DURATION_SECS,
            total_chunks: defaults::TOTAL_CHUNKS,
            consumer_count: defaults::CONSUMER_COUNT,
            chunk_dir: PathBuf::from("."),
            input_format: defaults::INPUT_FORMAT.to_string(),
            input_device: defaults::INPUT_DEVICE.to_string(),
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            whisper_cli: defaults::WHISPER_CLI.to_string(),
            model_path: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            max_attempts: defaults::MAX_EXTRACTION_ATTEMPTS,
            initial_backoff_ms: defaults::INITIAL_BACKOFF_MS,
        }
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            tool: defaults::ANSWER_TOOL.to_string(),
            model: defaults::ANSWER_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if the file
    /// doesn't exist. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> crate::error::Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - MODEL_PATH → stt.model_path
    /// - WHISPER_CLI → stt.whisper_cli
    /// - API_URL → extraction.api_url
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model_path) = std::env::var("MODEL_PATH")
            && !model_path.is_empty()
        {
            self.stt.model_path = Some(PathBuf::from(model_path));
        }

        if let Ok(cli) = std::env::var("WHISPER_CLI")
            && !cli.is_empty()
        {
            self.stt.whisper_cli = cli;
        }

        if let Ok(url) = std::env::var("API_URL")
            && !url.is_empty()
        {
            self.extraction.api_url = Some(url);
        }

        self
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/overhear/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("overhear")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.recording.chunk_duration_secs, 10);
        assert_eq!(config.recording.total_chunks, 2);
        assert_eq!(config.recording.consumer_count, 2);
        assert_eq!(config.stt.whisper_cli, "whisper-cli");
        assert_eq!(config.stt.model_path, None);
        assert_eq!(config.extraction.api_url, None);
        assert_eq!(config.extraction.max_attempts, 3);
        assert_eq!(config.extraction.initial_backoff_ms, 1000);
        assert_eq!(config.answer.tool, "ollama");
        assert_eq!(config.answer.model, "granite3.2");
    }

    #[test]
    fn test_load_partial_toml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[recording]\ntotal_chunks = 8\n\n[extraction]\napi_url = \"http://localhost:9000/extract\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.recording.total_chunks, 8);
        // Untouched fields keep their defaults
        assert_eq!(config.recording.chunk_duration_secs, 10);
        assert_eq!(
            config.extraction.api_url.as_deref(),
            Some("http://localhost:9000/extract")
        );
        assert_eq!(config.extraction.max_attempts, 3);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "recording = not valid toml").unwrap();

        assert!(Config::load(file.path()).is_err());
        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/overhear.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    // Env mutation is process-wide; serialize the tests that touch it.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: test-only env mutation, serialized by ENV_LOCK.
        unsafe {
            std::env::set_var("MODEL_PATH", "/models/ggml-base.bin");
            std::env::set_var("WHISPER_CLI", "/opt/whisper/whisper-cli");
            std::env::set_var("API_URL", "http://127.0.0.1:8080/questions");
        }

        let config = Config::default().with_env_overrides();
        assert_eq!(
            config.stt.model_path,
            Some(PathBuf::from("/models/ggml-base.bin"))
        );
        assert_eq!(config.stt.whisper_cli, "/opt/whisper/whisper-cli");
        assert_eq!(
            config.extraction.api_url.as_deref(),
            Some("http://127.0.0.1:8080/questions")
        );

        unsafe {
            std::env::remove_var("MODEL_PATH");
            std::env::remove_var("WHISPER_CLI");
            std::env::remove_var("API_URL");
        }
    }

    #[test]
    fn test_empty_env_value_does_not_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: test-only env mutation, serialized by ENV_LOCK.
        unsafe {
            std::env::set_var("MODEL_PATH", "");
            std::env::set_var("API_URL", "");
            std::env::remove_var("WHISPER_CLI");
        }

        let base = Config {
            stt: SttConfig {
                model_path: Some(PathBuf::from("/models/base.bin")),
                ..Default::default()
            },
            extraction: ExtractionConfig {
                api_url: Some("http://configured/".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = base.clone().with_env_overrides();

        // Empty strings are ignored; the configured values survive
        assert_eq!(config.stt.model_path, base.stt.model_path);
        assert_eq!(config.extraction.api_url, base.extraction.api_url);
        assert_eq!(config.stt.whisper_cli, defaults::WHISPER_CLI);

        unsafe {
            std::env::remove_var("MODEL_PATH");
            std::env::remove_var("API_URL");
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
