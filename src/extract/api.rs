//! HTTP client for the question-extraction service.

use crate::error::{OverhearError, Result};
use crate::extract::QuestionExtractor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ExtractRequestBody<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponseBody {
    /// A 2xx response without a `questions` key means zero questions.
    #[serde(default)]
    questions: Vec<String>,
}

/// Extractor that POSTs `{"text": "<transcript>"}` to a configured endpoint
/// and reads questions from the `questions` array of the JSON response.
///
/// Transport failures and non-2xx statuses are transient (the retry policy
/// will back off and retry). A missing endpoint URL is fatal
/// misconfiguration and is never retried.
pub struct HttpQuestionExtractor {
    client: reqwest::blocking::Client,
    api_url: Option<String>,
}

impl HttpQuestionExtractor {
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_url,
        }
    }
}

impl QuestionExtractor for HttpQuestionExtractor {
    fn extract(&self, transcript: &str) -> Result<Vec<String>> {
        let url = self.api_url.as_deref().ok_or(OverhearError::MissingApiUrl)?;

        let response = self
            .client
            .post(url)
            .json(&ExtractRequestBody { text: transcript })
            .send()
            .map_err(|e| OverhearError::ExtractionRequest {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverhearError::ExtractionStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| OverhearError::ExtractionRequest {
                message: e.to_string(),
            })?;
        parse_questions(&body)
    }
}

/// Parse the extraction service response body.
fn parse_questions(body: &str) -> Result<Vec<String>> {
    let parsed: ExtractResponseBody =
        serde_json::from_str(body).map_err(|e| OverhearError::ExtractionResponse {
            message: e.to_string(),
        })?;
    Ok(parsed.questions)
}
