//! Question extraction from transcripts.
//!
//! The extraction service is the only network dependency in the system, so
//! it is the only call wrapped in a retry policy.

pub mod api;
pub mod clean;
pub mod extractor;
pub mod retry;

pub use api::HttpQuestionExtractor;
pub use clean::clean_question;
pub use extractor::{MockExtractor, QuestionExtractor};
pub use retry::{RetryPolicy, extract_with_retry};
