//! Consumer side of the chunk pipeline.

use crate::answer::Answerer;
use crate::error::Result;
use crate::extract::{QuestionExtractor, RetryPolicy, clean_question, extract_with_retry};
use crate::pipeline::error::{ChunkFailure, ErrorReporter};
use crate::pipeline::log::ResultLog;
use crate::pipeline::types::{Chunk, QuestionAnswer, Transcript};
use crate::stt::Transcriber;
use crossbeam_channel::Receiver;
use std::sync::Arc;

/// One consumer worker: drains chunks from the queue until it is closed
/// and empty, turning each chunk into zero or more log entries.
///
/// All failures are contained per chunk; the worker never aborts its
/// siblings or the producer.
pub(crate) struct ChunkWorker {
    pub transcriber: Arc<dyn Transcriber>,
    pub extractor: Arc<dyn QuestionExtractor>,
    pub answerer: Arc<dyn Answerer>,
    pub log: Arc<ResultLog>,
    pub retry: RetryPolicy,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl ChunkWorker {
    /// Blocks on an empty queue; returns when the queue is closed and drained.
    pub(crate) fn run(&self, receiver: Receiver<Chunk>) {
        for chunk in receiver.iter() {
            self.process(chunk);
        }
    }

    fn process(&self, chunk: Chunk) {
        if let Err(e) = self.transcribe_and_answer(&chunk) {
            self.reporter.report(
                "consumer",
                &ChunkFailure::Recoverable(format!("chunk {} abandoned: {}", chunk.index, e)),
            );
        }
        // The chunk drops here and takes its backing file with it, even
        // when transcribe_and_answer unwinds.
    }

    fn transcribe_and_answer(&self, chunk: &Chunk) -> Result<()> {
        let text = self.transcriber.transcribe(&chunk.path)?;
        let transcript = Transcript {
            text,
            source: chunk.source_label(),
        };

        let questions = extract_with_retry(
            &self.extractor,
            &transcript.text,
            &self.retry,
            self.reporter.as_ref(),
        )?;

        for raw in questions {
            let question = clean_question(&raw);
            if question.is_empty() {
                continue;
            }

            // An answering failure degrades to an empty answer; the question
            // is still worth keeping in the log.
            let answer = match self.answerer.ask(&question) {
                Ok(answer) => answer,
                Err(e) => {
                    self.reporter.report(
                        "answerer",
                        &ChunkFailure::Recoverable(format!("'{}': {}", question, e)),
                    );
                    String::new()
                }
            };

            self.log
                .append(QuestionAnswer::new(&question, &answer, &transcript.source));
        }

        Ok(())
    }
}
