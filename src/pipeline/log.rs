//! Concurrency-safe, append-only result log.

use crate::pipeline::types::QuestionAnswer;
use std::sync::Mutex;

/// Append-only record of answered questions, shared by all consumers.
///
/// Appends are serialized by an internal mutex; the observable order is
/// completion order, not chunk order. An instance is injected into the
/// pipeline; there is deliberately no global log.
#[derive(Debug, Default)]
pub struct ResultLog {
    entries: Mutex<Vec<QuestionAnswer>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Safe to call from any consumer at any time.
    pub fn append(&self, record: QuestionAnswer) {
        #[allow(clippy::unwrap_used)]
        self.entries.lock().unwrap().push(record);
    }

    /// Copy of all entries in append order.
    pub fn snapshot(&self) -> Vec<QuestionAnswer> {
        #[allow(clippy::unwrap_used)]
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        #[allow(clippy::unwrap_used)]
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_append_and_snapshot() {
        let log = ResultLog::new();
        assert!(log.is_empty());

        log.append(QuestionAnswer::new("Q1?", "A1.", "s1"));
        log.append(QuestionAnswer::new("Q2?", "A2.", "s2"));

        let entries = log.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "Q1?");
        assert_eq!(entries[1].question, "Q2?");
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let log = Arc::new(ResultLog::new());
        let workers = 8;
        let per_worker = 50;

        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..per_worker {
                        log.append(QuestionAnswer::new(
                            &format!("Q{}-{}?", w, i),
                            "A.",
                            "concurrent",
                        ));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), workers * per_worker);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let log = ResultLog::new();
        log.append(QuestionAnswer::new("Q?", "A.", "s"));

        let snapshot = log.snapshot();
        log.append(QuestionAnswer::new("Q2?", "A2.", "s"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
