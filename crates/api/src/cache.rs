use dashmap::DashMap;
use sha2::{Digest, Sha256};

/// Bounded cache of LLM answers keyed by (question, selected docs). Repeat
/// questions over the same selection skip the provider round trip; the whole
/// cache is dropped when the dataset is reloaded.
pub struct AnswerCache {
    answers: DashMap<String, String>,
    max_entries: usize,
}

impl AnswerCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            answers: DashMap::new(),
            max_entries,
        }
    }

    pub fn get(&self, question: &str, doc_ids: &[String]) -> Option<String> {
        self.answers
            .get(&Self::key(question, doc_ids))
            .map(|r| r.value().clone())
    }

    pub fn set(&self, question: &str, doc_ids: &[String], answer: String) {
        if self.answers.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self
                .answers
                .iter()
                .take(self.max_entries / 4)
                .map(|r| r.key().clone())
                .collect();
            for key in to_remove {
                self.answers.remove(&key);
            }
        }
        self.answers.insert(Self::key(question, doc_ids), answer);
    }

    pub fn clear(&self) {
        self.answers.clear();
    }

    fn key(question: &str, doc_ids: &[String]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(question.as_bytes());
        for id in doc_ids {
            hasher.update(b"\0");
            hasher.update(id.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
