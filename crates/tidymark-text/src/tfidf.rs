//! Minimal TF-IDF document index.
//!
//! Term frequency is the raw count of a term in a document. Inverse document
//! frequency is `1 + ln(N / (1 + df))`, where `df` is the number of documents
//! containing the term. The index is read-only once built.

use std::collections::HashMap;

use crate::normalize::normalize;

#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    documents: Vec<HashMap<String, usize>>,
    doc_freq: HashMap<String, usize>,
}

impl TfIdfIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` and append it as the next document.
    pub fn add_document(&mut self, text: &str) -> usize {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in normalize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for term in counts.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.documents.push(counts);
        self.documents.len() - 1
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn term_frequency(&self, term: &str, doc: usize) -> usize {
        self.documents
            .get(doc)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    pub fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0);
        1.0 + (self.documents.len() as f64 / (1.0 + df as f64)).ln()
    }

    /// Weight of `term` in document `doc`; zero for unknown documents.
    pub fn tf_idf(&self, term: &str, doc: usize) -> f64 {
        let tf = self.term_frequency(term, doc);
        if tf == 0 {
            return 0.0;
        }
        tf as f64 * self.idf(term)
    }
}
