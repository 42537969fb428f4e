//! The lemmatization seam.
//!
//! Tokenization, sentence splitting, tagging, and lemmatization live outside
//! this crate; the engine consumes an ordered lemma stream and treats each
//! element as an opaque comparable token. The contract an implementation must
//! honor: deterministic output for identical input, and token order matching
//! order of occurrence in the text.

use std::collections::HashMap;

/// External lemmatization capability.
pub trait Lemmatizer {
    /// Lemmatize one input text into an ordered lemma sequence.
    fn lemmatize(&self, text: &str) -> Vec<String>;
}

/// A deterministic stand-in lemmatizer for the CLI and tests.
///
/// Lowercases, splits on non-alphanumeric characters, and maps each token
/// through an exception table (surface form to lemma). This is not a
/// linguistic lemmatizer; real deployments plug an NLP pipeline in behind
/// [`Lemmatizer`].
#[derive(Debug, Default)]
pub struct DictionaryLemmatizer {
    exceptions: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    /// A lemmatizer with an empty exception table (pure tokenization).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface-form to lemma mapping, applied after lowercasing.
    pub fn with_exception(mut self, surface: &str, lemma: &str) -> Self {
        self.exceptions
            .insert(surface.to_lowercase(), lemma.to_string());
        self
    }

    fn resolve(&self, token: String) -> String {
        match self.exceptions.get(&token) {
            Some(lemma) => lemma.clone(),
            None => token,
        }
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, text: &str) -> Vec<String> {
        let mut lemmas = Vec::new();
        let mut current = String::new();
        for ch in text.chars() {
            if ch.is_alphanumeric() {
                current.extend(ch.to_lowercase());
            } else if !current.is_empty() {
                lemmas.push(self.resolve(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            lemmas.push(self.resolve(current));
        }
        lemmas
    }
}
