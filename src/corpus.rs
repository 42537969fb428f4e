//! Lemma frequency statistics for a fixed document collection.
//!
//! A [`Corpus`] is built exactly once from the lemma streams of all documents
//! and is immutable afterwards: per-document frequency tables and lengths,
//! plus the aggregated collection frequency table and collection length, are
//! computed at construction and never change. That keeps scoring a pure read
//! against shared state — safe for unbounded concurrent queries.
//!
//! Document ids are `u32`, assigned **0-based in ingestion order**. Ingestion
//! order is semantically meaningful: it determines the default tie-break in
//! ranking and the ids reported in results.

use std::collections::HashMap;

use crate::lemmatize::Lemmatizer;

/// Per-document lemma statistics: a frequency table plus total length.
#[derive(Debug, Clone)]
pub struct Document {
    id: u32,
    freqs: HashMap<String, u32>,
    len: u32,
}

impl Document {
    /// Build statistics from one lemma sequence.
    ///
    /// Duplicates count; an empty sequence yields an empty table and length 0.
    pub fn from_lemmas(id: u32, lemmas: &[String]) -> Self {
        let mut freqs: HashMap<String, u32> = HashMap::new();
        for lemma in lemmas {
            *freqs.entry(lemma.clone()).or_insert(0) += 1;
        }
        Self {
            id,
            freqs,
            len: lemmas.len() as u32,
        }
    }

    /// Document id (0-based ingestion order).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Occurrence count of `lemma` in this document (0 if absent).
    pub fn term_frequency(&self, lemma: &str) -> u32 {
        self.freqs.get(lemma).copied().unwrap_or(0)
    }

    /// Total lemma count, duplicates included.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the document has no lemmas at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate (lemma, count) pairs. Order is unspecified.
    pub fn frequencies(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.freqs.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

/// An ordered, fixed collection of documents with aggregated statistics.
///
/// Invariants, established at construction:
/// - collection length = sum of document lengths
/// - collection frequency of a lemma = sum of its per-document frequencies
/// - every lemma in any document's table has a positive collection entry
#[derive(Debug)]
pub struct Corpus {
    docs: Vec<Document>,
    collection_freqs: HashMap<String, u32>,
    collection_len: u64,
}

impl Corpus {
    /// Build a corpus from one lemma stream per document, in ingestion order.
    ///
    /// Aggregation runs once, here, after all documents are ingested.
    pub fn from_lemma_streams<I>(streams: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let docs: Vec<Document> = streams
            .into_iter()
            .enumerate()
            .map(|(i, lemmas)| Document::from_lemmas(i as u32, &lemmas))
            .collect();

        let mut collection_freqs: HashMap<String, u32> = HashMap::new();
        let mut collection_len: u64 = 0;
        for doc in &docs {
            collection_len += u64::from(doc.len);
            for (lemma, count) in doc.frequencies() {
                *collection_freqs.entry(lemma.to_string()).or_insert(0) += count;
            }
        }

        tracing::debug!(
            num_docs = docs.len(),
            collection_len,
            distinct_lemmas = collection_freqs.len(),
            "built corpus statistics"
        );

        Self {
            docs,
            collection_freqs,
            collection_len,
        }
    }

    /// Build a corpus from raw texts via a [`Lemmatizer`].
    pub fn from_texts<'a, L, I>(lemmatizer: &L, texts: I) -> Self
    where
        L: Lemmatizer + ?Sized,
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_lemma_streams(texts.into_iter().map(|t| lemmatizer.lemmatize(t)))
    }

    /// Number of documents.
    pub fn num_docs(&self) -> u32 {
        self.docs.len() as u32
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in ingestion order.
    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    /// Look up a document by id.
    pub fn document(&self, doc_id: u32) -> Option<&Document> {
        self.docs.get(doc_id as usize)
    }

    /// Iterate document ids in ingestion order.
    pub fn document_ids(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.docs.len()).map(|i| i as u32)
    }

    /// Total lemma count across all documents.
    pub fn collection_len(&self) -> u64 {
        self.collection_len
    }

    /// Occurrence count of `lemma` across all documents (0 if unseen).
    pub fn collection_frequency(&self, lemma: &str) -> u32 {
        self.collection_freqs.get(lemma).copied().unwrap_or(0)
    }

    /// Background probability \(P(t|C)\) of a lemma (0 if unseen).
    ///
    /// Callers must guard the empty-corpus case before requesting this; with a
    /// zero collection length the estimate is undefined and 0 is returned.
    pub fn collection_probability(&self, lemma: &str) -> f32 {
        if self.collection_len == 0 {
            return 0.0;
        }
        self.collection_frequency(lemma) as f32 / self.collection_len as f32
    }

    /// Iterate all distinct lemmas seen in the collection. Order is unspecified.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.collection_freqs.keys().map(|t| t.as_str())
    }
}
