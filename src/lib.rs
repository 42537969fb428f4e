//! `lemrank`: query-likelihood language-model ranking over lemma streams.
//!
//! This crate is the **ranking engine** of a small retrieval system:
//! - `corpus` builds per-document and collection-wide lemma frequency statistics.
//! - `query_likelihood` scores documents by \(P(Q|D)\) under a smoothed unigram
//!   language model and produces a deterministic total order.
//! - `lemmatize` is the seam to the external text-to-lemma pipeline; the engine
//!   consumes ordered lemma streams and never depends on how they were produced.
//!
//! Scope:
//! - In-memory statistics over a corpus fixed at construction
//! - Deterministic ranking (tie-break by doc id)
//! - Caller-provided lemma streams (so different products can choose their
//!   tokenization/lemmatization pipeline)
//!
//! Non-goals:
//! - Persisting statistics across runs
//! - Incremental corpus updates or relevance feedback
//! - Phrase queries or stopword filtering — the query is a bag of lemma
//!   occurrences
//!
//! References:
//! - Ponte & Croft (1998): a language modeling approach to IR
//! - Jelinek & Mercer (1980): interpolated estimation of Markov source parameters
//! - Zhai & Lafferty (2004): smoothing methods for language models in IR

pub mod corpus;
pub mod lemmatize;
pub mod query_likelihood;
pub mod smoothing;

pub use error::Error;

mod error {
    /// Errors for query-likelihood ranking.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// Query lemma list was empty.
        #[error("empty query")]
        EmptyQuery,
        /// Corpus contains no documents, or its collection length is zero.
        #[error("empty corpus")]
        EmptyCorpus,
        /// A zero-length document reached scoring; its language model is
        /// undefined and no fallback probability is substituted.
        #[error("document {doc_id} has no lemmas")]
        EmptyDocument {
            /// Id of the offending document.
            doc_id: u32,
        },
    }
}
