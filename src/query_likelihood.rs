//! Query likelihood language model ranking.
//!
//! Ranks documents by \(P(Q|D)\): the probability that a document language
//! model generated the query (Ponte & Croft, 1998). Each query lemma
//! occurrence contributes one smoothed factor; duplicates are scored
//! independently, never deduplicated.
//!
//! Scores accumulate in **log space** and are compared as logs; the plain
//! product of probabilities underflows quickly, so the probability is only
//! recovered for display. A query lemma unseen in the whole collection cannot
//! discriminate between documents — its factor would be the same zero for
//! every one of them — so it is excluded from the product and reported on the
//! result instead. No epsilon floor is applied anywhere.

use crate::corpus::{Corpus, Document};
use crate::smoothing::Smoothing;
use crate::Error;
use serde::Serialize;

/// Ranking parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankParams {
    /// Smoothing method (Jelinek-Mercer with lambda 0.5 by default).
    pub smoothing: Smoothing,
}

impl RankParams {
    /// Jelinek-Mercer parameters with the given interpolation weight.
    pub fn jelinek_mercer(lambda: f32) -> Self {
        Self {
            smoothing: Smoothing::jelinek_mercer(lambda),
        }
    }

    /// Dirichlet parameters with the given prior strength.
    pub fn dirichlet(mu: f32) -> Self {
        Self {
            smoothing: Smoothing::dirichlet(mu),
        }
    }
}

/// One ranked document: id plus the log-probability of the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedDoc {
    /// Document id (0-based ingestion order).
    pub doc_id: u32,
    /// \(\ln P(Q|D)\); negative infinity when the probability is exactly 0.
    pub log_prob: f32,
}

impl RankedDoc {
    /// Query probability for display. May underflow to 0 for long queries.
    pub fn probability(&self) -> f32 {
        self.log_prob.exp()
    }
}

/// A complete ranking: exactly one entry per corpus document.
///
/// Ephemeral — recomputed per query, holds no state between calls.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    /// Documents, best first (`log_prob` desc, then `doc_id` asc).
    pub docs: Vec<RankedDoc>,
    /// Query lemmas with zero collection frequency, in first-seen query
    /// order. These carried no discriminating signal and were excluded from
    /// the product.
    pub uncovered: Vec<String>,
    /// True when no query lemma occurs anywhere in the collection. Every
    /// document then scores probability 0 and the order falls back to doc id
    /// ascending.
    pub degenerate: bool,
}

/// Rank every corpus document against a lemmatized query.
///
/// - **Input**: caller-provided lemma occurrences (duplicates meaningful).
/// - **Output**: one entry per document, sorted deterministically by
///   `(log_prob desc, doc_id asc)` — never by sort stability.
///
/// Errors are precondition violations, reported rather than papered over:
/// an empty query, an empty corpus, or a zero-length document (whose
/// language model would divide by zero).
pub fn rank(corpus: &Corpus, query: &[String], params: RankParams) -> Result<Ranking, Error> {
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    if corpus.is_empty() || corpus.collection_len() == 0 {
        return Err(Error::EmptyCorpus);
    }
    for doc in corpus.documents() {
        if doc.is_empty() {
            return Err(Error::EmptyDocument { doc_id: doc.id() });
        }
    }

    // Partition query occurrences by collection cover. An uncovered lemma has
    // zero frequency in every document, so its factor cannot change the order.
    let mut covered: Vec<&String> = Vec::with_capacity(query.len());
    let mut uncovered: Vec<String> = Vec::new();
    for lemma in query {
        if corpus.collection_frequency(lemma) > 0 {
            covered.push(lemma);
        } else if !uncovered.iter().any(|seen| seen == lemma) {
            uncovered.push(lemma.clone());
        }
    }

    let degenerate = covered.is_empty();
    if degenerate {
        tracing::warn!(
            query_len = query.len(),
            "no query lemma occurs in the collection; ranking is degenerate"
        );
    }

    let mut docs: Vec<RankedDoc> = corpus
        .documents()
        .iter()
        .map(|doc| RankedDoc {
            doc_id: doc.id(),
            log_prob: if degenerate {
                f32::NEG_INFINITY
            } else {
                score_document(corpus, doc, &covered, params.smoothing)
            },
        })
        .collect();

    // Deterministic: log-prob desc, then doc id asc.
    docs.sort_unstable_by(|a, b| {
        b.log_prob
            .total_cmp(&a.log_prob)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });

    Ok(Ranking {
        docs,
        uncovered,
        degenerate,
    })
}

/// Retrieve the top-k documents for a query. Convenience over [`rank`].
pub fn retrieve(
    corpus: &Corpus,
    query: &[String],
    k: usize,
    params: RankParams,
) -> Result<Vec<RankedDoc>, Error> {
    let mut ranking = rank(corpus, query, params)?;
    ranking.docs.truncate(k);
    Ok(ranking.docs)
}

fn score_document(
    corpus: &Corpus,
    doc: &Document,
    covered: &[&String],
    smoothing: Smoothing,
) -> f32 {
    let mut log_prob = 0.0f32;
    for &lemma in covered {
        let tf = doc.term_frequency(lemma);
        let p_collection = corpus.collection_probability(lemma);
        let p = smoothing.probability(tf, doc.len(), p_collection);
        if p > 0.0 {
            log_prob += p.ln();
        } else {
            // Reachable only when the collection model carries no weight
            // (lambda = 1, mu = 0) and the document lacks the lemma: the
            // query probability for this document is exactly 0.
            return f32::NEG_INFINITY;
        }
    }
    log_prob
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // The four-document scenario from the original system, with lemma streams
    // pinned as an external annotator would produce them ("is" -> "be",
    // "took" -> "take", "loves" -> "love", "emails" -> "email").
    fn reference_corpus() -> Corpus {
        Corpus::from_lemma_streams(vec![
            lemmas(&[
                "information",
                "retrieval",
                "be",
                "the",
                "most",
                "awesome",
                "class",
                "i",
                "ever",
                "take",
            ]),
            lemmas(&[
                "the",
                "retrieval",
                "of",
                "private",
                "information",
                "from",
                "your",
                "email",
                "be",
                "a",
                "job",
                "that",
                "the",
                "nsa",
                "love",
            ]),
            lemmas(&[
                "in", "the", "school", "of", "information", "you", "can", "learn", "about",
                "data", "science",
            ]),
            lemmas(&["the", "labrador", "retriever", "be", "a", "great", "dog"]),
        ])
    }

    #[test]
    fn reference_scenario_ranks_by_query_cover() {
        let corpus = reference_corpus();
        let query = lemmas(&["information", "retrieval"]);
        let ranking = rank(&corpus, &query, RankParams::jelinek_mercer(0.5)).unwrap();

        let order: Vec<u32> = ranking.docs.iter().map(|d| d.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(ranking.uncovered.is_empty());
        assert!(!ranking.degenerate);

        // Hand-computed against collection length 43, cf(information) = 3,
        // cf(retrieval) = 2.
        let expected = [0.00621822f32, 0.00386034, 0.00186834, 0.00081125];
        for (doc, want) in ranking.docs.iter().zip(expected) {
            assert!(
                (doc.probability() - want).abs() < 1e-6,
                "doc {}: got {}, want {}",
                doc.doc_id,
                doc.probability(),
                want
            );
        }
    }

    #[test]
    fn ties_break_by_doc_id() {
        let corpus = Corpus::from_lemma_streams(vec![
            lemmas(&["a", "x"]),
            lemmas(&["a", "x"]),
            lemmas(&["a", "x"]),
        ]);
        let ranking = rank(&corpus, &lemmas(&["a"]), RankParams::default()).unwrap();
        let order: Vec<u32> = ranking.docs.iter().map(|d| d.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn ranking_is_deterministic_across_calls() {
        let corpus = reference_corpus();
        let query = lemmas(&["information", "retrieval", "the"]);
        let a = rank(&corpus, &query, RankParams::default()).unwrap();
        let b = rank(&corpus, &query, RankParams::default()).unwrap();
        assert_eq!(a.docs, b.docs);
    }

    #[test]
    fn lambda_one_depends_only_on_own_statistics() {
        // Two corpora sharing doc 0 but differing elsewhere; with lambda = 1
        // the collection term has zero weight.
        let shared = lemmas(&["a", "a", "b"]);
        let c1 = Corpus::from_lemma_streams(vec![shared.clone(), lemmas(&["a", "c"])]);
        let c2 = Corpus::from_lemma_streams(vec![shared, lemmas(&["b", "b", "b", "d"])]);
        let params = RankParams::jelinek_mercer(1.0);

        let s1 = rank(&c1, &lemmas(&["a"]), params).unwrap();
        let s2 = rank(&c2, &lemmas(&["a"]), params).unwrap();
        let doc0_in = |r: &Ranking| r.docs.iter().find(|d| d.doc_id == 0).unwrap().log_prob;
        assert_eq!(doc0_in(&s1), doc0_in(&s2));
        assert!((doc0_in(&s1) - (2.0f32 / 3.0).ln()).abs() < 1e-6);
    }

    #[test]
    fn lambda_zero_scores_all_documents_alike() {
        let corpus = Corpus::from_lemma_streams(vec![
            lemmas(&["a", "a", "a"]),
            lemmas(&["a", "b", "c"]),
            lemmas(&["b", "c", "d"]),
        ]);
        let ranking = rank(&corpus, &lemmas(&["a"]), RankParams::jelinek_mercer(0.0)).unwrap();
        let first = ranking.docs[0].log_prob;
        assert!(ranking.docs.iter().all(|d| d.log_prob == first));
        // All tied: order is doc id ascending.
        let order: Vec<u32> = ranking.docs.iter().map(|d| d.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn more_query_occurrences_never_score_lower() {
        // Same length, same collection apart from the swapped lemma.
        let corpus = Corpus::from_lemma_streams(vec![
            lemmas(&["a", "a", "c"]),
            lemmas(&["a", "b", "c"]),
        ]);
        let ranking = rank(&corpus, &lemmas(&["a"]), RankParams::default()).unwrap();
        assert_eq!(ranking.docs[0].doc_id, 0);
        assert!(ranking.docs[0].log_prob > ranking.docs[1].log_prob);
    }

    #[test]
    fn duplicate_query_lemmas_are_scored_independently() {
        let corpus = reference_corpus();
        let once = rank(&corpus, &lemmas(&["information"]), RankParams::default()).unwrap();
        let twice = rank(
            &corpus,
            &lemmas(&["information", "information"]),
            RankParams::default(),
        )
        .unwrap();
        for (a, b) in once.docs.iter().zip(twice.docs.iter()) {
            assert_eq!(a.doc_id, b.doc_id);
            assert!((b.log_prob - 2.0 * a.log_prob).abs() < 1e-5);
        }
    }

    #[test]
    fn uncovered_lemma_contributes_nothing_and_is_reported() {
        let corpus = reference_corpus();
        let with_unknown = rank(
            &corpus,
            &lemmas(&["information", "zebra", "retrieval", "zebra"]),
            RankParams::default(),
        )
        .unwrap();
        let without = rank(
            &corpus,
            &lemmas(&["information", "retrieval"]),
            RankParams::default(),
        )
        .unwrap();

        assert_eq!(with_unknown.uncovered, vec!["zebra".to_string()]);
        assert!(!with_unknown.degenerate);
        assert_eq!(with_unknown.docs, without.docs);
    }

    #[test]
    fn fully_uncovered_query_degenerates_to_doc_id_order() {
        let corpus = reference_corpus();
        let ranking = rank(&corpus, &lemmas(&["zebra", "quagga"]), RankParams::default()).unwrap();
        assert!(ranking.degenerate);
        assert_eq!(
            ranking.uncovered,
            vec!["zebra".to_string(), "quagga".to_string()]
        );
        let order: Vec<u32> = ranking.docs.iter().map(|d| d.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(ranking.docs.iter().all(|d| d.probability() == 0.0));
    }

    #[test]
    fn lambda_one_missing_lemma_scores_zero_and_ranks_last() {
        let corpus = Corpus::from_lemma_streams(vec![
            lemmas(&["b", "b"]),
            lemmas(&["a", "b"]),
        ]);
        let ranking = rank(&corpus, &lemmas(&["a"]), RankParams::jelinek_mercer(1.0)).unwrap();
        assert_eq!(ranking.docs[0].doc_id, 1);
        assert_eq!(ranking.docs[1].doc_id, 0);
        assert_eq!(ranking.docs[1].log_prob, f32::NEG_INFINITY);
        assert_eq!(ranking.docs[1].probability(), 0.0);
        assert!(!ranking.degenerate);
    }

    #[test]
    fn empty_query_is_an_error() {
        let corpus = reference_corpus();
        assert!(matches!(
            rank(&corpus, &[], RankParams::default()),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let corpus = Corpus::from_lemma_streams(Vec::<Vec<String>>::new());
        assert!(matches!(
            rank(&corpus, &lemmas(&["a"]), RankParams::default()),
            Err(Error::EmptyCorpus)
        ));
    }

    #[test]
    fn zero_length_document_is_an_error() {
        let corpus = Corpus::from_lemma_streams(vec![lemmas(&["a"]), vec![], lemmas(&["b"])]);
        assert!(matches!(
            rank(&corpus, &lemmas(&["a"]), RankParams::default()),
            Err(Error::EmptyDocument { doc_id: 1 })
        ));
    }

    #[test]
    fn retrieve_truncates_to_k() {
        let corpus = reference_corpus();
        let query = lemmas(&["information", "retrieval"]);
        let top2 = retrieve(&corpus, &query, 2, RankParams::default()).unwrap();
        assert_eq!(top2.len(), 2);
        assert_eq!(top2[0].doc_id, 0);
        assert_eq!(top2[1].doc_id, 1);

        let none = retrieve(&corpus, &query, 0, RankParams::default()).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn dirichlet_also_prefers_documents_covering_the_query() {
        let corpus = reference_corpus();
        let ranking = rank(
            &corpus,
            &lemmas(&["information", "retrieval"]),
            RankParams::dirichlet(10.0),
        )
        .unwrap();
        // Both full-cover documents beat the partial- and zero-cover ones.
        let pos = |id: u32| ranking.docs.iter().position(|d| d.doc_id == id).unwrap();
        assert!(pos(0) < pos(2));
        assert!(pos(1) < pos(2));
        assert!(pos(2) < pos(3));
    }
}
