//! Smoothed unigram term probabilities.
//!
//! The kernel is index-free: it maps a document's term frequency and length
//! plus the collection probability \(P(t|C)\) to a smoothed \(P(t|d)\).
//! Parameters are explicit configuration — nothing here is a hard-coded
//! constant of the engine.

/// Smoothing method for the document language model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Jelinek-Mercer: linear interpolation of the document and collection
    /// models. `lambda` is the document-model weight, in `[0, 1]`.
    JelinekMercer {
        /// Interpolation weight.
        lambda: f32,
    },
    /// Dirichlet: Bayesian smoothing with automatic length adaptation.
    /// `mu >= 0` is the prior strength.
    Dirichlet {
        /// Prior strength.
        mu: f32,
    },
}

impl Default for Smoothing {
    fn default() -> Self {
        // The reference behavior for this engine: equal-weight interpolation.
        Self::JelinekMercer { lambda: 0.5 }
    }
}

impl Smoothing {
    /// Jelinek-Mercer smoothing with `lambda` clamped to `[0, 1]`.
    pub fn jelinek_mercer(lambda: f32) -> Self {
        Self::JelinekMercer {
            lambda: lambda.clamp(0.0, 1.0),
        }
    }

    /// Dirichlet smoothing with `mu` clamped to `>= 0`.
    pub fn dirichlet(mu: f32) -> Self {
        Self::Dirichlet { mu: mu.max(0.0) }
    }

    /// Smoothed \(P(t|d)\) from the term frequency in the document, the
    /// document length, and the collection probability \(P(t|C)\).
    ///
    /// Parameters are re-clamped here so a hand-constructed variant cannot
    /// produce probabilities outside `[0, 1]`.
    pub fn probability(&self, tf: u32, doc_len: u32, p_collection: f32) -> f32 {
        let p_collection = p_collection.clamp(0.0, 1.0);
        match *self {
            Self::JelinekMercer { lambda } => {
                let lambda = lambda.clamp(0.0, 1.0);
                let p_doc = if doc_len > 0 {
                    tf as f32 / doc_len as f32
                } else {
                    0.0
                };
                lambda * p_doc + (1.0 - lambda) * p_collection
            }
            Self::Dirichlet { mu } => {
                let mu = mu.max(0.0);
                let denom = doc_len as f32 + mu;
                if denom > 0.0 {
                    (tf as f32 + mu * p_collection) / denom
                } else {
                    0.0
                }
            }
        }
    }
}
