//! `lemrank` CLI: query-likelihood ranking over a corpus file.

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use lemrank::corpus::Corpus;
#[cfg(feature = "cli")]
use lemrank::lemmatize::{DictionaryLemmatizer, Lemmatizer};
#[cfg(feature = "cli")]
use lemrank::query_likelihood::{rank, RankParams, Ranking};
#[cfg(feature = "cli")]
use lemrank::smoothing::Smoothing;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Query-likelihood ranking CLI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SmoothingArg {
    /// Jelinek-Mercer interpolation (uses --lambda).
    JelinekMercer,
    /// Dirichlet prior (uses --mu).
    Dirichlet,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank the documents of a corpus file (one document per line) against a query.
    Rank {
        /// Path to a corpus file (one document per line).
        #[arg(short, long)]
        input: PathBuf,

        /// Smoothing method.
        #[arg(long, value_enum, default_value = "jelinek-mercer")]
        smoothing: SmoothingArg,

        /// Jelinek-Mercer interpolation weight (clamped to [0, 1]).
        #[arg(long, default_value_t = 0.5)]
        lambda: f32,

        /// Dirichlet prior strength (clamped to >= 0).
        #[arg(long, default_value_t = 1000.0)]
        mu: f32,

        /// Print at most this many results (all documents by default).
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Emit the ranking as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Query words.
        query: Vec<String>,
    },

    /// Rank the built-in four-document example corpus for "information retrieval".
    Demo {
        /// Jelinek-Mercer interpolation weight (clamped to [0, 1]).
        #[arg(long, default_value_t = 0.5)]
        lambda: f32,
    },
}

#[cfg(feature = "cli")]
fn print_ranking(ranking: &Ranking, query: &[String], top_k: Option<usize>) {
    println!("Ranking for {:?}:", query);
    let shown = top_k.unwrap_or(ranking.docs.len());
    for doc in ranking.docs.iter().take(shown) {
        println!(
            "  Doc {}: p(q|d) {:.4e} (log {:.4})",
            doc.doc_id,
            doc.probability(),
            doc.log_prob
        );
    }
    if ranking.degenerate {
        println!("note: no query lemma occurs in the collection; all documents tie at 0");
    } else if !ranking.uncovered.is_empty() {
        println!("note: not in collection: {:?}", ranking.uncovered);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "cli")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let args = Args::parse();

        match args.command {
            Commands::Rank {
                input,
                smoothing,
                lambda,
                mu,
                top_k,
                json,
                query,
            } => {
                let text = std::fs::read_to_string(&input)?;
                let lemmatizer = DictionaryLemmatizer::new();
                let corpus = Corpus::from_texts(&lemmatizer, text.lines());
                let query_lemmas = lemmatizer.lemmatize(&query.join(" "));

                let params = RankParams {
                    smoothing: match smoothing {
                        SmoothingArg::JelinekMercer => Smoothing::jelinek_mercer(lambda),
                        SmoothingArg::Dirichlet => Smoothing::dirichlet(mu),
                    },
                };
                let mut ranking = rank(&corpus, &query_lemmas, params)?;
                if let Some(k) = top_k {
                    ranking.docs.truncate(k);
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(&ranking)?);
                } else {
                    print_ranking(&ranking, &query_lemmas, top_k);
                }
            }
            Commands::Demo { lambda } => {
                // The original demo corpus, lemmatized by a fixed exception
                // table standing in for the external annotator.
                let lemmatizer = DictionaryLemmatizer::new()
                    .with_exception("is", "be")
                    .with_exception("took", "take")
                    .with_exception("loves", "love")
                    .with_exception("emails", "email");
                let corpus = Corpus::from_texts(
                    &lemmatizer,
                    [
                        "information retrieval is the most awesome class I ever took",
                        "the retrieval of private information from your emails is a job that the NSA loves",
                        "in the school of information you can learn about data science",
                        "the labrador retriever is a great dog",
                    ],
                );
                let query = lemmatizer.lemmatize("information retrieval");
                let ranking = rank(&corpus, &query, RankParams::jelinek_mercer(lambda))?;
                print_ranking(&ranking, &query, None);
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    println!("CLI feature is disabled. Build with --features cli to enable.");

    Ok(())
}
