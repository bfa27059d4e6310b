//! # raritx
//!
//! Trait rarity scoring and ranking for NFT collections.
//!
//! raritx takes a collection document (tokens with their metadata), counts
//! how often every trait value occurs across the collection, scores each
//! token by the inverse frequency of the values it carries and returns the
//! collection ordered from rarest to most common.
//!
//! ## Scoring
//!
//! - **Inverse frequency**: a value seen `c` times in a collection of `n`
//!   tokens is worth `n / c`
//! - **Null buckets**: a token without a trait scores that trait's
//!   "null" bucket, so missing traits can be rare too
//! - **Trait count**: the number of traits a token has is scored as the
//!   synthetic trait `Number Of Traits`
//! - **Stable order**: equal totals keep collection order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raritx::prelude::*;
//!
//! let ranked = rank_path("collection.json", &RarityConfig::default()).unwrap();
//! for item in ranked.iter().take(10) {
//!     println!("#{} token {} score {:.2}", item.rank, item.item.token_id, item.total_rarity_score);
//! }
//!
//! let output = RankedOutput::from_ranked(&ranked).unwrap();
//! let json = output.to_json_string_pretty().unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - [`raritx-core`](https://docs.rs/raritx-core) - Collection documents, items, attribute extraction
//! - [`raritx-rank`](https://docs.rs/raritx-rank) - Frequency index, ranker, output document

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// Re-export core types
pub use raritx_core::{
    AttributeExtractor, CollectionDocument, Corpus, CorpusConfig, Error, Item, RawItem, Result,
    TraitObservation, DEFAULT_TRAIT_COUNT_NAME, NULL_VALUE,
};

// Re-export ranking
pub use raritx_rank::{
    OutputEntry, RankConfig, RankedItem, RankedOutput, RankedResult, Ranker, RankingStats,
    RarityEntry, TraitFrequencyIndex, TraitFrequencyTable,
};

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityConfig {
    pub corpus: CorpusConfig,
    pub rank: RankConfig,
}

/// Extract, index and rank an in-memory collection document
pub fn rank_document(document: CollectionDocument, config: &RarityConfig) -> Result<RankedResult> {
    let corpus = Corpus::from_document(document, &config.corpus)?;
    rank_corpus(corpus, config)
}

/// Same as [`rank_document`] for a collection document in JSON form
pub fn rank_json_str(json: &str, config: &RarityConfig) -> Result<RankedResult> {
    rank_document(CollectionDocument::from_json_str(json)?, config)
}

/// Same as [`rank_document`] for a collection document stored on disk
pub fn rank_path<P: AsRef<Path>>(path: P, config: &RarityConfig) -> Result<RankedResult> {
    rank_document(CollectionDocument::from_path(path)?, config)
}

/// Index and rank an already extracted corpus
pub fn rank_corpus(corpus: Corpus, config: &RarityConfig) -> Result<RankedResult> {
    let index = TraitFrequencyIndex::build(&corpus)?;
    let ranked = Ranker::new(config.rank.clone()).rank(corpus, &index)?;
    info!(
        collection = ranked.collection_name().unwrap_or(""),
        items = ranked.len(),
        traits = ranked.trait_count(),
        "collection ranked"
    );
    Ok(ranked)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        rank_corpus, rank_document, rank_json_str, rank_path, CollectionDocument, Corpus,
        CorpusConfig, Error, RankConfig, RankedOutput, RankedResult, Ranker, RankingStats,
        RarityConfig, Result, TraitFrequencyIndex,
    };
}
