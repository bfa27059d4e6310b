//! # raritx Rank
//!
//! Trait frequency statistics and rarity ranking over an extracted
//! [`Corpus`](raritx_core::Corpus).
//!
//! ## Example
//!
//! ```rust
//! use raritx_core::{Corpus, CorpusConfig};
//! use raritx_rank::{Ranker, RankedOutput, TraitFrequencyIndex};
//!
//! let json = r#"{
//!     "total": 2,
//!     "result": [
//!         {"token_uri": "u0", "name": "Eagles", "token_address": "0xabc", "token_id": "0",
//!          "metadata": "{\"attributes\":[{\"trait_type\":\"Eyes\",\"value\":\"Laser\"}]}"},
//!         {"token_uri": "u1", "name": "Eagles", "token_address": "0xabc", "token_id": "1",
//!          "metadata": "{\"attributes\":[]}"}
//!     ]
//! }"#;
//!
//! let corpus = Corpus::from_json_str(json, &CorpusConfig::default()).unwrap();
//! let index = TraitFrequencyIndex::build(&corpus).unwrap();
//! let ranked = Ranker::default().rank(corpus, &index).unwrap();
//! assert_eq!(ranked.len(), 2);
//!
//! let output = RankedOutput::from_ranked(&ranked).unwrap();
//! let json = output.to_json_string_pretty().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Corpus    │────>│    Index    │────>│   Ranker    │
//! │ (extracted) │     │ (tables)    │     │ (scores)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        ^
//!       └────────────────────────────────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │   Output    │
//!                                         │  (by rank)  │
//!                                         └─────────────┘
//! ```

pub mod index;
pub mod output;
pub mod ranker;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use index::{TraitFrequencyIndex, TraitFrequencyTable};
pub use output::{OutputEntry, RankedOutput};
pub use ranker::{RankConfig, RankedItem, RankedResult, Ranker, RarityEntry};
pub use stats::RankingStats;
