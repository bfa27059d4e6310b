//! # raritx Core
//!
//! Core library for the raritx rarity ranker.
//!
//! This crate provides the input side of the pipeline:
//!
//! - [`CollectionDocument`] - The collection document produced by a collection source
//! - [`Corpus`] - Every item of a collection with its extracted attributes
//! - [`AttributeExtractor`] - Metadata parsing and the synthetic trait count
//! - [`TraitObservation`] - A `(trait name, value)` pair
//!
//! ## Example
//!
//! ```rust
//! use raritx_core::{Corpus, CorpusConfig};
//!
//! let json = r#"{
//!     "total": 1,
//!     "result": [{
//!         "token_uri": "https://ipfs.io/ipfs/cid/0",
//!         "name": "Eagles",
//!         "token_address": "0xabc",
//!         "token_id": "0",
//!         "metadata": "{\"attributes\":[{\"trait_type\":\"Eyes\",\"value\":\"Laser\"}]}"
//!     }]
//! }"#;
//!
//! let corpus = Corpus::from_json_str(json, &CorpusConfig::default()).unwrap();
//! let item = corpus.get(0).unwrap();
//! assert_eq!(item.attributes.len(), 2); // Eyes + Number Of Traits
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod extract;
pub mod item;

pub use collection::{CollectionDocument, Corpus, RawItem};
pub use config::{CorpusConfig, DEFAULT_TRAIT_COUNT_NAME};
pub use error::{Error, Result};
pub use extract::{AttributeExtractor, Extracted};
pub use item::{Item, TraitObservation, TraitValues, NULL_VALUE};
