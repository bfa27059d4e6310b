//! Ranked output document
//!
//! The ranking rendered in the persisted collection format: a JSON object
//! keyed by rank whose values carry the token record, the double-encoded
//! rarity breakdown and the total score.

use crate::ranker::{RankedItem, RankedResult};
use raritx_core::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One ranked token in persisted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub token_uri: String,
    pub name: String,
    pub token_address: String,
    pub token_id: String,
    /// Metadata string exactly as received
    pub metadata: String,
    /// JSON array of `{trait_type, value, rarity_score}` encoded as a string
    pub rarity_scores: String,
    pub total_rarity_score: f64,
}

impl OutputEntry {
    pub fn from_ranked(ranked: &RankedItem) -> Result<Self> {
        let rarity_scores = serde_json::to_string(&ranked.breakdown)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let item = &ranked.item;
        Ok(Self {
            token_uri: item.source_uri.clone(),
            name: item.display_name.clone(),
            token_address: item.address.clone(),
            token_id: item.token_id.clone(),
            metadata: item.raw_metadata.clone(),
            rarity_scores,
            total_rarity_score: ranked.total_rarity_score,
        })
    }
}

/// Whole ranking keyed by rank (`"0"`..`"N-1"`), serialized in rank order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedOutput {
    entries: Vec<OutputEntry>,
    collection_name: Option<String>,
}

impl RankedOutput {
    pub fn from_ranked(result: &RankedResult) -> Result<Self> {
        let entries = result
            .iter()
            .map(OutputEntry::from_ranked)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entries,
            collection_name: result.collection_name().map(str::to_string),
        })
    }

    #[inline]
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File name the ranking is conventionally persisted under, derived
    /// from the collection name of the first item in corpus order
    pub fn output_file_name(&self) -> Option<String> {
        self.collection_name
            .as_ref()
            .map(|name| format!("{}Full.json", name))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Two-space indented rendering
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl Serialize for RankedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rank, entry) in self.entries.iter().enumerate() {
            map.serialize_entry(&rank.to_string(), entry)?;
        }
        map.end()
    }
}
