use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Value recorded for a trait an item does not carry
pub const NULL_VALUE: &str = "null";

/// A single `(trait name, value)` pair carried by an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitObservation {
    #[serde(rename = "trait_type")]
    pub trait_name: String,
    pub value: String,
}

impl TraitObservation {
    #[inline]
    #[must_use]
    pub fn new(trait_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_name: trait_name.into(),
            value: value.into(),
        }
    }
}

/// Values an item carries for one trait, in extraction order.
/// Almost always a single value; duplicates are kept.
pub type TraitValues<'a> = SmallVec<[&'a str; 1]>;

/// One corpus entry with its extracted attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Position in the input collection
    pub id: usize,
    pub display_name: String,
    pub source_uri: String,
    pub address: String,
    pub token_id: String,
    /// Metadata string exactly as received
    pub raw_metadata: String,
    /// Raw attributes followed by the synthetic trait count (if enabled)
    pub attributes: Vec<TraitObservation>,
    /// Number of raw attributes, excluding the synthetic entry
    pub trait_count: usize,
}

impl Item {
    /// Map from trait name to the values this item carries for it
    pub fn trait_lookup(&self) -> AHashMap<&str, TraitValues<'_>> {
        let mut lookup: AHashMap<&str, TraitValues<'_>> =
            AHashMap::with_capacity(self.attributes.len());
        for obs in &self.attributes {
            lookup
                .entry(obs.trait_name.as_str())
                .or_default()
                .push(obs.value.as_str());
        }
        lookup
    }
}
