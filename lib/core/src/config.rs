use serde::{Deserialize, Serialize};

/// Name of the synthetic trait appended to every item
pub const DEFAULT_TRAIT_COUNT_NAME: &str = "Number Of Traits";

/// Configuration for loading and extracting a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Trait name used for the per-item attribute count
    pub trait_count_name: String,
    /// Append the attribute count as a synthetic trait
    pub include_trait_count: bool,
    /// Fail when the declared `total` differs from the number of items
    pub strict_total: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            trait_count_name: DEFAULT_TRAIT_COUNT_NAME.to_string(),
            include_trait_count: true,
            strict_total: true,
        }
    }
}

impl CorpusConfig {
    #[inline]
    #[must_use]
    pub fn with_trait_count_name(mut self, name: impl Into<String>) -> Self {
        self.trait_count_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_trait_count(mut self, enabled: bool) -> Self {
        self.include_trait_count = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_strict_total(mut self, strict: bool) -> Self {
        self.strict_total = strict;
        self
    }
}
