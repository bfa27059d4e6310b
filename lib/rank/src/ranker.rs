//! Rarity ranker
//!
//! Scores every item against a [`TraitFrequencyIndex`] and orders the
//! corpus by descending total rarity.

use crate::index::TraitFrequencyIndex;
use ordered_float::OrderedFloat;
use raritx_core::{Corpus, Error, Item, Result, NULL_VALUE};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, info};

/// Configuration for the scoring pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Score items on the rayon thread pool
    pub parallel: bool,
}

impl RankConfig {
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Weight contributed by one trait of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityEntry {
    pub trait_type: String,
    pub value: String,
    pub rarity_score: f64,
}

/// An item with its rarity breakdown and position in the ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    /// 0-based position in the ranking
    pub rank: usize,
    pub item: Item,
    /// Item observations in extraction order, then null entries in index order
    pub breakdown: Vec<RarityEntry>,
    pub total_rarity_score: f64,
}

impl RankedItem {
    /// Entries for traits the item does not carry
    pub fn null_entries(&self) -> impl Iterator<Item = &RarityEntry> + '_ {
        let native = self.item.attributes.len();
        self.breakdown.iter().skip(native)
    }

    /// Entry with the highest weight; the first one wins on ties
    pub fn top_entry(&self) -> Option<&RarityEntry> {
        self.breakdown.iter().fold(None, |best: Option<&RarityEntry>, entry| match best {
            Some(b) if b.rarity_score >= entry.rarity_score => Some(b),
            _ => Some(entry),
        })
    }
}

/// The whole corpus ordered by descending total rarity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    items: Vec<RankedItem>,
    trait_count: usize,
    collection_name: Option<String>,
}

impl RankedResult {
    #[inline]
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RankedItem> {
        self.items.iter()
    }

    /// Item at `rank`
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&RankedItem> {
        self.items.get(rank)
    }

    /// Ranked position of the item with corpus id `id`
    pub fn rank_of(&self, id: usize) -> Option<usize> {
        self.items.iter().position(|ranked| ranked.item.id == id)
    }

    /// Number of distinct traits the items were scored against
    #[inline]
    pub fn trait_count(&self) -> usize {
        self.trait_count
    }

    /// Collection name of the first item in corpus order
    #[inline]
    pub fn collection_name(&self) -> Option<&str> {
        self.collection_name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<RankedItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedItem;
    type IntoIter = std::slice::Iter<'a, RankedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Scores and orders a corpus against its frequency index
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankConfig,
}

impl Ranker {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank `corpus`, which must be the corpus `index` was built from.
    ///
    /// Items with equal totals keep their corpus order.
    pub fn rank(&self, corpus: Corpus, index: &TraitFrequencyIndex) -> Result<RankedResult> {
        if corpus.len() != index.corpus_size() {
            return Err(Error::InternalConsistency(format!(
                "index built over {} items, corpus has {}",
                index.corpus_size(),
                corpus.len()
            )));
        }

        debug!(
            items = corpus.len(),
            parallel = self.config.parallel,
            "scoring corpus"
        );

        let collection_name = corpus.collection_name().map(str::to_string);
        let items = corpus.into_items();
        let mut scored: Vec<RankedItem> = if self.config.parallel {
            items
                .into_par_iter()
                .map(|item| Self::score(item, index))
                .collect::<Result<Vec<_>>>()?
        } else {
            items
                .into_iter()
                .map(|item| Self::score(item, index))
                .collect::<Result<Vec<_>>>()?
        };

        // Stable, so ties stay in corpus order.
        scored.sort_by_key(|ranked| Reverse(OrderedFloat(ranked.total_rarity_score)));
        for (rank, ranked) in scored.iter_mut().enumerate() {
            ranked.rank = rank;
        }

        if let Some(best) = scored.first() {
            info!(
                items = scored.len(),
                best_token = %best.item.token_id,
                best_score = best.total_rarity_score,
                "corpus ranked"
            );
        }

        Ok(RankedResult {
            items: scored,
            trait_count: index.len(),
            collection_name,
        })
    }

    /// Rarity breakdown and total for a single item
    pub fn score_item(
        &self,
        item: &Item,
        index: &TraitFrequencyIndex,
    ) -> Result<(Vec<RarityEntry>, f64)> {
        Self::tally(item, index)
    }

    fn score(item: Item, index: &TraitFrequencyIndex) -> Result<RankedItem> {
        let (breakdown, total_rarity_score) = Self::tally(&item, index)?;
        Ok(RankedItem {
            rank: 0,
            item,
            breakdown,
            total_rarity_score,
        })
    }

    fn tally(item: &Item, index: &TraitFrequencyIndex) -> Result<(Vec<RarityEntry>, f64)> {
        let breakdown = Self::breakdown(item, index)?;
        let total = breakdown.iter().map(|entry| entry.rarity_score).sum();
        Ok((breakdown, total))
    }

    fn breakdown(item: &Item, index: &TraitFrequencyIndex) -> Result<Vec<RarityEntry>> {
        let carried = item.trait_lookup();
        let mut entries = Vec::with_capacity(item.attributes.len() + index.len());

        for obs in &item.attributes {
            let table = index.table(&obs.trait_name).ok_or_else(|| {
                Error::InternalConsistency(format!(
                    "item {} carries trait '{}' missing from the index",
                    item.id, obs.trait_name
                ))
            })?;
            entries.push(RarityEntry {
                trait_type: obs.trait_name.clone(),
                value: obs.value.clone(),
                rarity_score: table.weight(&obs.value)?,
            });
        }

        for table in index.tables() {
            if carried.contains_key(table.trait_name()) {
                continue;
            }
            entries.push(RarityEntry {
                trait_type: table.trait_name().to_string(),
                value: NULL_VALUE.to_string(),
                rarity_score: table.null_weight().map_err(|_| {
                    Error::InternalConsistency(format!(
                        "item {} lacks trait '{}' but its null bucket holds {} items",
                        item.id,
                        table.trait_name(),
                        table.null_count()
                    ))
                })?,
            });
        }

        Ok(entries)
    }
}
