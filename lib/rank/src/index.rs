//! Trait frequency index
//!
//! One [`TraitFrequencyTable`] per distinct trait name, built in a single
//! pass over a fully extracted [`Corpus`]. Each table counts the observed
//! values of its trait plus a null bucket for items without it, and turns
//! those counts into rarity weights (`corpus_size / count`).

use ahash::AHashMap;
use raritx_core::{Corpus, Error, Result, TraitObservation, NULL_VALUE};
use tracing::{debug, info};

/// Frequency statistics and rarity weights for one trait
#[derive(Debug, Clone, PartialEq)]
pub struct TraitFrequencyTable {
    trait_name: String,
    corpus_size: usize,
    /// Observed values in order of first appearance
    values: Vec<ValueStat>,
    positions: AHashMap<String, usize>,
    observations: u64,
    /// `corpus_size - observations`; negative when items repeat the trait
    null_count: i64,
    null_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct ValueStat {
    value: String,
    count: u64,
    weight: f64,
}

impl TraitFrequencyTable {
    fn from_tally(trait_name: String, tally: ValueTally, corpus_size: usize) -> Self {
        let observations: u64 = tally.values.iter().map(|(_, count)| *count).sum();
        let null_count = corpus_size as i64 - observations as i64;

        let values: Vec<ValueStat> = tally
            .values
            .into_iter()
            .map(|(value, count)| ValueStat {
                weight: corpus_size as f64 / count as f64,
                value,
                count,
            })
            .collect();

        Self {
            trait_name,
            corpus_size,
            values,
            positions: tally.positions,
            observations,
            null_count,
            null_weight: rarity_weight(corpus_size, null_count),
        }
    }

    #[inline]
    pub fn trait_name(&self) -> &str {
        &self.trait_name
    }

    /// Number of observations of this trait across the corpus
    #[inline]
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Occurrence count of the null bucket
    #[inline]
    pub fn null_count(&self) -> i64 {
        self.null_count
    }

    /// Occurrence count of an observed value
    pub fn count(&self, value: &str) -> Option<u64> {
        self.positions.get(value).map(|&pos| self.values[pos].count)
    }

    /// Observed values with their counts, in order of first appearance
    pub fn counts(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.values.iter().map(|v| (v.value.as_str(), v.count))
    }

    /// Number of distinct observed values (the null bucket excluded)
    #[inline]
    pub fn distinct_values(&self) -> usize {
        self.values.len()
    }

    /// Sum of every bucket including null; equals the corpus size
    pub fn total(&self) -> i64 {
        self.counts().map(|(_, count)| count as i64).sum::<i64>() + self.null_count
    }

    /// Rarity weight of an observed value
    pub fn weight(&self, value: &str) -> Result<f64> {
        match self.positions.get(value) {
            Some(&pos) => Ok(self.values[pos].weight),
            None => Err(Error::UnknownValue {
                trait_type: self.trait_name.clone(),
                value: value.to_string(),
            }),
        }
    }

    /// Rarity weight of the null bucket
    pub fn null_weight(&self) -> Result<f64> {
        self.null_weight.ok_or_else(|| Error::UndefinedWeight {
            trait_type: self.trait_name.clone(),
            value: NULL_VALUE.to_string(),
            count: self.null_count,
        })
    }

    fn verify(&self) -> Result<()> {
        let recounted: u64 = self.counts().map(|(_, count)| count).sum();
        if recounted != self.observations {
            return Err(Error::InternalConsistency(format!(
                "trait '{}' values hold {} observations, table records {}",
                self.trait_name, recounted, self.observations
            )));
        }
        if self.positions.len() != self.values.len() {
            return Err(Error::InternalConsistency(format!(
                "trait '{}' has {} values but {} positions",
                self.trait_name,
                self.values.len(),
                self.positions.len()
            )));
        }
        if self.total() != self.corpus_size as i64 {
            return Err(Error::InternalConsistency(format!(
                "trait '{}' buckets sum to {}, corpus size is {}",
                self.trait_name,
                self.total(),
                self.corpus_size
            )));
        }
        Ok(())
    }
}

/// `corpus_size / count`, undefined for non-positive counts
#[inline]
fn rarity_weight(corpus_size: usize, count: i64) -> Option<f64> {
    (count > 0).then(|| corpus_size as f64 / count as f64)
}

/// Per-trait value counts gathered during the scan
#[derive(Debug, Default)]
struct ValueTally {
    values: Vec<(String, u64)>,
    positions: AHashMap<String, usize>,
}

impl ValueTally {
    fn observe(&mut self, value: &str) {
        match self.positions.get(value) {
            Some(&pos) => self.values[pos].1 += 1,
            None => {
                self.positions.insert(value.to_string(), self.values.len());
                self.values.push((value.to_string(), 1));
            }
        }
    }
}

/// Accumulator for the single scan over all observations
#[derive(Debug, Default)]
struct CorpusTally {
    order: Vec<String>,
    tallies: AHashMap<String, ValueTally>,
}

impl CorpusTally {
    fn observe(mut self, obs: &TraitObservation) -> Self {
        if !self.tallies.contains_key(&obs.trait_name) {
            self.order.push(obs.trait_name.clone());
        }
        self.tallies
            .entry(obs.trait_name.clone())
            .or_default()
            .observe(&obs.value);
        self
    }
}

/// Frequency tables for every trait observed in a corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitFrequencyIndex {
    corpus_size: usize,
    tables: Vec<TraitFrequencyTable>,
    positions: AHashMap<String, usize>,
}

impl TraitFrequencyIndex {
    /// Build the index over the whole corpus.
    ///
    /// Duplicate observations of a trait within one item are counted once
    /// per observation, for both the value counts and the null bucket.
    pub fn build(corpus: &Corpus) -> Result<Self> {
        let corpus_size = corpus.len();
        debug!(corpus_size, "building trait frequency index");

        let CorpusTally { order, mut tallies } = corpus
            .iter()
            .flat_map(|item| item.attributes.iter())
            .fold(CorpusTally::default(), CorpusTally::observe);

        let mut tables = Vec::with_capacity(order.len());
        let mut positions = AHashMap::with_capacity(order.len());
        for trait_name in order {
            let tally = tallies.remove(&trait_name).ok_or_else(|| {
                Error::InternalConsistency(format!("no tally for trait '{}'", trait_name))
            })?;
            positions.insert(trait_name.clone(), tables.len());
            tables.push(TraitFrequencyTable::from_tally(trait_name, tally, corpus_size));
        }

        let index = Self {
            corpus_size,
            tables,
            positions,
        };
        index.verify()?;

        info!(
            corpus_size,
            traits = index.tables.len(),
            "trait frequency index built"
        );
        Ok(index)
    }

    /// Check that every table's buckets sum to the corpus size
    pub fn verify(&self) -> Result<()> {
        self.tables.iter().try_for_each(TraitFrequencyTable::verify)
    }

    #[inline]
    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// Number of distinct traits
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables in order of first trait appearance
    #[inline]
    pub fn tables(&self) -> &[TraitFrequencyTable] {
        &self.tables
    }

    pub fn table(&self, trait_name: &str) -> Option<&TraitFrequencyTable> {
        self.positions.get(trait_name).map(|&pos| &self.tables[pos])
    }

    pub fn trait_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(TraitFrequencyTable::trait_name)
    }

    fn require(&self, trait_name: &str) -> Result<&TraitFrequencyTable> {
        self.table(trait_name)
            .ok_or_else(|| Error::UnknownTrait(trait_name.to_string()))
    }

    /// Weight of `value` for `trait_name`.
    ///
    /// An observed value always wins; otherwise `"null"` resolves to the
    /// null bucket.
    pub fn weight(&self, trait_name: &str, value: &str) -> Result<f64> {
        let table = self.require(trait_name)?;
        match table.weight(value) {
            Err(Error::UnknownValue { .. }) if value == NULL_VALUE => table.null_weight(),
            other => other,
        }
    }

    pub fn null_weight(&self, trait_name: &str) -> Result<f64> {
        self.require(trait_name)?.null_weight()
    }
}
