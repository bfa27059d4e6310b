//! Summary statistics for a ranking

use crate::ranker::RankedResult;
use serde::Serialize;

/// Summary of a ranked corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    /// Number of ranked items
    pub items: usize,
    /// Number of distinct traits, the synthetic count included
    pub traits: usize,
    pub best_score: f64,
    pub worst_score: f64,
    pub mean_score: f64,
    /// Trait with the highest weight in the top-ranked item
    pub top_contributing_trait: Option<String>,
}

impl RankingStats {
    pub fn compute(result: &RankedResult) -> Self {
        let (first, last) = match (result.items().first(), result.items().last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Self {
                    items: 0,
                    traits: result.trait_count(),
                    best_score: 0.0,
                    worst_score: 0.0,
                    mean_score: 0.0,
                    top_contributing_trait: None,
                }
            }
        };

        let sum: f64 = result.iter().map(|r| r.total_rarity_score).sum();

        Self {
            items: result.len(),
            traits: result.trait_count(),
            best_score: first.total_rarity_score,
            worst_score: last.total_rarity_score,
            mean_score: sum / result.len() as f64,
            top_contributing_trait: first.top_entry().map(|e| e.trait_type.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TraitFrequencyIndex;
    use crate::ranker::Ranker;
    use crate::test_support::corpus;
    use serde_json::json;

    #[test]
    fn test_stats() {
        let corpus = corpus(&[
            json!([{"trait_type": "Hat", "value": "Cap"}]),
            json!([{"trait_type": "Hat", "value": "Cap"}]),
            json!([{"trait_type": "Hat", "value": "Crown"}]),
            json!([{"trait_type": "Hat", "value": "Cap"}]),
        ]);
        let index = TraitFrequencyIndex::build(&corpus).unwrap();
        let ranked = Ranker::default().rank(corpus, &index).unwrap();
        let stats = RankingStats::compute(&ranked);

        assert_eq!(stats.items, 4);
        assert_eq!(stats.traits, 2);
        assert_eq!(stats.best_score, 5.0);
        assert!((stats.worst_score - (1.0 + 4.0 / 3.0)).abs() < 1e-12);
        assert!(stats.mean_score < stats.best_score);
        assert_eq!(stats.top_contributing_trait.as_deref(), Some("Hat"));
    }

    #[test]
    fn test_stats_empty() {
        let stats = RankingStats::compute(&RankedResult::default());
        assert_eq!(stats.items, 0);
        assert_eq!(stats.top_contributing_trait, None);
    }
}
