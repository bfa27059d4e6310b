//! Attribute extraction
//!
//! Turns an item's metadata string into its ordered list of
//! [`TraitObservation`]s and appends the synthetic trait-count attribute.

use crate::config::CorpusConfig;
use crate::item::TraitObservation;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawMetadata {
    attributes: Vec<RawAttribute>,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
    trait_type: String,
    value: Value,
}

/// Attributes extracted from one item's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub attributes: Vec<TraitObservation>,
    /// Number of raw attributes, not counting the synthetic one
    pub trait_count: usize,
}

/// Extracts trait observations from metadata payloads
#[derive(Debug, Clone, Default)]
pub struct AttributeExtractor {
    config: CorpusConfig,
}

impl AttributeExtractor {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Parse `metadata` (a JSON document with an `attributes` list) for the
    /// item at corpus position `item`.
    ///
    /// Duplicate trait names are kept as separate observations.
    pub fn extract(&self, item: usize, metadata: &str) -> Result<Extracted> {
        let raw: RawMetadata = serde_json::from_str(metadata)
            .map_err(|e| Error::malformed(item, e.to_string()))?;

        let trait_count = raw.attributes.len();
        let mut attributes = Vec::with_capacity(trait_count + 1);

        for (pos, attr) in raw.attributes.into_iter().enumerate() {
            let value = render_value(&attr.value).ok_or_else(|| {
                Error::malformed(
                    item,
                    format!(
                        "attribute {} ('{}') has unsupported value {}",
                        pos, attr.trait_type, attr.value
                    ),
                )
            })?;
            attributes.push(TraitObservation::new(attr.trait_type, value));
        }

        if self.config.include_trait_count {
            attributes.push(TraitObservation::new(
                self.config.trait_count_name.clone(),
                trait_count.to_string(),
            ));
        }

        Ok(Extracted {
            attributes,
            trait_count,
        })
    }
}

/// Scalar values keep their JSON text; anything else is rejected.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(attributes: Value) -> String {
        json!({ "name": "Eagle #1", "image": "ipfs://img", "attributes": attributes }).to_string()
    }

    #[test]
    fn test_appends_trait_count() {
        let extractor = AttributeExtractor::default();
        let md = metadata(json!([
            {"trait_type": "Background", "value": "Blue"},
            {"trait_type": "Eyes", "value": "Laser"}
        ]));

        let extracted = extractor.extract(0, &md).unwrap();
        assert_eq!(extracted.trait_count, 2);
        assert_eq!(
            extracted.attributes,
            vec![
                TraitObservation::new("Background", "Blue"),
                TraitObservation::new("Eyes", "Laser"),
                TraitObservation::new("Number Of Traits", "2"),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let extractor = AttributeExtractor::default();
        let md = metadata(json!([
            {"trait_type": "Color", "value": "Red"},
            {"trait_type": "Color", "value": "Red"}
        ]));

        let extracted = extractor.extract(3, &md).unwrap();
        assert_eq!(extracted.trait_count, 2);
        let colors = extracted
            .attributes
            .iter()
            .filter(|obs| obs.trait_name == "Color")
            .count();
        assert_eq!(colors, 2);
    }

    #[test]
    fn test_empty_attributes() {
        let extractor = AttributeExtractor::default();
        let extracted = extractor.extract(0, &metadata(json!([]))).unwrap();
        assert_eq!(extracted.trait_count, 0);
        assert_eq!(
            extracted.attributes,
            vec![TraitObservation::new("Number Of Traits", "0")]
        );
    }

    #[test]
    fn test_scalar_values_are_not_normalized() {
        let extractor = AttributeExtractor::default();
        let md = metadata(json!([
            {"trait_type": "Level", "value": 5},
            {"trait_type": "Speed", "value": 1.5},
            {"trait_type": "Shiny", "value": true},
            {"trait_type": "Serial", "value": "01"}
        ]));

        let values: Vec<String> = extractor
            .extract(0, &md)
            .unwrap()
            .attributes
            .into_iter()
            .map(|obs| obs.value)
            .collect();
        assert_eq!(values, vec!["5", "1.5", "true", "01", "4"]);
    }

    #[test]
    fn test_without_trait_count() {
        let extractor = AttributeExtractor::new(CorpusConfig::default().with_trait_count(false));
        let md = metadata(json!([{"trait_type": "Hat", "value": "Cap"}]));

        let extracted = extractor.extract(0, &md).unwrap();
        assert_eq!(extracted.trait_count, 1);
        assert_eq!(extracted.attributes, vec![TraitObservation::new("Hat", "Cap")]);
    }

    #[test]
    fn test_custom_trait_count_name() {
        let extractor =
            AttributeExtractor::new(CorpusConfig::default().with_trait_count_name("Trait Count"));
        let extracted = extractor.extract(0, &metadata(json!([]))).unwrap();
        assert_eq!(extracted.attributes[0].trait_name, "Trait Count");
    }

    #[test]
    fn test_missing_attributes_is_malformed() {
        let extractor = AttributeExtractor::default();
        let err = extractor.extract(7, r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { item: 7, .. }));
    }

    #[test]
    fn test_attributes_not_a_list_is_malformed() {
        let extractor = AttributeExtractor::default();
        let err = extractor
            .extract(1, r#"{"attributes": {"trait_type": "Hat"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { item: 1, .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let extractor = AttributeExtractor::default();
        assert!(matches!(
            extractor.extract(0, "not json"),
            Err(Error::MalformedMetadata { .. })
        ));
    }

    #[test]
    fn test_null_value_is_malformed() {
        let extractor = AttributeExtractor::default();
        let md = metadata(json!([{"trait_type": "Hat", "value": null}]));
        let err = extractor.extract(2, &md).unwrap_err();
        match err {
            Error::MalformedMetadata { item, reason } => {
                assert_eq!(item, 2);
                assert!(reason.contains("Hat"), "unexpected reason: {}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
