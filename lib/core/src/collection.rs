use crate::config::CorpusConfig;
use crate::extract::AttributeExtractor;
use crate::item::Item;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One token record as produced by the collection source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub token_uri: String,
    pub name: String,
    pub token_address: String,
    pub token_id: String,
    /// JSON document encoded as a string
    pub metadata: String,
}

/// The collection document handed over by the collection source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    pub result: Vec<RawItem>,
}

impl CollectionDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedCollection(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::MalformedCollection(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

/// A fully extracted corpus, ready for indexing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    items: Vec<Item>,
}

impl Corpus {
    /// Extract every item of `document`.
    ///
    /// Any malformed item aborts the whole load.
    pub fn from_document(document: CollectionDocument, config: &CorpusConfig) -> Result<Self> {
        let actual = document.result.len();
        if document.total != actual as u64 {
            if config.strict_total {
                return Err(Error::TotalMismatch {
                    declared: document.total,
                    actual,
                });
            }
            warn!(
                declared = document.total,
                actual, "collection total differs from result length, using result length"
            );
        }

        let extractor = AttributeExtractor::new(config.clone());
        let items = document
            .result
            .into_iter()
            .enumerate()
            .map(|(id, raw)| {
                let extracted = extractor.extract(id, &raw.metadata)?;
                Ok(Item {
                    id,
                    display_name: raw.name,
                    source_uri: raw.token_uri,
                    address: raw.token_address,
                    token_id: raw.token_id,
                    raw_metadata: raw.metadata,
                    attributes: extracted.attributes,
                    trait_count: extracted.trait_count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(items = items.len(), "corpus extracted");
        Ok(Self { items })
    }

    pub fn from_json_str(json: &str, config: &CorpusConfig) -> Result<Self> {
        Self::from_document(CollectionDocument::from_json_str(json)?, config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, config: &CorpusConfig) -> Result<Self> {
        Self::from_document(CollectionDocument::from_path(path)?, config)
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Item> {
        self.items.get(id)
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

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Name of the collection, taken from the first item
    pub fn collection_name(&self) -> Option<&str> {
        self.items.first().map(|item| item.display_name.as_str())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn document(attribute_sets: &[serde_json::Value], total: u64) -> String {
        let result: Vec<_> = attribute_sets
            .iter()
            .enumerate()
            .map(|(i, attrs)| {
                json!({
                    "token_uri": format!("https://ipfs.io/ipfs/cid/{}", i),
                    "name": "Eagles",
                    "token_address": "0xabc",
                    "token_id": i.to_string(),
                    "metadata": json!({ "attributes": attrs }).to_string(),
                })
            })
            .collect();
        json!({ "total": total, "page": 0, "page_size": 100, "result": result }).to_string()
    }

    #[test]
    fn test_load_assigns_ids_in_order() {
        let json = document(
            &[
                json!([{"trait_type": "Hat", "value": "Cap"}]),
                json!([]),
            ],
            2,
        );
        let corpus = Corpus::from_json_str(&json, &CorpusConfig::default()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.collection_name(), Some("Eagles"));
        let second = corpus.get(1).unwrap();
        assert_eq!(second.id, 1);
        assert_eq!(second.token_id, "1");
        assert_eq!(second.trait_count, 0);
        assert_eq!(second.raw_metadata, r#"{"attributes":[]}"#);
    }

    #[test]
    fn test_total_mismatch_strict() {
        let json = document(&[json!([])], 3);
        let err = Corpus::from_json_str(&json, &CorpusConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::TotalMismatch {
                declared: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_total_mismatch_lenient() {
        let json = document(&[json!([])], 3);
        let config = CorpusConfig::default().with_strict_total(false);
        let corpus = Corpus::from_json_str(&json, &config).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_malformed_item_aborts_load() {
        let mut doc: serde_json::Value =
            serde_json::from_str(&document(&[json!([]), json!([])], 2)).unwrap();
        doc["result"][1]["metadata"] = json!("{\"attrs\": []}");

        let err = Corpus::from_json_str(&doc.to_string(), &CorpusConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { item: 1, .. }));
    }

    #[test]
    fn test_malformed_collection() {
        let err = Corpus::from_json_str(r#"{"total": 1}"#, &CorpusConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedCollection(_)));
    }

    #[test]
    fn test_empty_collection() {
        let corpus = Corpus::from_json_str(&document(&[], 0), &CorpusConfig::default()).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.collection_name(), None);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(document(&[json!([{"trait_type": "Eyes", "value": "Laser"}])], 1).as_bytes())
            .unwrap();

        let corpus = Corpus::from_path(file.path(), &CorpusConfig::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.items()[0].attributes.len(), 2);
    }
}
