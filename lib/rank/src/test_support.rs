use raritx_core::{CollectionDocument, Corpus, CorpusConfig};
use serde_json::{json, Value};

/// Collection document with one item per attribute list
pub fn document(attribute_sets: &[Value]) -> CollectionDocument {
    let result: Vec<_> = attribute_sets
        .iter()
        .enumerate()
        .map(|(i, attrs)| {
            json!({
                "token_uri": format!("ipfs://cid/{}", i),
                "name": "Eagles",
                "token_address": "0xabc",
                "token_id": i.to_string(),
                "metadata": json!({ "attributes": attrs }).to_string(),
            })
        })
        .collect();
    let doc = json!({ "total": attribute_sets.len(), "result": result });
    serde_json::from_value(doc).unwrap()
}

pub fn corpus(attribute_sets: &[Value]) -> Corpus {
    Corpus::from_document(document(attribute_sets), &CorpusConfig::default()).unwrap()
}
