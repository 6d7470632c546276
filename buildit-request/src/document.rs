//! Typed lookups into a parsed configuration document.

use serde_json::{Map, Value};

/// Read-only view over one object of a configuration document.
///
/// Every accessor returns `None` when the key is missing or holds a value
/// of the wrong shape.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Document<'a> {
    /// View a value as a document. Non-objects yield `None`.
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// Raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Check if `key` is present, whatever its shape.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// String under `key`.
    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).and_then(Value::as_str)
    }

    /// Nested object under `key`.
    pub fn object(&self, key: &str) -> Option<Document<'a>> {
        self.map.get(key).and_then(Document::new)
    }

    /// Flat `{name: value}` mapping under `key`, in document order.
    ///
    /// Entries whose value is not a scalar are skipped.
    pub fn scalar_map(&self, key: &str) -> Option<Vec<(&'a str, String)>> {
        let map = self.map.get(key)?.as_object()?;
        Some(
            map.iter()
                .filter_map(|(name, value)| scalar(value).map(|v| (name.as_str(), v)))
                .collect(),
        )
    }

    /// Sequence of single-key objects under `key`, flattened to pairs.
    ///
    /// Entries that are not single-key objects with a scalar value are
    /// skipped.
    pub fn pair_list(&self, key: &str) -> Option<Vec<(&'a str, String)>> {
        let items = self.map.get(key)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| {
                    let entry = item.as_object()?;
                    if entry.len() != 1 {
                        return None;
                    }
                    let (name, value) = entry.iter().next()?;
                    scalar(value).map(|v| (name.as_str(), v))
                })
                .collect(),
        )
    }

    /// Keys holding nested objects, in document order.
    pub fn object_keys(self) -> impl Iterator<Item = &'a str> {
        self.map
            .iter()
            .filter(|(_, value)| value.is_object())
            .map(|(key, _)| key.as_str())
    }
}

/// Render a string, number or boolean as text.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_not_a_document() {
        assert!(Document::new(&json!([1, 2])).is_none());
        assert!(Document::new(&json!("text")).is_none());
        assert!(Document::new(&json!({})).is_some());
    }

    #[test]
    fn test_string_rejects_other_shapes() {
        let value = json!({"host": "example.com", "path": 5});
        let doc = Document::new(&value).unwrap();
        assert_eq!(doc.string("host"), Some("example.com"));
        assert_eq!(doc.string("path"), None);
        assert_eq!(doc.string("missing"), None);
    }

    #[test]
    fn test_scalar_map_keeps_order_and_skips_nested() {
        let value = json!({"headers": {"B": "2", "A": 1, "C": {"x": 1}}});
        let doc = Document::new(&value).unwrap();
        assert_eq!(
            doc.scalar_map("headers").unwrap(),
            vec![("B", "2".to_string()), ("A", "1".to_string())]
        );
    }

    #[test]
    fn test_pair_list() {
        let value = json!({
            "queries": [{"page": "2"}, {"a": "1", "b": "2"}, "bare", {"flag": true}]
        });
        let doc = Document::new(&value).unwrap();
        assert_eq!(
            doc.pair_list("queries").unwrap(),
            vec![("page", "2".to_string()), ("flag", "true".to_string())]
        );
    }

    #[test]
    fn test_pair_list_wrong_shape() {
        let value = json!({"queries": {"page": "2"}});
        let doc = Document::new(&value).unwrap();
        assert!(doc.pair_list("queries").is_none());
    }

    #[test]
    fn test_object_keys() {
        let value = json!({"host": "h", "RequestGET": {}, "RequestPOST": {"path": "p"}});
        let doc = Document::new(&value).unwrap();
        assert_eq!(
            doc.object_keys().collect::<Vec<_>>(),
            vec!["RequestGET", "RequestPOST"]
        );
    }
}
