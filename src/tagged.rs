use std::collections::BTreeMap;

use crate::error::{LumicError, LumicResult};

/// Prefix every tag key must carry. Keys outside this namespace belong to the
/// sequence elements themselves, not the side channel.
pub const TAG_PREFIX: char = '_';

/// An ordered sequence carrying side-channel tags (`_speed`, `_ease`, ...)
/// attached to the sequence as a whole. Downstream consumers read tags off
/// whichever derived sequence they receive, so every operation producing a
/// derived sequence copies all tags forward.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaggedSeq<T> {
    items: Vec<T>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    tags: BTreeMap<String, serde_json::Value>,
}

impl<T> TaggedSeq<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            tags: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(items: Vec<T>, tags: BTreeMap<String, serde_json::Value>) -> Self {
        Self { items, tags }
    }

    pub fn with_tag(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> LumicResult<Self> {
        self.set_tag(key, value)?;
        Ok(self)
    }

    pub fn set_tag(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> LumicResult<()> {
        let key = key.into();
        if !key.starts_with(TAG_PREFIX) {
            return Err(LumicError::invalid_input(format!(
                "tag key '{key}' must start with '{TAG_PREFIX}'"
            )));
        }
        self.tags.insert(key, value.into());
        Ok(())
    }

    pub fn tag(&self, key: &str) -> Option<&serde_json::Value> {
        self.tags.get(key)
    }

    pub fn tags(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.tags
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Elementwise transform; tags ride along unchanged.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> TaggedSeq<U> {
        TaggedSeq {
            items: self.items.iter().map(f).collect(),
            tags: self.tags.clone(),
        }
    }
}

impl<T> From<Vec<T>> for TaggedSeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a TaggedSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_propagates_tags() {
        let seq = TaggedSeq::new(vec![1.0, 2.0, 3.0])
            .with_tag("_speed", 2)
            .unwrap();
        let doubled = seq.map(|v| v * 2.0);
        assert_eq!(doubled.items(), &[2.0, 4.0, 6.0]);
        assert_eq!(doubled.tag("_speed"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn rejects_unprefixed_tag_key() {
        let err = TaggedSeq::new(vec![0.0]).with_tag("speed", 1).unwrap_err();
        assert!(err.to_string().contains("invalid input:"));
    }

    #[test]
    fn json_roundtrip_keeps_tags() {
        let seq = TaggedSeq::new(vec![1.0, 2.0])
            .with_tag("_ease", "sin")
            .unwrap();
        let s = serde_json::to_string(&seq).unwrap();
        let de: TaggedSeq<f64> = serde_json::from_str(&s).unwrap();
        assert_eq!(de, seq);
    }
}
