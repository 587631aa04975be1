// src/rule_tree/document.rs: the ordered key/value tree.
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered map from selector or at-rule key to [`Rule`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: Vec<(String, Rule)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A declaration value, or `""` for a blockless at-rule.
    Value(String),
    Block(Document),
}

impl Rule {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Rule::Value(value) => Some(value),
            Rule::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Document> {
        match self {
            Rule::Block(block) => Some(block),
            Rule::Value(_) => None,
        }
    }
}

impl From<&str> for Rule {
    fn from(value: &str) -> Self {
        Rule::Value(value.to_owned())
    }
}

impl From<String> for Rule {
    fn from(value: String) -> Self {
        Rule::Value(value)
    }
}

impl From<Document> for Rule {
    fn from(block: Document) -> Self {
        Rule::Block(block)
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }

    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    /// Sets `key`, replacing an existing entry in place. Returns the old rule.
    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<Rule>) -> Option<Rule> {
        let key = key.into();
        let rule = rule.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, rule)),
            None => {
                self.entries.push((key, rule));
                None
            }
        }
    }

    /// Folds `rule` into `key`.
    ///
    /// Two blocks merge entry by entry: existing entries keep their position
    /// and are overwritten, new entries are appended, nested blocks merge
    /// recursively. Any other combination is last-write-wins.
    pub fn merge(&mut self, key: impl Into<String>, rule: impl Into<Rule>) {
        let key = key.into();
        let rule = rule.into();
        let Some(index) = self.position(&key) else {
            self.entries.push((key, rule));
            return;
        };
        match (&mut self.entries[index].1, rule) {
            (Rule::Block(existing), Rule::Block(incoming)) => existing.merge_document(incoming),
            (slot, rule) => *slot = rule,
        }
    }

    /// Merges every entry of `other` into `self`, in order.
    pub fn merge_document(&mut self, other: Document) {
        for (key, rule) in other.entries {
            self.merge(key, rule);
        }
    }
}

impl<K: Into<String>, R: Into<Rule>> FromIterator<(K, R)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut document = Document::new();
        for (key, rule) in iter {
            document.insert(key, rule);
        }
        document
    }
}

impl IntoIterator for Document {
    type Item = (String, Rule);
    type IntoIter = std::vec::IntoIter<(String, Rule)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, rule) in &self.entries {
            map.serialize_entry(key, rule)?;
        }
        map.end()
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rule::Value(value) => serializer.serialize_str(value),
            Rule::Block(block) => block.serialize(serializer),
        }
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rule tree object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
        let mut document = Document::new();
        while let Some((key, rule)) = access.next_entry::<String, Rule>()? {
            document.insert(key, rule);
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct RuleVisitor;

impl<'de> Visitor<'de> for RuleVisitor {
    type Value = Rule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a declaration value or a nested rule object")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Rule, E> {
        Ok(Rule::Value(value.to_owned()))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Rule, E> {
        Ok(Rule::Value(value))
    }

    // Hand-written trees often carry bare numbers, e.g. `"opacity": 0`.
    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Rule, E> {
        Ok(Rule::Value(value.to_string()))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Rule, E> {
        Ok(Rule::Value(value.to_string()))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Rule, E> {
        Ok(Rule::Value(value.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Rule, A::Error> {
        DocumentVisitor.visit_map(access).map(Rule::Block)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RuleVisitor)
    }
}
