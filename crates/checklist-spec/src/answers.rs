use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::QuestionId;

/// Answers collected for one checklist instance, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, including empty strings.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stored value for a catalog question.
    pub fn question(&self, id: QuestionId) -> Option<&str> {
        self.get(id.as_str())
    }

    /// Value only when it is non-empty; empty strings count as unanswered.
    pub fn answered(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn is_answered(&self, key: &str) -> bool {
        self.answered(key).is_some()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Builds an answer set from a loose JSON object.
    ///
    /// Strings are kept as-is, booleans and numbers are stringified, and
    /// anything else (null, arrays, nested objects) is skipped.
    pub fn from_value(value: &Value) -> Self {
        let mut answers = Self::new();
        if let Some(map) = value.as_object() {
            for (key, entry) in map {
                match entry {
                    Value::String(text) => answers.set(key.clone(), text.clone()),
                    Value::Bool(flag) => answers.set(key.clone(), flag.to_string()),
                    Value::Number(num) => answers.set(key.clone(), num.to_string()),
                    _ => {}
                }
            }
        }
        answers
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values_are_stored_but_not_answered() {
        let answers = AnswerSet::new().with("fase", "");
        assert_eq!(answers.get("fase"), Some(""));
        assert_eq!(answers.answered("fase"), None);
        assert!(!answers.is_answered("fase"));
    }

    #[test]
    fn from_value_stringifies_scalars() {
        let answers = AnswerSet::from_value(&json!({
            "fase": "Hotline",
            "flag": true,
            "count": 3,
            "nested": { "a": 1 },
            "missing": null
        }));
        assert_eq!(answers.get("fase"), Some("Hotline"));
        assert_eq!(answers.get("flag"), Some("true"));
        assert_eq!(answers.get("count"), Some("3"));
        assert_eq!(answers.get("nested"), None);
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn serializes_as_plain_object() {
        let answers = AnswerSet::new().with("card_aprovado", "Sim");
        let value = serde_json::to_value(&answers).expect("serialize");
        assert_eq!(value, json!({ "card_aprovado": "Sim" }));
        let back: AnswerSet = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, answers);
    }
}
