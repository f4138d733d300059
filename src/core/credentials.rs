// src/core/credentials.rs

use crate::error::{AppError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// API keys as supplied by a caller or a config file: one key or a list.
///
/// This is the boundary form. It is turned into a [`CredentialSet`] when a
/// client is built, which is where emptiness is rejected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiKeys {
    Single(String),
    Many(Vec<String>),
}

impl ApiKeys {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(key) => vec![key],
            Self::Many(keys) => keys,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let keys: &[String] = match self {
            Self::Single(key) => std::slice::from_ref(key),
            Self::Many(keys) => keys,
        };
        keys.iter().map(String::as_str)
    }
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

// Keys never show up in Debug output.
impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let previews: Vec<String> = self.iter().map(preview_key).collect();
        f.debug_tuple("ApiKeys").field(&previews).finish()
    }
}

impl From<String> for ApiKeys {
    fn from(key: String) -> Self {
        Self::Single(key)
    }
}

impl From<&str> for ApiKeys {
    fn from(key: &str) -> Self {
        Self::Single(key.to_string())
    }
}

impl From<Vec<String>> for ApiKeys {
    fn from(keys: Vec<String>) -> Self {
        Self::Many(keys)
    }
}

impl From<Vec<&str>> for ApiKeys {
    fn from(keys: Vec<&str>) -> Self {
        Self::Many(keys.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ApiKeys {
    fn from(keys: [&str; N]) -> Self {
        Self::Many(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl TryFrom<Value> for ApiKeys {
    type Error = AppError;

    /// Accepts a JSON string or an array of strings. `null`, numbers,
    /// booleans, objects and arrays holding anything but strings are rejected.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(key) => Ok(Self::Single(key)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(key) => Ok(key),
                    other => Err(AppError::invalid_configuration(
                        format!(
                            "API key at position {i} must be a string, got {}",
                            json_type_name(&other)
                        ),
                        Some("api_keys"),
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Many),
            Value::Null => Err(AppError::invalid_configuration(
                "API keys are required",
                Some("api_keys"),
            )),
            other => Err(AppError::invalid_configuration(
                format!(
                    "Invalid API keys format: expected a string or a list of strings, got {}",
                    json_type_name(&other)
                ),
                Some("api_keys"),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered, non-empty, immutable set of API keys.
#[derive(Clone)]
pub struct CredentialSet {
    keys: Vec<SecretString>,
}

impl CredentialSet {
    /// Builds the set, keeping the caller's order.
    ///
    /// Fails with [`AppError::InvalidConfiguration`] when no keys are given or
    /// when any key is blank.
    pub fn new(keys: impl Into<ApiKeys>) -> Result<Self> {
        let keys = keys.into().into_vec();

        if keys.is_empty() {
            return Err(AppError::invalid_configuration(
                "API keys are required",
                Some("api_keys"),
            ));
        }

        if let Some(position) = keys.iter().position(|k| k.trim().is_empty()) {
            return Err(AppError::invalid_configuration(
                format!("API key at position {position} is empty"),
                Some("api_keys"),
            ));
        }

        Ok(Self {
            keys: keys.into_iter().map(SecretString::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SecretString> {
        self.keys.get(index)
    }

    /// Key at `index`, wrapping around the end of the set.
    pub fn nth_wrapping(&self, index: usize) -> &SecretString {
        &self.keys[index % self.keys.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecretString> {
        self.keys.iter()
    }
}

impl TryFrom<Value> for CredentialSet {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self> {
        Self::new(ApiKeys::try_from(value)?)
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let previews: Vec<String> = self
            .keys
            .iter()
            .map(|k| preview_key(k.expose_secret()))
            .collect();
        f.debug_struct("CredentialSet")
            .field("len", &self.keys.len())
            .field("keys", &previews)
            .finish()
    }
}

/// Shortened form of a key that is safe to log.
pub fn preview_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn single_key_becomes_one_element_set() {
        let set = CredentialSet::new("only-key").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().expose_secret(), "only-key");
    }

    #[test]
    fn order_is_preserved() {
        let set = CredentialSet::new(["c", "a", "b"]).unwrap();
        let keys: Vec<&str> = set.iter().map(|k| k.expose_secret().as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[rstest]
    #[case::empty_list(ApiKeys::Many(vec![]))]
    #[case::empty_string(ApiKeys::Single(String::new()))]
    #[case::blank_in_list(ApiKeys::Many(vec!["ok".into(), "  ".into()]))]
    fn rejects_missing_keys(#[case] keys: ApiKeys) {
        let err = CredentialSet::new(keys).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { .. }));
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::number(json!(42))]
    #[case::boolean(json!(true))]
    #[case::object(json!({"key": "value"}))]
    #[case::mixed_array(json!(["key", 7]))]
    #[case::empty_array(json!([]))]
    fn rejects_non_string_values(#[case] value: Value) {
        let err = CredentialSet::try_from(value).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { .. }));
    }

    #[test]
    fn accepts_json_string_and_array() {
        assert_eq!(CredentialSet::try_from(json!("k")).unwrap().len(), 1);
        assert_eq!(CredentialSet::try_from(json!(["k1", "k2"])).unwrap().len(), 2);
    }

    #[test]
    fn untagged_deserialization_accepts_both_forms() {
        let single: ApiKeys = serde_yaml::from_str("\"abc\"").unwrap();
        assert_eq!(single, ApiKeys::Single("abc".into()));
        let many: ApiKeys = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(many.len(), 2);
        assert!(serde_yaml::from_str::<ApiKeys>("{a: 1}").is_err());
    }

    #[test]
    fn debug_output_hides_keys() {
        let set = CredentialSet::new(["abcd1234567890wxyz"]).unwrap();
        let debug = format!("{set:?}");
        assert!(debug.contains("abcd...wxyz"));
        assert!(!debug.contains("1234567890"));

        let keys = ApiKeys::from("short");
        assert!(!format!("{keys:?}").contains("short"));
    }
}
