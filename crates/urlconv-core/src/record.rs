//! Structured URL record exchanged as one JSON object per line.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads JSON `null` as the field's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Username and optional password from the authority.
///
/// `password: None` means the userinfo had no `:`; `Some("")` means it had an
/// empty password (`user:@host`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Userinfo {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl Userinfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
        }
    }

    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
        }
    }
}

/// Ordered multimap from query parameter name to its values.
///
/// Names keep first-occurrence order; values keep occurrence order within a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(IndexMap<String, Vec<String>>);

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the list for `name`, creating the entry if needed.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// First value for `name`, if any.
    #[cfg(test)]
    pub(crate) fn first(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        for (k, v) in iter {
            map.append(k, v);
        }
        map
    }
}

/// Field decomposition of one URL.
///
/// Every field defaults to its zero value when absent from JSON input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub scheme: String,
    /// Encoded data after `scheme:` when it does not start with `/`.
    #[serde(deserialize_with = "null_as_default")]
    pub opaque: String,
    pub user: Option<Userinfo>,
    /// Host or host:port.
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    /// Decoded path; relative references may omit the leading slash.
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    /// Original escaped path, kept only when re-escaping `path` would differ.
    #[serde(deserialize_with = "null_as_default")]
    pub raw_path: String,
    /// Emit `?` even when the query is empty.
    #[serde(deserialize_with = "null_as_default")]
    pub force_query: bool,
    /// Decoded fragment, without `#`.
    #[serde(deserialize_with = "null_as_default")]
    pub fragment: String,
    /// Original escaped fragment, kept only when re-escaping would differ.
    #[serde(deserialize_with = "null_as_default")]
    pub raw_fragment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub query: QueryMap,
}
