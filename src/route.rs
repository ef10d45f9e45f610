//! Router-side types: the flat query mapping, the route descriptor, and
//! the querystring wire codec.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Characters left verbatim when rendering querystring components.
///
/// A lax query encode set: spaces are handled separately (serialized as
/// `+`), and `*`, `-`, `.`, `_` pass through. Dots passing through keeps
/// dotted keys readable in the address bar.
const QS_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// A query value as the routing layer delivers it: a key appearing once
/// parses to `Single`, a repeated key to `Multi`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl QueryValue {
    /// The value, when the key appeared exactly once.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            QueryValue::Single(value) => Some(value),
            QueryValue::Multi(_) => None,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(first) => {
                *self = QueryValue::Multi(vec![std::mem::take(first), value]);
            }
            QueryValue::Multi(values) => values.push(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multi(values)
    }
}

/// The URL's flat query mapping: dotted (and unrelated) keys to values,
/// in insertion order.
///
/// Owned by the routing subsystem. Sync operations clone it and work on
/// the copy, so a `RouteQuery` held by a caller is never mutated behind
/// its back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteQuery(IndexMap<String, QueryValue>);

impl RouteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing (in place) any previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.0.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the mapping as a querystring (no leading `?`).
    ///
    /// Keys and values are percent-encoded, spaces become `+`, and
    /// `Multi` values emit one pair per element.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            match value {
                QueryValue::Single(value) => push_pair(&mut out, key, value),
                QueryValue::Multi(values) => {
                    for value in values {
                        push_pair(&mut out, key, value);
                    }
                }
            }
        }
        out
    }

    /// Parses a querystring (without the leading `?`) into a mapping.
    ///
    /// Repeated keys are promoted to `Multi`. A pair without `=` parses
    /// as a key with an empty value. The only failure mode is invalid
    /// UTF-8 behind a percent escape.
    pub fn parse_str(input: &str) -> Result<Self> {
        let mut query = RouteQuery::new();
        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key)?;
            let value = decode_component(raw_value)?;
            match query.0.entry(key) {
                Entry::Occupied(mut entry) => entry.get_mut().push(value),
                Entry::Vacant(entry) => {
                    entry.insert(QueryValue::Single(value));
                }
            }
        }
        Ok(query)
    }
}

impl FromIterator<(String, QueryValue)> for RouteQuery {
    fn from_iter<I: IntoIterator<Item = (String, QueryValue)>>(iter: I) -> Self {
        RouteQuery(iter.into_iter().collect())
    }
}

impl fmt::Display for RouteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    push_encoded(out, key);
    out.push('=');
    push_encoded(out, value);
}

fn push_encoded(out: &mut String, component: &str) {
    // the encode set leaves spaces alone so they can serialize as `+`
    for piece in utf8_percent_encode(component, QS_ENCODE_SET) {
        if piece.contains(' ') {
            for ch in piece.chars() {
                out.push(if ch == ' ' { '+' } else { ch });
            }
        } else {
            out.push_str(piece);
        }
    }
}

fn decode_component(raw: &str) -> Result<String> {
    let unplussed;
    let raw = if raw.contains('+') {
        unplussed = raw.replace('+', " ");
        unplussed.as_str()
    } else {
        raw
    };
    Ok(percent_decode_str(raw).decode_utf8()?.into_owned())
}

/// A navigation target: route path plus query mapping.
///
/// Route params beyond the path are the navigation layer's concern; the
/// sync operations only ever swap the `query` out of a descriptor they
/// got from the router itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub query: RouteQuery,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        RouteDescriptor {
            path: path.into(),
            query: RouteQuery::new(),
        }
    }

    pub fn with_query(mut self, query: RouteQuery) -> Self {
        self.query = query;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_and_parses_pairs() {
        let mut query = RouteQuery::new();
        query.insert("name.sort", "asc");
        query.insert("q.filter", "carrot city");
        let rendered = query.to_query_string();
        assert_eq!(rendered, "name.sort=asc&q.filter=carrot+city");
        assert_eq!(RouteQuery::parse_str(&rendered).unwrap(), query);
    }

    #[test]
    fn repeated_keys_promote_to_multi() {
        let query = RouteQuery::parse_str("tag.params=a&tag.params=b").unwrap();
        assert_eq!(
            query.get("tag.params"),
            Some(&QueryValue::Multi(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn reserved_characters_round_trip() {
        let mut query = RouteQuery::new();
        query.insert("q.filter", "50% off & more?");
        let rendered = query.to_query_string();
        assert_eq!(rendered, "q.filter=50%25+off+%26+more%3F");
        assert_eq!(RouteQuery::parse_str(&rendered).unwrap(), query);
    }

    #[test]
    fn pair_without_equals_is_empty_value() {
        let query = RouteQuery::parse_str("flag").unwrap();
        assert_eq!(query.get("flag"), Some(&QueryValue::Single(String::new())));
    }
}
