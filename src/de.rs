//! Decoder: live route query → structured per-field, per-namespace state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::key::ParsedKey;
use crate::route::{QueryValue, RouteQuery};

/// One decoded query entry: the field it addresses, the raw (unvalidated)
/// kind segment, and the value exactly as the routing layer delivered it.
///
/// No type coercion happens here; `"5"` stays a string. Turning values
/// back into directions, page numbers, etc. is the consuming store's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: QueryValue,
}

/// The decoder's output: field name → namespace → entry.
///
/// Un-prefixed keys land under the `"default"` namespace; prefixed keys
/// under their literal prefix. Two tables sharing a URL therefore never
/// collide as long as their prefixes differ.
pub type ParsedQuery = IndexMap<String, IndexMap<String, ParsedEntry>>;

/// Groups a flat route query into per-field, per-namespace entries.
///
/// Keys with fewer than two dot segments cannot address a field and are
/// skipped. When two keys map to the same `(field, namespace)` pair, the
/// later one in the query's insertion order wins.
pub fn parse_route_query(query: &RouteQuery) -> ParsedQuery {
    let mut result = ParsedQuery::new();
    for (raw_key, value) in query.iter() {
        let parsed = ParsedKey::parse(raw_key);
        let Some(field) = parsed.field else {
            continue;
        };
        let entry = ParsedEntry {
            field: field.to_owned(),
            kind: parsed.kind.to_owned(),
            value: value.clone(),
        };
        result
            .entry(field.to_owned())
            .or_default()
            .insert(parsed.namespace().to_owned(), entry);
    }
    result
}
