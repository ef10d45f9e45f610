//! The dotted-key codec.
//!
//! Every key this crate owns in a querystring has the shape
//! `[prefix.]field.kind`, e.g. `name.sort` or `users.name.sort` for a
//! table namespaced under the `users` prefix. Prefixes may themselves
//! contain literal dots, so decoding works from the right: the last
//! segment is the kind, the second-to-last is the field, and whatever
//! remains (rejoined with `.`) is the prefix.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace under which un-prefixed keys are grouped when decoding.
pub const DEFAULT_NAMESPACE: &str = "default";

/// The table facet a query key addresses.
///
/// Encoding only ever emits these five kinds. Decoding does *not*
/// validate the kind segment; see [`ParsedKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    Sort,
    Filter,
    Page,
    PageSize,
    Params,
}

impl QueryKind {
    /// The wire name of this kind, as it appears as the last key segment.
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryKind::Sort => "sort",
            QueryKind::Filter => "filter",
            QueryKind::Page => "page",
            QueryKind::PageSize => "pageSize",
            QueryKind::Params => "params",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-specified dotted key, ready to render.
///
/// An empty prefix renders the same as no prefix at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryKey<'a> {
    prefix: Option<&'a str>,
    field: &'a str,
    kind: QueryKind,
}

impl<'a> QueryKey<'a> {
    pub fn new(prefix: Option<&'a str>, field: &'a str, kind: QueryKind) -> Self {
        QueryKey {
            prefix: prefix.filter(|p| !p.is_empty()),
            field,
            kind,
        }
    }
}

impl fmt::Display for QueryKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(prefix) => write!(f, "{}.{}.{}", prefix, self.field, self.kind),
            None => write!(f, "{}.{}", self.field, self.kind),
        }
    }
}

/// The decoded form of a dotted key.
///
/// Parsing never fails. A key with a single segment still yields a
/// `kind` (the segment itself) but no `field`; consumers must treat such
/// keys as unaddressable and skip them. The `kind` is carried through as
/// the raw segment rather than a [`QueryKind`] so that unknown kinds
/// survive a decode/encode cycle untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    /// Last dot segment, unvalidated.
    pub kind: &'a str,
    /// Second-to-last dot segment, absent for single-segment keys.
    pub field: Option<&'a str>,
    /// Everything before the field, rejoined. Empty when un-prefixed.
    pub prefix: &'a str,
}

impl<'a> ParsedKey<'a> {
    /// Splits a raw querystring key from the right.
    pub fn parse(raw: &'a str) -> Self {
        let (rest, kind) = match raw.rsplit_once('.') {
            Some((rest, kind)) => (Some(rest), kind),
            None => (None, raw),
        };
        match rest {
            None => ParsedKey {
                kind,
                field: None,
                prefix: "",
            },
            Some(rest) => match rest.rsplit_once('.') {
                Some((prefix, field)) => ParsedKey {
                    kind,
                    field: Some(field),
                    prefix,
                },
                None => ParsedKey {
                    kind,
                    field: Some(rest),
                    prefix: "",
                },
            },
        }
    }

    /// The namespace this key belongs to: [`DEFAULT_NAMESPACE`] when the
    /// prefix is empty, the prefix itself otherwise.
    pub fn namespace(&self) -> &'a str {
        if self.prefix.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            self.prefix
        }
    }
}
