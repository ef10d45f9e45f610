//! Encoder: table state → query patch → next route query.
//!
//! Each facet follows the same shape: build the dotted key, remove it
//! from the working copy of the live query (stale keys from a previous
//! render must not linger), then record either a `Set` with the new
//! value or a `Remove` for a cleared entry. Page and page size always
//! emit exactly one key each.

use indexmap::IndexMap;

use crate::key::{QueryKey, QueryKind};
use crate::query::{ParamMap, PatchValue, QueryPatch, TableQuery};
use crate::route::RouteQuery;

/// Computes the patch for a table's state against a working copy of the
/// live query.
///
/// Keys the table owns are removed from `working` as a side effect, so
/// the caller can overlay the patch onto `working` without stale keys
/// surviving underneath. Emission order is sort, filter, page, page
/// size, then params.
pub fn query_patch(
    table: &TableQuery,
    working: &mut RouteQuery,
    params: Option<&ParamMap>,
    prefix: Option<&str>,
) -> QueryPatch {
    let mut patch = QueryPatch::new();
    sort_patch(&table.sort, working, prefix, &mut patch);
    filter_patch(&table.filter, working, prefix, &mut patch);
    paging_patch(table.page, "page", QueryKind::Page, prefix, &mut patch);
    paging_patch(
        table.page_size,
        "pageSize",
        QueryKind::PageSize,
        prefix,
        &mut patch,
    );
    if let Some(params) = params {
        params_patch(params, working, prefix, &mut patch);
    }
    patch
}

/// Computes the full next query: the current query with the table's
/// patch applied and all removals dropped.
///
/// Keys not owned by the table pass through untouched, so unrelated
/// query parameters (and other tables' namespaced keys) survive a sync.
pub fn next_query(
    table: &TableQuery,
    current: &RouteQuery,
    params: Option<&ParamMap>,
    prefix: Option<&str>,
) -> RouteQuery {
    let mut next = current.clone();
    let patch = query_patch(table, &mut next, params, prefix);
    for (key, value) in patch {
        match value {
            PatchValue::Set(value) => {
                next.insert(key, value);
            }
            PatchValue::Remove => {
                next.remove(&key);
            }
        }
    }
    next
}

fn sort_patch(
    sort: &IndexMap<String, Option<String>>,
    working: &mut RouteQuery,
    prefix: Option<&str>,
    patch: &mut QueryPatch,
) {
    for (field, direction) in sort {
        let key = QueryKey::new(prefix, field, QueryKind::Sort).to_string();
        working.remove(&key);
        let value = match direction {
            Some(direction) => PatchValue::Set(direction.clone()),
            None => PatchValue::Remove,
        };
        patch.insert(key, value);
    }
}

fn filter_patch(
    filter: &IndexMap<String, Option<String>>,
    working: &mut RouteQuery,
    prefix: Option<&str>,
    patch: &mut QueryPatch,
) {
    for (field, filter_value) in filter {
        let key = QueryKey::new(prefix, field, QueryKind::Filter).to_string();
        working.remove(&key);
        // an empty filter string clears the key, unlike sort
        let value = match filter_value {
            Some(value) if !value.is_empty() => PatchValue::Set(value.clone()),
            _ => PatchValue::Remove,
        };
        patch.insert(key, value);
    }
}

fn paging_patch(
    number: Option<u64>,
    field: &str,
    kind: QueryKind,
    prefix: Option<&str>,
    patch: &mut QueryPatch,
) {
    let key = QueryKey::new(prefix, field, kind).to_string();
    // page 0 counts as absent
    let value = match number {
        Some(n) if n != 0 => PatchValue::Set(itoa::Buffer::new().format(n).to_owned()),
        _ => PatchValue::Remove,
    };
    patch.insert(key, value);
}

fn params_patch(
    params: &ParamMap,
    working: &mut RouteQuery,
    prefix: Option<&str>,
    patch: &mut QueryPatch,
) {
    for (field, param) in params {
        let key = QueryKey::new(prefix, field, QueryKind::Params).to_string();
        working.remove(&key);
        let value = if param.is_empty() {
            PatchValue::Remove
        } else {
            PatchValue::Set(param.clone())
        };
        patch.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_emits_in_facet_order() {
        let table = TableQuery::new()
            .with_sort("name", "asc")
            .with_filter("city", "berlin")
            .with_page(2);
        let mut working = RouteQuery::new();
        let patch = query_patch(&table, &mut working, None, None);
        let keys: Vec<&str> = patch.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["name.sort", "city.filter", "page.page", "pageSize.pageSize"]
        );
    }

    #[test]
    fn owned_keys_are_removed_from_working_copy() {
        let table = TableQuery::new().with_sort("name", "desc");
        let mut working = RouteQuery::new();
        working.insert("name.sort", "asc");
        working.insert("tab", "2");
        let patch = query_patch(&table, &mut working, None, None);
        assert!(!working.contains_key("name.sort"));
        assert!(working.contains_key("tab"));
        assert_eq!(patch["name.sort"], PatchValue::Set("desc".into()));
    }
}
