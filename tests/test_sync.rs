//! Encoder + router side: syncing table state into the URL.

use pretty_assertions::assert_eq;
use router_sync::{
    MemoryRouter, ParamMap, QueryValue, RouteQuery, Router, TableQuery, next_query,
    sync_router_query,
};

fn query(pairs: &[(&str, &str)]) -> RouteQuery {
    let mut query = RouteQuery::new();
    for (key, value) in pairs {
        query.insert(*key, *value);
    }
    query
}

#[test]
fn writes_all_facets() {
    let mut router = MemoryRouter::new("/users");
    let table = TableQuery::new()
        .with_sort("name", "asc")
        .with_filter("city", "berlin")
        .with_page(3)
        .with_page_size(50);

    sync_router_query(&mut router, &table, None, None).unwrap();

    assert_eq!(
        router.route().query,
        query(&[
            ("name.sort", "asc"),
            ("city.filter", "berlin"),
            ("page.page", "3"),
            ("pageSize.pageSize", "50"),
        ])
    );
}

#[test]
fn cleared_sort_removes_key_instead_of_writing_false() {
    let current = query(&[("name.sort", "asc")]);
    let table = TableQuery::new().without_sort("name");

    let next = next_query(&table, &current, None, None);

    assert!(!next.contains_key("name.sort"));
    assert!(next.is_empty());
}

#[test]
fn empty_sort_direction_is_kept() {
    // unlike filters, a sort entry is only cleared by an explicit clear
    let table = TableQuery::new().with_sort("name", "");

    let next = next_query(&table, &RouteQuery::new(), None, None);

    assert_eq!(next.get("name.sort"), Some(&QueryValue::Single(String::new())));
}

#[test]
fn empty_filter_clears_its_key() {
    let current = query(&[("city.filter", "berlin")]);
    let table = TableQuery::new().with_filter("city", "");

    let next = next_query(&table, &current, None, None);

    assert!(!next.contains_key("city.filter"));
}

#[test]
fn absent_and_zero_page_emit_no_key() {
    let table = TableQuery::new();
    let next = next_query(&table, &RouteQuery::new(), None, None);
    assert!(!next.contains_key("page.page"));
    assert!(!next.contains_key("pageSize.pageSize"));

    let table = TableQuery::new().with_page(0);
    let next = next_query(&table, &RouteQuery::new(), None, None);
    assert!(!next.contains_key("page.page"));
}

#[test]
fn page_overwrites_previous_value() {
    let current = query(&[("page.page", "1")]);
    let table = TableQuery::new().with_page(7);

    let next = next_query(&table, &current, None, None);

    assert_eq!(
        next.get("page.page"),
        Some(&QueryValue::Single("7".into()))
    );
}

#[test]
fn unrelated_keys_survive_a_sync() {
    let current = query(&[("tab", "2"), ("utm_source", "mail"), ("name.sort", "asc")]);
    let table = TableQuery::new().with_sort("name", "desc");

    let next = next_query(&table, &current, None, None);

    assert_eq!(next.get("tab"), Some(&QueryValue::Single("2".into())));
    assert_eq!(
        next.get("utm_source"),
        Some(&QueryValue::Single("mail".into()))
    );
    assert_eq!(
        next.get("name.sort"),
        Some(&QueryValue::Single("desc".into()))
    );
}

#[test]
fn custom_params_set_and_clear() {
    let current = query(&[("view.params", "compact")]);
    let mut params = ParamMap::new();
    params.insert("view".into(), String::new());
    params.insert("team".into(), "platform".into());

    let next = next_query(&TableQuery::new(), &current, Some(&params), None);

    assert!(!next.contains_key("view.params"));
    assert_eq!(
        next.get("team.params"),
        Some(&QueryValue::Single("platform".into()))
    );
}

#[test]
fn prefix_namespaces_every_owned_key() {
    let table = TableQuery::new().with_sort("name", "asc").with_page(2);

    let next = next_query(&table, &RouteQuery::new(), None, Some("users"));

    assert!(next.contains_key("users.name.sort"));
    assert!(next.contains_key("users.page.page"));
    assert!(!next.contains_key("name.sort"));
}

#[test]
fn prefixed_sync_leaves_other_tables_alone() {
    let current = query(&[("orders.name.sort", "desc"), ("name.sort", "asc")]);
    let table = TableQuery::new().without_sort("name");

    let next = next_query(&table, &current, None, Some("users"));

    // only the `users` namespace is owned by this sync
    assert_eq!(
        next.get("orders.name.sort"),
        Some(&QueryValue::Single("desc".into()))
    );
    assert_eq!(
        next.get("name.sort"),
        Some(&QueryValue::Single("asc".into()))
    );
    assert!(!next.contains_key("users.name.sort"));
}

#[test]
fn each_sync_issues_exactly_one_replace() {
    let mut router = MemoryRouter::new("/users");
    let table = TableQuery::new().with_page(1).with_page(2);

    sync_router_query(&mut router, &table, None, None).unwrap();
    assert_eq!(router.replacements(), 1);

    sync_router_query(&mut router, &table, None, None).unwrap();
    assert_eq!(router.replacements(), 2);
}

#[test]
fn replace_keeps_the_route_path() {
    let mut router = MemoryRouter::new("/users");
    let table = TableQuery::new().with_sort("name", "asc");

    sync_router_query(&mut router, &table, None, None).unwrap();

    assert_eq!(router.route().path, "/users");
}

#[test]
fn sequential_syncs_read_each_other() {
    // two widgets sharing one URL stay consistent as long as each sync
    // snapshots the query fresh, which going through the router does
    let mut router = MemoryRouter::new("/dash");

    let users = TableQuery::new().with_sort("name", "asc");
    sync_router_query(&mut router, &users, None, Some("users")).unwrap();

    let orders = TableQuery::new().with_page(4);
    sync_router_query(&mut router, &orders, None, Some("orders")).unwrap();

    let query = &router.route().query;
    assert!(query.contains_key("users.name.sort"));
    assert!(query.contains_key("orders.page.page"));
}

#[test]
fn current_query_is_a_snapshot() {
    let router = MemoryRouter::new("/users").with_query(query(&[("tab", "2")]));
    let mut snapshot = router.current_query();
    snapshot.remove("tab");
    assert!(router.route().query.contains_key("tab"));
}
