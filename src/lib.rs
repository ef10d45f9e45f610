//! Bidirectional sync between table query state and router querystrings.
//!
//! A data table's sort order, filters, page number, page size, and any
//! extra caller parameters are encoded into dotted querystring keys of
//! the form `[prefix.]field.kind` (e.g. `name.sort`, `users.city.filter`)
//! and decoded back on mount. The optional prefix namespaces a table so
//! multiple independent tables can share one URL.
//!
//! The crate is a pure adapter. It does not own the URL (that is the
//! [`Router`] implementation's job) and it does not own the table state
//! (the consuming store seeds itself from [`ParsedQuery`]). Encoding
//! preserves unrelated query keys and drops keys whose state entries
//! were cleared; decoding groups keys by field and namespace without
//! coercing any values.
//!
//! ## Usage
//!
//! ```
//! use router_sync::{MemoryRouter, TableQuery, sync_from_router, sync_router_query};
//!
//! let mut router = MemoryRouter::new("/users");
//!
//! let table = TableQuery::new()
//!     .with_sort("name", "asc")
//!     .with_filter("city", "berlin")
//!     .with_page(2);
//! sync_router_query(&mut router, &table, None, None).unwrap();
//!
//! assert_eq!(
//!     router.route().query.to_query_string(),
//!     "name.sort=asc&city.filter=berlin&page.page=2"
//! );
//!
//! let parsed = sync_from_router(&router);
//! assert_eq!(parsed["name"]["default"].kind, "sort");
//! assert_eq!(parsed["page"]["default"].value.as_single(), Some("2"));
//! ```
//!
//! Clearing state removes keys instead of writing sentinel strings:
//!
//! ```
//! use router_sync::{MemoryRouter, RouteQuery, TableQuery, sync_router_query};
//!
//! let query = RouteQuery::parse_str("name.sort=asc&tab=2").unwrap();
//! let mut router = MemoryRouter::new("/users").with_query(query);
//!
//! let table = TableQuery::new().without_sort("name");
//! sync_router_query(&mut router, &table, None, None).unwrap();
//!
//! // the cleared sort key is gone, the unrelated `tab` key survives
//! assert_eq!(router.route().query.to_query_string(), "tab=2");
//! ```

mod de;
mod error;
mod key;
mod query;
mod route;
mod router;
mod ser;

pub use de::{ParsedEntry, ParsedQuery, parse_route_query};
pub use error::{Error, Result};
pub use key::{DEFAULT_NAMESPACE, ParsedKey, QueryKey, QueryKind};
pub use query::{ParamMap, PatchValue, QueryPatch, TableQuery};
pub use route::{QueryValue, RouteDescriptor, RouteQuery};
pub use router::{MemoryRouter, Router, sync_from_router, sync_router_query};
pub use ser::{next_query, query_patch};
