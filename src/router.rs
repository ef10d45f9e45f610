//! The navigation seam and the two sync entry points.

use crate::de::{ParsedQuery, parse_route_query};
use crate::error::Result;
use crate::query::{ParamMap, TableQuery};
use crate::route::{RouteDescriptor, RouteQuery};
use crate::ser::next_query;

/// The slice of the navigation layer the sync operations need.
///
/// Implementations own the current location; this crate never retains a
/// query snapshot across calls. Two widgets syncing to the same URL must
/// each call [`sync_router_query`] so each captures a fresh snapshot —
/// computing two deltas from one snapshot loses the first one's keys.
pub trait Router {
    /// A snapshot of the current location's query mapping.
    fn current_query(&self) -> RouteQuery;

    /// A descriptor for the current location.
    fn current_route(&self) -> RouteDescriptor;

    /// Replaces the current location without pushing a history entry.
    fn replace(&mut self, next: RouteDescriptor) -> Result<()>;
}

/// Syncs a table's state to the URL.
///
/// Snapshots the current query, computes the next one, and issues exactly
/// one [`Router::replace`]. Keys owned by the table (under its prefix)
/// are overwritten or dropped; everything else passes through.
pub fn sync_router_query<R: Router>(
    router: &mut R,
    table: &TableQuery,
    params: Option<&ParamMap>,
    prefix: Option<&str>,
) -> Result<()> {
    let current = router.current_query();
    let query = next_query(table, &current, params, prefix);
    let mut route = router.current_route();
    tracing::debug!(
        path = %route.path,
        prefix = prefix.unwrap_or_default(),
        keys = query.len(),
        "replacing route query"
    );
    route.query = query;
    router.replace(route)
}

/// Reads the current URL back into structured table state.
///
/// A one-shot read, not a subscription: callers re-invoke it on mount.
pub fn sync_from_router<R: Router>(router: &R) -> ParsedQuery {
    parse_route_query(&router.current_query())
}

/// An in-memory [`Router`] holding a single location.
///
/// Useful headless and in tests; it counts `replace` calls so the
/// one-replace-per-sync contract can be asserted.
#[derive(Clone, Debug, Default)]
pub struct MemoryRouter {
    route: RouteDescriptor,
    replacements: usize,
}

impl MemoryRouter {
    pub fn new(path: impl Into<String>) -> Self {
        MemoryRouter {
            route: RouteDescriptor::new(path),
            replacements: 0,
        }
    }

    pub fn with_query(mut self, query: RouteQuery) -> Self {
        self.route.query = query;
        self
    }

    /// The location as of the last replace.
    pub fn route(&self) -> &RouteDescriptor {
        &self.route
    }

    /// How many times `replace` has been called.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Router for MemoryRouter {
    fn current_query(&self) -> RouteQuery {
        self.route.query.clone()
    }

    fn current_route(&self) -> RouteDescriptor {
        self.route.clone()
    }

    fn replace(&mut self, next: RouteDescriptor) -> Result<()> {
        self.route = next;
        self.replacements += 1;
        Ok(())
    }
}
