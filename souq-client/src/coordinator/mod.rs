//! View-state coordinators
//!
//! One coordinator per resource screen. Each owns the applied query state
//! (page, limit, trimmed search text, applied filters), decides which
//! resource-client call answers the current on-screen intent, and reconciles
//! mutations by refetching the active query. Stale in-flight responses are
//! discarded through a monotonic generation counter: every refresh captures
//! the generation it was issued under and a response only lands if no newer
//! refresh superseded it.

mod categories;
mod products;
mod subcategories;

pub use categories::{CategoriesCoordinator, CategoriesSnapshot};
pub use products::{ProductsCoordinator, ProductsSnapshot};
pub use subcategories::{SubcategoriesCoordinator, SubcategoriesSnapshot};

use shared::query::{PageQuery, ProductFilters};
use std::sync::atomic::{AtomicBool, Ordering};

/// Which resource-client call answers the current screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// Free-text search. Takes precedence over structured filters.
    Search { query: String, page: PageQuery },
    /// Structured filtering (products only).
    Filtered {
        filters: ProductFilters,
        page: PageQuery,
    },
    /// Plain pagination, the default.
    Paginate { page: PageQuery },
}

/// Decide what to fetch.
///
/// Precedence: non-empty trimmed query → search; any active applied filter →
/// filtered; otherwise paginate. Search deliberately ignores structured
/// filters; the backend does not compose them.
pub fn plan_fetch(query: &str, filters: Option<&ProductFilters>, page: PageQuery) -> FetchPlan {
    let trimmed = query.trim();
    if !trimmed.is_empty() {
        return FetchPlan::Search {
            query: trimmed.to_string(),
            page,
        };
    }
    if let Some(filters) = filters {
        if filters.is_active() {
            return FetchPlan::Filtered {
                filters: filters.clone(),
                page,
            };
        }
    }
    FetchPlan::Paginate { page }
}

/// Resets the in-flight flag when the mutation finishes, on every exit path.
pub(crate) struct MutationGuard<'a>(&'a AtomicBool);

impl<'a> MutationGuard<'a> {
    pub(crate) fn begin(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::query::{SortBy, SortOrder};

    fn page() -> PageQuery {
        PageQuery::new(1, 10)
    }

    #[test]
    fn test_default_state_paginates() {
        let plan = plan_fetch("", Some(&ProductFilters::default()), page());
        assert_eq!(plan, FetchPlan::Paginate { page: page() });
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let plan = plan_fetch("   ", None, page());
        assert_eq!(plan, FetchPlan::Paginate { page: page() });
    }

    #[test]
    fn test_active_filters_route_to_filtered() {
        let filters = ProductFilters {
            brand: Some("nike".to_string()),
            ..Default::default()
        };
        let plan = plan_fetch("", Some(&filters), page());
        assert_eq!(
            plan,
            FetchPlan::Filtered {
                filters,
                page: page()
            }
        );
    }

    #[test]
    fn test_non_default_sort_routes_to_filtered() {
        let filters = ProductFilters {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert!(matches!(
            plan_fetch("", Some(&filters), page()),
            FetchPlan::Filtered { .. }
        ));
    }

    #[test]
    fn test_search_overrides_filters() {
        let filters = ProductFilters {
            brand: Some("nike".to_string()),
            min_price: Some(50.0),
            ..Default::default()
        };
        let plan = plan_fetch("  boot ", Some(&filters), page());
        assert_eq!(
            plan,
            FetchPlan::Search {
                query: "boot".to_string(),
                page: page()
            }
        );
    }

    #[test]
    fn test_cleared_filters_return_to_paginate() {
        let filters = ProductFilters {
            brand: Some("nike".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            plan_fetch("", Some(&filters), page()),
            FetchPlan::Filtered { .. }
        ));
        assert!(matches!(
            plan_fetch("", Some(&ProductFilters::default()), page()),
            FetchPlan::Paginate { .. }
        ));
    }
}
