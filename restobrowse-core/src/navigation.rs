//! Navigation handoff between the list and detail screens.
//!
//! Opening a detail record carries a snapshot of the list's query state in
//! the route. The detail screen never looks inside it; it hands it back
//! unchanged when the user returns, and the list reseeds itself from it.
//! Nothing here touches disk, so a restart starts from defaults.

use serde::{Deserialize, Serialize};

use crate::domain::RestaurantId;
use crate::query::{PerPage, QueryState};

/// Filter part of the list context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListFilters {
    pub country_code: Option<String>,
    pub average_spent: Option<f64>,
    pub cuisines: Vec<String>,
    pub per_page: PerPage,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub range: Option<f64>,
}

/// Everything the list needs to restore itself after a detail visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListContext {
    pub filters: ListFilters,
    pub search_name: String,
    pub page: u32,
}

impl From<&QueryState> for ListContext {
    fn from(q: &QueryState) -> Self {
        Self {
            filters: ListFilters {
                country_code: q.country_code().map(String::from),
                average_spent: q.average_spent(),
                cuisines: q.cuisines().to_vec(),
                per_page: q.per_page(),
                latitude: q.latitude(),
                longitude: q.longitude(),
                range: q.range(),
            },
            search_name: q.search_name().to_string(),
            page: q.page(),
        }
    }
}

impl From<&ListContext> for QueryState {
    fn from(ctx: &ListContext) -> Self {
        let mut q = QueryState::new();
        q.set_page(ctx.page);
        q.set_per_page(ctx.filters.per_page);
        q.set_search_name(ctx.search_name.clone());
        q.set_country_code(ctx.filters.country_code.clone());
        q.set_average_spent(ctx.filters.average_spent);
        q.replace_cuisines(&ctx.filters.cuisines);
        q.set_latitude(ctx.filters.latitude);
        q.set_longitude(ctx.filters.longitude);
        q.set_range(ctx.filters.range);
        q
    }
}

/// Where the application currently is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Route {
    List { context: Option<ListContext> },
    Detail { id: RestaurantId, context: ListContext },
}

impl Default for Route {
    fn default() -> Self {
        Route::List { context: None }
    }
}

impl Route {
    pub fn open_detail(id: RestaurantId, context: ListContext) -> Self {
        Route::Detail { id, context }
    }

    /// Route back to the list. From a detail route the carried context is
    /// forwarded untouched; from the list it is a no-op.
    pub fn back(self) -> Self {
        match self {
            Route::Detail { context, .. } => Route::List {
                context: Some(context),
            },
            list @ Route::List { .. } => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_json() {
        let mut q = QueryState::new();
        q.set_page(3);
        q.set_per_page(PerPage::Fifty);
        q.add_cuisine("Chinese");
        let ctx = ListContext::from(&q);
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ListContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
        assert_eq!(QueryState::from(&back), q);
    }

    #[test]
    fn back_forwards_context_unchanged() {
        let mut q = QueryState::new();
        q.set_search_name("burger");
        let ctx = ListContext::from(&q);
        let route = Route::open_detail(RestaurantId(7), ctx.clone());
        assert_eq!(
            route.back(),
            Route::List {
                context: Some(ctx)
            }
        );
    }

    #[test]
    fn back_from_list_stays_put() {
        assert_eq!(Route::default().back(), Route::List { context: None });
    }
}
