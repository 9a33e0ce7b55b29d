//! List controller: owns the query state and the current result set.
//!
//! The controller never performs I/O. Actions that need the backend return a
//! `RequestTicket`; whoever executes it hands the outcome back through
//! `apply`. Only the most recently issued ticket may change the result set.

use tracing::{debug, info, warn};

use crate::client::{ApiError, ModeOutcome};
use crate::domain::{DishInfo, ImageSearchResponse, RestaurantPage, RestaurantSummary};
use crate::navigation::ListContext;
use crate::sequence::{RequestSequence, RequestToken};

use super::request::{ImageUpload, RequestKind, RequestMode};
use super::state::{PerPage, QueryState};

/// A request the caller must execute and report back on.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    pub token: RequestToken,
    pub mode: RequestMode,
}

/// The list currently on screen. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub items: Vec<RestaurantSummary>,
    pub total: u64,
    pub source: Option<RequestKind>,
}

#[derive(Debug)]
pub struct ListController {
    query: QueryState,
    results: ResultSet,
    image: Option<ImageUpload>,
    image_uploaded: bool,
    dish_info: Option<DishInfo>,
    last_error: Option<ApiError>,
    sequence: RequestSequence,
    pending: Option<(RequestToken, RequestKind)>,
}

impl ListController {
    /// Seed from a returning detail visit, or from defaults.
    pub fn new(context: Option<&ListContext>, default_per_page: PerPage) -> Self {
        let query = match context {
            Some(ctx) => QueryState::from(ctx),
            None => {
                let mut q = QueryState::new();
                q.set_per_page(default_per_page);
                q
            }
        };
        Self {
            query,
            results: ResultSet::default(),
            image: None,
            image_uploaded: false,
            dish_info: None,
            last_error: None,
            sequence: RequestSequence::new(),
            pending: None,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn image_uploaded(&self) -> bool {
        self.image_uploaded
    }

    pub fn dish_info(&self) -> Option<&DishInfo> {
        self.dish_info.as_ref()
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Kind of the request whose response is still awaited.
    pub fn loading(&self) -> Option<RequestKind> {
        self.pending.map(|(_, kind)| kind)
    }

    /// Snapshot handed to the detail screen.
    pub fn context(&self) -> ListContext {
        ListContext::from(&self.query)
    }

    /// Number of pages for the current total, at least 1.
    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.query.per_page().value());
        let pages = self.results.total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    // ── Request issuing ────────────────────────────────────────────────

    fn issue(&mut self, mode: RequestMode) -> RequestTicket {
        let token = self.sequence.issue();
        let kind = mode.kind();
        debug!(%token, kind = kind.label(), "issuing request");
        self.pending = Some((token, kind));
        RequestTicket { token, mode }
    }

    fn listing(&mut self) -> RequestTicket {
        let params = self.query.listing_params();
        self.issue(RequestMode::Listing(params))
    }

    /// Initial listing on mount.
    pub fn mount(&mut self) -> RequestTicket {
        self.listing()
    }

    // ── Dependency-tracked fields (refetch on change) ──────────────────

    pub fn set_page(&mut self, page: u32) -> Option<RequestTicket> {
        self.query.set_page(page).then(|| self.listing())
    }

    pub fn next_page(&mut self) -> Option<RequestTicket> {
        let page = self.query.page();
        if page >= self.total_pages() {
            return None;
        }
        self.set_page(page + 1)
    }

    pub fn prev_page(&mut self) -> Option<RequestTicket> {
        let page = self.query.page();
        if page <= 1 {
            return None;
        }
        self.set_page(page - 1)
    }

    pub fn set_per_page(&mut self, per_page: PerPage) -> Option<RequestTicket> {
        self.query.set_per_page(per_page).then(|| self.listing())
    }

    pub fn cycle_per_page(&mut self) -> Option<RequestTicket> {
        let next = self.query.per_page().next();
        self.set_per_page(next)
    }

    pub fn add_cuisine(&mut self, cuisine: &str) -> Option<RequestTicket> {
        self.query.add_cuisine(cuisine).then(|| self.listing())
    }

    pub fn remove_cuisine(&mut self, cuisine: &str) -> Option<RequestTicket> {
        self.query.remove_cuisine(cuisine).then(|| self.listing())
    }

    // ── Form fields (no refetch until an explicit action) ──────────────

    pub fn set_country_code(&mut self, code: Option<String>) {
        self.query.set_country_code(code);
    }

    pub fn set_average_spent(&mut self, spent: Option<f64>) {
        self.query.set_average_spent(spent);
    }

    pub fn set_search_name(&mut self, name: impl Into<String>) {
        self.query.set_search_name(name);
    }

    pub fn set_latitude(&mut self, latitude: Option<f64>) {
        self.query.set_latitude(latitude);
    }

    pub fn set_longitude(&mut self, longitude: Option<f64>) {
        self.query.set_longitude(longitude);
    }

    pub fn set_range(&mut self, range: Option<f64>) {
        self.query.set_range(range);
    }

    /// Pick a new image. Clears the previous upload's verdict, and an upload
    /// still in flight can no longer apply: its verdict belongs to the old
    /// image.
    pub fn select_image(&mut self, image: ImageUpload) {
        if let Some((token, RequestKind::ImageSearch)) = self.pending {
            debug!(%token, "image changed, superseding upload");
            self.sequence.issue();
            self.pending = None;
        }
        self.image = Some(image);
        self.image_uploaded = false;
        self.dish_info = None;
    }

    // ── Explicit actions ───────────────────────────────────────────────

    pub fn apply_filters(&mut self) -> RequestTicket {
        self.listing()
    }

    /// Name search. Leaves page and page size alone. Blank names are not sent.
    pub fn search_by_name(&mut self) -> Option<RequestTicket> {
        let name = self.query.search_name().trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(self.issue(RequestMode::NameSearch { name }))
    }

    /// Nearby search. Does nothing unless latitude, longitude and range are
    /// all set.
    pub fn search_nearby(&mut self) -> Option<RequestTicket> {
        let geo = self.query.geo()?;
        Some(self.issue(RequestMode::Nearby(geo)))
    }

    /// Upload the selected image. Does nothing without one.
    pub fn search_by_image(&mut self) -> Option<RequestTicket> {
        let image = self.image.clone()?;
        Some(self.issue(RequestMode::ImageSearch(image)))
    }

    // ── Resets ─────────────────────────────────────────────────────────

    pub fn reset_location(&mut self) -> RequestTicket {
        self.query.clear_location();
        self.listing()
    }

    pub fn reset_filters(&mut self) -> RequestTicket {
        self.query.clear_filters();
        self.listing()
    }

    pub fn reset_image(&mut self) -> RequestTicket {
        self.image = None;
        self.image_uploaded = false;
        self.dish_info = None;
        self.query.replace_cuisines(std::iter::empty::<&str>());
        self.listing()
    }

    pub fn reset_search(&mut self) -> RequestTicket {
        self.query.clear_search();
        self.listing()
    }

    // ── Responses ──────────────────────────────────────────────────────

    /// Accept responses only for the latest ticket. Clears the pending marker.
    fn accept(&mut self, token: RequestToken) -> Option<RequestKind> {
        if !self.sequence.is_current(token) {
            debug!(%token, "dropping superseded response");
            return None;
        }
        self.pending.take().map(|(_, kind)| kind)
    }

    fn replace_results(&mut self, kind: RequestKind, page: RestaurantPage) {
        info!(
            kind = kind.label(),
            items = page.restaurants.len(),
            total = page.total_count,
            "results replaced"
        );
        self.results = ResultSet {
            items: page.restaurants,
            total: page.total_count,
            source: Some(kind),
        };
        self.last_error = None;
    }

    /// Apply a list/name/nearby response. Returns whether it was applied.
    pub fn apply_page(&mut self, token: RequestToken, page: RestaurantPage) -> bool {
        match self.accept(token) {
            Some(kind) => {
                self.replace_results(kind, page);
                true
            }
            None => false,
        }
    }

    /// Apply an image-search response. A well-formed verdict becomes the
    /// active cuisine filter, and the follow-up listing ticket is returned.
    pub fn apply_image(
        &mut self,
        token: RequestToken,
        response: ImageSearchResponse,
    ) -> Option<RequestTicket> {
        let kind = self.accept(token)?;
        let dish = response.dish_info();
        if dish.is_none() {
            warn!(?response, "unexpected image search response");
        }
        self.replace_results(kind, response.page());
        self.image_uploaded = true;
        self.dish_info = dish;

        let cuisines = self.dish_info.as_ref()?.cuisines.clone();
        self.query.replace_cuisines(&cuisines);
        Some(self.listing())
    }

    /// Record a failure. The current results stay on screen.
    pub fn apply_failure(&mut self, token: RequestToken, error: ApiError) -> bool {
        match self.accept(token) {
            Some(kind) => {
                warn!(kind = kind.label(), %error, "request failed, keeping previous results");
                self.last_error = Some(error);
                true
            }
            None => false,
        }
    }

    /// Route an executed ticket's outcome to the matching handler. Returns a
    /// follow-up ticket when the outcome triggers one.
    pub fn apply(
        &mut self,
        token: RequestToken,
        outcome: Result<ModeOutcome, ApiError>,
    ) -> Option<RequestTicket> {
        match outcome {
            Ok(ModeOutcome::Page(page)) => {
                self.apply_page(token, page);
                None
            }
            Ok(ModeOutcome::Image(response)) => self.apply_image(token, response),
            Err(error) => {
                self.apply_failure(token, error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RestaurantId;

    fn summary(id: i64, name: &str) -> RestaurantSummary {
        RestaurantSummary {
            id: RestaurantId(id),
            name: name.to_string(),
            address: String::new(),
            average_cost_for_two: None,
            currency: None,
            cuisines: Vec::new(),
            aggregate_rating: None,
        }
    }

    fn page(names: &[&str], total: u64) -> RestaurantPage {
        RestaurantPage {
            restaurants: names
                .iter()
                .enumerate()
                .map(|(i, n)| summary(i as i64, n))
                .collect(),
            total_count: total,
        }
    }

    #[test]
    fn mount_issues_listing_with_defaults() {
        let mut c = ListController::new(None, PerPage::Ten);
        let t = c.mount();
        match t.mode {
            RequestMode::Listing(p) => {
                assert_eq!(p.page, 1);
                assert_eq!(p.per_page, 10);
            }
            other => panic!("expected listing, got {other:?}"),
        }
        assert_eq!(c.loading(), Some(RequestKind::Listing));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut c = ListController::new(None, PerPage::Ten);
        let first = c.mount();
        let second = c.apply_filters();
        assert!(c.apply_page(second.token, page(&["new"], 1)));
        assert!(!c.apply_page(first.token, page(&["old", "older"], 2)));
        assert_eq!(c.results().items[0].name, "new");
        assert_eq!(c.results().total, 1);
    }

    #[test]
    fn failure_keeps_results_and_records_error() {
        let mut c = ListController::new(None, PerPage::Ten);
        let t = c.mount();
        c.apply_page(t.token, page(&["a"], 1));
        let t = c.apply_filters();
        assert!(c.apply_failure(t.token, ApiError::NetworkUnreachable("refused".into())));
        assert_eq!(c.results().items.len(), 1);
        assert!(c.last_error().is_some());
        assert!(c.loading().is_none());
    }

    #[test]
    fn page_navigation_is_bounded() {
        let mut c = ListController::new(None, PerPage::Ten);
        let t = c.mount();
        c.apply_page(t.token, page(&["a"], 25));
        assert_eq!(c.total_pages(), 3);
        assert!(c.prev_page().is_none());
        assert!(c.next_page().is_some());
        assert!(c.next_page().is_some());
        assert_eq!(c.query().page(), 3);
        assert!(c.next_page().is_none());
    }

    #[test]
    fn blank_name_search_is_noop() {
        let mut c = ListController::new(None, PerPage::Ten);
        c.set_search_name("   ");
        assert!(c.search_by_name().is_none());
        c.set_search_name("Pizza");
        let t = c.search_by_name().unwrap();
        assert_eq!(t.mode, RequestMode::NameSearch { name: "Pizza".into() });
    }

    #[test]
    fn image_search_requires_selection() {
        let mut c = ListController::new(None, PerPage::Ten);
        assert!(c.search_by_image().is_none());
        c.select_image(ImageUpload::new("pizza.jpg", vec![1, 2, 3]));
        assert_eq!(c.search_by_image().unwrap().mode.kind(), RequestKind::ImageSearch);
    }

    #[test]
    fn reselecting_image_keeps_pending_listing() {
        let mut c = ListController::new(None, PerPage::Ten);
        let t = c.mount();
        c.select_image(ImageUpload::new("pizza.jpg", vec![0]));
        assert_eq!(c.loading(), Some(RequestKind::Listing));
        assert!(c.apply_page(t.token, page(&["a"], 1)));
    }

    #[test]
    fn reset_image_clears_image_and_cuisines_only() {
        let mut c = ListController::new(None, PerPage::Ten);
        c.set_search_name("dhaba");
        c.set_country_code(Some("1".into()));
        c.add_cuisine("Italian");
        c.select_image(ImageUpload::new("pizza.jpg", vec![0]));
        c.reset_image();
        assert!(c.image().is_none());
        assert!(c.query().cuisines().is_empty());
        assert_eq!(c.query().search_name(), "dhaba");
        assert_eq!(c.query().country_code(), Some("1"));
    }
}
