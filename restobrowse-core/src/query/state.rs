//! Query state: the client-owned description of what the list should show.
//!
//! Every setter reports whether it actually changed anything so the
//! controller can decide whether a refetch is due.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::request::ListingParams;

/// Page sizes offered by the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PerPage {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PerPage {
    pub const ALL: [PerPage; 3] = [PerPage::Ten, PerPage::Twenty, PerPage::Fifty];

    pub fn value(self) -> u32 {
        match self {
            PerPage::Ten => 10,
            PerPage::Twenty => 20,
            PerPage::Fifty => 50,
        }
    }

    pub fn from_value(v: u32) -> Option<Self> {
        match v {
            10 => Some(PerPage::Ten),
            20 => Some(PerPage::Twenty),
            50 => Some(PerPage::Fifty),
            _ => None,
        }
    }

    pub fn next(self) -> PerPage {
        match self {
            PerPage::Ten => PerPage::Twenty,
            PerPage::Twenty => PerPage::Fifty,
            PerPage::Fifty => PerPage::Ten,
        }
    }
}

impl fmt::Display for PerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<PerPage> for u32 {
    fn from(p: PerPage) -> u32 {
        p.value()
    }
}

impl TryFrom<u32> for PerPage {
    type Error = String;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        PerPage::from_value(v).ok_or_else(|| format!("unsupported page size {v} (expected 10, 20 or 50)"))
    }
}

/// A complete nearby-search request. Only exists when the whole
/// latitude/longitude/range triple is populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius truncated to whole kilometres.
    pub max_distance_km: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    page: u32,
    per_page: PerPage,
    search_name: String,
    country_code: Option<String>,
    average_spent: Option<f64>,
    cuisines: Vec<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    range: Option<f64>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: PerPage::Ten,
            search_name: String::new(),
            country_code: None,
            average_spent: None,
            cuisines: Vec::new(),
            latitude: None,
            longitude: None,
            range: None,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> PerPage {
        self.per_page
    }

    pub fn search_name(&self) -> &str {
        &self.search_name
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn average_spent(&self) -> Option<f64> {
        self.average_spent
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn range(&self) -> Option<f64> {
        self.range
    }

    /// The geo triple as a unit, or `None` if any part is missing.
    pub fn geo(&self) -> Option<GeoQuery> {
        match (self.latitude, self.longitude, self.range) {
            (Some(latitude), Some(longitude), Some(range)) => Some(GeoQuery {
                latitude,
                longitude,
                max_distance_km: range.trunc() as i64,
            }),
            _ => None,
        }
    }

    /// Pages start at 1; zero is clamped.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        replace(&mut self.page, page)
    }

    pub fn set_per_page(&mut self, per_page: PerPage) -> bool {
        replace(&mut self.per_page, per_page)
    }

    pub fn set_search_name(&mut self, name: impl Into<String>) -> bool {
        replace(&mut self.search_name, name.into())
    }

    /// Blank input clears the filter.
    pub fn set_country_code(&mut self, code: Option<String>) -> bool {
        let code = code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        replace(&mut self.country_code, code)
    }

    pub fn set_average_spent(&mut self, spent: Option<f64>) -> bool {
        replace(&mut self.average_spent, spent)
    }

    pub fn set_latitude(&mut self, latitude: Option<f64>) -> bool {
        replace(&mut self.latitude, latitude)
    }

    pub fn set_longitude(&mut self, longitude: Option<f64>) -> bool {
        replace(&mut self.longitude, longitude)
    }

    pub fn set_range(&mut self, range: Option<f64>) -> bool {
        replace(&mut self.range, range)
    }

    /// Append a cuisine. Blank and already-present names are ignored.
    pub fn add_cuisine(&mut self, cuisine: &str) -> bool {
        let cuisine = cuisine.trim();
        if cuisine.is_empty() || self.cuisines.iter().any(|c| c == cuisine) {
            return false;
        }
        self.cuisines.push(cuisine.to_string());
        true
    }

    pub fn remove_cuisine(&mut self, cuisine: &str) -> bool {
        let before = self.cuisines.len();
        self.cuisines.retain(|c| c != cuisine);
        self.cuisines.len() != before
    }

    /// Replace the whole cuisine list, keeping the first occurrence of any
    /// repeated name.
    pub fn replace_cuisines<I, S>(&mut self, cuisines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: Vec<String> = Vec::new();
        for c in cuisines {
            let c = c.as_ref().trim();
            if !c.is_empty() && !next.iter().any(|n| n == c) {
                next.push(c.to_string());
            }
        }
        replace(&mut self.cuisines, next)
    }

    pub fn clear_location(&mut self) -> bool {
        let a = self.set_latitude(None);
        let b = self.set_longitude(None);
        let c = self.set_range(None);
        a || b || c
    }

    /// Clears country code, average spend and cuisines.
    pub fn clear_filters(&mut self) -> bool {
        let a = self.set_country_code(None);
        let b = self.set_average_spent(None);
        let c = self.replace_cuisines(std::iter::empty::<&str>());
        a || b || c
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search_name(String::new())
    }

    pub fn listing_params(&self) -> ListingParams {
        ListingParams {
            page: self.page,
            per_page: self.per_page.value(),
            country_code: self.country_code.clone(),
            average_cost_for_two: self.average_spent,
            cuisines: self.cuisines.clone(),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
