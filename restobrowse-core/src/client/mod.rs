//! Restaurant API trait and structured error types.
//!
//! The `RestaurantApi` trait abstracts over the backend so the screens can
//! be driven by the real HTTP client or by an in-process stub in tests.

pub mod http;

use thiserror::Error;

use crate::domain::{ImageSearchResponse, RestaurantDetail, RestaurantId, RestaurantPage};
use crate::query::{GeoQuery, ImageUpload, ListingParams, RequestMode};

pub use http::HttpApi;

/// Structured error types for backend calls.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("restaurant {id} not found")]
    NotFound { id: RestaurantId },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("could not read image: {0}")]
    Io(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ApiError {
    /// Short category tag for status lines and error history.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::NetworkUnreachable(_) => "network",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Status { .. } => "http",
            ApiError::MalformedResponse(_) => "data",
            ApiError::Io(_) => "io",
            ApiError::Client(_) => "client",
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e.to_string())
    }
}

/// Decoded response of whichever request mode was executed.
#[derive(Debug, Clone)]
pub enum ModeOutcome {
    Page(RestaurantPage),
    Image(ImageSearchResponse),
}

/// Backend operations used by the client.
pub trait RestaurantApi: Send + Sync {
    fn list(&self, params: &ListingParams) -> Result<RestaurantPage, ApiError>;

    fn detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError>;

    fn search_by_name(&self, name: &str) -> Result<RestaurantPage, ApiError>;

    fn nearby(&self, geo: &GeoQuery) -> Result<RestaurantPage, ApiError>;

    fn search_by_image(&self, image: &ImageUpload) -> Result<ImageSearchResponse, ApiError>;

    /// Run one list-side request mode.
    fn execute(&self, mode: &RequestMode) -> Result<ModeOutcome, ApiError> {
        match mode {
            RequestMode::Listing(params) => self.list(params).map(ModeOutcome::Page),
            RequestMode::NameSearch { name } => self.search_by_name(name).map(ModeOutcome::Page),
            RequestMode::Nearby(geo) => self.nearby(geo).map(ModeOutcome::Page),
            RequestMode::ImageSearch(image) => self.search_by_image(image).map(ModeOutcome::Image),
        }
    }
}
