//! restobrowse core: client-side contract for browsing a restaurant API.
//!
//! This crate contains everything below the screens:
//! - Domain types for restaurant records and response envelopes
//! - Query state with its four request modes (listing, name, nearby, image)
//! - Sans-IO list and detail controllers guarded by request sequencing
//! - Typed navigation context carried between list and detail
//! - `RestaurantApi` trait with a blocking reqwest implementation
//! - TOML client configuration

pub mod client;
pub mod config;
pub mod detail;
pub mod domain;
pub mod navigation;
pub mod query;
pub mod sequence;

pub use client::{ApiError, HttpApi, ModeOutcome, RestaurantApi};
pub use config::{ClientConfig, ConfigError};
pub use detail::{DetailController, DetailState, DetailTicket};
pub use domain::{
    DishInfo, ImageSearchResponse, RestaurantDetail, RestaurantId, RestaurantPage,
    RestaurantSummary,
};
pub use navigation::{ListContext, ListFilters, Route};
pub use query::{
    GeoQuery, ImageUpload, ListController, ListingParams, PerPage, QueryState, RequestKind,
    RequestMode, RequestTicket, ResultSet,
};
pub use sequence::{RequestSequence, RequestToken};
