//! Query-state contract of the list screen: state, request modes, controller.

pub mod controller;
pub mod request;
pub mod state;

pub use controller::{ListController, RequestTicket, ResultSet};
pub use request::{ImageUpload, ListingParams, RequestKind, RequestMode};
pub use state::{GeoQuery, PerPage, QueryState};
