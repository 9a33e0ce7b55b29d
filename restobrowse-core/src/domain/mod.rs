//! Domain types for restaurant records as served by the backend.

pub mod ids;
pub mod restaurant;

pub use ids::RestaurantId;
pub use restaurant::{
    DishInfo, ImageSearchResponse, RestaurantDetail, RestaurantPage, RestaurantSummary,
};
