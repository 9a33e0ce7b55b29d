//! Restaurant records and the response envelopes that carry them.
//!
//! The backend serializes one document shape for every endpoint; list items
//! simply ignore the fields only the detail view needs.

use serde::{Deserialize, Deserializer, Serialize};

use super::ids::RestaurantId;

/// A restaurant as shown in the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    #[serde(rename = "restaurant_id")]
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub average_cost_for_two: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub aggregate_rating: Option<f64>,
}

/// Full record for the detail view. Refetched on every visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetail {
    #[serde(rename = "restaurant_id")]
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub average_cost_for_two: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub aggregate_rating: Option<f64>,
    #[serde(default)]
    pub rating_color: Option<String>,
    #[serde(default)]
    pub rating_text: Option<String>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub price_range: Option<u8>,
    #[serde(default, deserialize_with = "yes_no")]
    pub has_table_booking: Option<bool>,
    #[serde(default, deserialize_with = "yes_no")]
    pub has_online_delivery: Option<bool>,
    #[serde(default, deserialize_with = "yes_no")]
    pub is_delivering_now: Option<bool>,
    #[serde(default, deserialize_with = "yes_no")]
    pub switch_to_order_menu: Option<bool>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub locality_verbose: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<i64>,
}

impl RestaurantDetail {
    /// Rating color as sent by the backend, or the dark green the web client
    /// fell back to.
    pub fn rating_color_or_default(&self) -> &str {
        self.rating_color.as_deref().unwrap_or("#005700")
    }
}

/// Response of the list, name-search and nearby endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPage {
    pub restaurants: Vec<RestaurantSummary>,
    pub total_count: u64,
}

/// Response of the image-search endpoint. Every field is optional; the
/// classifier may answer with only part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub predicted_food: Option<String>,
    /// Kept as raw JSON so a non-array value can be told apart from a missing one.
    #[serde(default)]
    pub cuisines: Option<serde_json::Value>,
    #[serde(default)]
    pub restaurants: Option<Vec<RestaurantSummary>>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl ImageSearchResponse {
    /// The classifier verdict, if the payload is well formed: a predicted
    /// food and a cuisines array of strings.
    pub fn dish_info(&self) -> Option<DishInfo> {
        let predicted_food = self.predicted_food.as_ref().filter(|f| !f.is_empty())?;
        let cuisines = self
            .cuisines
            .as_ref()?
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()?;
        Some(DishInfo {
            predicted_food: predicted_food.clone(),
            cuisines,
        })
    }

    /// Whatever result list the response carries, empty when absent.
    pub fn page(&self) -> RestaurantPage {
        RestaurantPage {
            restaurants: self.restaurants.clone().unwrap_or_default(),
            total_count: self.total_count.unwrap_or(0),
        }
    }
}

/// Dish and cuisines inferred from an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishInfo {
    pub predicted_food: String,
    pub cuisines: Vec<String>,
}

/// The backend stores booking/delivery flags as "Yes"/"No" strings.
fn yes_no<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => None,
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Int(i)) => Some(i != 0),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Some(true),
            "no" | "false" | "0" => Some(false),
            _ => None,
        },
    })
}
