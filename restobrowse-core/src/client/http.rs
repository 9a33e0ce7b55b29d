//! Blocking HTTP implementation of `RestaurantApi`.
//!
//! One request per call, no retries. Callers that must not block (the TUI)
//! run these on a worker thread.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{ApiError, RestaurantApi};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::{ImageSearchResponse, RestaurantDetail, RestaurantId, RestaurantPage};
use crate::query::{GeoQuery, ImageUpload, ListingParams};

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e: ConfigError| ApiError::Client(e.to_string()))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_url(&self, params: &ListingParams) -> String {
        format!("{}/restaurants/?{}", self.base_url, params.query_string())
    }

    pub fn detail_url(&self, id: RestaurantId) -> String {
        format!("{}/restaurants/{id}", self.base_url)
    }

    fn search_url(&self) -> String {
        format!("{}/restaurants/search/", self.base_url)
    }

    fn nearby_url(&self) -> String {
        format!("{}/restaurants/nearby/", self.base_url)
    }

    fn image_url(&self) -> String {
        format!("{}/restaurants/search/image/", self.base_url)
    }

    /// Send a request and decode a JSON body. A 404 maps to `NotFound` when
    /// the caller names the record it asked for.
    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
        record: Option<RestaurantId>,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "sending request");
        let resp = request.send().map_err(transport_error)?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = record {
                return Err(ApiError::NotFound { id });
            }
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<T>()
            .map_err(|e| ApiError::MalformedResponse(format!("{url}: {e}")))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::MalformedResponse(e.to_string())
    } else {
        ApiError::NetworkUnreachable(e.to_string())
    }
}

impl RestaurantApi for HttpApi {
    fn list(&self, params: &ListingParams) -> Result<RestaurantPage, ApiError> {
        let url = self.list_url(params);
        self.send_json(self.client.get(&url), &url, None)
    }

    fn detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        let url = self.detail_url(id);
        self.send_json(self.client.get(&url), &url, Some(id))
    }

    fn search_by_name(&self, name: &str) -> Result<RestaurantPage, ApiError> {
        let url = self.search_url();
        let request = self.client.get(&url).query(&[("name", name)]);
        self.send_json(request, &url, None)
    }

    fn nearby(&self, geo: &GeoQuery) -> Result<RestaurantPage, ApiError> {
        let url = self.nearby_url();
        let request = self.client.get(&url).query(&[
            ("latitude", geo.latitude.to_string()),
            ("longitude", geo.longitude.to_string()),
            ("max_distance_km", geo.max_distance_km.to_string()),
        ]);
        self.send_json(request, &url, None)
    }

    fn search_by_image(&self, image: &ImageUpload) -> Result<ImageSearchResponse, ApiError> {
        let url = self.image_url();
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type())
            .map_err(|e| ApiError::Client(e.to_string()))?;
        let form = Form::new().part("image", part);
        self.send_json(self.client.post(&url).multipart(form), &url, None)
    }
}
