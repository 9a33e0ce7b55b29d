//! Request modes: the four mutually exclusive ways the list gets filled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use url::form_urlencoded;

use super::state::GeoQuery;

/// Parameters of a standard paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingParams {
    pub page: u32,
    pub per_page: u32,
    pub country_code: Option<String>,
    pub average_cost_for_two: Option<f64>,
    pub cuisines: Vec<String>,
}

impl ListingParams {
    /// Standard-encoded scalar parameters followed by one `cuisines=value`
    /// pair per cuisine, joined into a single query string.
    pub fn query_string(&self) -> String {
        let mut standard = form_urlencoded::Serializer::new(String::new());
        standard.append_pair("page", &self.page.to_string());
        standard.append_pair("per_page", &self.per_page.to_string());
        if let Some(code) = &self.country_code {
            standard.append_pair("country_code", code);
        }
        if let Some(cost) = self.average_cost_for_two {
            standard.append_pair("average_cost_for_two", &cost.to_string());
        }
        let standard = standard.finish();

        let mut repeated = form_urlencoded::Serializer::new(String::new());
        for cuisine in &self.cuisines {
            repeated.append_pair("cuisines", cuisine);
        }
        let repeated = repeated.finish();

        [standard, repeated]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// An image held in memory for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read the whole file into memory.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Best-effort MIME type from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Which of the four request modes produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Listing,
    NameSearch,
    Nearby,
    ImageSearch,
}

impl RequestKind {
    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Listing => "listing",
            RequestKind::NameSearch => "name search",
            RequestKind::Nearby => "nearby",
            RequestKind::ImageSearch => "image search",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestMode {
    Listing(ListingParams),
    NameSearch { name: String },
    Nearby(GeoQuery),
    ImageSearch(ImageUpload),
}

impl RequestMode {
    pub fn kind(&self) -> RequestKind {
        match self {
            RequestMode::Listing(_) => RequestKind::Listing,
            RequestMode::NameSearch { .. } => RequestKind::NameSearch,
            RequestMode::Nearby(_) => RequestKind::Nearby,
            RequestMode::ImageSearch(_) => RequestKind::ImageSearch,
        }
    }
}
