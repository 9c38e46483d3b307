use chrono::{DateTime, Utc};

/// Raw image bytes together with the content-type they were served with
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// The content-type as reported by the transport, if it reported one
    pub content_type: Option<String>,
}

impl FetchedImage {
    pub fn new<S: ToString>(bytes: Vec<u8>, content_type: S) -> FetchedImage {
        FetchedImage {
            bytes,
            content_type: Some(content_type.to_string()),
        }
    }
}

/// Where a record's image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// The bytes were delivered together with the record
    Inline(FetchedImage),
    /// The bytes must be retrieved through an [crate::ImageFetcher] using this locator
    Remote(String),
}

/// One annotated photo. Records are supplied by a [crate::RecordProvider] and are
/// never modified while the report is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub id: String,
    pub project_label: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub payload: ImagePayload,
}

impl ImageRecord {
    pub fn new<I: ToString, P: ToString, D: ToString>(
        id: I,
        project_label: P,
        description: D,
        timestamp: DateTime<Utc>,
        payload: ImagePayload,
    ) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            project_label: project_label.to_string(),
            description: description.to_string(),
            timestamp,
            payload,
        }
    }

    /// A short human-readable reference to the image, used in diagnostics
    pub fn locator(&self) -> &str {
        match &self.payload {
            ImagePayload::Inline(_) => "<inline>",
            ImagePayload::Remote(locator) => locator.as_str(),
        }
    }
}
