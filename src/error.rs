use thiserror::Error;

/// A transport failure while retrieving the bytes of a record's image
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to fetch image `{locator}`: {reason}")]
pub struct FetchError {
    pub locator: String,
    pub reason: String,
}

impl FetchError {
    pub fn new<L: ToString, R: ToString>(locator: L, reason: R) -> FetchError {
        FetchError {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The record provider could not produce the list of records
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record provider unavailable: {0}")]
pub struct UpstreamError(pub String);

/// Why a single record was left out of the report. These never abort assembly.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("unsupported image format `{0}`")]
    /// The content-type is not one of the two embeddable formats
    UnsupportedFormat(String),

    #[error(transparent)]
    /// The image bytes could not be retrieved
    Fetch(#[from] FetchError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Decode(#[from] image::ImageError),
}

/// The category of a [RecordError], for callers that tally skips
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordErrorKind {
    UnsupportedFormat,
    Fetch,
    Decode,
}

impl RecordError {
    pub fn kind(&self) -> RecordErrorKind {
        match self {
            RecordError::UnsupportedFormat(_) => RecordErrorKind::UnsupportedFormat,
            RecordError::Fetch(_) => RecordErrorKind::Fetch,
            RecordError::Decode(_) => RecordErrorKind::Decode,
        }
    }
}

/// All fatal errors that the crate can generate
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// The record list could not be obtained
    UpstreamUnavailable(#[from] UpstreamError),

    #[error("report generation was cancelled")]
    /// Cancellation was requested and the caller asked for no partial output
    Cancelled,

    #[error(transparent)]
    /// An I/O error occurred while writing the document
    Io(#[from] std::io::Error),

    #[error("output sink rejected the document: {0}")]
    /// The output sink failed to persist or share the finished document
    Sink(#[source] std::io::Error),
}
