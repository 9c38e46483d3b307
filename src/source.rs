//! The collaborators a report is built from and delivered to.

use crate::error::{FetchError, RecordError, RecordErrorKind, ReportError, UpstreamError};
use crate::record::{FetchedImage, ImageRecord};
use std::path::{Component, Path, PathBuf};

/// Supplies the records that make up a report, in any order
pub trait RecordProvider {
    fn list_records(&self) -> Result<Vec<ImageRecord>, UpstreamError>;
}

impl RecordProvider for Vec<ImageRecord> {
    fn list_records(&self) -> Result<Vec<ImageRecord>, UpstreamError> {
        Ok(self.clone())
    }
}

/// Retrieves image bytes for records whose payload is only a locator. This is the one
/// place assembly blocks on I/O.
pub trait ImageFetcher {
    fn fetch(&self, locator: &str) -> Result<FetchedImage, FetchError>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> Result<FetchedImage, FetchError>,
{
    fn fetch(&self, locator: &str) -> Result<FetchedImage, FetchError> {
        self(locator)
    }
}

/// A fetcher for reports whose records all carry their images inline
#[derive(Debug, Default, Copy, Clone)]
pub struct InlineOnly;

impl ImageFetcher for InlineOnly {
    fn fetch(&self, locator: &str) -> Result<FetchedImage, FetchError> {
        Err(FetchError::new(locator, "no image fetcher configured"))
    }
}

/// Reads images from files below a root directory. The content-type is derived from the
/// file extension, the way a static file server would set it. Locators are relative
/// paths; absolute paths and `..` components are refused so nothing outside the root
/// can be read.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> FsFetcher {
        FsFetcher {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ImageFetcher for FsFetcher {
    fn fetch(&self, locator: &str) -> Result<FetchedImage, FetchError> {
        let relative = Path::new(locator);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::new(locator, "locator escapes the image directory"));
        }
        let path = self.root.join(relative);
        let bytes = std::fs::read(&path).map_err(|e| FetchError::new(locator, e))?;
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(content_type_for_extension)
            .map(str::to_string);
        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Receives the finished byte stream
pub trait OutputSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), std::io::Error>;
}

impl OutputSink for Vec<(String, Vec<u8>)> {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), std::io::Error> {
        self.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// Writes the document into a directory under the suggested filename
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> DirectorySink {
        DirectorySink {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl OutputSink for DirectorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Receives a reason for every skipped record and for a fatal failure
pub trait Diagnostics {
    fn skipped(&mut self, record: &ImageRecord, reason: &RecordError);
    fn fatal(&mut self, error: &ReportError);
}

/// Forwards diagnostics to the [log] facade
#[derive(Debug, Default, Copy, Clone)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn skipped(&mut self, record: &ImageRecord, reason: &RecordError) {
        log::warn!(
            "skipping record {} ({}): {}",
            record.id,
            record.locator(),
            reason
        );
    }

    fn fatal(&mut self, error: &ReportError) {
        log::error!("failed to generate report: {error}");
    }
}

/// A diagnostic captured in memory
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Skipped {
        record_id: String,
        kind: RecordErrorKind,
        reason: String,
    },
    Fatal(String),
}

impl Diagnostics for Vec<Diagnostic> {
    fn skipped(&mut self, record: &ImageRecord, reason: &RecordError) {
        self.push(Diagnostic::Skipped {
            record_id: record.id.clone(),
            kind: reason.kind(),
            reason: reason.to_string(),
        });
    }

    fn fatal(&mut self, error: &ReportError) {
        self.push(Diagnostic::Fatal(error.to_string()));
    }
}
