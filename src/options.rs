use crate::colour::{colours, Colour};
use crate::font::StandardFont;
use crate::info::Info;
use crate::units::Pt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What assembly does when it notices it has been cancelled
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Stop early and hand back the records placed so far
    #[default]
    KeepPartial,
    /// Stop early and fail with [crate::ReportError::Cancelled]
    Fail,
}

/// A cloneable flag that asks a running assembly to stop. It is checked before each
/// record, never in the middle of one.
#[derive(Debug, Default, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything about a report that isn't page geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Metadata written to the PDF info dictionary
    pub info: Info,
    /// Suggested filename handed to the output sink
    pub filename: String,
    /// strftime-style format for the timestamp in each record's title
    pub timestamp_format: String,
    pub title_font: StandardFont,
    pub body_font: StandardFont,
    pub font_size: Pt,
    /// Distance between the two lines of a record's title
    pub title_leading: Pt,
    pub title_colour: Colour,
    pub banner_colour: Colour,
    pub description_colour: Colour,
    /// Add a bookmark per placed record
    pub bookmarks: bool,
    /// Only include records with exactly this project label
    pub project: Option<String>,
    pub cancel_policy: CancelPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            info: Info::default(),
            filename: "document.pdf".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            title_font: StandardFont::Helvetica,
            body_font: StandardFont::Helvetica,
            font_size: Pt(12.0),
            title_leading: Pt(14.0),
            title_colour: colours::BLACK,
            banner_colour: colours::BANNER_BLUE,
            description_colour: colours::WHITE,
            bookmarks: true,
            project: None,
            cancel_policy: CancelPolicy::KeepPartial,
        }
    }
}

impl ReportOptions {
    pub fn new() -> ReportOptions {
        ReportOptions::default()
    }

    pub fn info(&mut self, info: Info) -> &mut Self {
        self.info = info;
        self
    }

    pub fn filename<S: ToString>(&mut self, filename: S) -> &mut Self {
        self.filename = filename.to_string();
        self
    }

    pub fn timestamp_format<S: ToString>(&mut self, format: S) -> &mut Self {
        self.timestamp_format = format.to_string();
        self
    }

    pub fn fonts(&mut self, title: StandardFont, body: StandardFont) -> &mut Self {
        self.title_font = title;
        self.body_font = body;
        self
    }

    pub fn bookmarks(&mut self, bookmarks: bool) -> &mut Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn project<S: ToString>(&mut self, project: S) -> &mut Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn cancel_policy(&mut self, policy: CancelPolicy) -> &mut Self {
        self.cancel_policy = policy;
        self
    }
}
