//! Assembles annotated project photos into a paginated PDF report.
//!
//! Records are sorted newest first and drawn one after another: a title with the project
//! and capture time, the photo scaled down to fit a fixed box, and the description on a
//! coloured banner. Records whose image can't be fetched or decoded are skipped without
//! disturbing the rest of the report.

mod assemble;
pub use assemble::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Fixed page geometry, the page cursor and the image fit calculation
pub mod layout;

mod options;
pub use options::*;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod source;
pub use source::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
