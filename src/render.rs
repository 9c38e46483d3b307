use crate::document::Document;
use crate::error::RecordError;
use crate::font::Font;
use crate::image::Image;
use crate::layout::{
    fit, Cursor, Room, BANNER_ADVANCE, BANNER_SIZE, BANNER_TEXT_OFFSET, IMAGE_BOX, IMAGE_GAP,
    LEFT_MARGIN, PAGE_SIZE, TITLE_ADVANCE,
};
use crate::options::ReportOptions;
use crate::page::{FilledRect, ImageLayout, Page, SpanFont, TextLayout};
use crate::record::{ImagePayload, ImageRecord};
use crate::rect::Rect;
use crate::source::ImageFetcher;
use id_arena::Id;
use std::fmt::Write;

/// What happened to a single record
#[derive(Debug)]
pub enum RenderOutcome {
    /// The record was drawn, starting on this page
    Placed(Id<Page>),
    /// The record contributed nothing to the document
    Skipped(RecordError),
}

/// Draws records one after another onto a document
pub struct RecordRenderer<'a> {
    fetcher: &'a dyn ImageFetcher,
    options: &'a ReportOptions,
    title_font: SpanFont,
    body_font: SpanFont,
}

impl<'a> RecordRenderer<'a> {
    /// Register the fonts the renderer needs with `document`
    pub fn new(
        document: &mut Document,
        fetcher: &'a dyn ImageFetcher,
        options: &'a ReportOptions,
    ) -> RecordRenderer<'a> {
        let title = document.add_font(Font::standard(options.title_font));
        let body = if options.body_font == options.title_font {
            title
        } else {
            document.add_font(Font::standard(options.body_font))
        };

        RecordRenderer {
            fetcher,
            options,
            title_font: SpanFont {
                id: title,
                size: options.font_size,
            },
            body_font: SpanFont {
                id: body,
                size: options.font_size,
            },
        }
    }

    /// Place `record` at the cursor: title, then the image centred on the page, then the
    /// description on a coloured banner. The image is fetched and decoded before anything
    /// is drawn, so a record that can't be loaded leaves both the document and the cursor
    /// untouched. A record is never split across pages, even if it overflows the bottom.
    pub fn render(
        &self,
        record: &ImageRecord,
        cursor: &mut Cursor,
        document: &mut Document,
    ) -> RenderOutcome {
        let image = match self.load(record) {
            Ok(image) => image,
            Err(reason) => return RenderOutcome::Skipped(reason),
        };
        let display = fit(image.size(), IMAGE_BOX);

        if cursor.ensure_room(document) == Room::NeedsPage {
            log::debug!("record {} starts a new page", record.id);
        }
        let top = cursor.y;
        let image = document.add_image(image);

        let page = &mut document.pages[cursor.page];
        let x = (PAGE_SIZE.0 - display.width) / 2.0;

        page.add_text(TextLayout {
            lines: self.title_lines(record),
            font: self.title_font,
            leading: self.options.title_leading,
            colour: self.options.title_colour,
            coords: (LEFT_MARGIN, cursor.y),
        });
        cursor.advance(TITLE_ADVANCE);

        page.add_image(ImageLayout {
            image,
            position: Rect::from_origin(
                x,
                cursor.y - display.height,
                display.width,
                display.height,
            ),
        });
        cursor.advance(display.height + IMAGE_GAP);

        page.add_rect(FilledRect {
            rect: Rect::from_origin(LEFT_MARGIN, cursor.y, BANNER_SIZE.0, BANNER_SIZE.1),
            colour: self.options.banner_colour,
        });
        page.add_text(TextLayout {
            lines: vec![single_line(&record.description)],
            font: self.body_font,
            leading: self.options.title_leading,
            colour: self.options.description_colour,
            coords: (
                LEFT_MARGIN + BANNER_TEXT_OFFSET.0,
                cursor.y + BANNER_TEXT_OFFSET.1,
            ),
        });
        cursor.advance(BANNER_ADVANCE);

        if self.options.bookmarks {
            document.add_bookmark(
                format!("{} / {}", record.project_label, record.id),
                cursor.page,
                top + self.options.font_size,
            );
        }

        log::debug!(
            "placed record {} at {}x{} on page {}",
            record.id,
            display.width,
            display.height,
            cursor.page.index() + 1
        );
        RenderOutcome::Placed(cursor.page)
    }

    fn load(&self, record: &ImageRecord) -> Result<Image, RecordError> {
        match &record.payload {
            ImagePayload::Inline(image) => {
                Image::decode(&image.bytes, image.content_type.as_deref())
            }
            ImagePayload::Remote(locator) => {
                let image = self.fetcher.fetch(locator)?;
                Image::decode(&image.bytes, image.content_type.as_deref())
            }
        }
    }

    fn title_lines(&self, record: &ImageRecord) -> Vec<String> {
        let mut timestamp = String::new();
        if write!(
            timestamp,
            "{}",
            record.timestamp.format(&self.options.timestamp_format)
        )
        .is_err()
        {
            // an invalid format string only shows up when formatting
            timestamp = record.timestamp.to_rfc3339();
        }

        vec![
            format!("Project: {}", record.project_label),
            format!("ID: {} - {}", record.id, timestamp),
        ]
    }
}

/// The banner holds one line; line breaks in a description are flattened to spaces
fn single_line(text: &str) -> String {
    text.split(|c: char| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
