use super::{MIN_Y, PAGE_SIZE, TOP_START};
use crate::document::Document;
use crate::page::Page;
use crate::units::Pt;
use id_arena::Id;

/// Whether the current page can take another record
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Room {
    NeedsPage,
    HasRoom,
}

/// The write position within a document: the page being filled and the baseline that
/// the next piece of content starts at. `y` only ever moves down the page until a new
/// page is started.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub page: Id<Page>,
    pub y: Pt,
}

impl Cursor {
    /// Add the first page to `document` and place the cursor at its top
    pub fn start(document: &mut Document) -> Cursor {
        let page = document.add_page(Page::new(PAGE_SIZE));
        Cursor { page, y: TOP_START }
    }

    pub fn room(&self) -> Room {
        if self.y < MIN_Y {
            Room::NeedsPage
        } else {
            Room::HasRoom
        }
    }

    /// Start a new page if the cursor has dropped below [MIN_Y]. Returns the state the
    /// cursor was in before the check.
    pub fn ensure_room(&mut self, document: &mut Document) -> Room {
        let room = self.room();
        if room == Room::NeedsPage {
            self.page = document.add_page(Page::new(PAGE_SIZE));
            self.y = TOP_START;
            log::debug!("starting page {}", document.page_count());
        }
        room
    }

    /// Move the cursor down by `delta`. This may take the cursor below [MIN_Y]; the
    /// next [Cursor::ensure_room] deals with that.
    pub fn advance(&mut self, delta: Pt) {
        self.y -= delta;
    }
}
