use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Finish, Pdf, Ref, TextStr};

/// A flat list of bookmarks shown in the reader's navigation pane
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub page_index: usize,
    pub title: String,
    /// Vertical position the reader scrolls to on the target page
    pub top: Pt,
}

impl Outline {
    pub fn add_bookmark(&mut self, page_index: usize, title: String, top: Pt) {
        self.entries.push(OutlineEntry {
            page_index,
            title,
            top,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the outline root and its items, returning the root's id. Nothing is
    /// written when there are no bookmarks.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<Ref> {
        if self.entries.is_empty() {
            return None;
        }

        // generate IDs for everything
        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<Ref> = (0..self.entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();
        let page_ids: Vec<Ref> = self
            .entries
            .iter()
            .map(|entry| refs.get_or_gen(RefType::Page(entry.page_index)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        if let (Some(first), Some(last)) = (item_ids.first(), item_ids.last()) {
            outline.first(*first);
            outline.last(*last);
        }
        outline.count(item_ids.len() as i32);
        outline.finish();

        for (i, entry) in self.entries.iter().enumerate() {
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if let Some(next) = item_ids.get(i + 1) {
                item.next(*next);
            }
            item.dest()
                .page(page_ids[i])
                .xyz(0.0, *entry.top, None);
        }

        Some(outlines_id)
    }
}
