use crate::{
    font::Font,
    image::Image,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    units::Pt,
    ReportError,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the report
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub(crate) pages: Arena<Page>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Append a page to the end of the document. Pages can't be removed or reordered,
    /// so the returned id stays valid for the lifetime of the document.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        self.pages.alloc(page)
    }

    /// Read back a page. Only the layout code in this crate can draw onto a page, so a
    /// page the cursor has moved past stays as it was:
    ///
    /// ```compile_fail
    /// # use photo_report::{layout::PAGE_SIZE, Document, Page};
    /// let mut doc = Document::default();
    /// let id = doc.add_page(Page::new(PAGE_SIZE));
    /// doc.page_mut(id);
    /// ```
    pub fn page(&self, id: Id<Page>) -> Option<&Page> {
        self.pages.get(id)
    }

    /// Pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().map(|(_, page)| page)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a font to the document structure. Any page can refer to it by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Any page can refer to it by the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a bookmark in the document outline pointing at `top` on the given page
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page: Id<Page>, top: Pt) {
        self.outline
            .add_bookmark(page.index(), title.to_string(), top);
    }

    /// Write the entire document to the writer. The document is consumed: once it has been
    /// written it can no longer change. The entire document is "rendered" in memory first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), ReportError> {
        let Document {
            info,
            pages,
            fonts,
            images,
            outline,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = pages
            .iter()
            .map(|(id, _)| refs.gen(RefType::Page(id.index())))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (id, page) in pages.iter() {
            page.write(&mut refs, id.index(), &fonts, &mut writer)?;
        }

        let outline_id = outline.write(&mut refs, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outline_id) = outline_id {
            catalog.outlines(outline_id);
        }
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// Serialize the document to an in-memory PDF byte stream
    pub fn into_bytes(self) -> Result<Vec<u8>, ReportError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    /// Serialize the document and encode the byte stream as standard, padded base64
    /// (no data-URI prefix), for transports that only carry text
    pub fn into_base64(self) -> Result<String, ReportError> {
        Ok(STANDARD.encode(self.into_bytes()?))
    }
}
