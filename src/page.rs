use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// Text drawn at a fixed position. Each entry in `lines` starts `leading` below the
/// previous one; lines are never wrapped.
#[derive(Clone, PartialEq, Debug)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub font: SpanFont,
    pub leading: Pt,
    pub colour: Colour,
    /// Baseline origin of the first line
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub struct FilledRect {
    pub rect: Rect,
    pub colour: Colour,
}

/// A single positioned drawing primitive. Later operations paint over earlier ones.
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    Text(TextLayout),
    Image(ImageLayout),
    Rect(FilledRect),
}

/// A fixed-size canvas holding an append-only list of draw operations
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    contents: Vec<DrawOp>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), size.0, size.1),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_text(&mut self, text: TextLayout) {
        self.contents.push(DrawOp::Text(text));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(DrawOp::Image(image));
    }

    pub fn add_rect(&mut self, rect: FilledRect) {
        self.contents.push(DrawOp::Rect(rect));
    }

    /// The draw operations in painting order
    pub fn contents(&self) -> &[DrawOp] {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Images drawn on this page, in first-use order, without duplicates
    pub fn images(&self) -> Vec<Id<Image>> {
        let mut ids: Vec<Id<Image>> = Vec::new();
        for op in self.contents.iter() {
            if let DrawOp::Image(layout) = op {
                if !ids.contains(&layout.image) {
                    ids.push(layout.image);
                }
            }
        }
        ids
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), std::io::Error> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let font_refs: Vec<(usize, pdf_writer::Ref)> = fonts
            .iter()
            .map(|(font_id, _)| {
                let index = font_id.index();
                (index, refs.get_or_gen(RefType::Font(index)))
            })
            .collect();
        let image_refs: Vec<(usize, pdf_writer::Ref)> = self
            .images()
            .into_iter()
            .map(|image_id| {
                let index = image_id.index();
                (index, refs.get_or_gen(RefType::Image(index)))
            })
            .collect();

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (index, image_ref) in image_refs {
            resource_xobjects.pair(Name(format!("I{index}").as_bytes()), image_ref);
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents)?;
        writer.stream(content_id, rendered.as_slice());

        Ok(())
    }
}
