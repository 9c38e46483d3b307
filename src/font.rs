use crate::refs::{ObjectReferences, RefType};
use id_arena::Id;
use pdf_writer::{Name, Pdf};

/// One of the base-14 fonts every PDF reader ships with. These need no embedding,
/// at the cost of only covering the WinAnsi character set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    TimesRoman,
    Courier,
}

impl StandardFont {
    fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
            StandardFont::HelveticaOblique => b"Helvetica-Oblique",
            StandardFont::TimesRoman => b"Times-Roman",
            StandardFont::Courier => b"Courier",
        }
    }
}

/// A font registered with a document. Fonts are stored "globally" within the document
/// and referred to from page contents by their id.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub face: StandardFont,
}

impl Font {
    pub fn standard(face: StandardFont) -> Font {
        Font { face }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_id = refs.get_or_gen(RefType::Font(id.index()));
        writer
            .type1_font(font_id)
            .base_font(Name(self.face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Encode text for a simple font using WinAnsiEncoding (Windows-1252). Characters the
/// encoding can't represent, and control characters, become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    // the 0x80..=0x9F block differs from latin-1
    let byte = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}
