//! Converts page draw operations into PDF content stream operators.

use crate::font::encode_win_ansi;
use crate::page::{DrawOp, FilledRect, ImageLayout, TextLayout};
use std::io::Write;

/// Renders page contents to a PDF content stream. Each operation is wrapped in its own
/// `q`/`Q` pair so graphics state never leaks from one operation into the next.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[DrawOp]) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for op in contents.iter() {
        match op {
            DrawOp::Text(text) => render_text(&mut content, text)?,
            DrawOp::Image(image) => render_image(&mut content, image)?,
            DrawOp::Rect(rect) => render_rect(&mut content, rect)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text(content: &mut Vec<u8>, text: &TextLayout) -> Result<(), std::io::Error> {
    if text.lines.is_empty() {
        return Ok(());
    }

    write!(content, "q\n")?;
    text.colour.write_fill(content)?;
    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", text.font.id.index(), text.font.size)?;
    write!(content, "{} TL\n", text.leading)?;
    write!(content, "{} {} Td\n", text.coords.0, text.coords.1)?;
    for (i, line) in text.lines.iter().enumerate() {
        if i > 0 {
            write!(content, "T*\n")?;
        }
        write!(content, "<")?;
        for byte in encode_win_ansi(line) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
    }
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_image(content: &mut Vec<u8>, image: &ImageLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(
        content,
        "{} 0 0 {} {} {} cm\n",
        image.position.width(),
        image.position.height(),
        image.position.x1,
        image.position.y1
    )?;
    write!(content, "/I{} Do\n", image.image.index())?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rect(content: &mut Vec<u8>, rect: &FilledRect) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    rect.colour.write_fill(content)?;
    write!(
        content,
        "{} {} {} {} re\n",
        rect.rect.x1,
        rect.rect.y1,
        rect.rect.width(),
        rect.rect.height()
    )?;
    write!(content, "f\n")?;
    write!(content, "Q\n")?;
    Ok(())
}
