use crate::units::Pt;

/// The size an image is drawn at on the page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplaySize {
    pub width: Pt,
    pub height: Pt,
}

/// Shrink `intrinsic` to fit inside `max`, preserving the aspect ratio. Images that
/// already fit are returned unchanged; nothing is ever scaled up.
pub fn fit(intrinsic: (Pt, Pt), max: (Pt, Pt)) -> DisplaySize {
    let (width, height) = intrinsic;
    let (max_width, max_height) = max;

    if width <= max_width && height <= max_height {
        return DisplaySize { width, height };
    }

    let scale = (*max_width / *width).min(*max_height / *height);

    // clamp so float error can never push a side past the box
    DisplaySize {
        width: (width * scale).min(max_width),
        height: (height * scale).min(max_height),
    }
}
