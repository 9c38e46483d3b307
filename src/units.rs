use derive_more::{Add, AddAssign, Deref, Display, Div, From, Into, Mul, Sub, SubAssign, Sum};

/// A length in PDF user-space units (1/72 of an inch). Page coordinates start at the
/// bottom-left corner of the page and grow upwards.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    Div,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

impl Pt {
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }
}

impl From<u32> for Pt {
    fn from(px: u32) -> Self {
        Pt(px as f32)
    }
}
