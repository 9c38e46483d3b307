//! Fixed report geometry plus the pieces that decide where things go on a page.

mod cursor;
pub use cursor::*;

mod fit;
pub use fit::*;

use crate::page::PageSize;
use crate::units::Pt;

/// Every report page is 600 x 800 units
pub const PAGE_SIZE: PageSize = (Pt(600.0), Pt(800.0));

/// Where the cursor starts on a fresh page
pub const TOP_START: Pt = Pt(750.0);

/// A record is never started below this line; a new page is begun instead
pub const MIN_Y: Pt = Pt(150.0);

/// Images are shrunk to fit inside this box
pub const IMAGE_BOX: (Pt, Pt) = (Pt(400.0), Pt(250.0));

/// Left edge of the title and banner
pub const LEFT_MARGIN: Pt = Pt(50.0);

/// Space taken by the two-line title block
pub const TITLE_ADVANCE: Pt = Pt(40.0);

/// Gap between the bottom of an image and its banner
pub const IMAGE_GAP: Pt = Pt(20.0);

/// Description banner size
pub const BANNER_SIZE: (Pt, Pt) = (Pt(500.0), Pt(20.0));

/// Offset of the description text from the banner's lower-left corner
pub const BANNER_TEXT_OFFSET: (Pt, Pt) = (Pt(5.0), Pt(5.0));

/// Space taken by the banner, including the gap before the next record
pub const BANNER_ADVANCE: Pt = Pt(30.0);
