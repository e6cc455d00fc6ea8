//! Orientation classification for storage layout.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage-layout category derived from stream geometry.
///
/// This is not user-facing metadata; it only selects the storage key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify a stream's dimensions.
    ///
    /// The 16:9 test is an exact integer-quotient comparison, not a
    /// tolerance-based ratio: `width == 16 * height / 9` with truncating
    /// division. Boundary aspect ratios must classify identically across
    /// runs, so this must stay integer arithmetic.
    pub fn classify(width: u32, height: u32) -> Orientation {
        let (w, h) = (width as u64, height as u64);
        if w == 16 * h / 9 {
            Orientation::Landscape
        } else if h == 16 * w / 9 {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    /// Storage key prefix for this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.prefix())
    }
}
