//! Motion body-text grouping.
//!
//! After the "Naamstemmingen" heading, each motion is printed twice: a
//! French block and a Dutch block, both opened by a heading carrying the
//! same boxed label. This module pairs the two and collects the Dutch
//! block's body text per language.

mod detector;
mod grouper;

pub use detector::{BorderedSpanDetector, SectionBoundaryDetector, ROLL_CALL_SECTION_TITLE};
pub use grouper::extract_motion_data;
