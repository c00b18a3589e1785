//! Recognizing the structural anchors of the roll-call section.

use scraper::ElementRef;

use crate::html::{has_class, has_tag, selector, style, trimmed_text};

/// Title of the roll-call section, compared case-insensitively.
pub const ROLL_CALL_SECTION_TITLE: &str = "naamstemmingen";

/// Recognizes where the roll-call section starts and how its motion text is grouped.
///
/// Each era of the report layout gets its own implementation, so the
/// grouping algorithm does not change when the publisher's markup drifts.
pub trait SectionBoundaryDetector: Sync {
    /// Whether an element is the heading opening the roll-call section.
    fn is_section_start(&self, element: ElementRef<'_>) -> bool;

    /// Whether an element is a motion title heading.
    fn is_motion_title(&self, element: ElementRef<'_>) -> bool;

    /// Grouping key of an element that opens a new motion-text group.
    ///
    /// Returns `None` for elements that continue the current group.
    fn group_label(&self, element: ElementRef<'_>) -> Option<String>;
}

/// Detector for reports where a group opens with an `h2` holding exactly
/// one boxed (`border:solid`) span, whose text is the group label.
///
/// The boxes are not applied consistently by the publisher, so groups found
/// this way are best effort.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderedSpanDetector;

impl SectionBoundaryDetector for BorderedSpanDetector {
    fn is_section_start(&self, element: ElementRef<'_>) -> bool {
        let is_heading =
            has_tag(element, "h1") || (has_tag(element, "p") && has_class(element, "Titre1NL"));
        is_heading && trimmed_text(element).to_lowercase() == ROLL_CALL_SECTION_TITLE
    }

    fn is_motion_title(&self, element: ElementRef<'_>) -> bool {
        has_tag(element, "h2")
            || (has_tag(element, "p")
                && (has_class(element, "Titre2NL") || has_class(element, "Titre2FR")))
    }

    fn group_label(&self, element: ElementRef<'_>) -> Option<String> {
        if !has_tag(element, "h2") {
            return None;
        }

        let span_selector = selector("span");
        let mut bordered = element
            .select(&span_selector)
            .filter(|span| style(*span).is_some_and(is_bordered));
        let span = bordered.next()?;
        if bordered.next().is_some() {
            return None;
        }
        Some(trimmed_text(span))
    }
}

/// Inline style draws a solid border (`border:solid`, spacing ignored).
fn is_bordered(style: &str) -> bool {
    let compact: String = style.split_whitespace().collect();
    compact.contains("border:solid")
}
