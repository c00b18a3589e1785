//! Element-tree view over parsed plenary reports.

mod decode;
mod utils;

pub use decode::{parse_report, read_plenary_html};
pub use utils::{
    classes, document_text, flat_text, has_class, has_tag, next_element_siblings,
    raw_text, selector, siblings_until, style, tag_name, trimmed_text,
};
