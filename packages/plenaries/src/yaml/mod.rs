//! YAML output for extracted plenary reports.

mod writer;

pub use writer::{generate_yaml, save_report};
