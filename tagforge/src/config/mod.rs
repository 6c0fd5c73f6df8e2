//! Various options to control parsing and writing behavior

mod parse_options;
mod write_options;

pub use parse_options::{ParseOptions, ParsingMode};
pub use write_options::WriteOptions;
