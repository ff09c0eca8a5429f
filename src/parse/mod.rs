//! Parsers and validators for user-supplied text input.

pub mod date;
pub mod filename;
pub mod range;
pub mod timespec;

pub use date::parse_date;
pub use filename::{validate_filename, FilenamePolicy};
pub use range::parse_cut_range;
pub use timespec::parse_time;
