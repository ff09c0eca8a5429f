pub mod encode;
pub mod file;
pub mod transform;

pub use encode::{OutputFormat, TagSet};
pub use file::AudioFile;
pub use transform::{process, process_checked, TransformOutcome, TransformReport};
