pub mod audio;
pub mod config;
pub mod error;
pub mod ingest;
pub mod locale;
pub mod model;
pub mod parse;
pub mod session;
pub mod store;
pub mod thumbnail;
pub mod transport;

pub use audio::{process, process_checked, AudioFile, OutputFormat, TagSet, TransformOutcome};
pub use config::Config;
pub use error::{FilenameError, ParseError, TransformError};
pub use locale::{Catalog, MessageKey, MissingKey};
pub use model::{AudioPatch, AudioRecord, NewAudio, UserId};
pub use parse::{parse_cut_range, parse_date, parse_time, validate_filename, FilenamePolicy};
pub use session::{EditField, EditMachine, EditSession, MachineConfig};
pub use store::{AudioStore, MemoryStore, SessionStore};
pub use transport::{IncomingMessage, OutgoingAudio, PhotoAttachment, Transport, TransportError};
