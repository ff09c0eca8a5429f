//! Edit session management
//!
//! This module provides the per-user edit-session state machine:
//! - Which audio field the next input belongs to (`EditSession`)
//! - Input dispatch to the field parsers/validators (`EditMachine`)
//! - The commit flow: transform, deliver, clean up

mod commit;
mod machine;
mod state;

pub use machine::{EditMachine, MachineConfig};
pub use state::{EditField, EditSession};
