//! # Nightskycam Serialization
//!
//! Serialization of the messages exchanged between nightskycam systems and
//! the nightskycam server.
//!
//! ## Components
//!
//! | Module | Content |
//! |--------|---------|
//! | `codec` | Canonical encoding, HMAC-SHA256 signing, required keys |
//! | `fix` | Wire normalization of paths and null values |
//! | `command` | Remote commands and their results |
//! | `config` | Runner configuration updates |
//! | `status` | Runner status reports, entries registry and summaries |
//!
//! ## Design Principles
//!
//! - **Single Raiser**: only the codec produces `ImproperMessage` and
//!   `IncorrectToken` for malformed or forged messages; channels propagate
//!   them unchanged.
//! - **Opt-out Verification**: decoding without a token never checks the
//!   signature.
//! - **Static Registry**: runner classes, their entries shape and their
//!   report functions live in one read-only table.
//!
//! ## Example
//!
//! ```
//! use nightskycam_serialization::{deserialize_command, serialize_command};
//!
//! let message = serialize_command(4, "ls /", Some("secret"));
//! let (command_id, command) = deserialize_command(&message, Some("secret")).unwrap();
//! assert_eq!((command_id, command.as_str()), (4, "ls /"));
//! ```

#![warn(clippy::all)]

pub mod codec;
pub mod command;
pub mod config;
pub mod errors;
pub mod fix;
pub mod status;

pub use codec::{deserialize, serialize, CodecConfig, Envelope, Message, MessageCodec};
pub use command::{
    deserialize_command, deserialize_command_result, serialize_command, serialize_command_result,
    CommandResult,
};
pub use config::{deserialize_config_update, serialize_config_update};
pub use errors::{Result, SerializationError};
pub use fix::{deserialize_fix_dict, serialize_fix_dict, FixValue};
pub use status::{
    deserialize_status, get_random_status_dict, get_status_entries_report,
    has_runner_status_dict, has_status_entries_report_function, serialize_status, RunnerClass,
    RunnerEntries, StatusDict,
};
