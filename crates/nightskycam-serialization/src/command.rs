//! # Command Channel
//!
//! Remote commands sent by the server to a system, and the results the
//! system sends back once the command has been executed.

use crate::codec::{deserialize, serialize, Envelope, Message};
use crate::errors::{Result, SerializationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const COMMAND_ID: &str = "command_id";
const COMMAND: &str = "command";

/// Outcome of a remote command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Identifier assigned by the server when the command was queued.
    pub command_id: i64,
    /// The command line as executed.
    pub command: String,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code of the process, as reported by the runner.
    pub exit_code: String,
    /// Error raised while trying to run the command, empty if none.
    pub error: String,
}

impl CommandResult {
    const FIELDS: [&'static str; 6] = [
        COMMAND_ID, COMMAND, "stdout", "stderr", "exit_code", "error",
    ];

    /// Creates a command result.
    pub fn new(
        command_id: i64,
        command: impl Into<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            command_id,
            command: command.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: exit_code.into(),
            error: error.into(),
        }
    }
}

/// Serializes a command request.
///
/// Counterpart: [`deserialize_command`].
pub fn serialize_command(command_id: i64, command: &str, token: Option<&str>) -> Message {
    let mut envelope = Envelope::new();
    envelope.insert(COMMAND_ID.to_string(), Value::from(command_id));
    envelope.insert(COMMAND.to_string(), Value::from(command));
    serialize(&envelope, token)
}

/// Returns the command id and the command.
pub fn deserialize_command(message: &str, token: Option<&str>) -> Result<(i64, String)> {
    let envelope = deserialize(message, &[COMMAND_ID, COMMAND], token)?;

    let command_id = envelope[COMMAND_ID]
        .as_i64()
        .ok_or_else(|| SerializationError::improper("'command_id' is not an integer"))?;
    let command = envelope[COMMAND]
        .as_str()
        .ok_or_else(|| SerializationError::improper("'command' is not a string"))?;

    Ok((command_id, command.to_string()))
}

/// Serializes the result of a command.
///
/// Counterpart: [`deserialize_command_result`].
pub fn serialize_command_result(result: &CommandResult, token: Option<&str>) -> Message {
    let mut envelope = Envelope::new();
    envelope.insert(COMMAND_ID.to_string(), Value::from(result.command_id));
    for (key, value) in [
        (COMMAND, &result.command),
        ("stdout", &result.stdout),
        ("stderr", &result.stderr),
        ("exit_code", &result.exit_code),
        ("error", &result.error),
    ] {
        envelope.insert(key.to_string(), Value::from(value.as_str()));
    }
    serialize(&envelope, token)
}

/// Deserializes a message produced by [`serialize_command_result`].
pub fn deserialize_command_result(message: &str, token: Option<&str>) -> Result<CommandResult> {
    let envelope = deserialize(message, &CommandResult::FIELDS, token)?;
    serde_json::from_value(Value::Object(envelope))
        .map_err(|e| SerializationError::improper(format!("invalid command result: {e}")))
}
