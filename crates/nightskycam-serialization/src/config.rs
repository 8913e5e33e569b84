//! # Config Channel
//!
//! Configuration updates pushed by the server to one named runner of a
//! system. Option values may be null, which the receiving runner reads as
//! "unset".

use crate::codec::{deserialize, serialize, Envelope, Message};
use crate::errors::{Result, SerializationError};
use crate::fix::{deserialize_fix_dict, serialize_fix_dict};
use serde_json::Value;

const RUNNER_NAME: &str = "runner_name";
const CONFIG: &str = "config";

/// Serializes a configuration update for the runner `runner_name`.
///
/// Counterpart: [`deserialize_config_update`].
pub fn serialize_config_update(runner_name: &str, config: &Envelope, token: Option<&str>) -> Message {
    let mut envelope = Envelope::new();
    envelope.insert(RUNNER_NAME.to_string(), Value::from(runner_name));
    envelope.insert(CONFIG.to_string(), Value::Object(serialize_fix_dict(config)));
    serialize(&envelope, token)
}

/// Returns the name of the runner and its new configuration.
pub fn deserialize_config_update(message: &str, token: Option<&str>) -> Result<(String, Envelope)> {
    let envelope = deserialize(message, &[RUNNER_NAME, CONFIG], token)?;

    let runner_name = envelope[RUNNER_NAME]
        .as_str()
        .ok_or_else(|| SerializationError::improper("'runner_name' is not a string"))?;
    let config = envelope[CONFIG]
        .as_object()
        .ok_or_else(|| SerializationError::improper("'config' is not a mapping"))?;

    Ok((runner_name.to_string(), deserialize_fix_dict(config)))
}
