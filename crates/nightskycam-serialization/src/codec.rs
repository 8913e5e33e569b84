//! # Message Codec
//!
//! Canonical encoding of an [`Envelope`] into a transport-ready [`Message`],
//! and back.
//!
//! ## Wire Format
//!
//! ```text
//! {"message": "<canonical JSON of the envelope>", "signature": "<hex HMAC>"}
//! ```
//!
//! The envelope is encoded with sorted keys, so equal envelopes always give
//! byte-identical payloads. `signature` is only present when a token was
//! supplied to [`serialize`].
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Signatures**: computed over the payload text, keyed by the
//!   shared token.
//! - **Constant-time comparison** when verifying.
//! - **Opt-out verification**: [`deserialize`] without a token never checks
//!   the signature, so a reader without the secret can still decode.

use crate::errors::{Result, SerializationError};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// The pre-encoding mapping of named fields.
pub type Envelope = Map<String, Value>;

/// Opaque encoded (and optionally signed) text exchanged between processes.
pub type Message = String;

/// Wire key holding the encoded envelope.
const MESSAGE_KEY: &str = "message";

/// Wire key holding the hex encoded signature.
const SIGNATURE_KEY: &str = "signature";

/// Outer layer of a message, as found on the wire.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireMessage {
    message: String,
    #[serde(default)]
    signature: Option<String>,
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// Signs a payload with HMAC-SHA256, returning the hex encoded digest.
fn sign_payload(payload: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(token.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a hex encoded signature against the payload.
///
/// Returns `false` for signatures that are not valid hex.
fn verify_payload(payload: &str, signature: &str, token: &str) -> bool {
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    let mut mac = match HmacSha256::new_from_slice(token.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload.as_bytes());

    // Constant-time comparison
    mac.verify_slice(&signature).is_ok()
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encodes the envelope, signing it when a token is given.
///
/// Counterpart: [`deserialize`].
pub fn serialize(envelope: &Envelope, token: Option<&str>) -> Message {
    let payload = Value::Object(envelope.clone()).to_string();

    let mut wire = Map::new();
    if let Some(token) = token {
        wire.insert(
            SIGNATURE_KEY.to_string(),
            Value::String(sign_payload(&payload, token)),
        );
    }
    wire.insert(MESSAGE_KEY.to_string(), Value::String(payload));

    Value::Object(wire).to_string()
}

/// Decodes a message produced by [`serialize`].
///
/// # Errors
///
/// - [`SerializationError::IncorrectToken`] if the message is signed, a token
///   is given and the signature does not match.
/// - [`SerializationError::ImproperMessage`] if the message is malformed or
///   one of `required_keys` is missing.
pub fn deserialize(message: &str, required_keys: &[&str], token: Option<&str>) -> Result<Envelope> {
    decode(message, required_keys, token, false)
}

fn decode(
    message: &str,
    required_keys: &[&str],
    token: Option<&str>,
    require_signature: bool,
) -> Result<Envelope> {
    let wire: WireMessage = serde_json::from_str(message).map_err(|e| {
        debug!("[Codec] Rejecting malformed message: {}", e);
        SerializationError::improper(format!("failed to decode message: {e}"))
    })?;

    match (token, wire.signature.as_deref()) {
        (Some(token), Some(signature)) => {
            if !verify_payload(&wire.message, signature, token) {
                warn!("[Codec] Signature mismatch, rejecting message");
                return Err(SerializationError::IncorrectToken);
            }
        }
        (Some(_), None) if require_signature => {
            warn!("[Codec] Unsigned message rejected (signature required)");
            return Err(SerializationError::IncorrectToken);
        }
        (Some(_), None) => debug!("[Codec] Message is not signed, nothing to verify"),
        (None, Some(_)) => debug!("[Codec] No token given, skipping signature verification"),
        (None, None) => {}
    }

    let envelope = match serde_json::from_str::<Value>(&wire.message) {
        Ok(Value::Object(envelope)) => envelope,
        Ok(_) => {
            debug!("[Codec] Rejecting message: payload is not a mapping");
            return Err(SerializationError::improper("payload is not a mapping"));
        }
        Err(e) => {
            debug!("[Codec] Rejecting message with malformed payload: {}", e);
            return Err(SerializationError::improper(format!(
                "failed to decode payload: {e}"
            )));
        }
    };

    check_required_keys(&envelope, required_keys)?;
    Ok(envelope)
}

fn check_required_keys(envelope: &Envelope, required_keys: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required_keys
        .iter()
        .copied()
        .filter(|key| !envelope.contains_key(*key))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    debug!("[Codec] Rejecting message, missing keys: {:?}", missing);
    Err(SerializationError::improper(format!(
        "missing required key(s): {}",
        missing.join(", ")
    )))
}

// =============================================================================
// CONFIGURED CODEC
// =============================================================================

/// Codec configuration.
///
/// Typically embedded in the configuration of the process that owns the
/// shared secret.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Shared secret used to sign outgoing and verify incoming messages.
    #[serde(default)]
    pub token: Option<String>,

    /// Reject unsigned messages when a token is configured.
    #[serde(default)]
    pub require_signature: bool,
}

impl CodecConfig {
    /// Config signing and verifying with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            require_signature: false,
        }
    }

    /// Also reject messages that carry no signature.
    #[must_use]
    pub fn requiring_signature(mut self) -> Self {
        self.require_signature = true;
        self
    }
}

/// A codec bound to a [`CodecConfig`].
#[derive(Clone, Debug, Default)]
pub struct MessageCodec {
    config: CodecConfig,
}

impl MessageCodec {
    /// Creates a codec from its configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The configured token, if any.
    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    /// See [`serialize`].
    pub fn serialize(&self, envelope: &Envelope) -> Message {
        serialize(envelope, self.token())
    }

    /// See [`deserialize`]. Unsigned messages are rejected with
    /// [`SerializationError::IncorrectToken`] when the config requires a
    /// signature.
    pub fn deserialize(&self, message: &str, required_keys: &[&str]) -> Result<Envelope> {
        decode(
            message,
            required_keys,
            self.token(),
            self.config.require_signature,
        )
    }
}
