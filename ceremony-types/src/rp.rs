//! Wire types for the relying party's begin/complete envelopes.
//!
//! These mirror what the backend sends around the platform-facing
//! structures in [`crate::webauthn`]: every ceremony starts with a
//! `begin` response pairing the credential options with a single-use
//! challenge token, and ends with a `complete` call quoting that token
//! back.

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// The relying party's response to a `begin` call for either ceremony kind.
///
/// The `publicKey` member is left unparsed here: registration and
/// authentication decode it into different option structures, and a
/// decode failure must be reported distinctly from a missing envelope
/// field.
#[derive(Debug, Deserialize, Serialize)]
#[typeshare]
pub struct BeginResponse {
    /// The server-encoded credential options for the platform API, with binary fields as
    /// unpadded base64url text.
    #[serde(rename = "publicKey")]
    pub public_key: serde_json::Value,

    /// The single-use handle identifying this in-flight ceremony attempt, quoted back on
    /// `complete`. See [`CeremonyChallenge`].
    pub challenge_token: String,
}

/// Opaque handle for one in-flight registration or authentication attempt.
///
/// The relying party consumes it at most once: a second `complete` call
/// quoting the same handle is certain to be rejected, and this client
/// never retries one silently. Only the token travels back to the
/// backend, never the decoded challenge nonce.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[typeshare(transparent)]
#[repr(transparent)]
pub struct CeremonyChallenge(pub String);

impl CeremonyChallenge {
    /// The challenge token as sent in `complete` request bodies.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CeremonyChallenge {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Opaque bearer credential scoped to one identity, supplied by the caller.
///
/// Used two ways during a ceremony: as an `Authorization` bearer header
/// on completion calls, and embedded into the extension map handed to
/// the platform API. This client never mutates or persists it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[typeshare(transparent)]
#[repr(transparent)]
pub struct AccountToken(pub String);

impl AccountToken {
    /// The raw token, for bearer headers and extension values.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccountToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

/// The backend's outcome payload for a successfully completed ceremony,
/// returned to the caller verbatim. Session and identity fields inside
/// it are not interpreted by this client.
#[typeshare(serialized_as = "String")]
pub type ServerOutcome = serde_json::Value;

/// The failure shape every backend endpoint uses on non-2xx responses.
#[derive(Debug, Default, Deserialize, Serialize)]
#[typeshare]
pub struct ErrorDetail {
    /// Human-readable reason supplied by the backend, preserved verbatim for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
