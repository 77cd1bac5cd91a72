//! The extension-signing side channel.
//!
//! Separate from the main register/complete pair, the extension server hands
//! out its own short-lived challenge bound to a username, expects the client
//! to run an assertion ceremony over it, and validates the signed client data
//! against the challenge it stored. Both calls are bearer-authorized with the
//! caller's account token; the server pops the challenge on validation, so a
//! second validate with the same assertion is certain to fail.

use serde::Deserialize;

use ceremony_types::{
    rp::{AccountToken, ServerOutcome},
    webauthn, Bytes,
};

use crate::{CeremonyError, Client, CredentialsContainer, Transport, DEFAULT_TIMEOUT};

/// What `extensions/prepare` replies with. The challenge arrives as unpadded
/// base64url and decodes straight into the platform options.
#[derive(Debug, Deserialize)]
struct PrepareResponse {
    challenge: Bytes,
}

impl<T, C> Client<T, C>
where
    T: Transport + Sync,
    C: CredentialsContainer + Sync,
{
    /// Run the extension-signing flow for `username`: prepare a challenge
    /// with the extension server, assert over it through the platform API,
    /// and submit the signed credential for validation.
    ///
    /// Requires an extension server base in [`Endpoints`](crate::Endpoints)
    /// and a bearer-capable account token.
    ///
    /// Returns the extension server's outcome payload verbatim on success or
    /// some [`CeremonyError`].
    pub async fn sign_extension_challenge(
        &self,
        username: &str,
        account_token: &AccountToken,
    ) -> Result<ServerOutcome, CeremonyError> {
        let payload = self
            .post_expecting_success(
                self.endpoints.extensions("extensions/prepare")?,
                serde_json::json!({ "username": username }),
                Some(account_token.as_str().to_owned()),
                CeremonyError::BeginRejected,
            )
            .await?;

        let prepared: PrepareResponse =
            serde_json::from_value(payload).map_err(|_| CeremonyError::MalformedChallenge)?;
        log::debug!("extension challenge prepared for {username}");

        let credential = self
            .platform
            .get(webauthn::CredentialRequestOptions {
                public_key: webauthn::PublicKeyCredentialRequestOptions {
                    challenge: prepared.challenge,
                    timeout: Some(DEFAULT_TIMEOUT),
                    rp_id: None,
                    allow_credentials: None,
                    user_verification: Default::default(),
                    extensions: None,
                },
            })
            .await
            .map_err(|failure| CeremonyError::PlatformApi(failure.into_message()))?
            .ok_or(CeremonyError::CancelledByUser)?;

        // SAFETY: it is a developer error if serializing this struct fails.
        let credential = serde_json::to_value(&credential).unwrap();

        let outcome = self
            .post_expecting_success(
                self.endpoints.extensions("extensions/validate")?,
                serde_json::json!({
                    "username": username,
                    "credential": credential,
                }),
                Some(account_token.as_str().to_owned()),
                CeremonyError::CompleteRejected,
            )
            .await?;
        log::debug!("extension signature validated for {username}");

        Ok(outcome)
    }
}
