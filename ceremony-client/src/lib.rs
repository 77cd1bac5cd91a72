//! # Ceremony Client
//!
//! This crate defines a [`Client`] type orchestrating webauthn ceremonies
//! against a relying party backend: it fetches a challenge, decodes the
//! server-encoded credential options, injects extension requests, invokes
//! the platform credential API through the [`CredentialsContainer`] seam,
//! re-encodes the signed result and finalizes the ceremony with the
//! backend.
//!
//! The client performs no cryptography itself; signing and attestation
//! live behind the platform API, and challenge generation and response
//! verification live in the relying party. What this crate owns is the
//! sequencing, the binary-as-text codec at both edges, and the error
//! taxonomy surfaced to callers.
//!
//! Each ceremony is single-shot: the flow runs strictly
//! begin → decode → inject → platform → encode → complete, stops at the
//! first failure, and never retries. Retry policy, token persistence and
//! UI rendering belong to the caller.

use indexmap::IndexMap;
use typeshare::typeshare;
use url::Url;

use ceremony_types::{
    rp::{AccountToken, BeginResponse, CeremonyChallenge, ErrorDetail, ServerOutcome},
    webauthn,
};

mod extensions;
mod platform;
mod signing;
mod token;
mod transport;

pub use extensions::inject_extensions;
pub use platform::{CredentialsContainer, PlatformFailure};
pub use transport::{Transport, TransportReply};

#[cfg(any(test, feature = "testable"))]
pub use platform::MockCredentialsContainer;
#[cfg(any(test, feature = "testable"))]
pub use transport::MockTransport;

#[cfg(test)]
mod tests;

/// Timeout, in milliseconds, handed to the platform API when neither the
/// caller nor the relying party supplied one.
pub const DEFAULT_TIMEOUT: u32 = 60_000;

#[typeshare]
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "content")]
/// Errors produced by ceremony operations.
///
/// Every value is terminal for the current ceremony; nothing is retried
/// internally. Backend-supplied detail strings are preserved verbatim
/// when present.
pub enum CeremonyError {
    /// A server-supplied binary field was not valid base64url, decoded to zero
    /// bytes, or the begin envelope itself did not parse.
    MalformedChallenge,
    /// The backend rejected the begin call, with its reason when it gave one.
    BeginRejected(Option<String>),
    /// The backend rejected the complete call, with its reason when it gave one.
    CompleteRejected(Option<String>),
    /// The platform API returned no credential: the user dismissed the prompt
    /// or the operation timed out.
    CancelledByUser,
    /// The platform API raised, e.g. no authenticator available or an origin
    /// mismatch. Carries the platform's message.
    PlatformApi(String),
    /// The identity provider rejected the token issuance request.
    TokenRejected(Option<String>),
    /// The request never produced an HTTP response.
    TransportFailure,
    /// The flow needs a backend whose base URL was not configured.
    EndpointNotConfigured,
}

/// Base URLs of the external collaborators a [`Client`] talks to.
///
/// Only the relying party is mandatory; the extension server and the
/// identity provider are separate deployments and flows needing them fail
/// with [`CeremonyError::EndpointNotConfigured`] when their base is absent.
#[derive(Debug, Clone)]
pub struct Endpoints {
    relying_party: Url,
    extensions: Option<Url>,
    idp: Option<Url>,
}

impl Endpoints {
    /// Create an endpoint set with the given relying party base URL.
    pub fn new(relying_party: Url) -> Self {
        Self {
            relying_party,
            extensions: None,
            idp: None,
        }
    }

    /// Sets the extension server base URL, enabling
    /// [`Client::sign_extension_challenge`].
    pub fn with_extensions(mut self, base: Url) -> Self {
        self.extensions = Some(base);
        self
    }

    /// Sets the identity provider base URL, enabling
    /// [`Client::request_account_token`].
    pub fn with_idp(mut self, base: Url) -> Self {
        self.idp = Some(base);
        self
    }

    pub(crate) fn relying_party(&self, path: &str) -> Result<Url, CeremonyError> {
        join(&self.relying_party, path)
    }

    pub(crate) fn extensions(&self, path: &str) -> Result<Url, CeremonyError> {
        let base = self
            .extensions
            .as_ref()
            .ok_or(CeremonyError::EndpointNotConfigured)?;
        join(base, path)
    }

    pub(crate) fn idp(&self, path: &str) -> Result<Url, CeremonyError> {
        let base = self.idp.as_ref().ok_or(CeremonyError::EndpointNotConfigured)?;
        join(base, path)
    }
}

fn join(base: &Url, path: &str) -> Result<Url, CeremonyError> {
    // fails only for cannot-be-a-base URLs, which are unusable as endpoints
    base.join(path)
        .map_err(|_| CeremonyError::EndpointNotConfigured)
}

/// Per-invocation ceremony configuration.
///
/// The repeated flow variants (anonymous, token-bearing, extension-flagged)
/// collapse into one orchestrator parameterized by this struct rather than
/// separate code paths.
#[derive(Debug, Default, Clone)]
pub struct CeremonyRequest {
    /// Identity hint sent to the begin endpoint. May be absent for
    /// discoverable/passwordless flows.
    pub username: Option<String>,

    /// Caller-supplied account token. When present it rides every channel
    /// the backend may consume it on: the begin body, the extension map
    /// handed to the platform, the complete body (authentication) and the
    /// bearer header (completion of both ceremonies).
    pub account_token: Option<AccountToken>,

    /// Extra extension identifier → input entries merged into the platform
    /// options without overwriting server-supplied keys.
    pub extension_flags: IndexMap<String, serde_json::Value>,

    /// Overrides the server-supplied platform timeout. Falls back to the
    /// server value, then [`DEFAULT_TIMEOUT`].
    pub timeout: Option<u32>,
}

impl CeremonyRequest {
    /// A request for the given identity with no token and no extra extensions.
    pub fn for_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    /// Attaches an account token to this request.
    pub fn with_account_token(mut self, token: AccountToken) -> Self {
        self.account_token = Some(token);
        self
    }
}

/// A `Client` orchestrates webauthn ceremonies. Users of this struct supply a
/// [`Transport`] for the backend's HTTP endpoints (implemented for
/// [`reqwest::Client`]) and a [`CredentialsContainer`] wrapping the platform
/// credential API.
///
/// The client holds no mutable state between invocations, so one instance can
/// serve concurrent ceremonies; the single-use discipline of the challenge
/// token is enforced by the backend.
pub struct Client<T, C>
where
    T: Transport + Sync,
    C: CredentialsContainer + Sync,
{
    transport: T,
    platform: C,
    endpoints: Endpoints,
}

impl<T, C> Client<T, C>
where
    T: Transport + Sync,
    C: CredentialsContainer + Sync,
{
    /// Create a `Client` from its transport, platform boundary and endpoint set.
    pub fn new(transport: T, platform: C, endpoints: Endpoints) -> Self {
        Self {
            transport,
            platform,
            endpoints,
        }
    }

    /// Register a new credential for the identity described by `request`.
    ///
    /// Returns the backend's outcome payload verbatim on success or some
    /// [`CeremonyError`].
    pub async fn register(
        &self,
        request: CeremonyRequest,
    ) -> Result<ServerOutcome, CeremonyError> {
        let CeremonyRequest {
            username,
            account_token,
            extension_flags,
            timeout,
        } = request;

        let mut begin_body = serde_json::Map::new();
        if let Some(username) = &username {
            begin_body.insert("username".to_owned(), serde_json::Value::from(username.clone()));
        }
        if let Some(token) = &account_token {
            begin_body.insert("account".to_owned(), serde_json::Value::from(token.as_str()));
        }

        let payload = self
            .post_expecting_success(
                self.endpoints.relying_party("register/begin")?,
                serde_json::Value::Object(begin_body),
                None,
                CeremonyError::BeginRejected,
            )
            .await?;

        let (public_key, challenge) = split_begin_response(payload)?;
        let mut options: webauthn::PublicKeyCredentialCreationOptions =
            serde_json::from_value(public_key).map_err(|_| CeremonyError::MalformedChallenge)?;
        log::debug!("registration begun, options decoded");

        options.extensions = inject_extensions(
            options.extensions.take(),
            account_token.as_ref(),
            true,
            &extension_flags,
        );
        options.timeout = timeout.or(options.timeout).or(Some(DEFAULT_TIMEOUT));

        let credential = self
            .platform
            .create(webauthn::CredentialCreationOptions {
                public_key: options,
            })
            .await
            .map_err(|failure| CeremonyError::PlatformApi(failure.into_message()))?
            .ok_or(CeremonyError::CancelledByUser)?;
        log::debug!("platform created credential {}", credential.id);

        // SAFETY: it is a developer error if serializing this struct fails.
        let attestation = serde_json::to_value(&credential).unwrap();

        let outcome = self
            .post_expecting_success(
                self.endpoints.relying_party("register/complete")?,
                serde_json::json!({
                    "attestation": attestation,
                    "challenge_token": challenge.as_str(),
                }),
                account_token.as_ref().map(|token| token.as_str().to_owned()),
                CeremonyError::CompleteRejected,
            )
            .await?;
        log::debug!("registration completed");

        Ok(outcome)
    }

    /// Authenticate with an existing credential for the identity described by
    /// `request`.
    ///
    /// Returns the backend's outcome payload verbatim on success or some
    /// [`CeremonyError`].
    pub async fn authenticate(
        &self,
        request: CeremonyRequest,
    ) -> Result<ServerOutcome, CeremonyError> {
        let CeremonyRequest {
            username,
            account_token,
            extension_flags,
            timeout,
        } = request;

        let mut begin_body = serde_json::Map::new();
        if let Some(username) = &username {
            begin_body.insert("username".to_owned(), serde_json::Value::from(username.clone()));
        }
        if let Some(token) = &account_token {
            begin_body.insert(
                "account_token".to_owned(),
                serde_json::Value::from(token.as_str()),
            );
        }

        let payload = self
            .post_expecting_success(
                self.endpoints.relying_party("authenticate/begin")?,
                serde_json::Value::Object(begin_body),
                None,
                CeremonyError::BeginRejected,
            )
            .await?;

        let (public_key, challenge) = split_begin_response(payload)?;
        let mut options: webauthn::PublicKeyCredentialRequestOptions =
            serde_json::from_value(public_key).map_err(|_| CeremonyError::MalformedChallenge)?;
        log::debug!("authentication begun, options decoded");

        options.extensions = inject_extensions(
            options.extensions.take(),
            account_token.as_ref(),
            false,
            &extension_flags,
        );
        options.timeout = timeout.or(options.timeout).or(Some(DEFAULT_TIMEOUT));

        let credential = self
            .platform
            .get(webauthn::CredentialRequestOptions {
                public_key: options,
            })
            .await
            .map_err(|failure| CeremonyError::PlatformApi(failure.into_message()))?
            .ok_or(CeremonyError::CancelledByUser)?;
        log::debug!("platform asserted credential {}", credential.id);

        // SAFETY: it is a developer error if serializing this struct fails.
        let assertion = serde_json::to_value(&credential).unwrap();

        let mut complete_body = serde_json::Map::new();
        complete_body.insert("assertion".to_owned(), assertion);
        complete_body.insert(
            "challenge_token".to_owned(),
            serde_json::Value::from(challenge.as_str()),
        );
        if let Some(token) = &account_token {
            complete_body.insert(
                "account_token".to_owned(),
                serde_json::Value::from(token.as_str()),
            );
        }

        let outcome = self
            .post_expecting_success(
                self.endpoints.relying_party("authenticate/complete")?,
                serde_json::Value::Object(complete_body),
                account_token.as_ref().map(|token| token.as_str().to_owned()),
                CeremonyError::CompleteRejected,
            )
            .await?;
        log::debug!("authentication completed");

        Ok(outcome)
    }

    /// POST `body` to `url` and hand back the payload of a successful reply,
    /// mapping a backend rejection through `reject` with the backend's detail
    /// string preserved when present.
    pub(crate) async fn post_expecting_success(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<String>,
        reject: fn(Option<String>) -> CeremonyError,
    ) -> Result<serde_json::Value, CeremonyError> {
        let reply = self.transport.post_json(url, body, bearer).await?;
        if !reply.success {
            let detail: ErrorDetail = serde_json::from_value(reply.payload).unwrap_or_default();
            return Err(reject(detail.detail));
        }
        Ok(reply.payload)
    }
}

/// Splits a begin payload into the still-encoded `publicKey` options and the
/// single-use challenge handle.
fn split_begin_response(
    payload: serde_json::Value,
) -> Result<(serde_json::Value, CeremonyChallenge), CeremonyError> {
    let begin: BeginResponse =
        serde_json::from_value(payload).map_err(|_| CeremonyError::MalformedChallenge)?;
    Ok((begin.public_key, CeremonyChallenge::from(begin.challenge_token)))
}
