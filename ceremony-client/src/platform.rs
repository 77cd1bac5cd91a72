//! The platform credential API boundary.

use async_trait::async_trait;

use ceremony_types::webauthn::{
    AuthenticatedPublicKeyCredential, CreatedPublicKeyCredential, CredentialCreationOptions,
    CredentialRequestOptions,
};

/// Failure raised by the platform credential API, e.g. no authenticator
/// available, a user verification failure, or an origin mismatch. Carries the
/// platform's own message verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFailure(String);

impl PlatformFailure {
    /// Wrap a platform error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The platform's message, consumed into the ceremony error taxonomy.
    pub fn into_message(self) -> String {
        self.0
    }
}

/// Pluggable trait over the platform's credential container: the single-shot,
/// cancelable surface that `navigator.credentials` exposes in a browser and
/// that OS credential managers expose natively.
///
/// Both operations suspend until the user finishes or dismisses the platform
/// prompt. A dismissed or timed-out prompt resolves to `Ok(None)`, never to an
/// error; the orchestrator turns that into
/// [`CeremonyError::CancelledByUser`](crate::CeremonyError::CancelledByUser)
/// without contacting the backend again.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait]
pub trait CredentialsContainer {
    /// Request creation of a new credential (the registration ceremony's
    /// platform step).
    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Option<CreatedPublicKeyCredential>, PlatformFailure>;

    /// Request an assertion over an existing credential (the authentication
    /// ceremony's platform step).
    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Option<AuthenticatedPublicKeyCredential>, PlatformFailure>;
}
