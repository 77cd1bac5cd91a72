//! The HTTP seam between the orchestrator and its backends.

use async_trait::async_trait;
use url::Url;

use crate::CeremonyError;

mod reqwest_transport;

/// Reply to a [`Transport::post_json`] call that produced an HTTP response,
/// whether or not the backend accepted the request.
#[derive(Debug)]
pub struct TransportReply {
    /// Whether the response carried a success status.
    pub success: bool,
    /// The parsed JSON body. For rejections this is where the backend's
    /// `detail` string lives; a body that was not JSON parses to `null`.
    pub payload: serde_json::Value,
}

/// Pluggable trait for the orchestrator's network calls.
///
/// Every backend interaction is a JSON POST; the bearer token, when given, is
/// attached as an `Authorization: Bearer` header. Implementations distinguish
/// reaching the backend at all (a [`TransportReply`], accepted or rejected)
/// from never producing a response ([`CeremonyError::TransportFailure`]).
/// No timeouts are enforced here by the orchestrator; that is left to the
/// implementation.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait]
pub trait Transport {
    /// POST `body` as JSON to `url`.
    async fn post_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<String>,
    ) -> Result<TransportReply, CeremonyError>;
}
