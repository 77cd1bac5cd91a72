use reqwest::{header::ACCEPT, Client};
use url::Url;

use crate::{CeremonyError, Transport, TransportReply};

#[async_trait::async_trait]
impl Transport for Client {
    async fn post_json(
        &self,
        url: Url,
        body: serde_json::Value,
        bearer: Option<String>,
    ) -> Result<TransportReply, CeremonyError> {
        let mut request = self.post(url).header(ACCEPT, "application/json").json(&body);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|_| CeremonyError::TransportFailure)?;

        let success = response.status().is_success();

        let body = response
            .bytes()
            .await
            .map_err(|_| CeremonyError::TransportFailure)?;

        // rejection bodies are best effort: a non-JSON error page still
        // yields a reply, just without a backend detail string
        let payload = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

        Ok(TransportReply { success, payload })
    }
}
