//! Account token issuance against the identity provider.

use serde::Deserialize;

use ceremony_types::rp::AccountToken;

use crate::{CeremonyError, Client, CredentialsContainer, Transport};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl<T, C> Client<T, C>
where
    T: Transport + Sync,
    C: CredentialsContainer + Sync,
{
    /// Request an account token from the identity provider, for later use as
    /// the bearer/extension credential of a ceremony.
    ///
    /// The token is returned to the caller, who owns its storage; this client
    /// never caches it. Requires an IdP base in [`Endpoints`](crate::Endpoints).
    pub async fn request_account_token(
        &self,
        username: &str,
        password: &str,
        account_id: &str,
    ) -> Result<AccountToken, CeremonyError> {
        let payload = self
            .post_expecting_success(
                self.endpoints.idp("token/generate")?,
                serde_json::json!({
                    "username": username,
                    "password": password,
                    "account_id": account_id,
                }),
                None,
                CeremonyError::TokenRejected,
            )
            .await?;

        let issued: TokenResponse =
            serde_json::from_value(payload).map_err(|_| CeremonyError::TokenRejected(None))?;
        log::debug!("account token issued for {username}");

        Ok(AccountToken::from(issued.token))
    }
}
