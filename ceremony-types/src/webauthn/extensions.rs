//! WebAuthn extension inputs and outputs as defined in
//! [WebAuthn Defined Extensions][webauthn], plus the deployment-specific
//! `extended_auth_token` side channel some relying parties consume.
//!
//! The structured fields cover the extensions this client processes
//! itself; everything else the relying party or caller supplies is kept
//! verbatim in a flattened map so it reaches the platform API untouched.
//!
//! [webauthn]: https://w3c.github.io/webauthn/#sctn-defined-extensions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[cfg(doc)]
use crate::webauthn::PublicKeyCredential;

/// This is a dictionary containing the client extension input values for zero or more
/// [WebAuthn Extensions].
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientinputs>
///
/// [WebAuthn Extensions]: https://w3c.github.io/webauthn/#webauthn-extensions
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientInputs {
    /// Boolean to indicate that this extension is requested by the relying party, to learn whether
    /// the created credential is discoverable.
    ///
    /// See [`CredentialPropertiesOutput`] for more information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_props: Option<bool>,

    /// An opaque bearer credential embedded into the extension map, giving the authenticator-side
    /// of the deployment access to the caller's account token during the ceremony.
    #[serde(
        default,
        rename = "extended_auth_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub extended_auth_token: Option<String>,

    /// Any further extension identifier → input entries, carried verbatim.
    #[serde(flatten)]
    pub additional: IndexMap<String, serde_json::Value>,
}

impl AuthenticationExtensionsClientInputs {
    /// Validates that there is at least one extension field that is `Some`
    /// and that they are in turn not empty. If all fields are `None`
    /// then this returns `None` as well.
    pub fn zip_contents(self) -> Option<Self> {
        let Self {
            cred_props,
            extended_auth_token,
            additional,
        } = &self;
        let has_cred_props = cred_props.is_some();
        let has_token = extended_auth_token.is_some();
        let has_additional = !additional.is_empty();

        (has_cred_props || has_token || has_additional).then_some(self)
    }
}

/// This is a dictionary containing the client extension output values for zero or more
/// [WebAuthn Extensions].
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientoutputs>
///
/// [WebAuthn Extensions]: https://w3c.github.io/webauthn/#webauthn-extensions
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientOutputs {
    /// Contains properties of the given [`PublicKeyCredential`] when it is included.
    ///
    /// See [`CredentialPropertiesOutput`] for more information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_props: Option<CredentialPropertiesOutput>,

    /// Any further extension identifier → output entries the platform produced, carried verbatim
    /// back to the relying party.
    #[serde(flatten)]
    pub additional: IndexMap<String, serde_json::Value>,
}

/// The output of the credential properties extension, reporting properties of the created
/// credential that are otherwise only known to the authenticator.
///
/// <https://w3c.github.io/webauthn/#dictdef-credentialpropertiesoutput>
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CredentialPropertiesOutput {
    /// Whether the created credential is discoverable, i.e. whether the platform can surface it
    /// without a prior username hint.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "rk")]
    pub discoverable: Option<bool>,
}
