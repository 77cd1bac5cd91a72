//! Types used for the registration (attestation) half of a ceremony.

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec, maybe_stringified},
    webauthn::{
        AuthenticationExtensionsClientInputs, AuthenticatorTransport, PublicKeyCredential,
        PublicKeyCredentialDescriptor, PublicKeyCredentialParameters,
    },
    Bytes,
};

/// The response to the successful creation of a [`PublicKeyCredential`]
#[typeshare]
pub type CreatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// This is the expected input to `navigator.credentials.create` when wanting to create a webauthn
/// credential.
///
/// <https://w3c.github.io/webauthn/#sctn-credentialcreationoptions-extension>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CredentialCreationOptions {
    /// The key defining that this is a request for a webauthn credential.
    pub public_key: PublicKeyCredentialCreationOptions,
}

/// This type supplies `create()` requests with the data it needs to create a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialcreationoptions>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialCreationOptions {
    /// This member contains a name and an identifier for the Relying Party responsible for the request.
    pub rp: PublicKeyCredentialRpEntity,

    /// This member contains names and an identifier for the user account performing the registration.
    pub user: PublicKeyCredentialUserEntity,

    /// This member specifies a challenge that the authenticator signs, along with other data, when
    /// producing an attestation object for the newly created credential.
    ///
    /// Arrives from the relying party as unpadded base64url text, see [`Bytes`].
    pub challenge: Bytes,

    /// This member lists the key types and signature algorithms the Relying Party supports, ordered
    /// from most preferred to least preferred.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// This OPTIONAL member specifies a time, in milliseconds, that the Relying Party is willing to
    /// wait for the call to complete. The value is treated as a hint, and MAY be overridden by the
    /// client.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// The Relying Party SHOULD use this OPTIONAL member to list any existing credentials mapped to
    /// this user account. This ensures that the new credential is not created on an authenticator
    /// that already contains a credential mapped to this user account.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// The Relying Party MAY use this OPTIONAL member to provide client extension inputs requesting
    /// additional processing by the client and authenticator.
    ///
    /// See [`AuthenticationExtensionsClientInputs`].
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// This type is used to supply additional Relying Party attributes when creating a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialRpEntity {
    /// A unique identifier for the Relying Party entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A human-palatable identifier for the Relying Party, intended only for display.
    pub name: String,
}

/// This type is used to supply additional user account attributes when creating a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialUserEntity {
    /// The user handle of the user account. A user handle is an opaque byte sequence with a maximum
    /// size of 64 bytes, and is not meant to be displayed to the user.
    ///
    /// Arrives from the relying party as unpadded base64url text, see [`Bytes`].
    pub id: Bytes,

    /// A human-palatable name for the user account, intended only for display. The Relying Party
    /// SHOULD let the user choose this, and SHOULD NOT restrict the choice more than necessary.
    #[serde(default)]
    pub display_name: String,

    /// A human-palatable identifier for a user account. It is intended only for display, i.e., aiding
    /// the user in determining the difference between user accounts with similar display names.
    pub name: String,
}

/// This type represents the authenticator's response to a client's request for the creation of a
/// new public key credential. It contains information about the new credential that can be used to
/// identify it for later use, and metadata that can be used by the WebAuthn Relying Party to assess
/// the characteristics of the credential during registration.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorattestationresponse>
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAttestationResponse {
    /// This attribute contains the JSON serialization of the client data passed to the
    /// authenticator by the client in order to generate this credential. The exact JSON
    /// serialization MUST be preserved, as the hash of the serialized client data has been
    /// computed over it.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// This attribute contains the authenticator data contained within the attestation object.
    pub authenticator_data: Bytes,

    /// This attribute contains an attestation object, which is opaque to, and cryptographically
    /// protected against tampering by, the client. It contains the authenticator data and an
    /// attestation statement, which the Relying Party's server verifies.
    pub attestation_object: Bytes,

    /// This field contains a sequence of zero or more unique [`AuthenticatorTransport`] values in
    /// lexicographical order. These values are the transports that the authenticator is believed to
    /// support, or an empty sequence if the information is unavailable.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}
