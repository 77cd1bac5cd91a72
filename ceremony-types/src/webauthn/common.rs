//! Common types used in both Attestation (registration) and Assertion (authentication).

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec},
    Bytes,
};

#[cfg(doc)]
use crate::webauthn::{
    PublicKeyCredential, PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};

/// This enumeration defines the valid credential types. It is an extension point; values can be
/// added to it in the future, as more credential types are defined. The values of this enumeration
/// are used for versioning the response structures according to the type of the authenticator.
///
/// <https://w3c.github.io/webauthn/#enumdef-publickeycredentialtype>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum PublicKeyCredentialType {
    /// Currently the only type defined is a `PublicKey` meaning the public counterpart of an
    /// asymmetric key pair.
    PublicKey,
    /// This is the default as it will be ignored if the value is unknown during deserialization
    #[default]
    Unknown,
}

/// Identifies a specific public key credential. It is used in
/// [`PublicKeyCredentialCreationOptions::exclude_credentials`] to prevent creating duplicate
/// credentials on the same authenticator, and in
/// [`PublicKeyCredentialRequestOptions::allow_credentials`] to determine if and how the credential
/// can currently be reached by the client.
///
/// The `id` arrives from the relying party as unpadded base64url text and leaves the same way,
/// see [`Bytes`].
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialdescriptor>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialDescriptor {
    /// This member contains the type of the public key credential the caller is referring to. The
    /// value SHOULD be a member of [`PublicKeyCredentialType`] but client platforms MUST ignore any
    /// [`PublicKeyCredentialDescriptor`] with an [`PublicKeyCredentialType::Unknown`] type.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// This member contains the credential ID of the public key credential the caller is referring to.
    ///
    /// This mirrors the [`PublicKeyCredential::raw_id`] field.
    pub id: Bytes,

    /// This OPTIONAL member contains a hint as to how the client might communicate with the managing
    /// authenticator of the [`PublicKeyCredential`] the caller is referring to. The values SHOULD be
    /// members of [`AuthenticatorTransport`] but client platforms MUST ignore unknown values.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}

impl PublicKeyCredentialDescriptor {
    /// Checks whether [`Self::ty`] is not of value [`PublicKeyCredentialType::Unknown`]. This should
    /// be used for filtering a list of [`PublicKeyCredentialDescriptor`]s that are not of a known type.
    pub fn is_known(&self) -> bool {
        match self.ty {
            PublicKeyCredentialType::PublicKey => true,
            PublicKeyCredentialType::Unknown => false,
        }
    }
}

/// A Relying Party may require [user verification] for some of its operations but not for others,
/// and may use this type to express its needs.
///
/// <https://w3c.github.io/webauthn/#enumdef-userverificationrequirement>
///
/// [user verification]: https://w3c.github.io/webauthn/#user-verification
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum UserVerificationRequirement {
    /// The Relying Party requires user verification for the operation and will fail the overall
    /// ceremony if the response does not have the UV flag set.
    Required,

    /// The Relying Party prefers user verification for the operation if possible, but will not fail
    /// the operation if the response does not have the UV flag set.
    #[default]
    Preferred,

    /// The Relying Party does not want user verification employed during the operation.
    Discouraged,
}

/// Authenticators may implement various transports for communicating with clients. This enumeration
/// defines hints as to how clients might communicate with a particular authenticator in order to
/// obtain an assertion for a specific credential.
///
/// <https://w3c.github.io/webauthn/#enum-transport>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorTransport {
    /// Indicates the respective authenticator can be contacted over removable USB.
    Usb,

    /// Indicates the respective authenticator can be contacted over Near Field Communication (NFC).
    Nfc,

    /// Indicates the respective authenticator can be contacted over Bluetooth Smart
    /// (Bluetooth Low Energy / BLE).
    Ble,

    /// Indicates the respective authenticator can be contacted using a combination of (often
    /// separate) data-transport and proximity mechanisms. This supports, for example,
    /// authentication on a desktop computer using a smartphone.
    Hybrid,

    /// Indicates the respective authenticator is contacted using a client device-specific
    /// transport, i.e., it is a platform authenticator.
    Internal,

    /// Fallback for transports unknown to this client, ignored rather than rejected.
    #[default]
    Unknown,
}

/// This enumeration's values describe authenticators' [attachment modalities]. Relying Parties use
/// this to express a preferred authenticator attachment modality when registering a credential, and
/// clients use this to report the authenticator attachment modality used to complete an operation.
///
/// <https://w3c.github.io/webauthn/#enumdef-authenticatorattachment>
///
/// [attachment modalities]: https://w3c.github.io/webauthn/#sctn-authenticator-attachment-modality
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorAttachment {
    /// This value indicates [platform attachment], i.e. an authenticator that is built into the
    /// client device.
    ///
    /// [platform attachment]: https://w3c.github.io/webauthn/#platform-attachment
    Platform,

    /// This value indicates [cross-platform attachment], i.e. a roaming authenticator.
    ///
    /// [cross-platform attachment]: https://w3c.github.io/webauthn/#cross-platform-attachment
    CrossPlatform,

    /// Fallback for attachments unknown to this client.
    #[default]
    Unknown,
}

/// Parameters for credential generation: the type of credential and the cryptographic algorithm
/// the Relying Party is willing to accept, identified by its IANA COSE registry number.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialParameters {
    /// The type of credential to be created.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The cryptographic signature algorithm identifier, a [COSE Algorithm] registry value such as
    /// `-7` for ES256. Opaque to the ceremony, it is only shuttled to the platform API.
    ///
    /// [COSE Algorithm]: https://www.iana.org/assignments/cose/cose.xhtml#algorithms
    pub alg: i64,
}
