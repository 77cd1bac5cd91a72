//! # Ceremony
//!
//! The `ceremony` library is a collection of Rust crates for driving webauthn
//! ceremonies — passkey registration and authentication — against a relying
//! party backend. It is comprised of two sub-libraries:
//!
//! - `ceremony-client` - usable as [`client`], the orchestrator that sequences
//!   a ceremony: fetch a challenge, decode the server-encoded options, inject
//!   extensions, invoke the platform credential API, re-encode the signed
//!   result and finalize with the backend.
//! - `ceremony-types` - usable as [`types`], the wire type definitions shared
//!   between the relying party envelopes and the platform-facing structures.
//!
//! The orchestrator owns no cryptography and no credential storage: signing
//! lives behind the platform API (supplied through the
//! [`CredentialsContainer`](client::CredentialsContainer) trait) and
//! verification lives in the relying party (reached through the
//! [`Transport`](client::Transport) trait, implemented out of the box for
//! [`reqwest::Client`]). What you get is correct sequencing, the
//! base64url-to-binary codec at both edges, and a structured error taxonomy
//! that preserves backend detail strings verbatim.
//!
//! Each [`Client`](client::Client) call is one single-shot ceremony: it stops
//! at the first failure and never retries, since the challenge token it holds
//! is consumed by the backend on first use. Retry policy, token persistence
//! and UI rendering belong to the application.
//!
//! ### Example: registering a passkey
//!
//! ```no_run
//! use ceremony::client::{CeremonyRequest, Client, CredentialsContainer, Endpoints, PlatformFailure};
//! use ceremony::types::webauthn::{
//!     AuthenticatedPublicKeyCredential, CreatedPublicKeyCredential, CredentialCreationOptions,
//!     CredentialRequestOptions,
//! };
//! use url::Url;
//!
//! struct NativePrompt;
//!
//! #[async_trait::async_trait]
//! impl CredentialsContainer for NativePrompt {
//!     async fn create(
//!         &self,
//!         _options: CredentialCreationOptions,
//!     ) -> Result<Option<CreatedPublicKeyCredential>, PlatformFailure> {
//!         // hand the options to the OS credential manager here;
//!         // `Ok(None)` models a dismissed prompt
//!         Ok(None)
//!     }
//!
//!     async fn get(
//!         &self,
//!         _options: CredentialRequestOptions,
//!     ) -> Result<Option<AuthenticatedPublicKeyCredential>, PlatformFailure> {
//!         Ok(None)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ceremony::client::CeremonyError> {
//! let endpoints = Endpoints::new(Url::parse("https://rp.example.com").unwrap());
//! let client = Client::new(reqwest::Client::new(), NativePrompt, endpoints);
//!
//! let outcome = client
//!     .register(CeremonyRequest::for_username("wendy"))
//!     .await?;
//! println!("registered: {outcome}");
//! # Ok(())
//! # }
//! ```

/// Re-export of the `ceremony-client` crate.
pub use ceremony_client as client;
/// Re-export of the `ceremony-types` crate.
pub use ceremony_types as types;
