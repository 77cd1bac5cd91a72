//! # Ceremony Types
//!
//! Rust type definitions for the wire formats crossed by a webauthn
//! ceremony: the platform-facing option and credential structures, the
//! relying party's begin/complete envelopes, and the base64url byte
//! handling both sides agree on.

mod utils;

pub mod rp;
pub mod webauthn;

// Re-exports
pub use utils::{
    bytes::{Bytes, NotBase64Encoded},
    encoding,
};
