//! Extension injection for ceremony options.
//!
//! Merging is non-destructive: server- or caller-specified keys outside the
//! injected set are never removed or overwritten, so a relying party's own
//! extension requests reach the platform untouched.

use indexmap::IndexMap;

use ceremony_types::{rp::AccountToken, webauthn::AuthenticationExtensionsClientInputs};

/// Merge ceremony-specific extension requests into the server-supplied
/// extension inputs.
///
/// The injected set is:
/// * `extended_auth_token` — the account token, when one was supplied;
/// * `credProps: true` for registration ceremonies, to request
///   discoverable-credential reporting, unless the server already stated a
///   preference;
/// * the caller's `flags`, merged key-wise without overwriting anything
///   already present.
///
/// Pure function: no network or storage access. Returns `None` when nothing
/// ended up in the map, which is a valid no-op injection.
pub fn inject_extensions(
    existing: Option<AuthenticationExtensionsClientInputs>,
    account_token: Option<&AccountToken>,
    registration: bool,
    flags: &IndexMap<String, serde_json::Value>,
) -> Option<AuthenticationExtensionsClientInputs> {
    let mut merged = existing.unwrap_or_default();

    if let Some(token) = account_token {
        merged.extended_auth_token = Some(token.as_str().to_owned());
    }

    if registration && merged.cred_props.is_none() {
        merged.cred_props = Some(true);
    }

    for (key, value) in flags {
        match key.as_str() {
            "credProps" => {
                if merged.cred_props.is_none() {
                    merged.cred_props = value.as_bool();
                }
            }
            "extended_auth_token" => {
                if merged.extended_auth_token.is_none() {
                    merged.extended_auth_token = value.as_str().map(str::to_owned);
                }
            }
            _ => {
                merged
                    .additional
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }

    merged.zip_contents()
}
