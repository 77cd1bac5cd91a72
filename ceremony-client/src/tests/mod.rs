use super::*;
use ceremony_types::{encoding, rp::AccountToken, webauthn};

fn endpoints() -> Endpoints {
    Endpoints::new(Url::parse("https://rp.example.com").unwrap())
        .with_extensions(Url::parse("https://extn.example.com").unwrap())
        .with_idp(Url::parse("https://idp.example.com").unwrap())
}

fn registration_begin_payload() -> serde_json::Value {
    serde_json::json!({
        "publicKey": {
            "rp": {"id": "example.com", "name": "Example"},
            "user": {"id": "BBB-", "name": "wendy", "displayName": "Wendy"},
            "challenge": "AAA_",
            "pubKeyCredParams": [{"type": "public-key", "alg": -7}],
            "excludeCredentials": []
        },
        "challenge_token": "tok1"
    })
}

fn authentication_begin_payload() -> serde_json::Value {
    serde_json::json!({
        "publicKey": {
            "challenge": "AAA_",
            "timeout": 30000,
            "rpId": "example.com",
            "allowCredentials": [{"type": "public-key", "id": "AQID"}]
        },
        "challenge_token": "tok2"
    })
}

fn created_credential(raw_id: Vec<u8>) -> webauthn::CreatedPublicKeyCredential {
    webauthn::PublicKeyCredential {
        id: encoding::base64url(&raw_id),
        raw_id: raw_id.into(),
        ty: webauthn::PublicKeyCredentialType::PublicKey,
        response: webauthn::AuthenticatorAttestationResponse {
            client_data_json: vec![10, 11, 12].into(),
            authenticator_data: vec![13, 14, 15].into(),
            attestation_object: vec![16, 17, 18].into(),
            transports: Some(vec![webauthn::AuthenticatorTransport::Internal]),
        },
        authenticator_attachment: Some(webauthn::AuthenticatorAttachment::Platform),
        client_extension_results: Default::default(),
    }
}

fn asserted_credential(
    raw_id: Vec<u8>,
    user_handle: Option<Vec<u8>>,
) -> webauthn::AuthenticatedPublicKeyCredential {
    webauthn::PublicKeyCredential {
        id: encoding::base64url(&raw_id),
        raw_id: raw_id.into(),
        ty: webauthn::PublicKeyCredentialType::PublicKey,
        response: webauthn::AuthenticatorAssertionResponse {
            client_data_json: vec![10, 11, 12].into(),
            authenticator_data: vec![13, 14, 15].into(),
            signature: vec![16, 17, 18].into(),
            user_handle: user_handle.map(Into::into),
        },
        authenticator_attachment: Some(webauthn::AuthenticatorAttachment::Platform),
        client_extension_results: Default::default(),
    }
}

fn ok_reply(payload: serde_json::Value) -> Result<TransportReply, CeremonyError> {
    Ok(TransportReply {
        success: true,
        payload,
    })
}

fn rejected_reply(payload: serde_json::Value) -> Result<TransportReply, CeremonyError> {
    Ok(TransportReply {
        success: false,
        payload,
    })
}

#[tokio::test]
async fn register_end_to_end_encodes_both_directions() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/register/begin" && body["username"] == "wendy" && bearer.is_none()
        })
        .times(1)
        .returning(|_, _, _| ok_reply(registration_begin_payload()));
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/register/complete"
                && body["challenge_token"] == "tok1"
                && body["attestation"]["rawId"] == "AQID"
                && body["attestation"]["response"]["clientDataJSON"].is_string()
                && body["attestation"]["response"]["attestationObject"].is_string()
                && bearer.is_none()
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "ok"})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_create()
        .withf(|options| {
            let key = &options.public_key;
            // "AAA_" and "BBB-" decoded to their raw bytes
            *key.challenge == [0, 0, 63]
                && *key.user.id == [4, 16, 126]
                && key.timeout == Some(DEFAULT_TIMEOUT)
                && key
                    .extensions
                    .as_ref()
                    .is_some_and(|ext| ext.cred_props == Some(true))
        })
        .times(1)
        .returning(|_| Ok(Some(created_credential(vec![1, 2, 3]))));

    let client = Client::new(transport, platform, endpoints());
    let outcome = client
        .register(CeremonyRequest::for_username("wendy"))
        .await
        .expect("registration should complete");
    assert_eq!(outcome["status"], "ok");
}

#[tokio::test]
async fn register_with_account_token_uses_every_channel() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/register/begin" && body["account"] == "tok-reg" && bearer.is_none()
        })
        .times(1)
        .returning(|_, _, _| ok_reply(registration_begin_payload()));
    transport
        .expect_post_json()
        .withf(|url, _, bearer| {
            url.path() == "/register/complete" && bearer.as_deref() == Some("tok-reg")
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "ok"})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_create()
        .withf(|options| {
            options
                .public_key
                .extensions
                .as_ref()
                .is_some_and(|ext| ext.extended_auth_token.as_deref() == Some("tok-reg"))
        })
        .times(1)
        .returning(|_| Ok(Some(created_credential(vec![1, 2, 3]))));

    let client = Client::new(transport, platform, endpoints());
    client
        .register(
            CeremonyRequest::for_username("wendy").with_account_token("tok-reg".into()),
        )
        .await
        .expect("registration should complete");
}

#[tokio::test]
async fn begin_rejection_carries_backend_detail() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, _, _| url.path() == "/authenticate/begin")
        .times(1)
        .returning(|_, _, _| rejected_reply(serde_json::json!({"detail": "unknown user"})));

    // no expectations: any platform call fails the test
    let platform = MockCredentialsContainer::new();

    let client = Client::new(transport, platform, endpoints());
    let err = client
        .authenticate(CeremonyRequest::for_username("ghost"))
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::BeginRejected(Some("unknown user".into())));
}

#[tokio::test]
async fn rejection_without_detail_is_still_a_rejection() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(1)
        .returning(|_, _, _| rejected_reply(serde_json::Value::Null));

    let platform = MockCredentialsContainer::new();
    let client = Client::new(transport, platform, endpoints());

    let err = client
        .register(CeremonyRequest::for_username("wendy"))
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::BeginRejected(None));
}

#[tokio::test]
async fn cancelled_platform_result_never_reaches_finalize() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, _, _| url.path() == "/authenticate/begin")
        .times(1)
        .returning(|_, _, _| ok_reply(authentication_begin_payload()));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_get()
        .times(1)
        .returning(|_| Ok(None));

    let client = Client::new(transport, platform, endpoints());
    let err = client
        .authenticate(CeremonyRequest::for_username("wendy"))
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::CancelledByUser);
}

#[tokio::test]
async fn platform_error_is_preserved() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(1)
        .returning(|_, _, _| ok_reply(registration_begin_payload()));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_create()
        .times(1)
        .returning(|_| Err(PlatformFailure::new("no authenticator available")));

    let client = Client::new(transport, platform, endpoints());
    let err = client
        .register(CeremonyRequest::for_username("wendy"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CeremonyError::PlatformApi("no authenticator available".into())
    );
}

#[tokio::test]
async fn authenticate_token_rides_header_and_body() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/authenticate/begin"
                && body["account_token"] == "tok-xyz"
                && bearer.is_none()
        })
        .times(1)
        .returning(|_, _, _| ok_reply(authentication_begin_payload()));
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/authenticate/complete"
                && body["challenge_token"] == "tok2"
                && body["account_token"] == "tok-xyz"
                && body["assertion"]["rawId"] == "AQID"
                && body["assertion"]["response"]["userHandle"].is_null()
                && bearer.as_deref() == Some("tok-xyz")
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "ok"})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_get()
        .withf(|options| {
            let key = &options.public_key;
            key.allow_credentials
                .as_ref()
                .is_some_and(|creds| *creds[0].id == [1, 2, 3])
                && key
                    .extensions
                    .as_ref()
                    .is_some_and(|ext| ext.extended_auth_token.as_deref() == Some("tok-xyz"))
        })
        .times(1)
        .returning(|_| Ok(Some(asserted_credential(vec![1, 2, 3], None))));

    let client = Client::new(transport, platform, endpoints());
    client
        .authenticate(
            CeremonyRequest::for_username("wendy").with_account_token("tok-xyz".into()),
        )
        .await
        .expect("authentication should complete");
}

#[tokio::test]
async fn discoverable_authentication_returns_user_handle() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, _| {
            // no identity hint for discoverable flows
            url.path() == "/authenticate/begin" && body.as_object().is_some_and(|o| o.is_empty())
        })
        .times(1)
        .returning(|_, _, _| {
            ok_reply(serde_json::json!({
                "publicKey": {"challenge": "AAA_"},
                "challenge_token": "tok3"
            }))
        });
    transport
        .expect_post_json()
        .withf(|url, body, _| {
            url.path() == "/authenticate/complete"
                && body["assertion"]["response"]["userHandle"] == "BAUG"
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "ok"})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_get()
        .withf(|options| options.public_key.allow_credentials.is_none())
        .times(1)
        .returning(|_| Ok(Some(asserted_credential(vec![1, 2, 3], Some(vec![4, 5, 6])))));

    let client = Client::new(transport, platform, endpoints());
    client
        .authenticate(CeremonyRequest::default())
        .await
        .expect("discoverable authentication should complete");
}

#[tokio::test]
async fn malformed_challenge_stops_before_the_platform() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(1)
        .returning(|_, _, _| {
            ok_reply(serde_json::json!({
                "publicKey": {"challenge": "***not-base64url***"},
                "challenge_token": "tok4"
            }))
        });

    let platform = MockCredentialsContainer::new();
    let client = Client::new(transport, platform, endpoints());

    let err = client
        .authenticate(CeremonyRequest::for_username("wendy"))
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::MalformedChallenge);
}

#[tokio::test]
async fn caller_timeout_overrides_server_timeout() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, _, _| url.path() == "/authenticate/begin")
        .times(1)
        .returning(|_, _, _| ok_reply(authentication_begin_payload()));
    transport
        .expect_post_json()
        .withf(|url, _, _| url.path() == "/authenticate/complete")
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "ok"})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_get()
        .withf(|options| options.public_key.timeout == Some(5_000))
        .times(1)
        .returning(|_| Ok(Some(asserted_credential(vec![1, 2, 3], None))));

    let client = Client::new(transport, platform, endpoints());
    client
        .authenticate(CeremonyRequest {
            username: Some("wendy".into()),
            timeout: Some(5_000),
            ..Default::default()
        })
        .await
        .expect("authentication should complete");
}

#[tokio::test]
async fn transport_failure_propagates() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(1)
        .returning(|_, _, _| Err(CeremonyError::TransportFailure));

    let platform = MockCredentialsContainer::new();
    let client = Client::new(transport, platform, endpoints());

    let err = client
        .register(CeremonyRequest::for_username("wendy"))
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::TransportFailure);
}

#[tokio::test]
async fn extension_signing_round_trip() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/extensions/prepare"
                && body["username"] == "wendy"
                && bearer.as_deref() == Some("tok-ext")
        })
        .times(1)
        .returning(|_, _, _| {
            ok_reply(serde_json::json!({
                "status": "valid",
                "challenge": "ZcPUob9wS72YNHkRPnFypA",
                "registered": true
            }))
        });
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/extensions/validate"
                && body["username"] == "wendy"
                && body["credential"]["rawId"] == "AQID"
                && bearer.as_deref() == Some("tok-ext")
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"status": "valid", "authenticated": true})));

    let mut platform = MockCredentialsContainer::new();
    platform
        .expect_get()
        .withf(|options| {
            String::from(options.public_key.challenge.clone()) == "ZcPUob9wS72YNHkRPnFypA"
        })
        .times(1)
        .returning(|_| Ok(Some(asserted_credential(vec![1, 2, 3], None))));

    let client = Client::new(transport, platform, endpoints());
    let outcome = client
        .sign_extension_challenge("wendy", &"tok-ext".into())
        .await
        .expect("extension signing should complete");
    assert_eq!(outcome["authenticated"], true);
}

#[tokio::test]
async fn extension_signing_requires_configured_base() {
    let transport = MockTransport::new();
    let platform = MockCredentialsContainer::new();
    let client = Client::new(
        transport,
        platform,
        Endpoints::new(Url::parse("https://rp.example.com").unwrap()),
    );

    let err = client
        .sign_extension_challenge("wendy", &"tok".into())
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::EndpointNotConfigured);
}

#[tokio::test]
async fn token_issuance_round_trip() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .withf(|url, body, bearer| {
            url.path() == "/token/generate"
                && body["username"] == "wendy"
                && body["password"] == "hunter2"
                && body["account_id"] == "acct-1"
                && bearer.is_none()
        })
        .times(1)
        .returning(|_, _, _| ok_reply(serde_json::json!({"token": "jwt-123"})));

    let platform = MockCredentialsContainer::new();
    let client = Client::new(transport, platform, endpoints());

    let token = client
        .request_account_token("wendy", "hunter2", "acct-1")
        .await
        .expect("token should be issued");
    assert_eq!(token, AccountToken::from("jwt-123"));
}

#[tokio::test]
async fn token_issuance_rejection_carries_detail() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(1)
        .returning(|_, _, _| rejected_reply(serde_json::json!({"detail": "invalid password"})));

    let platform = MockCredentialsContainer::new();
    let client = Client::new(transport, platform, endpoints());

    let err = client
        .request_account_token("wendy", "wrong", "acct-1")
        .await
        .unwrap_err();
    assert_eq!(err, CeremonyError::TokenRejected(Some("invalid password".into())));
}
