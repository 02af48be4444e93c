//! OAuth2 client-credentials session establishment.
//!
//! A Dataverse environment advertises its authority in the
//! `WWW-Authenticate` challenge of an unauthenticated Web API probe; the
//! bearer token then comes from that authority's v2.0 token endpoint with
//! the environment's `/.default` scope.

use serde::Deserialize;

use resdeploy_core::error::RemoteError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Probe `api_root` unauthenticated and return the discovered authority's
/// token endpoint.
pub(crate) fn discover_token_endpoint(
    agent: &ureq::Agent,
    api_root: &str,
) -> Result<String, RemoteError> {
    match agent.get(api_root).call() {
        Ok(_) => Err(RemoteError::Auth(
            "environment accepted an unauthenticated request; cannot discover authority"
                .to_string(),
        )),
        Err(ureq::Error::Status(401, response)) => {
            let challenge = response.header("WWW-Authenticate").ok_or_else(|| {
                RemoteError::Auth("401 without a WWW-Authenticate challenge".to_string())
            })?;
            authority_from_challenge(challenge).map(|uri| token_endpoint(&uri))
        }
        Err(ureq::Error::Status(status, response)) => Err(RemoteError::Api {
            status,
            message: response.into_string().unwrap_or_default(),
        }),
        Err(other) => Err(RemoteError::Transport(other.to_string())),
    }
}

/// Request a client-credentials bearer token scoped to `crm`.
pub(crate) fn request_token(
    agent: &ureq::Agent,
    token_endpoint: &str,
    crm: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, RemoteError> {
    let scope = format!("{}/.default", crm.trim_end_matches('/'));
    let response = agent
        .post(token_endpoint)
        .send_form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", &scope),
        ])
        .map_err(token_error)?;
    let token: TokenResponse = response
        .into_json()
        .map_err(|e| RemoteError::Response(format!("token response: {e}")))?;
    Ok(token.access_token)
}

/// Extract the authorization URI from a `WWW-Authenticate` challenge.
///
/// The platform answers with
/// `Bearer authorization_uri=<uri>, resource_id=<id>`; the URI may or may
/// not be quoted.
pub(crate) fn authority_from_challenge(header: &str) -> Result<String, RemoteError> {
    header
        .split([' ', ','])
        .filter_map(|part| part.strip_prefix("authorization_uri="))
        .map(|uri| uri.trim_matches('"').to_string())
        .find(|uri| !uri.is_empty())
        .ok_or_else(|| RemoteError::Auth(format!("no authorization_uri in challenge: {header}")))
}

/// Derive the v2.0 token endpoint from a discovered authorize URI.
pub(crate) fn token_endpoint(authorize_uri: &str) -> String {
    let base = authorize_uri
        .strip_suffix("/oauth2/v2.0/authorize")
        .or_else(|| authorize_uri.strip_suffix("/oauth2/authorize"))
        .unwrap_or(authorize_uri);
    format!("{base}/oauth2/v2.0/token")
}

fn token_error(err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => RemoteError::Auth(format!(
            "token request rejected ({status}): {}",
            response.into_string().unwrap_or_default()
        )),
        other => RemoteError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_with_bare_uri() {
        let uri = authority_from_challenge(
            "Bearer authorization_uri=https://login.microsoftonline.com/tid/oauth2/authorize, \
             resource_id=https://org.crm.dynamics.com/",
        )
        .expect("parse");
        assert_eq!(uri, "https://login.microsoftonline.com/tid/oauth2/authorize");
    }

    #[test]
    fn challenge_with_quoted_uri() {
        let uri = authority_from_challenge(
            "Bearer authorization_uri=\"https://login.microsoftonline.com/tid/oauth2/authorize\"",
        )
        .expect("parse");
        assert_eq!(uri, "https://login.microsoftonline.com/tid/oauth2/authorize");
    }

    #[test]
    fn challenge_without_authority_is_an_auth_error() {
        let err = authority_from_challenge("Bearer realm=\"\"").unwrap_err();
        assert!(matches!(err, RemoteError::Auth(_)), "got: {err}");
        assert!(err.to_string().contains("authorization_uri"));
    }

    #[test]
    fn token_endpoint_from_v1_authorize() {
        assert_eq!(
            token_endpoint("https://login.microsoftonline.com/tid/oauth2/authorize"),
            "https://login.microsoftonline.com/tid/oauth2/v2.0/token"
        );
    }

    #[test]
    fn token_endpoint_from_v2_authorize() {
        assert_eq!(
            token_endpoint("https://login.microsoftonline.com/tid/oauth2/v2.0/authorize"),
            "https://login.microsoftonline.com/tid/oauth2/v2.0/token"
        );
    }

    #[test]
    fn token_endpoint_from_bare_authority() {
        assert_eq!(
            token_endpoint("https://login.microsoftonline.com/tid"),
            "https://login.microsoftonline.com/tid/oauth2/v2.0/token"
        );
    }
}
