//! Session context shared by every operation call

use crate::config::{Credentials, Environment};
use crate::executor::{self, endpoints, Auth};
use crate::transport::Transport;
use crate::types::{TokenRequest, TokenResponse};
use crate::{AzamPayError, Result};
use std::fmt;
use tracing::debug;

/// Authenticated calling context: base URL, bearer token and API key.
///
/// Created once and only read afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    token: String,
    api_key: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Session {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn auth(&self) -> Auth<'_> {
        Auth::Session {
            token: &self.token,
            api_key: &self.api_key,
        }
    }
}

/// Exchange application credentials for a session on the given environment
pub async fn generate_session<T>(
    transport: &T,
    environment: Environment,
    credentials: &Credentials,
) -> Result<Session>
where
    T: Transport + ?Sized,
{
    generate_session_at(
        transport,
        environment.authenticator_url(),
        environment.checkout_url(),
        credentials,
    )
    .await
}

/// Like [`generate_session`] with explicit authenticator and checkout base URLs
pub async fn generate_session_at<T>(
    transport: &T,
    authenticator_url: &str,
    checkout_url: &str,
    credentials: &Credentials,
) -> Result<Session>
where
    T: Transport + ?Sized,
{
    let endpoint = endpoints::GENERATE_TOKEN;
    let payload = TokenRequest {
        app_name: credentials.app_name.clone(),
        client_id: credentials.client_id.clone(),
        client_secret: credentials.client_secret.clone(),
    };

    let request = executor::prepare(
        &endpoint,
        endpoint.url(authenticator_url)?,
        Auth::ApiKey(&credentials.api_key),
        &payload,
    )?;
    let response: TokenResponse = executor::dispatch(transport, &endpoint, request).await?;

    if !response.success || response.data.access_token.is_empty() {
        let message = if response.message.is_empty() {
            "token endpoint returned no access token".to_string()
        } else {
            response.message
        };
        return Err(AzamPayError::authentication(message));
    }

    debug!(app = %credentials.app_name, expire = %response.data.expire, "session generated");

    Ok(Session::new(
        checkout_url,
        response.data.access_token,
        credentials.api_key.clone(),
    ))
}
