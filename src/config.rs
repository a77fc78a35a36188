//! Credentials and client configuration

use crate::validation::{check_required, RequiredFields};
use crate::{AzamPayError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_APP_NAME: &str = "AZAMPAY_APP_NAME";
pub const ENV_CLIENT_ID: &str = "AZAMPAY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZAMPAY_CLIENT_SECRET";
pub const ENV_API_KEY: &str = "AZAMPAY_API_KEY";

/// Gateway deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Base URL of the service issuing bearer tokens
    pub fn authenticator_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://authenticator-sandbox.azampay.co.tz",
            Environment::Production => "https://authenticator.azampay.co.tz",
        }
    }

    /// Base URL of the checkout API
    pub fn checkout_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox.azampay.co.tz",
            Environment::Production => "https://checkout.azampay.co.tz",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = AzamPayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "live" => Ok(Environment::Production),
            other => Err(AzamPayError::config(format!(
                "Unknown environment '{}', expected 'sandbox' or 'production'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application credentials issued by AzamPay
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "appName")]
    pub app_name: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    /// API key sent as `X-API-KEY`
    #[serde(rename = "token")]
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_name", &self.app_name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        app_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_key: api_key.into(),
        }
    }

    /// Load credentials from a JSON file with `appName`, `clientId`,
    /// `clientSecret` and `token` keys
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
            AzamPayError::config(format!(
                "Invalid credentials file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Load credentials from the `AZAMPAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| AzamPayError::config(format!("Missing environment variable {}", name)))
        };

        let credentials = Self {
            app_name: read(ENV_APP_NAME)?,
            client_id: read(ENV_CLIENT_ID)?,
            client_secret: read(ENV_CLIENT_SECRET)?,
            api_key: read(ENV_API_KEY)?,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that no credential is empty
    pub fn validate(&self) -> Result<()> {
        check_required("Credentials", self).map_err(|err| match err {
            AzamPayError::MissingField { field, .. } => {
                AzamPayError::config(format!("Missing credential: {} must be set", field))
            }
            other => other,
        })
    }
}

impl RequiredFields for Credentials {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        vec![
            ("appName".into(), self.app_name.as_str()),
            ("clientId".into(), self.client_id.as_str()),
            ("clientSecret".into(), self.client_secret.as_str()),
            ("token".into(), self.api_key.as_str()),
        ]
    }
}

/// Options for the default HTTP transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout; reqwest's default when unset
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
