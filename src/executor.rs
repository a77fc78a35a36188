//! The request/response cycle shared by every gateway operation
//!
//! Each operation runs the same steps: validate the payload, serialize it,
//! attach the session headers, send once, classify the status code and decode
//! the body into the operation's response type.

use crate::error::{BadRequestError, UnauthorizedError};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::*;
use crate::validation::{check_required, RequiredFields};
use crate::{AzamPayError, Result};
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

pub const AUTHORIZATION: &str = "Authorization";
pub const API_KEY_HEADER: &str = "X-API-KEY";
pub const CONTENT_TYPE: &str = "Content-Type";

/// One gateway operation: its display name, method and path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Name used as prefix in error messages
    pub operation: &'static str,
    pub method: Method,
    /// Path relative to the base URL; empty for caller-supplied URLs
    pub path: &'static str,
}

impl Endpoint {
    /// Join the endpoint path onto a base URL
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        parse_url(&raw)
    }
}

pub mod endpoints {
    use super::Endpoint;
    use crate::transport::Method;

    pub const MNO_CHECKOUT: Endpoint = Endpoint {
        operation: "Mobile Checkout",
        method: Method::Post,
        path: "/azampay/mno/checkout",
    };

    pub const BANK_CHECKOUT: Endpoint = Endpoint {
        operation: "Bank Checkout",
        method: Method::Post,
        path: "/azampay/bank/checkout",
    };

    pub const CALLBACK: Endpoint = Endpoint {
        operation: "Callback",
        method: Method::Post,
        path: "",
    };

    pub const PAYMENT_PARTNERS: Endpoint = Endpoint {
        operation: "Payment Partners",
        method: Method::Get,
        path: "/api/v1/Partner/GetPaymentPartners",
    };

    pub const POST_CHECKOUT: Endpoint = Endpoint {
        operation: "Post Checkout",
        method: Method::Post,
        path: "/api/v1/Partner/PostCheckout",
    };

    pub const GENERATE_TOKEN: Endpoint = Endpoint {
        operation: "Generate Token",
        method: Method::Post,
        path: "/AppRegistration/GenerateToken",
    };
}

pub(crate) fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| AzamPayError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Credentials attached to a request
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// Bearer token plus API key, for every call made with a session
    Session { token: &'a str, api_key: &'a str },
    /// API key only, for the token request itself
    ApiKey(&'a str),
}

impl Auth<'_> {
    fn headers(&self) -> Result<Vec<(&'static str, String)>> {
        let mut headers = Vec::with_capacity(3);
        let api_key = match *self {
            Auth::Session { token, api_key } => {
                let bearer = checked_header(AUTHORIZATION, format!("Bearer {}", token))?;
                headers.push((AUTHORIZATION, bearer));
                api_key
            }
            Auth::ApiKey(api_key) => api_key,
        };
        headers.push((API_KEY_HEADER, checked_header(API_KEY_HEADER, api_key.to_string())?));
        headers.push((CONTENT_TYPE, "application/json".to_string()));
        Ok(headers)
    }
}

fn checked_header(header: &'static str, value: String) -> Result<String> {
    HeaderValue::from_str(&value).map_err(|_| AzamPayError::InvalidHeader { header })?;
    Ok(value)
}

/// Validate and serialize a payload into a request
pub fn prepare<P>(endpoint: &Endpoint, url: Url, auth: Auth<'_>, payload: &P) -> Result<HttpRequest>
where
    P: Serialize + RequiredFields,
{
    check_required(endpoint.operation, payload)?;
    let body = serde_json::to_vec(payload)?;

    Ok(HttpRequest {
        method: endpoint.method,
        url,
        headers: auth.headers()?,
        body: Some(body),
    })
}

/// Build a request for an operation that takes no payload
pub fn prepare_empty(endpoint: &Endpoint, url: Url, auth: Auth<'_>) -> Result<HttpRequest> {
    Ok(HttpRequest {
        method: endpoint.method,
        url,
        headers: auth.headers()?,
        body: None,
    })
}

/// Outcome of a response, by status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    BadRequest,
    Unauthorized,
    ServerError,
    Unexpected(u16),
}

impl ResponseClass {
    pub fn classify(status: u16) -> Self {
        match status {
            200 => ResponseClass::Success,
            400 => ResponseClass::BadRequest,
            417 => ResponseClass::Unauthorized,
            500 => ResponseClass::ServerError,
            other => ResponseClass::Unexpected(other),
        }
    }
}

/// A type that can be decoded from a 200 response body
pub trait ResponseBody: Sized {
    fn decode(operation: &'static str, body: &[u8]) -> Result<Self>;
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn decode_json<R: DeserializeOwned>(operation: &'static str, body: &[u8]) -> Result<R> {
    if is_blank(body) {
        return Err(AzamPayError::EmptyBody { operation });
    }
    serde_json::from_slice(body).map_err(|source| AzamPayError::Decode { operation, source })
}

macro_rules! json_response_body {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResponseBody for $ty {
                fn decode(operation: &'static str, body: &[u8]) -> Result<Self> {
                    decode_json(operation, body)
                }
            }
        )*
    };
}

json_response_body!(
    MnoCheckoutResponse,
    BankCheckoutResponse,
    CallbackResponse,
    Vec<PaymentPartner>,
    TokenResponse,
);

impl ResponseBody for CheckoutUrl {
    // The URL comes back either as a JSON string or as plain text. Plain
    // text is only accepted when the body is not JSON at all.
    fn decode(operation: &'static str, body: &[u8]) -> Result<Self> {
        if is_blank(body) {
            return Err(AzamPayError::EmptyBody { operation });
        }
        let url = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(url)) => url,
            Ok(_) => return Err(checkout_url_error(operation, "expected a JSON string")),
            Err(_) => std::str::from_utf8(body)
                .map_err(|_| checkout_url_error(operation, "body is not valid UTF-8"))?
                .trim()
                .to_string(),
        };
        if url.trim().is_empty() {
            return Err(checkout_url_error(operation, "checkout URL is empty"));
        }
        Ok(CheckoutUrl(url))
    }
}

fn checkout_url_error(operation: &'static str, message: &str) -> AzamPayError {
    AzamPayError::Decode {
        operation,
        source: <serde_json::Error as serde::de::Error>::custom(message),
    }
}

/// Map a response onto the operation's result
pub fn interpret<R: ResponseBody>(operation: &'static str, response: &HttpResponse) -> Result<R> {
    match ResponseClass::classify(response.status) {
        ResponseClass::Success => R::decode(operation, &response.body),
        ResponseClass::BadRequest => {
            let error: BadRequestError = serde_json::from_slice(&response.body).map_err(|source| {
                AzamPayError::ErrorBodyDecode {
                    operation,
                    kind: "bad request",
                    source,
                }
            })?;
            Err(AzamPayError::BadRequest { operation, error })
        }
        ResponseClass::Unauthorized => {
            let error: UnauthorizedError =
                serde_json::from_slice(&response.body).map_err(|source| {
                    AzamPayError::ErrorBodyDecode {
                        operation,
                        kind: "unauthorized",
                        source,
                    }
                })?;
            Err(AzamPayError::Unauthorized { operation, error })
        }
        ResponseClass::ServerError => Err(AzamPayError::InternalServerError { operation }),
        ResponseClass::Unexpected(status) => {
            Err(AzamPayError::UnexpectedStatus { operation, status })
        }
    }
}

/// Send a prepared request once and interpret the answer
pub async fn dispatch<T, R>(transport: &T, endpoint: &Endpoint, request: HttpRequest) -> Result<R>
where
    T: Transport + ?Sized,
    R: ResponseBody,
{
    debug!(
        operation = endpoint.operation,
        method = endpoint.method.as_str(),
        url = %request.url,
        "sending gateway request"
    );

    let response = transport.send(request).await?;

    debug!(operation = endpoint.operation, status = response.status, "gateway responded");
    if response.status != 200 {
        warn!(operation = endpoint.operation, status = response.status, "gateway request failed");
    }

    interpret(endpoint.operation, &response)
}
