//! # azampay - AzamPay checkout client
//!
//! A Rust client for the AzamPay payment gateway. It covers mobile-money
//! (MNO) checkout, bank checkout, payment partner listing, callback delivery
//! and hosted checkout pages.
//!
//! Every operation follows the same cycle: the payload's required fields are
//! checked, the payload is sent once as JSON with the session's bearer token
//! and API key, and the status code decides whether the body is decoded as the
//! operation's response or turned into an [`AzamPayError`].
//!
//! ```rust,no_run
//! use azampay::{AzamPayClient, BankCheckoutPayload, Credentials, Environment};
//!
//! # async fn run() -> azampay::Result<()> {
//! let credentials = Credentials::from_file("config.json")?;
//! let client = AzamPayClient::connect(Environment::Sandbox, &credentials).await?;
//!
//! let payload = BankCheckoutPayload::new("10000", "TZS", "123321", "0700000000", "1234", "CRDB");
//! let response = client.bank_checkout(&payload).await?;
//! println!("{}", response.reference_id());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod transport;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use client::AzamPayClient;
pub use config::{ClientConfig, Credentials, Environment};
pub use error::{AzamPayError, BadRequestError, Result, UnauthorizedError};
pub use session::{generate_session, Session};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use types::*;

/// Current version of the azampay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
