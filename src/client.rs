//! Client exposing one method per gateway operation

use crate::config::{ClientConfig, Credentials, Environment};
use crate::executor::{self, endpoints, parse_url};
use crate::session::{generate_session, Session};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::*;
use crate::Result;

/// AzamPay checkout client
#[derive(Debug, Clone)]
pub struct AzamPayClient<T = ReqwestTransport> {
    transport: T,
    session: Session,
}

impl AzamPayClient<ReqwestTransport> {
    /// Create a client for an existing session
    pub fn new(session: Session) -> Self {
        Self::with_transport(session, ReqwestTransport::new())
    }

    /// Create a client with custom transport options
    pub fn with_config(session: Session, config: ClientConfig) -> Result<Self> {
        let transport = match config.timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Ok(Self::with_transport(session, transport))
    }

    /// Generate a session for `credentials` and create a client for it
    pub async fn connect(environment: Environment, credentials: &Credentials) -> Result<Self> {
        let transport = ReqwestTransport::new();
        let session = generate_session(&transport, environment, credentials).await?;
        Ok(Self::with_transport(session, transport))
    }
}

impl<T: Transport> AzamPayClient<T> {
    /// Create a client sending requests through `transport`
    pub fn with_transport(session: Session, transport: T) -> Self {
        Self { transport, session }
    }

    /// The session every call is made with
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Collect money from a mobile wallet
    pub async fn mobile_checkout(&self, payload: &MnoCheckoutPayload) -> Result<MnoCheckoutResponse> {
        let endpoint = endpoints::MNO_CHECKOUT;
        let url = endpoint.url(self.session.base_url())?;
        let request = executor::prepare(&endpoint, url, self.session.auth(), payload)?;
        executor::dispatch(&self.transport, &endpoint, request).await
    }

    /// Collect money from a bank account
    pub async fn bank_checkout(&self, payload: &BankCheckoutPayload) -> Result<BankCheckoutResponse> {
        let endpoint = endpoints::BANK_CHECKOUT;
        let url = endpoint.url(self.session.base_url())?;
        let request = executor::prepare(&endpoint, url, self.session.auth(), payload)?;
        executor::dispatch(&self.transport, &endpoint, request).await
    }

    /// Deliver a transaction notification to an absolute callback URL
    pub async fn callback(&self, payload: &CallbackPayload, callback_url: &str) -> Result<CallbackResponse> {
        let endpoint = endpoints::CALLBACK;
        let url = parse_url(callback_url)?;
        let request = executor::prepare(&endpoint, url, self.session.auth(), payload)?;
        executor::dispatch(&self.transport, &endpoint, request).await
    }

    /// List the partners a checkout can be paid through
    pub async fn payment_partners(&self) -> Result<Vec<PaymentPartner>> {
        let endpoint = endpoints::PAYMENT_PARTNERS;
        let url = endpoint.url(self.session.base_url())?;
        let request = executor::prepare_empty(&endpoint, url, self.session.auth())?;
        executor::dispatch(&self.transport, &endpoint, request).await
    }

    /// Request a hosted checkout page and return its URL
    pub async fn post_checkout(&self, payload: &PostCheckoutPayload) -> Result<CheckoutUrl> {
        let endpoint = endpoints::POST_CHECKOUT;
        let url = endpoint.url(self.session.base_url())?;
        let request = executor::prepare(&endpoint, url, self.session.auth(), payload)?;
        executor::dispatch(&self.transport, &endpoint, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpRequest, HttpResponse, Method};
    use crate::AzamPayError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers with a canned response
    struct FakeTransport {
        response: HttpResponse,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
            Self {
                response: HttpResponse::new(status, body),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    fn client(transport: FakeTransport) -> AzamPayClient<FakeTransport> {
        AzamPayClient::with_transport(
            Session::new("https://sandbox.azampay.co.tz", "tok", "key"),
            transport,
        )
    }

    fn mno_payload() -> MnoCheckoutPayload {
        MnoCheckoutPayload::new("0700000000", "2000", "TZS", "123", providers::TIGO)
    }

    #[tokio::test]
    async fn test_missing_field_sends_nothing() {
        let client = client(FakeTransport::new(200, "{}"));
        let mut payload = mno_payload();
        payload.provider.clear();

        let err = client.mobile_checkout(&payload).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "(Mobile Checkout) Error: Field 'provider' is required.");
        assert_eq!(client.transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_every_required_bank_field_is_checked() {
        let full = BankCheckoutPayload::new("10000", "TZS", "123321", "0700000000", "1234", "CRDB");
        let fields = [
            "amount",
            "currencyCode",
            "merchantAccountNumber",
            "merchantMobileNumber",
            "otp",
            "provider",
        ];

        for field in fields {
            let client = client(FakeTransport::new(200, "{}"));
            let mut payload = full.clone();
            match field {
                "amount" => payload.amount.clear(),
                "currencyCode" => payload.currency_code.clear(),
                "merchantAccountNumber" => payload.merchant_account_number.clear(),
                "merchantMobileNumber" => payload.merchant_mobile_number.clear(),
                "otp" => payload.otp.clear(),
                _ => payload.provider.clear(),
            }

            let err = client.bank_checkout(&payload).await.unwrap_err();
            assert!(
                matches!(&err, AzamPayError::MissingField { field: f, .. } if f == field),
                "expected missing {}, got {}",
                field,
                err
            );
            assert_eq!(client.transport.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_optional_fields_may_be_empty() {
        let body = json!({
            "success": true,
            "msg": "",
            "data": { "properties": { "ReferenceID": "ref-1" } }
        });
        let client = client(FakeTransport::new(200, body.to_string()));
        let payload = BankCheckoutPayload::new("10000", "TZS", "123321", "0700000000", "1234", "NMB");

        let response = client.bank_checkout(&payload).await.unwrap();
        assert!(response.success);
        assert_eq!(client.transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_mobile_checkout_request_shape() {
        let body = json!({ "success": true, "msg": "queued", "transactionId": "tx-9" });
        let client = client(FakeTransport::new(200, body.to_string()));

        let response = client.mobile_checkout(&mno_payload()).await.unwrap();
        assert_eq!(response.transaction_id, "tx-9");
        assert_eq!(response.message, "queued");

        let requests = client.transport.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url.as_str(),
            "https://sandbox.azampay.co.tz/azampay/mno/checkout"
        );
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(request.header("X-API-KEY"), Some("key"));
    }

    #[tokio::test]
    async fn test_payment_partners_is_bodyless_get() {
        let client = client(FakeTransport::new(200, "[]"));

        let partners = client.payment_partners().await.unwrap();
        assert!(partners.is_empty());

        let requests = client.transport.requests.lock().unwrap();
        assert_eq!(requests[0].method, Method::Get);
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_callback_uses_caller_url() {
        let client = client(FakeTransport::new(200, r#"{"success":true}"#));
        let payload = CallbackPayload {
            msisdn: "0178334".into(),
            amount: "2000".into(),
            message: "testing callback".into(),
            utility_ref: "1282-123".into(),
            operator: "Airtel".into(),
            reference: "123-123".into(),
            transaction_status: "success".into(),
            submerchant_acc: "01723113".into(),
        };

        let response = client
            .callback(&payload, "http://localhost:8000/api/v1/Checkout/Callback")
            .await
            .unwrap();
        assert!(response.success);

        let requests = client.transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost:8000/api/v1/Checkout/Callback"
        );
    }

    #[tokio::test]
    async fn test_callback_rejects_relative_url() {
        let client = client(FakeTransport::new(200, "{}"));
        let payload = CallbackPayload {
            msisdn: "0178334".into(),
            amount: "2000".into(),
            message: "m".into(),
            utility_ref: "u".into(),
            operator: "Airtel".into(),
            reference: "r".into(),
            transaction_status: "success".into(),
            submerchant_acc: String::new(),
        };

        let err = client.callback(&payload, "/callback").await.unwrap_err();
        assert!(matches!(err, AzamPayError::InvalidUrl { .. }));
        assert_eq!(client.transport.calls(), 0);
    }

    #[test]
    fn test_client_creation() {
        let session = Session::new("https://sandbox.azampay.co.tz", "tok", "key");
        let client = AzamPayClient::new(session.clone());
        assert_eq!(client.session(), &session);

        let config = ClientConfig::new().with_timeout(std::time::Duration::from_secs(10));
        assert!(AzamPayClient::with_config(session, config).is_ok());
    }
}
