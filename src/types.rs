//! Request and response types for the AzamPay checkout API

use crate::validation::RequiredFields;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Extra data forwarded untouched to the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalProperties {
    #[serde(default)]
    pub property1: String,
    #[serde(default)]
    pub property2: String,
}

impl AdditionalProperties {
    pub fn new(property1: impl Into<String>, property2: impl Into<String>) -> Self {
        Self {
            property1: property1.into(),
            property2: property2.into(),
        }
    }
}

/// Payload for a mobile network operator checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnoCheckoutPayload {
    /// MSISDN the amount is collected from
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    pub amount: String,
    pub currency: String,
    /// Identifier of the calling application, up to 128 characters
    #[serde(rename = "externalId")]
    pub external_id: String,
    /// Mobile operator, see [`providers`]
    pub provider: String,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

impl MnoCheckoutPayload {
    /// Create a new mobile checkout payload
    pub fn new(
        account_number: impl Into<String>,
        amount: impl Into<String>,
        currency: impl Into<String>,
        external_id: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            amount: amount.into(),
            currency: currency.into(),
            external_id: external_id.into(),
            provider: provider.into(),
            additional_properties: None,
        }
    }

    pub fn with_additional_properties(mut self, properties: AdditionalProperties) -> Self {
        self.additional_properties = Some(properties);
        self
    }
}

impl RequiredFields for MnoCheckoutPayload {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        vec![
            ("accountNumber".into(), self.account_number.as_str()),
            ("amount".into(), self.amount.as_str()),
            ("currency".into(), self.currency.as_str()),
            ("externalId".into(), self.external_id.as_str()),
            ("provider".into(), self.provider.as_str()),
        ]
    }
}

/// Result of a mobile checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnoCheckoutResponse {
    #[serde(default)]
    pub success: bool,
    /// Empty on sandbox
    #[serde(rename = "msg", default)]
    pub message: String,
    #[serde(rename = "transactionId", default)]
    pub transaction_id: String,
}

/// Payload for a bank checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCheckoutPayload {
    /// Amount charged from the merchant account
    pub amount: String,
    #[serde(rename = "currencyCode")]
    pub currency_code: String,
    /// Account the amount is deducted from
    #[serde(rename = "merchantAccountNumber")]
    pub merchant_account_number: String,
    #[serde(rename = "merchantMobileNumber")]
    pub merchant_mobile_number: String,
    #[serde(rename = "merchantName", default)]
    pub merchant_name: String,
    /// One time password issued by the bank
    pub otp: String,
    /// Bank provider, see [`providers`]
    pub provider: String,
    /// Caller-side reference, up to 128 ASCII characters
    #[serde(rename = "referenceId", default)]
    pub reference_id: String,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

impl BankCheckoutPayload {
    /// Create a new bank checkout payload
    pub fn new(
        amount: impl Into<String>,
        currency_code: impl Into<String>,
        merchant_account_number: impl Into<String>,
        merchant_mobile_number: impl Into<String>,
        otp: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
            merchant_account_number: merchant_account_number.into(),
            merchant_mobile_number: merchant_mobile_number.into(),
            otp: otp.into(),
            provider: provider.into(),
            ..Default::default()
        }
    }

    pub fn with_merchant_name(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = name.into();
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = reference_id.into();
        self
    }

    pub fn with_additional_properties(mut self, properties: AdditionalProperties) -> Self {
        self.additional_properties = Some(properties);
        self
    }
}

impl RequiredFields for BankCheckoutPayload {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        vec![
            ("amount".into(), self.amount.as_str()),
            ("currencyCode".into(), self.currency_code.as_str()),
            ("merchantAccountNumber".into(), self.merchant_account_number.as_str()),
            ("merchantMobileNumber".into(), self.merchant_mobile_number.as_str()),
            ("otp".into(), self.otp.as_str()),
            ("provider".into(), self.provider.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankReference {
    #[serde(rename = "ReferenceID", default)]
    pub reference_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCheckoutData {
    #[serde(default)]
    pub properties: BankReference,
}

/// Result of a bank checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCheckoutResponse {
    #[serde(default)]
    pub success: bool,
    /// Empty on sandbox
    #[serde(rename = "msg", default)]
    pub message: String,
    #[serde(default)]
    pub data: BankCheckoutData,
}

impl BankCheckoutResponse {
    /// Reference of the transaction assigned by the gateway
    pub fn reference_id(&self) -> &str {
        &self.data.properties.reference_id
    }
}

/// Transaction notification delivered to a merchant callback endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackPayload {
    pub msisdn: String,
    pub amount: String,
    pub message: String,
    #[serde(rename = "utilityref")]
    pub utility_ref: String,
    pub operator: String,
    pub reference: String,
    #[serde(rename = "transactionstatus")]
    pub transaction_status: String,
    #[serde(rename = "submerchantAcc", default)]
    pub submerchant_acc: String,
}

impl RequiredFields for CallbackPayload {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        vec![
            ("msisdn".into(), self.msisdn.as_str()),
            ("amount".into(), self.amount.as_str()),
            ("message".into(), self.message.as_str()),
            ("utilityref".into(), self.utility_ref.as_str()),
            ("operator".into(), self.operator.as_str()),
            ("reference".into(), self.reference.as_str()),
            ("transactionstatus".into(), self.transaction_status.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackResponse {
    #[serde(default)]
    pub success: bool,
}

/// A payment partner available for checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPartner {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: String,
    #[serde(rename = "partnerName", default)]
    pub partner_name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "vendorName", default)]
    pub vendor_name: String,
    #[serde(rename = "paymentVendorId", default)]
    pub payment_vendor_id: String,
    #[serde(rename = "paymentPartnerId", default)]
    pub payment_partner_id: String,
    #[serde(default)]
    pub currency: String,
}

/// One line of a shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Payload requesting a hosted checkout page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCheckoutPayload {
    #[serde(rename = "appName")]
    pub app_name: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "vendorId")]
    pub vendor_id: String,
    /// "SW" or "EN"
    pub language: String,
    pub currency: String,
    /// Caller-side reference, 30 characters
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "requestOrigin")]
    pub request_origin: String,
    #[serde(rename = "redirectFailURL")]
    pub redirect_fail_url: String,
    #[serde(rename = "redirectSuccessURL")]
    pub redirect_success_url: String,
    #[serde(rename = "vendorName")]
    pub vendor_name: String,
    pub amount: String,
    #[serde(default)]
    pub cart: Cart,
}

impl PostCheckoutPayload {
    pub fn add_item(mut self, item: Item) -> Self {
        self.cart.items.push(item);
        self
    }
}

impl RequiredFields for PostCheckoutPayload {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        let mut fields: Vec<(Cow<'static, str>, &str)> = vec![
            ("appName".into(), self.app_name.as_str()),
            ("clientId".into(), self.client_id.as_str()),
            ("vendorId".into(), self.vendor_id.as_str()),
            ("language".into(), self.language.as_str()),
            ("currency".into(), self.currency.as_str()),
            ("externalId".into(), self.external_id.as_str()),
            ("requestOrigin".into(), self.request_origin.as_str()),
            ("redirectFailURL".into(), self.redirect_fail_url.as_str()),
            ("redirectSuccessURL".into(), self.redirect_success_url.as_str()),
            ("vendorName".into(), self.vendor_name.as_str()),
            ("amount".into(), self.amount.as_str()),
        ];
        fields.extend(self.cart.items.iter().enumerate().map(|(index, item)| {
            (
                Cow::Owned(format!("cart.items[{}].name", index)),
                item.name.as_str(),
            )
        }));
        fields
    }
}

/// URL of the hosted checkout page returned by post checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutUrl(pub String);

impl CheckoutUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckoutUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credentials exchanged for a bearer token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "appName")]
    pub app_name: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl RequiredFields for TokenRequest {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)> {
        vec![
            ("appName".into(), self.app_name.as_str()),
            ("clientId".into(), self.client_id.as_str()),
            ("clientSecret".into(), self.client_secret.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    #[serde(rename = "accessToken", default)]
    pub access_token: String,
    /// Expiry timestamp as sent by the authenticator
    #[serde(default)]
    pub expire: String,
}

/// Answer of the authenticator's token endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub data: TokenData,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
}

impl TokenResponse {
    /// Expiry of the token, when the authenticator sent an RFC 3339 timestamp
    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.data.expire)
            .ok()
            .map(|at| at.with_timezone(&chrono::Utc))
    }
}

/// Provider names accepted by the gateway
pub mod providers {
    pub const AIRTEL: &str = "Airtel";
    pub const TIGO: &str = "Tigo";
    pub const HALOPESA: &str = "Halopesa";
    pub const AZAMPESA: &str = "Azampesa";
    pub const MPESA: &str = "Mpesa";

    pub const CRDB: &str = "CRDB";
    pub const NMB: &str = "NMB";
}
