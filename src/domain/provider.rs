//! Provider wire format: request/response envelopes and the typed JSON bodies
//! of the `LizingAPI` endpoints.

use crate::domain::payment::PaymentRequest;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TOKEN_PATH: &str = "/LizingAPI/GetToken";
pub const CLIENT_PATH: &str = "/LizingAPI/GetClient";
pub const PAYMENT_PATH: &str = "/LizingAPI/Payment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Resolved `Authorization` header for one call.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    Basic { username: String, password: String },
    /// Full header value (`Bearer ...`), possibly empty.
    Bearer(String),
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => write!(f, "Basic({}:********)", username),
            Self::Bearer(value) if value.is_empty() => f.write_str("Bearer(<empty>)"),
            Self::Bearer(_) => f.write_str("Bearer(********)"),
        }
    }
}

/// A fully built call, ready to be handed to an `HttpSender`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub method: HttpMethod,
    pub url: String,
    pub authorization: Authorization,
    /// JSON body for POST calls.
    pub body: Option<String>,
}

/// Status and raw body of any answer the provider gave, 2xx or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

impl TokenResponse {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| GatewayError::parse("GetToken response", e))
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientResponse {
    pub debt: DebtSection,
    pub result: ClientSection,
}

#[derive(Debug, Deserialize)]
pub struct DebtSection {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub debt: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ClientSection {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentBody<'a> {
    pub account_no: &'a str,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl<'a> From<&'a PaymentRequest> for PaymentBody<'a> {
    fn from(request: &'a PaymentRequest) -> Self {
        Self {
            account_no: &request.account_id,
            amount: request.amount.value(),
        }
    }
}

impl PaymentBody<'_> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GatewayError::parse("Payment request", e))
    }
}

/// Debt and holder of a leasing account, as reported by `GetClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub debt: Decimal,
    pub holder_name: String,
}

impl AccountInfo {
    /// Parses a `GetClient` answer. Bodies of non-200 answers are never trusted,
    /// so those yield `Ok(None)`.
    pub fn from_response(response: &ProviderResponse) -> Result<Option<Self>> {
        if !response.is_ok() {
            return Ok(None);
        }
        let parsed: ClientResponse = serde_json::from_str(&response.body)
            .map_err(|e| GatewayError::parse("GetClient response", e))?;
        Ok(Some(Self {
            debt: parsed.debt.debt,
            holder_name: parsed.result.name,
        }))
    }
}
