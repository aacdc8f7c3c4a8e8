use crate::application::parameters::PaymentParameters;
use crate::application::session::SessionManager;
use crate::application::transport::{AuthKind, Transport};
use crate::domain::credentials::Credentials;
use crate::domain::error_code::{ErrorCode, map_provider_status};
use crate::domain::payment::{PaymentAttempt, PaymentOutcome, PaymentRequest};
use crate::domain::ports::HttpSenderBox;
use crate::domain::provider::{
    AccountInfo, CLIENT_PATH, PAYMENT_PATH, PaymentBody, ProviderResponse,
};
use crate::domain::session::Session;
use crate::error::{GatewayError, Result};
use reqwest::Url;
use tracing::{info, instrument, warn};

/// Result of the read-only pre-payment verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineCheckResult {
    pub account_id: String,
    pub error_code: ErrorCode,
    /// Present only when the provider answered 200 with a well-formed body.
    pub account: Option<AccountInfo>,
}

impl OnlineCheckResult {
    /// Informational `key=value` pairs for the platform.
    pub fn extras(&self) -> Vec<(&'static str, String)> {
        match &self.account {
            Some(info) => vec![
                ("debt", info.debt.to_string()),
                ("name", info.holder_name.clone()),
            ],
            None => Vec::new(),
        }
    }

    /// Extras rendered as CRLF-terminated `key=value` lines.
    pub fn extra_params(&self) -> String {
        self.extras()
            .into_iter()
            .map(|(key, value)| format!("{}={}\r\n", key, value))
            .collect()
    }
}

/// Outcome of probing the provider with the configured test account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCheck {
    Ok,
    /// The provider answered with something other than 200.
    Rejected { status: u16, body: String },
    /// No answer at all.
    Failed(String),
}

/// The leasing provider integration.
///
/// Built once per configuration; authentication happens during construction
/// and the resulting session is reused by every operation.
pub struct LeasingGateway {
    transport: Transport,
    test_account: Option<String>,
}

impl LeasingGateway {
    /// Creates the gateway and performs the token exchange.
    ///
    /// A rejected token request is not an error: the gateway is returned with
    /// an unauthenticated session. Only an unreachable provider fails here.
    pub async fn initialize(sender: HttpSenderBox, credentials: Credentials) -> Result<Self> {
        info!(base_url = credentials.base_url(), "Initializing leasing gateway");
        let gateway = Self {
            transport: Transport::new(sender, credentials),
            test_account: None,
        };
        gateway.reauthenticate().await?;
        Ok(gateway)
    }

    pub fn with_test_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        self.test_account = (!account.trim().is_empty()).then_some(account);
        self
    }

    pub async fn session(&self) -> Session {
        self.transport.session().await
    }

    /// Repeats the token exchange and replaces the session.
    pub async fn reauthenticate(&self) -> Result<Session> {
        SessionManager::new(&self.transport).authenticate().await
    }

    #[instrument(skip(self))]
    pub async fn account_lookup(&self, account_id: &str) -> Result<ProviderResponse> {
        let url = self.client_url(account_id)?;
        self.transport.get(&url, AuthKind::Bearer).await
    }

    /// Verifies the account named by the `ID` parameter before a payment is accepted.
    ///
    /// Never changes payment state; the caller records the result on its
    /// `PaymentAttempt`.
    #[instrument(skip(self))]
    pub async fn online_check(&self, formatted_params: &str) -> Result<OnlineCheckResult> {
        let account_id = PaymentParameters::parse(formatted_params).account_id()?;
        let response = self.account_lookup(&account_id).await?;

        let mut error_code = map_provider_status(response.status);
        let account = match AccountInfo::from_response(&response) {
            Ok(account) => account,
            Err(e) => {
                warn!(error = %e, "GetClient body could not be parsed");
                error_code = ErrorCode::PaymentSystemError;
                None
            }
        };

        info!(
            account_id = %account_id,
            status = response.status,
            error_code = error_code.code(),
            "Online check"
        );

        Ok(OnlineCheckResult {
            account_id,
            error_code,
            account,
        })
    }

    /// Posts the payment and classifies the provider status.
    #[instrument(skip(self), fields(account_id = %request.account_id, amount = %request.amount))]
    pub async fn execute_payment(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
        let body = PaymentBody::from(request).to_json()?;
        let url = self.transport.credentials().endpoint(PAYMENT_PATH);
        let response = self.transport.post(&url, body, AuthKind::Bearer).await?;

        let outcome = PaymentOutcome::from_status(response.status);
        info!(status = response.status, %outcome, "Payment executed");
        Ok(outcome)
    }

    /// Runs a checked attempt through submission to its terminal state.
    ///
    /// If the provider cannot be reached the attempt stays `Submitted` and the
    /// error is returned; retrying is up to the caller.
    pub async fn process_payment(&self, attempt: &mut PaymentAttempt) -> Result<PaymentOutcome> {
        attempt.mark_submitted()?;
        let outcome = self.execute_payment(attempt.request()).await?;
        attempt.complete(outcome)?;
        Ok(outcome)
    }

    /// Looks up the configured test account to confirm URL and credentials work.
    pub async fn check_settings(&self) -> SettingsCheck {
        let Some(account) = self.test_account.as_deref() else {
            return SettingsCheck::Failed("No test account configured".to_string());
        };
        match self.account_lookup(account).await {
            Ok(response) if response.is_ok() => SettingsCheck::Ok,
            Ok(response) => SettingsCheck::Rejected {
                status: response.status,
                body: response.body,
            },
            Err(e) => SettingsCheck::Failed(e.to_string()),
        }
    }

    fn client_url(&self, account_id: &str) -> Result<String> {
        let base = self.transport.credentials().endpoint(CLIENT_PATH);
        let url = Url::parse_with_params(&base, &[("id", account_id)]).map_err(|e| {
            GatewayError::Config(format!("Invalid provider URL {}: {}", base, e))
        })?;
        Ok(url.to_string())
    }
}
