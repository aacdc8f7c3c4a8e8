use crate::domain::error_code::ErrorCode;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount of a leasing payment.
///
/// Wraps `rust_decimal::Decimal` so a negative amount can never reach the provider.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            Err(GatewayError::Validation(
                "Amount must not be negative".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A payment as handed over by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub account_id: String,
    pub amount: Amount,
}

impl PaymentRequest {
    /// Builds a request, stripping spaces from the account identifier.
    ///
    /// `;` and `=` are rejected: they delimit the parameter list the online
    /// check is driven by.
    pub fn new(account_id: &str, amount: Decimal) -> Result<Self> {
        let account_id = strip_spaces(account_id);
        if account_id.is_empty() {
            return Err(GatewayError::Validation(
                "Account identifier is empty".to_string(),
            ));
        }
        if account_id.contains([';', '=']) {
            return Err(GatewayError::Validation(format!(
                "Account identifier must not contain ';' or '=': {}",
                account_id
            )));
        }
        Ok(Self {
            account_id,
            amount: Amount::new(amount)?,
        })
    }
}

pub(crate) fn strip_spaces(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Coarse classification of a submitted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentOutcome {
    Completed,
    NotProcessed,
    Unknown,
}

impl PaymentOutcome {
    /// Direct switch over the payment status. Kept apart from the error-code
    /// table: an unexpected status after money may have moved stays `Unknown`.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Self::Completed,
            404 | 500 => Self::NotProcessed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Completed => "Completed",
            Self::NotProcessed => "NotProcessed",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentState {
    #[default]
    Initialized,
    Checked,
    Submitted,
    Completed,
    NotProcessed,
    Unknown,
}

impl PaymentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::NotProcessed | Self::Unknown)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Initialized => "Initialized",
            Self::Checked => "Checked",
            Self::Submitted => "Submitted",
            Self::Completed => "Completed",
            Self::NotProcessed => "NotProcessed",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<PaymentOutcome> for PaymentState {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Completed => Self::Completed,
            PaymentOutcome::NotProcessed => Self::NotProcessed,
            PaymentOutcome::Unknown => Self::Unknown,
        }
    }
}

/// One payment moving through `Initialized -> Checked -> Submitted -> terminal`.
///
/// There is no retry edge; once terminal, every transition is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    request: PaymentRequest,
    state: PaymentState,
}

impl PaymentAttempt {
    pub fn new(request: PaymentRequest) -> Self {
        Self {
            request,
            state: PaymentState::Initialized,
        }
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn state(&self) -> PaymentState {
        self.state
    }

    /// The terminal outcome, once one has been applied.
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self.state {
            PaymentState::Completed => Some(PaymentOutcome::Completed),
            PaymentState::NotProcessed => Some(PaymentOutcome::NotProcessed),
            PaymentState::Unknown => Some(PaymentOutcome::Unknown),
            _ => None,
        }
    }

    /// Records the online check result. Only a successful check advances the attempt.
    pub fn mark_checked(&mut self, code: ErrorCode) -> Result<bool> {
        self.expect(PaymentState::Initialized, "record an online check")?;
        if code.is_success() {
            self.state = PaymentState::Checked;
        }
        Ok(code.is_success())
    }

    pub fn mark_submitted(&mut self) -> Result<()> {
        self.expect(PaymentState::Checked, "submit")?;
        self.state = PaymentState::Submitted;
        Ok(())
    }

    pub fn complete(&mut self, outcome: PaymentOutcome) -> Result<()> {
        self.expect(PaymentState::Submitted, "apply an outcome")?;
        self.state = outcome.into();
        Ok(())
    }

    fn expect(&self, state: PaymentState, action: &'static str) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(GatewayError::InvalidState {
                from: self.state.name(),
                action,
            })
        }
    }
}
