use std::fmt;

/// Platform error code reported for pre-payment operations such as the online check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Provider answered 200.
    Success,
    /// Provider answered 404; the account does not exist.
    AccountNotFound,
    /// Provider answered 500.
    ProviderFailure,
    /// Any status without an explicit mapping.
    PaymentSystemError,
}

impl ErrorCode {
    /// Numeric code understood by the payment platform.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::AccountNotFound => 711,
            Self::ProviderFailure => 30,
            Self::PaymentSystemError => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "Success",
            Self::AccountNotFound => "AccountNotFound",
            Self::ProviderFailure => "ProviderFailure",
            Self::PaymentSystemError => "PaymentSystemError",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// Fixed status table; the default arm keeps the mapping total.
const STATUS_TABLE: [(u16, ErrorCode); 3] = [
    (200, ErrorCode::Success),
    (404, ErrorCode::AccountNotFound),
    (500, ErrorCode::ProviderFailure),
];

/// Translates a provider HTTP status into a platform error code.
pub fn map_provider_status(status: u16) -> ErrorCode {
    STATUS_TABLE
        .iter()
        .find(|(mapped, _)| *mapped == status)
        .map(|(_, code)| *code)
        .unwrap_or(ErrorCode::PaymentSystemError)
}
