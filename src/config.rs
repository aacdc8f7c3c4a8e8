use crate::application::gateway::LeasingGateway;
use crate::domain::credentials::Credentials;
use crate::domain::ports::HttpSenderBox;
use crate::error::{GatewayError, Result};
use crate::infrastructure::emulator::EmulatorSender;
use crate::infrastructure::http::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, ReqwestSender};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Everything needed to stand up a gateway instance.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Account used by the settings check.
    pub test_account: String,
    /// When set, canned responses are read from this folder instead of the network.
    pub emulator_root: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl GatewaySettings {
    pub fn new(url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            password: password.into(),
            test_account: String::new(),
            emulator_root: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(GatewayError::Config("Provider URL is required".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "Provider URL must use http or https: {}",
                url
            )));
        }
        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(GatewayError::Config(
                "Timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.url.trim(), &self.user, &self.password)
    }

    /// Picks the emulator or the real HTTP sender.
    pub fn sender(&self) -> Result<HttpSenderBox> {
        match &self.emulator_root {
            Some(root) => {
                warn!(root = %root.display(), "!!! EMULATION MODE ENABLED, no real provider calls !!!");
                Ok(Box::new(EmulatorSender::new(root.clone())))
            }
            None => Ok(Box::new(ReqwestSender::new(
                self.connect_timeout,
                self.request_timeout,
            )?)),
        }
    }

    /// Validates the settings and initializes an authenticated gateway.
    pub async fn connect(&self) -> Result<LeasingGateway> {
        self.validate()?;
        let gateway = LeasingGateway::initialize(self.sender()?, self.credentials()).await?;
        Ok(gateway.with_test_account(self.test_account.clone()))
    }
}
