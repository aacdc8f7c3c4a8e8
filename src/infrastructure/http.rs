use crate::domain::ports::HttpSender;
use crate::domain::provider::{Authorization, HttpMethod, ProviderRequest, ProviderResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends provider calls over the network with reqwest.
///
/// Every status code is returned as a response; an error means no status line
/// was received (DNS, connect, timeout, TLS). Once the status is known, a body
/// that breaks off midway still yields a response with whatever arrived.
#[derive(Clone, Debug)]
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    /// Builds a client with finite connect and request timeouts.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        builder = match &request.authorization {
            Authorization::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Authorization::Bearer(value) => builder.header(AUTHORIZATION, value),
        };

        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let mut response = builder.send().await?;
        let status = response.status().as_u16();

        let mut bytes: Vec<u8> = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    warn!(status, received = bytes.len(), error = %e, "Provider body cut short");
                    break;
                }
            }
        }
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(ProviderResponse { status, body })
    }
}
