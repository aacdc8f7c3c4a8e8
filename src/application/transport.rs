use crate::application::sanitizer::Sanitizer;
use crate::domain::credentials::Credentials;
use crate::domain::ports::HttpSenderBox;
use crate::domain::provider::{
    Authorization, HttpMethod, ProviderRequest, ProviderResponse,
};
use crate::domain::session::Session;
use crate::error::Result;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

/// Which `Authorization` header a call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    /// `username:password`, used by the token endpoint only.
    Basic,
    /// The session bearer token, used by every other endpoint.
    Bearer,
}

/// Builds authenticated provider calls and logs their traffic.
///
/// Owns the session. Reads happen on every bearer call; the only writer is
/// `SessionManager`, which replaces the whole value at once.
pub struct Transport {
    sender: HttpSenderBox,
    credentials: Credentials,
    session: RwLock<Session>,
}

impl Transport {
    pub fn new(sender: HttpSenderBox, credentials: Credentials) -> Self {
        Self {
            sender,
            credentials,
            session: RwLock::new(Session::unauthenticated()),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub(crate) async fn install_session(&self, session: Session) {
        *self.session.write().await = session;
    }

    pub async fn get(&self, url: &str, auth: AuthKind) -> Result<ProviderResponse> {
        self.execute(HttpMethod::Get, url, None, auth).await
    }

    pub async fn post(&self, url: &str, body: String, auth: AuthKind) -> Result<ProviderResponse> {
        self.execute(HttpMethod::Post, url, Some(body), auth).await
    }

    #[instrument(skip(self, body))]
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
        auth: AuthKind,
    ) -> Result<ProviderResponse> {
        let session = self.session().await;
        let sanitizer = Sanitizer::new()
            .with_secret(self.credentials.password())
            .with_secret(
                session
                    .authorization_value()
                    .trim_start_matches("Bearer ")
                    .trim(),
            );

        match &body {
            Some(body) => debug!(body = %sanitizer.request(body), "Provider request"),
            None => debug!("Provider request"),
        }

        let authorization = match auth {
            AuthKind::Basic => Authorization::Basic {
                username: self.credentials.username().to_string(),
                password: self.credentials.password().to_string(),
            },
            AuthKind::Bearer => Authorization::Bearer(session.authorization_value().to_string()),
        };

        let request = ProviderRequest {
            method,
            url: url.to_string(),
            authorization,
            body,
        };

        let response = self.sender.send(request).await.inspect_err(|e| {
            error!(error = %e, "Provider unreachable");
        })?;

        debug!(
            status = response.status,
            body = %sanitizer.response(&response.body),
            "Provider response"
        );
        Ok(response)
    }
}
