use crate::application::transport::{AuthKind, Transport};
use crate::domain::provider::{TOKEN_PATH, TokenResponse};
use crate::domain::session::Session;
use crate::error::Result;
use tracing::{info, instrument, warn};

/// Exchanges the basic-auth credentials for a bearer token.
///
/// Authentication is fail-soft: a rejected or unparseable token answer leaves
/// the transport with an unauthenticated session and later calls are refused
/// by the provider itself. Only a missing response is an error.
pub struct SessionManager<'a> {
    transport: &'a Transport,
}

impl<'a> SessionManager<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<Session> {
        let url = self.transport.credentials().endpoint(TOKEN_PATH);
        let response = self.transport.get(&url, AuthKind::Basic).await?;

        let session = if response.is_ok() {
            match TokenResponse::parse(&response.body) {
                Ok(token) => {
                    info!(status = response.status, "GetToken succeeded");
                    Session::authenticated(&token.access_token)
                }
                Err(e) => {
                    warn!(error = %e, "GetToken answered 200 without a usable token");
                    Session::unauthenticated()
                }
            }
        } else {
            warn!(status = response.status, "GetToken rejected");
            Session::unauthenticated()
        };

        self.transport.install_session(session.clone()).await;
        Ok(session)
    }
}
