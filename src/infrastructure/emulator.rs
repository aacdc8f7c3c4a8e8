use crate::domain::ports::HttpSender;
use crate::domain::provider::{ProviderRequest, ProviderResponse};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Folder under the emulator root holding this gateway's canned responses.
pub const RESPONSE_FOLDER: &str = "TJLeasingGateway";

/// Offline stand-in for the provider.
///
/// Each request is answered from a file under `<root>/TJLeasingGateway/`,
/// named after the last URL path segment (`GetToken.txt`, `Payment.txt`, ...).
/// `GetClient` first tries `GetClient_<id>.txt`. The first line of a file is
/// the HTTP status, the rest is the body.
#[derive(Clone, Debug)]
pub struct EmulatorSender {
    root: PathBuf,
}

impl EmulatorSender {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Candidate files for a request, most specific first.
    pub fn response_file_paths(&self, request: &ProviderRequest) -> Result<Vec<PathBuf>> {
        let url = Url::parse(&request.url)
            .map_err(|e| GatewayError::Emulator(format!("Invalid URL {}: {}", request.url, e)))?;
        let operation = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| GatewayError::Emulator(format!("No operation in {}", request.url)))?;

        let folder = self.root.join(RESPONSE_FOLDER);
        let mut paths = Vec::with_capacity(2);
        if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "id") {
            paths.push(folder.join(format!("{}_{}.txt", operation, id)));
        }
        paths.push(folder.join(format!("{}.txt", operation)));
        Ok(paths)
    }
}

/// Splits a canned file into status line and body.
pub fn parse_response_file(contents: &str, path: &Path) -> Result<ProviderResponse> {
    let (status_line, body) = contents.split_once('\n').unwrap_or((contents, ""));
    let status = status_line.trim().parse::<u16>().map_err(|_| {
        GatewayError::Emulator(format!(
            "{}: first line must be an HTTP status, got {:?}",
            path.display(),
            status_line.trim()
        ))
    })?;
    Ok(ProviderResponse::new(status, body))
}

#[async_trait]
impl HttpSender for EmulatorSender {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        for path in self.response_file_paths(&request)? {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    debug!(path = %path.display(), "Emulated response");
                    return parse_response_file(&contents, &path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(GatewayError::Emulator(format!(
            "No canned response for {} {}",
            request.method, request.url
        )))
    }
}
