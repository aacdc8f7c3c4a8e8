use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The provider could not be reached at all; no status or body exists.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Parse error ({context}): {source}")]
    Parse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid payment state: cannot {action} from {from}")]
    InvalidState {
        from: &'static str,
        action: &'static str,
    },
    #[error("Emulator error: {0}")]
    Emulator(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn parse(context: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { context, source }
    }

    /// True when no response was obtained from the provider.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
