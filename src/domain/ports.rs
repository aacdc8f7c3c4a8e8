use super::provider::{ProviderRequest, ProviderResponse};
use crate::error::Result;
use async_trait::async_trait;

/// Performs one round trip to the provider.
///
/// Implementations return `Ok` for every answer the provider gave, whatever the
/// status code; `Err` is reserved for calls that produced no response at all.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse>;
}

pub type HttpSenderBox = Box<dyn HttpSender>;
