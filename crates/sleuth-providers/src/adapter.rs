//! The provider adapter trait.

use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use sleuth_core::{ApiKey, CredentialSlot, LookupError, Result};

/// One external lookup capability.
///
/// New providers are added by implementing this trait; the orchestration
/// layer never branches on provider identity. Splitting request building
/// from response parsing keeps both halves testable without a network.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Validated query this adapter accepts.
    type Query: Send + Sync;
    /// Normalized payload this adapter produces.
    type Output: Send;

    /// Stable identifier used in logs and diagnostics.
    fn provider_id(&self) -> &'static str;

    /// Which credential this provider needs.
    fn credential_slot(&self) -> CredentialSlot;

    /// Build the single outbound request for `query`.
    fn build_request(&self, query: &Self::Query, key: &ApiKey) -> Result<HttpRequest>;

    /// Map the provider's raw response into the normalized payload.
    fn parse_response(&self, query: &Self::Query, response: &HttpResponse) -> Result<Self::Output>;

    /// Build, send and parse exactly once. No retry.
    async fn execute(
        &self,
        transport: &dyn HttpTransport,
        query: &Self::Query,
        key: &ApiKey,
    ) -> Result<Self::Output> {
        let request = self.build_request(query, key)?;
        let response = transport
            .send(request)
            .await
            .map_err(|e| LookupError::Transport {
                provider: self.provider_id(),
                detail: e.to_string(),
            })?;

        tracing::debug!(
            provider = self.provider_id(),
            status = response.status,
            "Parsing provider response"
        );

        self.parse_response(query, &response)
    }
}
