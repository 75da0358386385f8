//! The validate, call and classify sequence shared by every tool.

use crate::classifier::classify;
use futures::FutureExt;
use sleuth_core::{
    Credentials, Failure, LookupError, LookupResult, ToolKind, ValidationError,
};
use sleuth_providers::{HttpTransport, ProviderAdapter};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

const REDACTED: &str = "[redacted]";

/// Run one lookup end to end. Never panics and never returns an error.
///
/// Order: credential check, input validation, exactly one provider call.
/// The first failure short-circuits the rest, so a missing key is reported
/// even when the input is also invalid, and no request is sent for either.
pub(crate) async fn run<A, V>(
    tool: ToolKind,
    adapter: &A,
    transport: &dyn HttpTransport,
    credentials: &Credentials,
    validate: V,
) -> LookupResult<A::Output>
where
    A: ProviderAdapter,
    V: FnOnce() -> Result<A::Query, ValidationError>,
{
    let request_id = Uuid::new_v4();
    let provider = adapter.provider_id();
    let span = tracing::info_span!("lookup", %tool, provider, %request_id);

    async move {
        let started = Instant::now();
        tracing::info!("Lookup started");

        let attempt = async {
            let key = credentials
                .resolve(adapter.credential_slot())
                .map_err(|reason| LookupError::Configuration { provider, reason })?;
            let query = validate()?;
            adapter.execute(transport, &query, &key).await
        };

        let outcome = match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => Err(LookupError::Unexpected(format!(
                "{provider} adapter panicked: {}",
                panic_message(payload.as_ref())
            ))),
        };

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(output) => {
                tracing::info!(elapsed_ms, "Lookup succeeded");
                LookupResult::Success(output)
            }
            Err(error) => {
                let mut failure = classify(tool, &error);
                if let Some(secret) = credentials.raw(adapter.credential_slot()) {
                    redact(&mut failure, secret);
                }
                tracing::warn!(
                    elapsed_ms,
                    category = %failure.category,
                    error = %failure.error,
                    "Lookup failed"
                );
                LookupResult::Failure(failure)
            }
        }
    }
    .instrument(span)
    .await
}

/// Replace every occurrence of `secret` in the failure text.
pub(crate) fn redact(failure: &mut Failure, secret: &str) {
    let secret = secret.trim();
    if secret.is_empty() {
        return;
    }
    if failure.error.contains(secret) {
        failure.error = failure.error.replace(secret, REDACTED);
    }
    if failure.message.contains(secret) {
        failure.message = failure.message.replace(secret, REDACTED);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
