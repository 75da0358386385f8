//! Orchestration entry points, one per tool.
//!
//! [`LookupEngine`] owns the configured adapters and a shared transport.
//! Each entry point runs validation, exactly one provider call and failure
//! classification, and always resolves to a [`LookupResult`]. Calls share no
//! mutable state, so any number may run concurrently.

use crate::classifier::classify;
use crate::error::Result;
use crate::pipeline;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use sleuth_core::{
    AppConfig, CallerIdOutcome, Credentials, FaceSearchOutcome, GeoFix, LookupError,
    LookupResult, PersonSearchOutcome, ToolKind, ValidationError, VisualMatchOutcome,
};
use sleuth_providers::{
    CallerIdAdapter, FaceCheckAdapter, GeoBackend, HttpTransport, PeopleDataLabsAdapter,
    ProviderAdapter, ReqwestTransport, VisualMatchAdapter,
};
use sleuth_validate::{
    validate_caller_id, validate_cell_lookup, validate_face_search, validate_person_search,
    validate_visual_match, RawCallerId, RawCellLookup, RawFaceSearch, RawPersonSearch,
    RawVisualMatch, ValidationContext,
};
use std::fmt;
use std::sync::Arc;

/// Runs lookups for every tool.
pub struct LookupEngine {
    config: AppConfig,
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
    context: ValidationContext,
    people: PeopleDataLabsAdapter,
    faces: FaceCheckAdapter,
    caller_id: CallerIdAdapter,
    visual: VisualMatchAdapter,
    geo: GeoBackend,
}

impl LookupEngine {
    /// Create an engine over an explicit transport.
    #[must_use]
    pub fn new(
        config: AppConfig,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoints = &config.providers;
        Self {
            context: ValidationContext::from_config(&config),
            people: PeopleDataLabsAdapter::new(&endpoints.people_data_labs_url),
            faces: FaceCheckAdapter::new(&endpoints.facecheck_url),
            caller_id: CallerIdAdapter::new(&endpoints.caller_id_host),
            visual: VisualMatchAdapter::new(&endpoints.visual_match_host),
            geo: GeoBackend::from_config(config.cell.backend, endpoints),
            config,
            credentials,
            transport,
        }
    }

    /// Create an engine using the reqwest transport.
    pub fn from_config(config: AppConfig, credentials: Credentials) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.http)?;
        tracing::info!(
            timeout_secs = config.http.timeout_secs,
            cell_backend = ?config.cell.backend,
            "Lookup engine ready"
        );
        Ok(Self::new(config, credentials, Arc::new(transport)))
    }

    /// Load configuration and credentials from the environment and build an engine.
    pub fn from_env() -> Result<Self> {
        let config = AppConfig::load_with_env()?;
        Self::from_config(config, Credentials::from_env())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Person search by name and city.
    pub async fn person_search(&self, raw: RawPersonSearch) -> LookupResult<PersonSearchOutcome> {
        self.lookup(ToolKind::PersonSearch, &self.people, Ok(raw), validate_person_search)
            .await
    }

    /// Face search by uploaded image or image URL.
    pub async fn face_search(&self, raw: RawFaceSearch) -> LookupResult<FaceSearchOutcome> {
        self.lookup(ToolKind::FaceSearch, &self.faces, Ok(raw), |raw: &RawFaceSearch| {
            validate_face_search(raw, &self.context)
        })
        .await
    }

    /// Caller-ID lookup for a phone number.
    pub async fn caller_id(&self, raw: RawCallerId) -> LookupResult<CallerIdOutcome> {
        self.lookup(ToolKind::CallerId, &self.caller_id, Ok(raw), validate_caller_id)
            .await
    }

    /// Visual match by image URL.
    pub async fn visual_match(&self, raw: RawVisualMatch) -> LookupResult<VisualMatchOutcome> {
        self.lookup(ToolKind::VisualMatch, &self.visual, Ok(raw), validate_visual_match)
            .await
    }

    /// Cell-tower geolocation.
    pub async fn cell_lookup(&self, raw: RawCellLookup) -> LookupResult<GeoFix> {
        self.lookup(ToolKind::CellLookup, &self.geo, Ok(raw), |raw: &RawCellLookup| {
            validate_cell_lookup(raw, &self.context)
        })
        .await
    }

    /// Run `tool` on untyped JSON input and return the serialized result.
    ///
    /// Input that does not deserialize into the tool's raw shape is reported
    /// as a validation failure, after the credential check.
    pub async fn dispatch(&self, tool: ToolKind, input: Value) -> Value {
        match tool {
            ToolKind::PersonSearch => {
                self.dispatch_with(tool, &self.people, input, validate_person_search)
                    .await
            }
            ToolKind::FaceSearch => {
                self.dispatch_with(tool, &self.faces, input, |raw: &RawFaceSearch| {
                    validate_face_search(raw, &self.context)
                })
                .await
            }
            ToolKind::CallerId => {
                self.dispatch_with(tool, &self.caller_id, input, validate_caller_id)
                    .await
            }
            ToolKind::VisualMatch => {
                self.dispatch_with(tool, &self.visual, input, validate_visual_match)
                    .await
            }
            ToolKind::CellLookup => {
                self.dispatch_with(tool, &self.geo, input, |raw: &RawCellLookup| {
                    validate_cell_lookup(raw, &self.context)
                })
                .await
            }
        }
    }

    async fn dispatch_with<A, R, F>(
        &self,
        tool: ToolKind,
        adapter: &A,
        input: Value,
        validate: F,
    ) -> Value
    where
        A: ProviderAdapter,
        A::Output: Serialize,
        R: DeserializeOwned,
        F: FnOnce(&R) -> std::result::Result<A::Query, ValidationError>,
    {
        let result = self
            .lookup(tool, adapter, parse_input::<R>(input), validate)
            .await;
        to_value(tool, &result)
    }

    /// Shared path for every tool. `raw` is the already-decoded input, or the
    /// validation failure from decoding it; either way the credential check
    /// runs first.
    async fn lookup<A, R, F>(
        &self,
        tool: ToolKind,
        adapter: &A,
        raw: std::result::Result<R, ValidationError>,
        validate: F,
    ) -> LookupResult<A::Output>
    where
        A: ProviderAdapter,
        F: FnOnce(&R) -> std::result::Result<A::Query, ValidationError>,
    {
        pipeline::run(
            tool,
            adapter,
            self.transport.as_ref(),
            &self.credentials,
            || validate(&raw?),
        )
        .await
    }
}

impl fmt::Debug for LookupEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupEngine")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("geo", &self.geo)
            .finish_non_exhaustive()
    }
}

fn parse_input<T: DeserializeOwned>(input: Value) -> std::result::Result<T, ValidationError> {
    serde_json::from_value(input)
        .map_err(|e| ValidationError::single(format!("Input has the wrong shape: {e}")))
}

fn to_value<T: Serialize>(tool: ToolKind, result: &LookupResult<T>) -> Value {
    match serde_json::to_value(result) {
        Ok(value) => value,
        Err(e) => {
            let failure = classify(
                tool,
                &LookupError::Unexpected(format!("failed to serialize result: {e}")),
            );
            json!({
                "success": false,
                "category": failure.category.as_str(),
                "error": failure.error,
                "message": failure.message,
            })
        }
    }
}
