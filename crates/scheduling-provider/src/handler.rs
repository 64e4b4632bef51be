//! Per-request orchestration
//!
//! A request moves through `Decoding → LookingUp → Resolving → Done`; the
//! first error moves it to `Failed` and nothing computed so far is returned.
//! Keys are recognized before the lookup so a batch with an unknown key never
//! reaches the scheduling service.

use crate::decoder::{self, BatchRequest};
use crate::error::{Error, Result};
use crate::lookup::SchedulingSource;
use crate::resolver;
use axum::body::Body;
use http::Method;
use scheduling_provider_protocol::Item;
use std::sync::Arc;
use tracing::{error, warn};

/// Stage a request is in when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and parsing the inbound request
    Decoding,
    /// Fetching the scheduling decision
    LookingUp,
    /// Mapping keys to values
    Resolving,
}

/// Resolves batch lookups against a scheduling source.
#[derive(Clone)]
pub struct BatchHandler {
    source: Arc<dyn SchedulingSource>,
}

impl BatchHandler {
    /// Create a handler fetching from the given source.
    pub fn new(source: Arc<dyn SchedulingSource>) -> Self {
        Self { source }
    }

    /// Decode and resolve one inbound request.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage; see [`Error`].
    pub async fn handle(
        &self,
        method: &Method,
        body: Body,
        max_body_bytes: usize,
    ) -> Result<Vec<Item>> {
        let batch = decoder::decode(method, body, max_body_bytes)
            .await
            .inspect_err(|e| log_failure(Stage::Decoding, e))?;

        self.resolve_batch(&batch).await
    }

    /// Resolve an already decoded batch.
    ///
    /// The scheduling source is called exactly once for a non-empty batch
    /// and not at all for an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] for the first unrecognized key, or the
    /// lookup error if the scheduling source fails.
    pub async fn resolve_batch(&self, batch: &BatchRequest) -> Result<Vec<Item>> {
        let resolutions =
            resolver::recognize_all(batch.keys()).inspect_err(|e| log_failure(Stage::Resolving, e))?;

        if resolutions.is_empty() {
            return Ok(Vec::new());
        }

        let attributes = self
            .source
            .fetch()
            .await
            .inspect_err(|e| log_failure(Stage::LookingUp, e))?;

        Ok(resolutions
            .iter()
            .map(|resolution| resolution.apply(&attributes))
            .collect())
    }
}

fn log_failure(stage: Stage, err: &Error) {
    if err.is_upstream() {
        error!(?stage, error = %err, "request failed");
    } else {
        warn!(?stage, error = %err, "request rejected");
    }
}
