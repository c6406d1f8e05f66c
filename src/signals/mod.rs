//! # Signal Collection
//!
//! Collaborator contracts for the backing stores plus the collector that
//! gathers every raw fact a classification cycle needs. The collector
//! performs no judgment of its own: it fetches, degrades failures to
//! safe defaults, and hands the facts to the classifiers.

pub mod collector;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EncoderInfo, GatewayProbeResult, Job};

pub use collector::{CollectedSignals, SignalCollector};

/// Errors a backing-store collaborator may raise
///
/// Every variant is transient from the core's point of view; the
/// collector degrades it to a safe default and records the failure in
/// the cycle's fetch report.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Query failed: {operation}: {message}")]
    QueryFailed { operation: String, message: String },

    #[error("Fetch timed out: operation {operation} exceeded {timeout_seconds}s")]
    Timeout {
        operation: String,
        timeout_seconds: u64,
    },
}

/// Read-only job queries against the job store
///
/// Each query documents its own ordering; no ordering is guaranteed
/// across separate queries.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Unassigned jobs waiting for an encoder, oldest first
    async fn fetch_pending_jobs(&self) -> Result<Vec<Job>, SignalError>;

    /// Jobs currently assigned or running
    async fn fetch_in_progress_jobs(&self) -> Result<Vec<Job>, SignalError>;

    /// Jobs completed since local midnight
    async fn fetch_completed_today(&self) -> Result<Vec<Job>, SignalError>;

    /// Most recently created jobs in any status, newest first
    async fn fetch_recent_jobs(&self, limit: u32) -> Result<Vec<Job>, SignalError>;

    /// Most recently completed jobs, newest first
    async fn fetch_last_completed_jobs(&self, limit: u32) -> Result<Vec<Job>, SignalError>;
}

/// Read-only encoder queries and identity lookup
#[async_trait]
pub trait EncoderStore: Send + Sync {
    /// Number of currently active encoders
    async fn fetch_active_encoder_count(&self) -> Result<u64, SignalError>;

    /// Resolve encoder identifiers to display metadata.
    ///
    /// A pure lookup for presentation; never influences classification.
    /// Unknown identifiers are simply absent from the returned map.
    async fn resolve(
        &self,
        identifiers: &[String],
    ) -> Result<HashMap<String, EncoderInfo>, SignalError>;
}

/// Liveness probe against the job-dispatch gateway
///
/// Infallible by contract: internal failure is represented as an
/// offline probe result, never an error.
#[async_trait]
pub trait GatewayProber: Send + Sync {
    async fn probe_gateway(&self) -> GatewayProbeResult;
}
