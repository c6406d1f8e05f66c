#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Fleetboard Core
//!
//! Rust core of the operations dashboard for a distributed
//! video-encoding fleet. It collects job, encoder, and gateway signals
//! from backing stores and reduces them to discrete, actionable states:
//! a workload zone (`green`/`yellow`/`red`), a gateway health verdict
//! (`healthy`/`faulty`/`dead`), and de-duplicated alert notifications.
//!
//! ## Architecture
//!
//! The decision logic lives here; persistence, HTTP transport, and
//! webhook delivery are external collaborators behind narrow traits:
//!
//! - [`signals`] - collaborator contracts and the concurrent signal
//!   collector with per-fetch degradation
//! - [`classify`] - pure staleness, workload, and gateway classifiers
//! - [`alerts`] - the alert dispatcher and notification channel seam
//! - [`monitor`] - the injected service running full classification
//!   passes, per request or on a polling loop
//! - [`models`] - immutable snapshot types flowing between them
//! - [`config`] - monitor tunables with YAML/env layering
//! - [`utils`] - relative-age and byte-size rendering for display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fleetboard_core::config::MonitorConfig;
//! use fleetboard_core::monitor::MonitorService;
//! # use fleetboard_core::signals::{JobStore, EncoderStore, GatewayProber};
//! # use fleetboard_core::alerts::NotificationChannel;
//!
//! # async fn example(
//! #     job_store: Arc<dyn JobStore>,
//! #     encoder_store: Arc<dyn EncoderStore>,
//! #     prober: Arc<dyn GatewayProber>,
//! #     channel: Arc<dyn NotificationChannel>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let service = MonitorService::new(
//!     job_store,
//!     encoder_store,
//!     prober,
//!     channel,
//!     MonitorConfig::default(),
//! )?;
//!
//! let snapshot = service.classification_pass().await;
//! println!(
//!     "zone={} gateway={}",
//!     snapshot.workload.zone, snapshot.gateway_health
//! );
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod signals;
pub mod utils;

pub use alerts::{AlertDecision, AlertDispatcher, NotificationChannel, NotifyError};
pub use config::MonitorConfig;
pub use error::{FleetboardError, Result};
pub use models::{
    DashboardSnapshot, EncoderInfo, EnrichedJob, FetchReport, GatewayHealth, GatewayProbeResult,
    Job, JobStatus, WorkloadSnapshot, Zone,
};
pub use monitor::MonitorService;
pub use signals::{
    CollectedSignals, EncoderStore, GatewayProber, JobStore, SignalCollector, SignalError,
};
