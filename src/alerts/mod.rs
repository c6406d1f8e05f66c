//! # Alerting
//!
//! Turns classified workload zones into de-duplicated notifications.
//! The dispatcher owns the only piece of shared mutable state in the
//! core (the last zone communicated to the alert channel) and hands
//! delivery to an external [`NotificationChannel`] implementation.

pub mod dispatcher;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{WorkloadSnapshot, Zone};

pub use dispatcher::{AlertDecision, AlertDispatcher};

/// Errors the external notification channel may raise
///
/// Delivery failure is logged and tolerated; the dashboard read path
/// never observes it.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    #[error("Channel rejected payload: {message}")]
    Rejected { message: String },
}

/// External notification channel (e.g. a Discord webhook client)
///
/// Formatting, rate limiting, and retry policy live entirely behind
/// this trait; the core supplies only the current zone and the raw
/// workload facts.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver a zone notification with the workload facts behind it
    async fn notify(&self, zone: Zone, facts: &WorkloadSnapshot) -> Result<(), NotifyError>;

    /// Check whether the channel is currently deliverable
    async fn test(&self) -> bool;
}
