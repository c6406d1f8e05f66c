//! # Fleet Data Model
//!
//! Immutable snapshot types flowing through the classifier: job records
//! read from the job store, probe results from the gateway, and the
//! derived workload/health classifications assembled into the dashboard
//! snapshot. Nothing here is persisted by this crate; every value is
//! recomputed per classification cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::constants::CRITICAL_RATIO_SENTINEL;

/// Lifecycle status of an encoding job as reported by the job store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Unassigned,
    Assigned,
    Running,
    Completed,
    Failed,
}

/// Point-in-time snapshot of an encoding job
///
/// The classifier only reads these; ownership of the record stays with
/// the job store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    /// Encoder identifier this job is assigned to, if any
    pub assigned_to: Option<String>,
    pub size_bytes: u64,
    /// Free-text completion message from the gateway, if the job finished
    pub result_message: Option<String>,
}

impl Job {
    /// Age of the job relative to the given reference time
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}

/// Result of a single gateway liveness probe
///
/// Produced fresh on each classification cycle; never cached by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayProbeResult {
    pub is_online: bool,
    pub response_time_ms: u64,
    pub last_check: DateTime<Utc>,
    pub error: Option<String>,
}

impl GatewayProbeResult {
    /// Probe result representing an unreachable gateway
    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            is_online: false,
            response_time_ms: 0,
            last_check: Utc::now(),
            error: Some(error.into()),
        }
    }
}

/// Workload severity zone, ordered green < yellow < red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Green,
    Yellow,
    Red,
}

impl Zone {
    /// Check if the zone warrants operator attention
    pub fn is_severe(&self) -> bool {
        matches!(self, Zone::Yellow | Zone::Red)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Green => "green",
            Zone::Yellow => "yellow",
            Zone::Red => "red",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state gateway health verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayHealth {
    /// Gateway answers probes and recent completions look normal
    Healthy,
    /// Gateway answers probes but the most recent completion took the
    /// forced/degraded path
    Faulty,
    /// Gateway does not answer liveness probes
    Dead,
}

impl GatewayHealth {
    /// Check if the health state indicates the gateway needs attention
    pub fn needs_attention(&self) -> bool {
        matches!(self, GatewayHealth::Faulty | GatewayHealth::Dead)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayHealth::Healthy => "healthy",
            GatewayHealth::Faulty => "faulty",
            GatewayHealth::Dead => "dead",
        }
    }
}

impl std::fmt::Display for GatewayHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived workload classification for one cycle
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadSnapshot {
    /// Jobs per active encoder; [`CRITICAL_RATIO_SENTINEL`] when the
    /// encoder-starved override fired
    #[serde(serialize_with = "serialize_ratio")]
    pub ratio: f64,
    pub zone: Zone,
    pub active_jobs: u64,
    pub active_encoders: u64,
    pub stale_jobs_detected: bool,
}

impl WorkloadSnapshot {
    /// True when the ratio is the encoder-starved sentinel rather than a
    /// meaningful number
    pub fn is_critical_backlog(&self) -> bool {
        self.ratio == CRITICAL_RATIO_SENTINEL
    }
}

/// Serialize the workload ratio, mapping the non-finite sentinel to the
/// string `"critical"` so JSON consumers never see `null`.
fn serialize_ratio<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if ratio.is_finite() {
        serializer.serialize_f64(*ratio)
    } else {
        serializer.serialize_str("critical")
    }
}

/// Display metadata for an encoder, resolved through the identity lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderInfo {
    pub name: String,
    pub account: Option<String>,
}

/// Job record enriched for dashboard display
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedJob {
    pub id: Uuid,
    pub status: JobStatus,
    /// Display name of the assigned encoder, "Unknown" when unresolvable
    pub owner: String,
    /// Relative age, e.g. "5 minutes ago"
    pub age: String,
    /// Human-readable size, e.g. "1.2 GB"
    pub size: String,
}

/// Which collaborator fetch groups completed successfully this cycle
///
/// A failed group was degraded to its safe default rather than aborting
/// the cycle; the dashboard surfaces the flag so operators can tell a
/// quiet fleet from a blind one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub pending_jobs_ok: bool,
    pub in_progress_jobs_ok: bool,
    pub completed_today_ok: bool,
    pub recent_jobs_ok: bool,
    pub encoder_count_ok: bool,
    pub last_completed_ok: bool,
    pub gateway_probe_ok: bool,
}

impl FetchReport {
    pub fn all_ok(&self) -> bool {
        self.pending_jobs_ok
            && self.in_progress_jobs_ok
            && self.completed_today_ok
            && self.recent_jobs_ok
            && self.encoder_count_ok
            && self.last_completed_ok
            && self.gateway_probe_ok
    }
}

/// Everything the presentation layer needs for one dashboard render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub available_jobs: u64,
    pub in_progress_jobs: u64,
    pub completed_today: u64,
    pub active_encoders: u64,
    pub recent_jobs: Vec<EnrichedJob>,
    pub workload: WorkloadSnapshot,
    pub gateway_health: GatewayHealth,
    pub fetch_report: FetchReport,
}
