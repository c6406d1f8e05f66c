//! # System Constants
//!
//! Core thresholds and markers that define the operational boundaries of
//! the fleet dashboard classifier. Every tunable here has a matching
//! override in [`crate::config::MonitorConfig`]; these are the defaults
//! the rest of the system falls back to.

/// Workload ratio at or above which the fleet is considered overloaded.
pub const RED_ZONE_RATIO: f64 = 5.0;

/// Workload ratio at or above which the fleet is considered under pressure.
pub const YELLOW_ZONE_RATIO: f64 = 3.0;

/// Reserved ratio value signaling an encoder-starved backlog.
///
/// Reported instead of a numeric ratio when stale unassigned jobs exist
/// and no encoders are active. Must never be compared against the zone
/// thresholds above; the override that produces it already decided the
/// zone.
pub const CRITICAL_RATIO_SENTINEL: f64 = f64::INFINITY;

/// Minutes an unassigned job may wait before it counts as stale.
pub const DEFAULT_STALE_AFTER_MINUTES: i64 = 20;

/// Substring in a completed job's result message that marks the forced
/// (degraded) completion path on the gateway.
pub const FORCED_COMPLETION_MARKER: &str = "Force processed";

/// Seconds the gateway probe may take before it is treated as offline.
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: u64 = 10;

/// Minutes a severe zone may persist before the dispatcher re-notifies.
/// Zero disables re-notification; an unchanged zone then never repeats.
pub const DEFAULT_RENOTIFY_AFTER_MINUTES: i64 = 0;

/// How many recent jobs the dashboard snapshot enriches for display.
pub const DEFAULT_RECENT_JOBS_LIMIT: u32 = 10;
