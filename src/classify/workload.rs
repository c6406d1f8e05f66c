//! # Workload Classifier
//!
//! Reduces raw queue and fleet counts to a load ratio and a tri-state
//! zone. The encoder-starved override (stale backlog with zero encoders)
//! outranks the numeric thresholds and reports the sentinel ratio
//! instead of a number.

use crate::config::MonitorConfig;
use crate::constants::CRITICAL_RATIO_SENTINEL;
use crate::models::{WorkloadSnapshot, Zone};

/// Classify the current workload.
///
/// Evaluation order matters: the override rule is checked before the
/// numeric thresholds, and the sentinel ratio it produces is never
/// compared against them.
pub fn classify_workload(
    unassigned: u64,
    in_progress: u64,
    active_encoders: u64,
    any_stale: bool,
    config: &MonitorConfig,
) -> WorkloadSnapshot {
    let active_jobs = unassigned + in_progress;

    // Stale backlog with nothing to drain it: critical regardless of size
    if any_stale && active_encoders == 0 {
        return WorkloadSnapshot {
            ratio: CRITICAL_RATIO_SENTINEL,
            zone: Zone::Red,
            active_jobs,
            active_encoders,
            stale_jobs_detected: true,
        };
    }

    let ratio = if active_encoders > 0 {
        active_jobs as f64 / active_encoders as f64
    } else {
        0.0
    };

    let zone = if ratio >= config.red_zone_ratio {
        Zone::Red
    } else if ratio >= config.yellow_zone_ratio {
        Zone::Yellow
    } else {
        Zone::Green
    };

    WorkloadSnapshot {
        ratio,
        zone,
        active_jobs,
        active_encoders,
        stale_jobs_detected: any_stale,
    }
}
