//! # Gateway Health Classifier
//!
//! Combines the liveness probe with an inspection of the most recent
//! completed job. Reachability is a stronger signal than job-content
//! heuristics, so an offline probe short-circuits to `Dead` before any
//! message inspection.

use crate::constants::FORCED_COMPLETION_MARKER;
use crate::models::{GatewayHealth, GatewayProbeResult, Job};

/// Classify gateway health from the probe result and the most recently
/// completed job, if any.
pub fn classify_gateway(probe: &GatewayProbeResult, last_completed: Option<&Job>) -> GatewayHealth {
    if !probe.is_online {
        return GatewayHealth::Dead;
    }

    if let Some(job) = last_completed {
        if let Some(message) = &job.result_message {
            if message.contains(FORCED_COMPLETION_MARKER) {
                return GatewayHealth::Faulty;
            }
        }
    }

    GatewayHealth::Healthy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn completed_job(message: Option<&str>) -> Job {
        Job {
            id: Uuid::new_v4(),
            status: JobStatus::Completed,
            created_at: Utc::now(),
            assigned_to: Some("encoder-1".to_string()),
            size_bytes: 2_000_000_000,
            result_message: message.map(String::from),
        }
    }

    fn online_probe() -> GatewayProbeResult {
        GatewayProbeResult {
            is_online: true,
            response_time_ms: 42,
            last_check: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn test_offline_probe_is_dead_regardless_of_history() {
        let probe = GatewayProbeResult::offline("connection refused");
        let forced = completed_job(Some("Force processed after timeout"));

        assert_eq!(classify_gateway(&probe, Some(&forced)), GatewayHealth::Dead);
        assert_eq!(classify_gateway(&probe, None), GatewayHealth::Dead);
    }

    #[test]
    fn test_forced_completion_marks_faulty() {
        let job = completed_job(Some("Force processed after timeout"));
        assert_eq!(
            classify_gateway(&online_probe(), Some(&job)),
            GatewayHealth::Faulty
        );
    }

    #[test]
    fn test_normal_completion_is_healthy() {
        let job = completed_job(Some("Encoded 1080p in 312s"));
        assert_eq!(
            classify_gateway(&online_probe(), Some(&job)),
            GatewayHealth::Healthy
        );
    }

    #[test]
    fn test_no_completed_jobs_yet_is_healthy() {
        assert_eq!(classify_gateway(&online_probe(), None), GatewayHealth::Healthy);
    }

    #[test]
    fn test_missing_result_message_is_healthy() {
        let job = completed_job(None);
        assert_eq!(
            classify_gateway(&online_probe(), Some(&job)),
            GatewayHealth::Healthy
        );
    }

    #[test]
    fn test_marker_matches_as_substring() {
        let job = completed_job(Some("warning: Force processed, manual review advised"));
        assert_eq!(
            classify_gateway(&online_probe(), Some(&job)),
            GatewayHealth::Faulty
        );
    }
}
