//! # Staleness Detector
//!
//! Flags unassigned jobs that have waited past the configured age
//! threshold. A stale backlog with no encoders online is the strongest
//! overload signal the workload classifier reacts to.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Job, JobStatus};

/// Return the unassigned jobs older than `threshold` relative to `now`.
///
/// Jobs in any other status are ignored regardless of age; an old
/// running job is slow, not stale.
pub fn stale_jobs<'a>(
    jobs: &'a [Job],
    threshold: Duration,
    now: DateTime<Utc>,
) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| job.status == JobStatus::Unassigned && job.age(now) > threshold)
        .collect()
}

/// Check whether any unassigned job has waited past the threshold.
pub fn any_stale(jobs: &[Job], threshold: Duration, now: DateTime<Utc>) -> bool {
    jobs.iter()
        .any(|job| job.status == JobStatus::Unassigned && job.age(now) > threshold)
}
