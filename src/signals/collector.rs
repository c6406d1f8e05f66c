//! # Signal Collector
//!
//! Issues every per-cycle fetch concurrently and waits for all of them
//! to settle. A single slow or failed collaborator never blocks the
//! others: each fetch group independently degrades to its safe default
//! (empty list, zero count, offline probe) and the degradation is
//! recorded in the cycle's [`FetchReport`].

use std::sync::Arc;

use tokio::time::timeout;

use crate::config::MonitorConfig;
use crate::logging::log_fetch_failure;
use crate::models::{FetchReport, GatewayProbeResult, Job};
use crate::signals::{EncoderStore, GatewayProber, JobStore, SignalError};

/// Raw facts gathered for one classification cycle
#[derive(Debug)]
pub struct CollectedSignals {
    pub pending_jobs: Vec<Job>,
    pub in_progress_jobs: Vec<Job>,
    pub completed_today: Vec<Job>,
    pub recent_jobs: Vec<Job>,
    pub last_completed: Vec<Job>,
    pub active_encoder_count: u64,
    pub probe: GatewayProbeResult,
    pub report: FetchReport,
}

impl CollectedSignals {
    /// Most recently completed job, if the store returned any
    pub fn last_completed_job(&self) -> Option<&Job> {
        self.last_completed.first()
    }
}

/// Fetches the raw facts needed for classification from the backing
/// stores and the gateway prober
pub struct SignalCollector {
    job_store: Arc<dyn JobStore>,
    encoder_store: Arc<dyn EncoderStore>,
    prober: Arc<dyn GatewayProber>,
    config: MonitorConfig,
}

impl SignalCollector {
    pub fn new(
        job_store: Arc<dyn JobStore>,
        encoder_store: Arc<dyn EncoderStore>,
        prober: Arc<dyn GatewayProber>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            job_store,
            encoder_store,
            prober,
            config,
        }
    }

    /// Gather all signals for one classification cycle.
    ///
    /// All fetches run concurrently; the gateway probe additionally
    /// carries its own timeout and is reported offline when it expires.
    pub async fn collect(&self) -> CollectedSignals {
        let recent_limit = self.config.recent_jobs_limit;

        let (
            pending,
            in_progress,
            completed_today,
            recent,
            last_completed,
            encoder_count,
            probe,
        ) = tokio::join!(
            self.job_store.fetch_pending_jobs(),
            self.job_store.fetch_in_progress_jobs(),
            self.job_store.fetch_completed_today(),
            self.job_store.fetch_recent_jobs(recent_limit),
            self.job_store.fetch_last_completed_jobs(1),
            self.encoder_store.fetch_active_encoder_count(),
            self.probe_with_timeout(),
        );

        let mut report = FetchReport::default();

        let pending_jobs = settle_jobs(pending, "pending_jobs", &mut report.pending_jobs_ok);
        let in_progress_jobs = settle_jobs(
            in_progress,
            "in_progress_jobs",
            &mut report.in_progress_jobs_ok,
        );
        let completed_today = settle_jobs(
            completed_today,
            "completed_today",
            &mut report.completed_today_ok,
        );
        let recent_jobs = settle_jobs(recent, "recent_jobs", &mut report.recent_jobs_ok);
        let last_completed = settle_jobs(
            last_completed,
            "last_completed_jobs",
            &mut report.last_completed_ok,
        );

        let active_encoder_count = match encoder_count {
            Ok(count) => {
                report.encoder_count_ok = true;
                count
            }
            Err(e) => {
                log_fetch_failure("active_encoder_count", &e.to_string());
                0
            }
        };

        let (probe, probe_ok) = probe;
        report.gateway_probe_ok = probe_ok;

        CollectedSignals {
            pending_jobs,
            in_progress_jobs,
            completed_today,
            recent_jobs,
            last_completed,
            active_encoder_count,
            probe,
            report,
        }
    }

    /// Run the gateway probe under the configured timeout.
    ///
    /// A timed-out probe is indistinguishable from an offline gateway
    /// for classification purposes, but the fetch report still records
    /// that the probe itself did not settle.
    async fn probe_with_timeout(&self) -> (GatewayProbeResult, bool) {
        match timeout(self.config.probe_timeout(), self.prober.probe_gateway()).await {
            Ok(result) => (result, true),
            Err(_) => {
                log_fetch_failure(
                    "gateway_probe",
                    &format!(
                        "probe exceeded {}s timeout",
                        self.config.probe_timeout_seconds
                    ),
                );
                (
                    GatewayProbeResult::offline(format!(
                        "probe timed out after {}s",
                        self.config.probe_timeout_seconds
                    )),
                    false,
                )
            }
        }
    }
}

/// Degrade a failed job fetch to an empty list, flagging the report.
fn settle_jobs(
    result: Result<Vec<Job>, SignalError>,
    fetch_group: &str,
    ok_flag: &mut bool,
) -> Vec<Job> {
    match result {
        Ok(jobs) => {
            *ok_flag = true;
            jobs
        }
        Err(e) => {
            log_fetch_failure(fetch_group, &e.to_string());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncoderInfo, JobStatus};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn job(status: JobStatus) -> Job {
        Job {
            id: Uuid::new_v4(),
            status,
            created_at: Utc::now(),
            assigned_to: None,
            size_bytes: 1_000,
            result_message: None,
        }
    }

    /// Job store where individual queries can be made to fail
    struct FlakyJobStore {
        fail_pending: bool,
    }

    #[async_trait]
    impl JobStore for FlakyJobStore {
        async fn fetch_pending_jobs(&self) -> Result<Vec<Job>, SignalError> {
            if self.fail_pending {
                return Err(SignalError::StoreUnavailable {
                    message: "connection pool exhausted".to_string(),
                });
            }
            Ok(vec![job(JobStatus::Unassigned)])
        }

        async fn fetch_in_progress_jobs(&self) -> Result<Vec<Job>, SignalError> {
            Ok(vec![job(JobStatus::Running)])
        }

        async fn fetch_completed_today(&self) -> Result<Vec<Job>, SignalError> {
            Ok(vec![job(JobStatus::Completed)])
        }

        async fn fetch_recent_jobs(&self, limit: u32) -> Result<Vec<Job>, SignalError> {
            Ok((0..limit.min(3)).map(|_| job(JobStatus::Running)).collect())
        }

        async fn fetch_last_completed_jobs(&self, _limit: u32) -> Result<Vec<Job>, SignalError> {
            Ok(vec![job(JobStatus::Completed)])
        }
    }

    struct StaticEncoderStore {
        count: u64,
    }

    #[async_trait]
    impl EncoderStore for StaticEncoderStore {
        async fn fetch_active_encoder_count(&self) -> Result<u64, SignalError> {
            Ok(self.count)
        }

        async fn resolve(
            &self,
            _identifiers: &[String],
        ) -> Result<HashMap<String, EncoderInfo>, SignalError> {
            Ok(HashMap::new())
        }
    }

    struct OnlineProber;

    #[async_trait]
    impl GatewayProber for OnlineProber {
        async fn probe_gateway(&self) -> GatewayProbeResult {
            GatewayProbeResult {
                is_online: true,
                response_time_ms: 10,
                last_check: Utc::now(),
                error: None,
            }
        }
    }

    /// Prober that never answers within any reasonable timeout
    struct HangingProber;

    #[async_trait]
    impl GatewayProber for HangingProber {
        async fn probe_gateway(&self) -> GatewayProbeResult {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            unreachable!("probe should have timed out")
        }
    }

    fn collector_with(
        fail_pending: bool,
        prober: Arc<dyn GatewayProber>,
        config: MonitorConfig,
    ) -> SignalCollector {
        SignalCollector::new(
            Arc::new(FlakyJobStore { fail_pending }),
            Arc::new(StaticEncoderStore { count: 2 }),
            prober,
            config,
        )
    }

    #[tokio::test]
    async fn test_all_fetches_succeed() {
        let collector = collector_with(false, Arc::new(OnlineProber), MonitorConfig::default());
        let signals = collector.collect().await;

        assert_eq!(signals.pending_jobs.len(), 1);
        assert_eq!(signals.in_progress_jobs.len(), 1);
        assert_eq!(signals.active_encoder_count, 2);
        assert!(signals.probe.is_online);
        assert!(signals.report.all_ok());
        assert!(signals.last_completed_job().is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty_default() {
        let collector = collector_with(true, Arc::new(OnlineProber), MonitorConfig::default());
        let signals = collector.collect().await;

        // Failed group degraded, everything else unaffected
        assert!(signals.pending_jobs.is_empty());
        assert!(!signals.report.pending_jobs_ok);
        assert!(signals.report.in_progress_jobs_ok);
        assert!(signals.report.gateway_probe_ok);
        assert!(!signals.report.all_ok());
    }

    #[tokio::test]
    async fn test_hanging_probe_times_out_as_offline() {
        let config = MonitorConfig {
            probe_timeout_seconds: 1,
            ..MonitorConfig::default()
        };
        let collector = collector_with(false, Arc::new(HangingProber), config);
        let signals = collector.collect().await;

        assert!(!signals.probe.is_online);
        assert!(signals.probe.error.is_some());
        assert!(!signals.report.gateway_probe_ok);
        // Job fetches still settled despite the hung probe
        assert!(signals.report.pending_jobs_ok);
    }
}
