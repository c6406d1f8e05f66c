//! # Monitor Service
//!
//! One classification pass end to end: collect signals, run the
//! classifiers, assemble the dashboard snapshot, and hand the zone to
//! the alert dispatcher. The service is constructed once with all of
//! its collaborators injected; there are no lazily initialized globals.
//! It serves both modes the dashboard runs in: a pass per HTTP request,
//! or a background polling loop.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::alerts::{AlertDispatcher, NotificationChannel};
use crate::classify::{any_stale, classify_gateway, classify_workload};
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::logging::{log_classification, log_fetch_failure};
use crate::models::{DashboardSnapshot, EnrichedJob, Job};
use crate::signals::{EncoderStore, GatewayProber, JobStore, SignalCollector};
use crate::utils::{format_bytes, format_relative_age};

/// Display owner for jobs whose encoder cannot be resolved
const UNKNOWN_OWNER: &str = "Unknown";

/// Aggregates fleet signals into dashboard snapshots and drives alerting
pub struct MonitorService {
    collector: SignalCollector,
    encoder_store: Arc<dyn EncoderStore>,
    dispatcher: Arc<AlertDispatcher>,
    config: MonitorConfig,
}

impl MonitorService {
    /// Build the service with explicit collaborator references.
    ///
    /// Fails only on an invalid configuration; collaborator outages are
    /// handled per cycle, not at construction.
    pub fn new(
        job_store: Arc<dyn JobStore>,
        encoder_store: Arc<dyn EncoderStore>,
        prober: Arc<dyn GatewayProber>,
        channel: Arc<dyn NotificationChannel>,
        config: MonitorConfig,
    ) -> Result<Self> {
        config.validate()?;

        let collector = SignalCollector::new(
            Arc::clone(&job_store),
            Arc::clone(&encoder_store),
            prober,
            config.clone(),
        );
        let dispatcher = Arc::new(AlertDispatcher::new(channel, config.clone()));

        Ok(Self {
            collector,
            encoder_store,
            dispatcher,
            config,
        })
    }

    /// Run one full classification pass and return the snapshot.
    ///
    /// Alert dispatch is fire-and-forget relative to the returned
    /// snapshot; a slow or failing notification channel never delays
    /// the dashboard response.
    pub async fn classification_pass(&self) -> DashboardSnapshot {
        let signals = self.collector.collect().await;
        let now = Utc::now();

        let stale_detected = any_stale(&signals.pending_jobs, self.config.stale_after(), now);

        let workload = classify_workload(
            signals.pending_jobs.len() as u64,
            signals.in_progress_jobs.len() as u64,
            signals.active_encoder_count,
            stale_detected,
            &self.config,
        );

        let gateway_health = classify_gateway(&signals.probe, signals.last_completed_job());

        let recent_jobs = self.enrich_jobs(&signals.recent_jobs).await;

        log_classification(
            workload.zone.as_str(),
            gateway_health.as_str(),
            workload.active_jobs,
            workload.active_encoders,
            stale_detected,
        );

        self.dispatcher.dispatch(workload.clone(), now);

        DashboardSnapshot {
            generated_at: now,
            available_jobs: signals.pending_jobs.len() as u64,
            in_progress_jobs: signals.in_progress_jobs.len() as u64,
            completed_today: signals.completed_today.len() as u64,
            active_encoders: signals.active_encoder_count,
            recent_jobs,
            workload,
            gateway_health,
            fetch_report: signals.report,
        }
    }

    /// Run classification passes on an interval until shutdown.
    pub async fn run(&self, interval: std::time::Duration, shutdown: Arc<Notify>) {
        info!(
            interval_seconds = interval.as_secs(),
            "Monitor loop starting"
        );

        loop {
            let snapshot = self.classification_pass().await;
            debug!(
                zone = %snapshot.workload.zone,
                gateway = %snapshot.gateway_health,
                "Classification pass complete"
            );

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.notified() => {
                    info!("Shutdown notification received, stopping monitor loop");
                    break;
                }
            }
        }
    }

    /// Verify the notification channel end to end
    pub async fn test_notification_channel(&self) -> bool {
        self.dispatcher.test_channel().await
    }

    /// Enrich job records with display metadata.
    ///
    /// The identity lookup is presentation only: when it fails outright
    /// every owner falls back to "Unknown" and the jobs are still shown.
    async fn enrich_jobs(&self, jobs: &[Job]) -> Vec<EnrichedJob> {
        let now = Utc::now();

        let ids: Vec<String> = jobs
            .iter()
            .filter_map(|job| job.assigned_to.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let resolved = if ids.is_empty() {
            Default::default()
        } else {
            match self.encoder_store.resolve(&ids).await {
                Ok(map) => map,
                Err(e) => {
                    log_fetch_failure("encoder_identity", &e.to_string());
                    Default::default()
                }
            }
        };

        jobs.iter()
            .map(|job| {
                let owner = job
                    .assigned_to
                    .as_ref()
                    .and_then(|id| resolved.get(id))
                    .map(|info| info.name.clone())
                    .unwrap_or_else(|| UNKNOWN_OWNER.to_string());

                EnrichedJob {
                    id: job.id,
                    status: job.status,
                    owner,
                    age: format_relative_age(job.created_at, now),
                    size: format_bytes(job.size_bytes),
                }
            })
            .collect()
    }
}
