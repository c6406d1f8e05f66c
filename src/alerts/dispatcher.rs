//! # Alert Dispatcher
//!
//! Decides, from the current workload zone and the remembered prior
//! state, whether the notification channel should hear about this
//! cycle. The decision and the state update happen atomically under a
//! single mutex so overlapping classification cycles can neither
//! double-notify a transition nor lose one. Delivery itself is
//! fire-and-forget: it runs on a spawned task and its outcome never
//! reaches the dashboard caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::alerts::NotificationChannel;
use crate::config::MonitorConfig;
use crate::logging::log_alert_dispatch;
use crate::models::{WorkloadSnapshot, Zone};

/// Why a notification was (or was not) emitted this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// Zone moved to a more severe state
    Escalation,
    /// Zone eased and recovery alerts are enabled
    Recovery,
    /// Zone stayed severe past the re-notify interval
    Renotify,
    /// Nothing to say
    Suppress,
}

impl AlertDecision {
    pub fn should_notify(&self) -> bool {
        !matches!(self, AlertDecision::Suppress)
    }

    fn as_str(&self) -> &'static str {
        match self {
            AlertDecision::Escalation => "escalation",
            AlertDecision::Recovery => "recovery",
            AlertDecision::Renotify => "renotify",
            AlertDecision::Suppress => "suppress",
        }
    }
}

/// Last zone communicated to the alert channel, plus enough timing to
/// honor the re-notify interval. Process lifetime; reset on restart.
#[derive(Debug, Default)]
struct AlertState {
    /// Zone observed on the previous cycle
    last_zone: Option<Zone>,
    /// Zone of the last notification actually emitted
    last_notified_zone: Option<Zone>,
    last_notified_at: Option<DateTime<Utc>>,
}

/// Decides on and dispatches zone notifications
pub struct AlertDispatcher {
    channel: Arc<dyn NotificationChannel>,
    state: Mutex<AlertState>,
    config: MonitorConfig,
}

impl AlertDispatcher {
    pub fn new(channel: Arc<dyn NotificationChannel>, config: MonitorConfig) -> Self {
        Self {
            channel,
            state: Mutex::new(AlertState::default()),
            config,
        }
    }

    /// Evaluate this cycle's zone and fire a notification task when the
    /// policy calls for one. Returns the decision for observability;
    /// callers must not block on delivery.
    pub fn dispatch(self: &Arc<Self>, workload: WorkloadSnapshot, now: DateTime<Utc>) -> AlertDecision {
        let previous;
        let decision;
        {
            let mut state = self.state.lock();
            previous = state.last_zone;
            decision = decide(&state, workload.zone, now, &self.config);

            state.last_zone = Some(workload.zone);
            if decision.should_notify() {
                state.last_notified_zone = Some(workload.zone);
                state.last_notified_at = Some(now);
            }
        }

        log_alert_dispatch(
            previous.map(|z| z.as_str()),
            workload.zone.as_str(),
            decision.as_str(),
            None,
        );

        if decision.should_notify() {
            let channel = Arc::clone(&self.channel);
            let zone = workload.zone;
            tokio::spawn(async move {
                if let Err(e) = channel.notify(zone, &workload).await {
                    // Best effort only: log and move on, the dashboard
                    // response does not wait for us
                    tracing::warn!(
                        zone = %zone,
                        error = %e,
                        "Alert delivery failed; not retrying"
                    );
                }
            });
        }

        decision
    }

    /// Check the notification channel end to end
    pub async fn test_channel(&self) -> bool {
        self.channel.test().await
    }
}

/// Pure decision rule, evaluated with the state lock held.
fn decide(
    state: &AlertState,
    current: Zone,
    now: DateTime<Utc>,
    config: &MonitorConfig,
) -> AlertDecision {
    // A fresh process has no history; treat the baseline as green so a
    // severe first observation still alerts
    let previous = state.last_zone.unwrap_or(Zone::Green);

    if current > previous {
        return AlertDecision::Escalation;
    }

    if current < previous {
        return if config.alert_on_recovery {
            AlertDecision::Recovery
        } else {
            AlertDecision::Suppress
        };
    }

    // Unchanged zone: only a severe one held past the opt-in re-notify
    // interval repeats; with the interval disabled it stays quiet forever
    if config.renotify_after_minutes > 0
        && current.is_severe()
        && state.last_notified_zone == Some(current)
    {
        if let Some(notified_at) = state.last_notified_at {
            if now - notified_at >= config.renotify_after() {
                return AlertDecision::Renotify;
            }
        }
    }

    AlertDecision::Suppress
}
