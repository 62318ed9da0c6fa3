//! Serializable record of how far startup got, for support tooling and tests.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_types::{BootstrapOutcome, BootstrapPhase, EnvironmentFlag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RegistrationStatus {
    NotScheduled,
    #[serde(rename_all = "camelCase")]
    Scheduled {
        delay_ms: u32,
    },
    Registered,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootDiagnostics {
    pub phase: &'static str,
    pub outcome: Option<&'static str>,
    pub preference_flags: Vec<EnvironmentFlag>,
    pub registration: RegistrationStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl Default for BootDiagnostics {
    fn default() -> Self {
        Self {
            phase: BootstrapPhase::Idle.label(),
            outcome: None,
            preference_flags: Vec::new(),
            registration: RegistrationStatus::NotScheduled,
            started_at: None,
            last_error: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticsRecorder {
    state: RefCell<BootDiagnostics>,
}

impl DiagnosticsRecorder {
    pub fn record_started(&self, at: DateTime<Utc>) {
        self.state.borrow_mut().started_at = Some(at);
    }

    pub fn record_phase(&self, phase: BootstrapPhase) {
        self.state.borrow_mut().phase = phase.label();
    }

    pub fn record_preference_flags(&self, flags: &[EnvironmentFlag]) {
        self.state.borrow_mut().preference_flags = flags.to_vec();
    }

    pub fn record_registration(&self, status: RegistrationStatus) {
        self.state.borrow_mut().registration = status;
    }

    pub fn record_outcome(&self, outcome: &BootstrapOutcome) {
        let mut state = self.state.borrow_mut();
        state.outcome = Some(outcome.label());
        match outcome {
            BootstrapOutcome::RenderFailed(failure) => {
                state.last_error = Some(failure.message.clone());
            }
            BootstrapOutcome::MountMissing => {
                state.last_error = Some("mount point not found".to_string());
            }
            BootstrapOutcome::Rendered => {}
        }
    }

    pub fn snapshot(&self) -> BootDiagnostics {
        self.state.borrow().clone()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&*self.state.borrow()).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"lastError\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::app_types::{MountResolution, RenderFailure, RenderStatus};

    #[test]
    fn fresh_diagnostics_serialize_as_idle() {
        let recorder = DiagnosticsRecorder::default();
        let value: serde_json::Value =
            serde_json::from_str(&recorder.to_json()).expect("valid json");
        assert_eq!(
            value,
            json!({
                "phase": "idle",
                "outcome": null,
                "preferenceFlags": [],
                "registration": {"state": "not-scheduled"},
                "startedAt": null,
                "lastError": null,
            })
        );
    }

    #[test]
    fn render_failure_is_recorded_with_message() {
        let recorder = DiagnosticsRecorder::default();
        recorder.record_started(
            Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        recorder.record_phase(BootstrapPhase::MountResolved(MountResolution::Found));
        recorder.record_phase(BootstrapPhase::Rendered(RenderStatus::Failed));
        recorder.record_preference_flags(&[EnvironmentFlag::HighContrast]);
        recorder.record_registration(RegistrationStatus::Scheduled { delay_ms: 1000 });
        recorder.record_outcome(&BootstrapOutcome::RenderFailed(RenderFailure::new("x")));

        let value: serde_json::Value =
            serde_json::from_str(&recorder.to_json()).expect("valid json");
        assert_eq!(value["phase"], "render-failed");
        assert_eq!(value["outcome"], "render-failed");
        assert_eq!(value["lastError"], "x");
        assert_eq!(value["preferenceFlags"], json!(["high-contrast"]));
        assert_eq!(
            value["registration"],
            json!({"state": "scheduled", "delayMs": 1000})
        );
        assert_eq!(value["startedAt"], "2026-10-18T00:00:00Z");
    }

    #[test]
    fn registration_failure_serializes_reason() {
        let recorder = DiagnosticsRecorder::default();
        recorder.record_registration(RegistrationStatus::Failed {
            reason: "offline".to_string(),
        });
        assert_eq!(
            recorder.snapshot().registration,
            RegistrationStatus::Failed {
                reason: "offline".to_string()
            }
        );
        let value: serde_json::Value =
            serde_json::from_str(&recorder.to_json()).expect("valid json");
        assert_eq!(value["registration"], json!({"state": "failed", "reason": "offline"}));
    }
}
