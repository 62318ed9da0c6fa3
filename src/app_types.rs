use std::{any::Any, cell::Cell, error::Error, fmt};

use serde::Serialize;

use crate::{
    errors::PhaseTransitionError, HIGH_CONTRAST_CLASS, HIGH_CONTRAST_MEDIA_QUERY,
    KEYBOARD_NAVIGATION_CLASS, REDUCED_MOTION_CLASS, REDUCED_MOTION_MEDIA_QUERY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentFlag {
    KeyboardNavigation,
    HighContrast,
    ReducedMotion,
}

impl EnvironmentFlag {
    pub fn class_name(self) -> &'static str {
        match self {
            EnvironmentFlag::KeyboardNavigation => KEYBOARD_NAVIGATION_CLASS,
            EnvironmentFlag::HighContrast => HIGH_CONTRAST_CLASS,
            EnvironmentFlag::ReducedMotion => REDUCED_MOTION_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentPreference {
    HighContrast,
    ReducedMotion,
}

impl EnvironmentPreference {
    pub const ALL: [EnvironmentPreference; 2] = [
        EnvironmentPreference::HighContrast,
        EnvironmentPreference::ReducedMotion,
    ];

    pub fn media_query(self) -> &'static str {
        match self {
            EnvironmentPreference::HighContrast => HIGH_CONTRAST_MEDIA_QUERY,
            EnvironmentPreference::ReducedMotion => REDUCED_MOTION_MEDIA_QUERY,
        }
    }

    pub fn flag(self) -> EnvironmentFlag {
        match self {
            EnvironmentPreference::HighContrast => EnvironmentFlag::HighContrast,
            EnvironmentPreference::ReducedMotion => EnvironmentFlag::ReducedMotion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSignal {
    KeyDown(String),
    MouseDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountResolution {
    Found,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Idle,
    ListenersInstalled,
    PreferencesEvaluated,
    MountResolved(MountResolution),
    Rendered(RenderStatus),
}

impl BootstrapPhase {
    pub fn label(self) -> &'static str {
        match self {
            BootstrapPhase::Idle => "idle",
            BootstrapPhase::ListenersInstalled => "listeners-installed",
            BootstrapPhase::PreferencesEvaluated => "preferences-evaluated",
            BootstrapPhase::MountResolved(MountResolution::Found) => "mount-found",
            BootstrapPhase::MountResolved(MountResolution::Missing) => "mount-missing",
            BootstrapPhase::Rendered(RenderStatus::Success) => "rendered",
            BootstrapPhase::Rendered(RenderStatus::Failed) => "render-failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BootstrapPhase::MountResolved(MountResolution::Missing) | BootstrapPhase::Rendered(_)
        )
    }

    /// Moves one step forward; anything else is rejected and leaves the phase unchanged.
    pub fn advance(self, next: BootstrapPhase) -> Result<BootstrapPhase, PhaseTransitionError> {
        let allowed = matches!(
            (self, next),
            (BootstrapPhase::Idle, BootstrapPhase::ListenersInstalled)
                | (
                    BootstrapPhase::ListenersInstalled,
                    BootstrapPhase::PreferencesEvaluated
                )
                | (
                    BootstrapPhase::PreferencesEvaluated,
                    BootstrapPhase::MountResolved(_)
                )
                | (
                    BootstrapPhase::MountResolved(MountResolution::Found),
                    BootstrapPhase::Rendered(_)
                )
        );
        if allowed {
            Ok(next)
        } else {
            Err(PhaseTransitionError {
                from: self.label(),
                to: next.label(),
            })
        }
    }
}

/// A failure raised while attaching or first rendering the application root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub message: String,
    pub trace: Option<String>,
}

impl RenderFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        let trace = trace.into();
        self.trace = if trace.trim().is_empty() {
            None
        } else {
            Some(trace)
        };
        self
    }

    /// The error's `source()` chain stands in for a stack trace.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let failure = Self::new(error.to_string());
        if chain.is_empty() {
            failure
        } else {
            failure.with_trace(chain.join("\n"))
        }
    }

    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.as_str())
        } else {
            Self::new("application panicked while rendering")
        }
    }

    pub fn detail_text(&self, include_trace: bool) -> String {
        match (&self.trace, include_trace) {
            (Some(trace), true) => format!("{}\n\n{}", self.message, trace),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Rendered,
    RenderFailed(RenderFailure),
    MountMissing,
}

impl BootstrapOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            BootstrapOutcome::Rendered => "rendered",
            BootstrapOutcome::RenderFailed(_) => "render-failed",
            BootstrapOutcome::MountMissing => "mount-missing",
        }
    }
}

/// Single-threaded one-shot latch; the first `try_fire` wins.
#[derive(Debug, Default)]
pub struct OnceGuard {
    fired: Cell<bool>,
}

impl OnceGuard {
    pub fn try_fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
