//! The startup sequencer.
//!
//! Runs once per page load: schedule the deferred registration, install the
//! keyboard focus listeners, evaluate static preferences, resolve the mount
//! point, then render. Every failure ends in a fallback panel with a reload
//! control; nothing escapes as an unhandled error.

use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    rc::Rc,
};

use chrono::Utc;

use crate::{
    app_types::{BootstrapOutcome, BootstrapPhase, MountResolution, RenderFailure, RenderStatus},
    bootstrap_config::BootstrapConfig,
    deferred_registration::schedule_deferred_registration,
    diagnostics::DiagnosticsRecorder,
    fallback_panel::{missing_mount_panel, render_failure_panel},
    host::{AppRenderer, BootstrapHost, MountPoint},
    keyboard_focus::install_keyboard_focus_listeners,
    logging::{fatal, StartupReporter},
    preferences::evaluate_static_preferences,
    BODY_EXCERPT_LIMIT,
};

pub struct Bootstrap<L> {
    host: BootstrapHost,
    config: BootstrapConfig,
    reporter: StartupReporter<L>,
    diagnostics: Rc<DiagnosticsRecorder>,
    phase: BootstrapPhase,
}

impl<L> Bootstrap<L>
where
    L: Fn(&str) + Clone + 'static,
{
    pub fn new(host: BootstrapHost, config: BootstrapConfig, log: L) -> Self {
        let reporter = StartupReporter::new(config.verbose, log);
        Self {
            host,
            config,
            reporter,
            diagnostics: Rc::new(DiagnosticsRecorder::default()),
            phase: BootstrapPhase::Idle,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Rc<DiagnosticsRecorder>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    /// Consumes the sequencer; a second run needs a fresh page load.
    pub fn run(mut self, renderer: &mut dyn AppRenderer) -> BootstrapOutcome {
        self.diagnostics.record_started(Utc::now());
        self.reporter
            .progress("Setting up service worker and accessibility...");

        schedule_deferred_registration(
            self.host.scheduler.as_ref(),
            self.host.update_client.clone(),
            self.config.registration_delay_ms,
            self.diagnostics.clone(),
            self.reporter.clone(),
        );

        install_keyboard_focus_listeners(self.host.input.as_ref(), self.host.flags.clone());
        self.enter(BootstrapPhase::ListenersInstalled);

        let applied =
            evaluate_static_preferences(self.host.preferences.as_ref(), self.host.flags.as_ref());
        self.diagnostics.record_preference_flags(&applied);
        self.enter(BootstrapPhase::PreferencesEvaluated);

        let outcome = match self.resolve_mount_point() {
            Some(mount) => self.render_into(&mount, renderer),
            None => self.show_missing_mount(),
        };
        self.diagnostics.record_outcome(&outcome);
        outcome
    }

    fn resolve_mount_point(&self) -> Option<MountPoint> {
        let document = self.host.document.as_ref();
        self.reporter.progress("About to initialize application...");
        if self.reporter.is_verbose() {
            self.reporter
                .progress(&format!("Document ready state: {}", document.ready_state()));
        }

        let mount = document.find_mount_point(&self.config.mount_point_id);
        self.reporter.progress(&format!(
            "Mount point #{} exists: {}",
            self.config.mount_point_id,
            mount.is_some()
        ));
        mount
    }

    fn show_missing_mount(&mut self) -> BootstrapOutcome {
        let document = self.host.document.as_ref();
        self.reporter.report(&fatal(&format!(
            "Mount point #{} not found in document",
            self.config.mount_point_id
        )));
        if self.reporter.is_verbose() {
            self.reporter.report(&format!(
                "Document body HTML: {}",
                document.body_html_excerpt(BODY_EXCERPT_LIMIT)
            ));
        }

        document.replace_body(&missing_mount_panel(&self.config.mount_point_id));
        self.enter(BootstrapPhase::MountResolved(MountResolution::Missing));
        BootstrapOutcome::MountMissing
    }

    fn render_into(
        &mut self,
        mount: &MountPoint,
        renderer: &mut dyn AppRenderer,
    ) -> BootstrapOutcome {
        self.enter(BootstrapPhase::MountResolved(MountResolution::Found));
        self.reporter.progress("Mount point found successfully");
        self.reporter.progress("Rendering application root...");

        let result = catch_unwind(AssertUnwindSafe(|| renderer.render(mount)))
            .unwrap_or_else(|payload| Err(RenderFailure::from_panic(payload.as_ref())));
        match result {
            Ok(()) => {
                self.reporter.progress("Application rendered successfully");
                self.reporter.progress("Application initialization complete");
                self.enter(BootstrapPhase::Rendered(RenderStatus::Success));
                BootstrapOutcome::Rendered
            }
            Err(failure) => {
                self.show_render_failure(mount, &failure);
                BootstrapOutcome::RenderFailed(failure)
            }
        }
    }

    fn show_render_failure(&mut self, mount: &MountPoint, failure: &RenderFailure) {
        let verbose = self.reporter.is_verbose();
        self.reporter.report(&fatal(&format!(
            "Failed to initialize application: {}",
            failure.message
        )));
        if verbose {
            self.reporter.report(&format!(
                "Error trace: {}",
                failure.trace.as_deref().unwrap_or("No trace available")
            ));
        }

        self.host
            .document
            .replace_mount_contents(mount, &render_failure_panel(failure, verbose));
        self.enter(BootstrapPhase::Rendered(RenderStatus::Failed));
    }

    fn enter(&mut self, next: BootstrapPhase) {
        match self.phase.advance(next) {
            Ok(phase) => {
                self.phase = phase;
                self.diagnostics.record_phase(phase);
            }
            Err(error) => self.reporter.report(&fatal(&error.to_string())),
        }
    }
}
