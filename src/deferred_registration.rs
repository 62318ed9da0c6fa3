use std::rc::Rc;

use crate::{
    diagnostics::{DiagnosticsRecorder, RegistrationStatus},
    host::{TaskHandle, TaskScheduler, UpdateClient},
    logging::{warning, StartupReporter},
};

/// The outcome is logged and recorded but never reaches the caller.
pub fn schedule_deferred_registration<L>(
    scheduler: &dyn TaskScheduler,
    client: Rc<dyn UpdateClient>,
    delay_ms: u32,
    diagnostics: Rc<DiagnosticsRecorder>,
    reporter: StartupReporter<L>,
) -> TaskHandle
where
    L: Fn(&str) + Clone + 'static,
{
    diagnostics.record_registration(RegistrationStatus::Scheduled { delay_ms });

    scheduler.schedule(
        Box::new(move || {
            reporter.progress("Registering service worker...");
            let completion_reporter = reporter.clone();
            client.register(Box::new(move |result| match result {
                Ok(()) => {
                    completion_reporter.progress("Service worker registered");
                    diagnostics.record_registration(RegistrationStatus::Registered);
                }
                Err(error) => {
                    completion_reporter
                        .report(&warning(&format!("Service worker registration failed: {error}")));
                    diagnostics.record_registration(RegistrationStatus::Failed {
                        reason: error.to_string(),
                    });
                }
            }));
        }),
        delay_ms,
    )
}
