use std::{panic, rc::Rc};

use wasm_bindgen::prelude::*;

use crate::{
    app_types::{BootstrapOutcome, OnceGuard, RenderFailure},
    bootstrap::Bootstrap,
    bootstrap_config::{load_bootstrap_config, BootstrapConfig},
    diagnostics::DiagnosticsRecorder,
    fallback_panel::render_failure_panel,
    host::{AppRenderer, MountPoint},
    logging::{append_startup_log, fatal, warning},
    web_host::{read_bootstrap_config_source, show_panic_fallback, web_bootstrap_host},
};

thread_local! {
    static LAUNCHED: OnceGuard = OnceGuard::default();
    static DIAGNOSTICS: Rc<DiagnosticsRecorder> = Rc::new(DiagnosticsRecorder::default());
}

// wasm32 aborts on panic, so a renderer panic never unwinds back into the
// sequencer. The hook paints the failure panel before the console report.
fn install_render_panic_hook(config: &BootstrapConfig) {
    let mount = MountPoint {
        id: config.mount_point_id.clone(),
    };
    let include_trace = config.verbose;
    panic::set_hook(Box::new(move |info| {
        let mut failure = RenderFailure::from_panic(info.payload());
        if let Some(location) = info.location() {
            failure = failure.with_trace(format!("at {location}"));
        }
        append_startup_log(&fatal(&format!(
            "Failed to initialize application: {}",
            failure.message
        )));
        show_panic_fallback(&mount, &render_failure_panel(&failure, include_trace));
        console_error_panic_hook::hook(info);
    }));
}

/// Returns `None` when the sequence already ran in this page or the browser
/// globals are missing.
pub fn launch<R>(mut renderer: R) -> Option<BootstrapOutcome>
where
    R: AppRenderer,
{
    if !LAUNCHED.with(OnceGuard::try_fire) {
        append_startup_log(&warning("bootstrap already ran in this page; ignoring launch"));
        return None;
    }

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(window) = web_sys::window() else {
        append_startup_log(&fatal("window is unavailable"));
        return None;
    };
    let config = load_bootstrap_config(read_bootstrap_config_source(&window).as_deref(), |line| {
        append_startup_log(&warning(line))
    });
    let host = match web_bootstrap_host(&window, &config) {
        Ok(host) => host,
        Err(error) => {
            append_startup_log(&fatal(&error));
            return None;
        }
    };

    install_render_panic_hook(&config);
    let diagnostics = DIAGNOSTICS.with(Rc::clone);
    let outcome = Bootstrap::new(host, config, append_startup_log)
        .with_diagnostics(diagnostics)
        .run(&mut renderer);
    panic::set_hook(Box::new(console_error_panic_hook::hook));
    Some(outcome)
}

#[wasm_bindgen]
pub fn bootstrap_diagnostics_json() -> String {
    DIAGNOSTICS.with(|diagnostics| diagnostics.to_json())
}
