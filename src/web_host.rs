//! `web-sys` implementations of the host seams.

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event, KeyboardEvent, RegistrationOptions, Window};

use crate::{
    app_types::{EnvironmentFlag, EnvironmentPreference},
    bootstrap_config::{resolve_service_worker_url, BootstrapConfig, ServiceWorkerConfig},
    errors::RegistrationError,
    fallback_panel::FallbackPanel,
    host::{
        BootstrapHost, DocumentSurface, FlagSink, InputEvents, MountPoint, PreferenceQueries,
        RegistrationCallback, TaskHandle, TaskScheduler, UpdateClient,
    },
    logging::{append_registration_log, append_startup_log, warning},
    BOOTSTRAP_CONFIG_ELEMENT_ID, FALLBACK_RELOAD_BUTTON_ID,
};

fn js_error_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// Flags live on the body's class list so stylesheets can key off them.
pub struct BodyClassFlags {
    document: Document,
}

impl BodyClassFlags {
    fn update(&self, flag: EnvironmentFlag, enabled: bool) {
        let Some(body) = self.document.body() else {
            append_startup_log(&warning("document body is unavailable; flag update skipped"));
            return;
        };
        let class_list = body.class_list();
        let result = if enabled {
            class_list.add_1(flag.class_name())
        } else {
            class_list.remove_1(flag.class_name())
        };
        if let Err(error) = result {
            append_startup_log(&warning(&format!(
                "failed to update class {}: {}",
                flag.class_name(),
                js_error_text(&error)
            )));
        }
    }
}

impl FlagSink for BodyClassFlags {
    fn set(&self, flag: EnvironmentFlag) {
        self.update(flag, true);
    }

    fn clear(&self, flag: EnvironmentFlag) {
        self.update(flag, false);
    }
}

pub struct TimeoutScheduler {
    window: Window,
}

impl TaskScheduler for TimeoutScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>, delay_ms: u32) -> TaskHandle {
        let callback = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        {
            Ok(id) => TaskHandle(id),
            Err(error) => {
                append_startup_log(&warning(&format!(
                    "failed to schedule deferred task: {}",
                    js_error_text(&error)
                )));
                TaskHandle(-1)
            }
        }
    }
}

pub struct MediaQueryPreferences {
    window: Window,
}

impl PreferenceQueries for MediaQueryPreferences {
    fn matches(&self, preference: EnvironmentPreference) -> bool {
        self.window
            .match_media(preference.media_query())
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}

pub struct DocumentInputEvents {
    document: Document,
}

impl DocumentInputEvents {
    fn listen(&self, event_name: &str, callback: &JsValue) {
        if let Err(error) = self
            .document
            .add_event_listener_with_callback(event_name, callback.unchecked_ref())
        {
            append_startup_log(&warning(&format!(
                "failed to install {event_name} listener: {}",
                js_error_text(&error)
            )));
        }
    }
}

impl InputEvents for DocumentInputEvents {
    fn on_keydown(&self, mut listener: Box<dyn FnMut(&str)>) {
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(
            move |event: KeyboardEvent| listener(&event.key()),
        ));
        self.listen("keydown", callback.as_ref());
        callback.forget();
    }

    fn on_mousedown(&self, mut listener: Box<dyn FnMut()>) {
        let callback =
            Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| listener()));
        self.listen("mousedown", callback.as_ref());
        callback.forget();
    }
}

pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    fn wire_reload_button(&self) {
        let Some(button) = self.document.get_element_by_id(FALLBACK_RELOAD_BUTTON_ID) else {
            append_startup_log(&warning("fallback reload button is missing"));
            return;
        };

        let window = self.window.clone();
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
            if let Err(error) = window.location().reload() {
                append_startup_log(&warning(&format!(
                    "failed to reload page: {}",
                    js_error_text(&error)
                )));
            }
        }));
        if let Err(error) =
            button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        {
            append_startup_log(&warning(&format!(
                "failed to wire reload button: {}",
                js_error_text(&error)
            )));
        }
        callback.forget();
    }
}

impl DocumentSurface for WebDocument {
    fn ready_state(&self) -> String {
        self.document.ready_state()
    }

    fn find_mount_point(&self, id: &str) -> Option<MountPoint> {
        self.document
            .get_element_by_id(id)
            .map(|_| MountPoint { id: id.to_string() })
    }

    fn body_html_excerpt(&self, limit: usize) -> String {
        self.document
            .body()
            .map(|body| body.inner_html().chars().take(limit).collect())
            .unwrap_or_default()
    }

    fn replace_body(&self, panel: &FallbackPanel) {
        let Some(body) = self.document.body() else {
            append_startup_log(&warning("document body is unavailable; fallback not shown"));
            return;
        };
        body.set_inner_html(&panel.to_html());
        self.wire_reload_button();
    }

    fn replace_mount_contents(&self, mount: &MountPoint, panel: &FallbackPanel) {
        let Some(element) = self.document.get_element_by_id(&mount.id) else {
            append_startup_log(&warning(&format!(
                "mount point #{} vanished; fallback not shown",
                mount.id
            )));
            return;
        };
        element.set_inner_html(&panel.to_html());
        self.wire_reload_button();
    }
}

/// Paints the render-failure panel from inside a panic hook, where the
/// sequencer can no longer run its own failure path.
pub fn show_panic_fallback(mount: &MountPoint, panel: &FallbackPanel) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    WebDocument { window, document }.replace_mount_contents(mount, panel);
}

pub fn mount_element(mount: &MountPoint) -> Option<Element> {
    web_sys::window()?
        .document()?
        .get_element_by_id(&mount.id)
}

pub struct ServiceWorkerUpdateClient {
    window: Window,
    config: ServiceWorkerConfig,
    verbose: bool,
}

impl ServiceWorkerUpdateClient {
    fn resolve_script(&self) -> Result<String, RegistrationError> {
        let page_url = self
            .window
            .location()
            .href()
            .map_err(|error| RegistrationError::Config(js_error_text(&error)))?;
        resolve_service_worker_url(&page_url, &self.config.script)
            .map(|url| url.to_string())
            .map_err(|error| RegistrationError::Config(error.to_string()))
    }

    fn is_supported(&self) -> bool {
        js_sys::Reflect::has(
            self.window.navigator().as_ref(),
            &JsValue::from_str("serviceWorker"),
        )
        .unwrap_or(false)
    }
}

impl UpdateClient for ServiceWorkerUpdateClient {
    fn register(&self, on_complete: RegistrationCallback) {
        if !self.is_supported() {
            on_complete(Err(RegistrationError::Unsupported));
            return;
        }
        let script = match self.resolve_script() {
            Ok(script) => script,
            Err(error) => {
                on_complete(Err(error));
                return;
            }
        };

        let options = RegistrationOptions::new();
        if let Some(scope) = self.config.scope.as_deref() {
            options.set_scope(scope);
        }
        if self.verbose {
            append_registration_log(&format!(
                "registering {script} (scope: {})",
                self.config.scope.as_deref().unwrap_or("default")
            ));
        }

        let promise = self
            .window
            .navigator()
            .service_worker()
            .register_with_options(&script, &options);
        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|error| RegistrationError::Rejected(js_error_text(&error)));
            on_complete(result);
        });
    }
}

pub fn read_bootstrap_config_source(window: &Window) -> Option<String> {
    window
        .document()?
        .get_element_by_id(BOOTSTRAP_CONFIG_ELEMENT_ID)?
        .text_content()
}

pub fn web_bootstrap_host(window: &Window, config: &BootstrapConfig) -> Result<BootstrapHost, String> {
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;

    Ok(BootstrapHost {
        flags: Rc::new(BodyClassFlags {
            document: document.clone(),
        }),
        scheduler: Rc::new(TimeoutScheduler {
            window: window.clone(),
        }),
        preferences: Rc::new(MediaQueryPreferences {
            window: window.clone(),
        }),
        input: Rc::new(DocumentInputEvents {
            document: document.clone(),
        }),
        document: Rc::new(WebDocument {
            window: window.clone(),
            document,
        }),
        update_client: Rc::new(ServiceWorkerUpdateClient {
            window: window.clone(),
            config: config.service_worker.clone(),
            verbose: config.verbose,
        }),
    })
}
