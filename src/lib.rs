mod app_constants;
pub mod app_types;
pub mod bootstrap;
pub mod bootstrap_config;
pub mod deferred_registration;
pub mod diagnostics;
pub mod errors;
pub mod fallback_panel;
pub mod host;
pub mod keyboard_focus;
pub mod logging;
pub mod preferences;
#[cfg(target_arch = "wasm32")]
pub mod web_entry;
#[cfg(target_arch = "wasm32")]
pub mod web_host;

pub use app_constants::*;
pub use app_types::{
    BootstrapOutcome, BootstrapPhase, EnvironmentFlag, EnvironmentPreference, RenderFailure,
};
pub use bootstrap::Bootstrap;
pub use bootstrap_config::BootstrapConfig;
pub use host::{AppRenderer, BootstrapHost, MountPoint};
#[cfg(target_arch = "wasm32")]
pub use web_entry::launch;
