pub const DEFAULT_MOUNT_POINT_ID: &str = "root";
pub const DEFAULT_REGISTRATION_DELAY_MS: u32 = 1000;
pub const DEFAULT_SERVICE_WORKER_SCRIPT: &str = "/sw.js";
pub const BOOTSTRAP_CONFIG_ELEMENT_ID: &str = "webui-bootstrap-config";

pub const KEYBOARD_NAVIGATION_CLASS: &str = "using-keyboard";
pub const HIGH_CONTRAST_CLASS: &str = "prefers-high-contrast";
pub const REDUCED_MOTION_CLASS: &str = "prefers-reduced-motion";

pub const HIGH_CONTRAST_MEDIA_QUERY: &str = "(prefers-contrast: high)";
pub const REDUCED_MOTION_MEDIA_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub const TAB_KEY: &str = "Tab";

pub const FALLBACK_RELOAD_BUTTON_ID: &str = "webui-bootstrap-reload";
pub const BODY_EXCERPT_LIMIT: usize = 500;

pub const LOG_TARGET: &str = "webui_bootstrap";
pub const INIT_LOG_SCOPE: &str = "INIT";
pub const SERVICE_WORKER_LOG_SCOPE: &str = "SW";
