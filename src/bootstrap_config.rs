use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    errors::ConfigError, DEFAULT_MOUNT_POINT_ID, DEFAULT_REGISTRATION_DELAY_MS,
    DEFAULT_SERVICE_WORKER_SCRIPT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootstrapConfig {
    /// Report intermediate progress and include diagnostic traces in fallback panels.
    pub verbose: bool,
    pub mount_point_id: String,
    pub registration_delay_ms: u32,
    pub service_worker: ServiceWorkerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceWorkerConfig {
    pub script: String,
    pub scope: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            mount_point_id: DEFAULT_MOUNT_POINT_ID.to_string(),
            registration_delay_ms: DEFAULT_REGISTRATION_DELAY_MS,
            service_worker: ServiceWorkerConfig::default(),
        }
    }
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self {
            script: DEFAULT_SERVICE_WORKER_SCRIPT.to_string(),
            scope: None,
        }
    }
}

impl BootstrapConfig {
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    pub fn normalized(mut self) -> Self {
        self.mount_point_id = normalize_non_empty(&self.mount_point_id, DEFAULT_MOUNT_POINT_ID);
        self.service_worker.script =
            normalize_non_empty(&self.service_worker.script, DEFAULT_SERVICE_WORKER_SCRIPT);
        self.service_worker.scope = self
            .service_worker
            .scope
            .as_deref()
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(str::to_string);
        self
    }
}

fn normalize_non_empty(raw: &str, default_value: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_value.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn parse_bootstrap_config(raw: &str) -> Result<BootstrapConfig, ConfigError> {
    let parsed: BootstrapConfig = serde_json::from_str(raw)?;
    Ok(parsed.normalized())
}

/// Falls back to defaults when the host page carries no config or a broken one.
pub fn load_bootstrap_config<F>(raw: Option<&str>, log: F) -> BootstrapConfig
where
    F: Fn(&str),
{
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return BootstrapConfig::default();
    };

    match parse_bootstrap_config(raw) {
        Ok(config) => config,
        Err(error) => {
            log(&format!("{error}; using default bootstrap config"));
            BootstrapConfig::default()
        }
    }
}

/// Service workers must be served from the page's own origin over http(s).
pub fn resolve_service_worker_url(page_url: &str, script: &str) -> Result<Url, ConfigError> {
    let page = Url::parse(page_url.trim()).map_err(|source| ConfigError::InvalidScriptUrl {
        raw: page_url.to_string(),
        source,
    })?;
    let resolved = page
        .join(script.trim())
        .map_err(|source| ConfigError::InvalidScriptUrl {
            raw: script.to_string(),
            source,
        })?;

    match resolved.scheme() {
        "http" | "https" => {}
        scheme => return Err(ConfigError::UnsupportedScheme(scheme.to_string())),
    }
    if resolved.origin() != page.origin() {
        return Err(ConfigError::CrossOriginScript {
            script: resolved.to_string(),
            page: page.origin().ascii_serialization(),
        });
    }

    Ok(resolved)
}
