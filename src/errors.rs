use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse bootstrap config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid service worker script url '{raw}': {source}")]
    InvalidScriptUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("service worker script {script} is not same-origin with {page}")]
    CrossOriginScript { script: String, page: String },

    #[error("unsupported service worker script scheme '{0}', only http/https are allowed")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("service workers are not supported in this environment")]
    Unsupported,

    #[error("service worker registration rejected: {0}")]
    Rejected(String),

    #[error("invalid service worker config: {0}")]
    Config(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bootstrap phase transition {from} -> {to}")]
pub struct PhaseTransitionError {
    pub from: &'static str,
    pub to: &'static str,
}
