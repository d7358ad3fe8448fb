//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MEDQUIZ_*` environment variables, and
//! configuration files, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{CollectionPolicy, DEFAULT_QUIZ_COLLECTION_PREFIX};
use crate::inbound::http::state::DEFAULT_UPLOAD_LIMIT_BYTES;
use crate::outbound::webhook::DEFAULT_TOLERANCE;

const DEFAULT_MODEL_DIR: &str = "model";

/// Runtime configuration for the gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEDQUIZ")]
pub struct AppSettings {
    /// MongoDB connection string. Without it the server runs on empty
    /// fixture repositories.
    pub database_url: Option<String>,
    /// Database name; defaults to the one in the URL, else `test`.
    pub database_name: Option<String>,
    /// Shared webhook signing secret (`whsec_<base64>`).
    pub webhook_secret: Option<String>,
    /// Accepted webhook clock skew in seconds.
    pub webhook_tolerance_secs: Option<u64>,
    /// Directory holding `config.json` and `model.mpk`.
    pub model_dir: Option<PathBuf>,
    pub host: Option<IpAddr>,
    /// Listening port.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Prefix identifying quiz collections.
    pub quiz_collection_prefix: Option<String>,
    /// Largest accepted `/predict` upload.
    pub max_upload_bytes: Option<usize>,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    pub fn model_dir(&self) -> PathBuf {
        self.model_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR))
    }

    pub fn webhook_tolerance(&self) -> Duration {
        self.webhook_tolerance_secs
            .map_or(DEFAULT_TOLERANCE, Duration::from_secs)
    }

    pub fn collection_policy(&self) -> CollectionPolicy {
        CollectionPolicy::with_prefix(
            self.quiz_collection_prefix
                .as_deref()
                .unwrap_or(DEFAULT_QUIZ_COLLECTION_PREFIX),
        )
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_UPLOAD_LIMIT_BYTES)
    }
}
