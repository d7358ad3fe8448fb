//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use medquiz::domain::{CollectionPolicy, ModelHandle};
use medquiz::inbound::http::state::DEFAULT_UPLOAD_LIMIT_BYTES;
use medquiz::outbound::persistence::MongoStore;
use medquiz::outbound::webhook::SvixWebhookVerifier;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: SvixWebhookVerifier,
    pub(crate) model: ModelHandle,
    pub(crate) store: Option<MongoStore>,
    pub(crate) policy: CollectionPolicy,
    pub(crate) upload_limit: usize,
}

impl ServerConfig {
    /// Construct a configuration with fixture persistence and defaults.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: SvixWebhookVerifier, model: ModelHandle) -> Self {
        Self {
            bind_addr,
            verifier,
            model,
            store: None,
            policy: CollectionPolicy::default(),
            upload_limit: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    /// Attach a database handle for the persistence adapters.
    ///
    /// Without one, quiz reads return empty lists and webhook users are
    /// logged but not stored.
    #[must_use]
    pub fn with_store(mut self, store: MongoStore) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_collection_policy(mut self, policy: CollectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }
}
