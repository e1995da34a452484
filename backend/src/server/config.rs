//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use backend::domain::ports::{FixtureUserStore, UserStore};

/// Builder-style configuration for creating the HTTP server.
///
/// Both stores default to in-memory fixtures so the server can run
/// without databases in development and tests; production wiring replaces
/// them with the real adapters.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) relational_store: Arc<dyn UserStore>,
    pub(crate) document_store: Arc<dyn UserStore>,
}

impl ServerConfig {
    /// Construct a configuration binding the given address, with fixture
    /// stores for both backends.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            relational_store: Arc::new(FixtureUserStore::new()),
            document_store: Arc::new(FixtureUserStore::new()),
        }
    }

    /// Attach the relational backend adapter.
    #[must_use]
    pub fn with_relational_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.relational_store = store;
        self
    }

    /// Attach the document backend adapter.
    #[must_use]
    pub fn with_document_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.document_store = store;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
