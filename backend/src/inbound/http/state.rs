//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain router and its port, and remain testable without
//! real storage backends.

use std::sync::Arc;

use crate::domain::StoreRouter;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Router over the two long-lived store adapters.
    pub stores: Arc<StoreRouter>,
}

impl HttpState {
    /// Construct state from a backend router.
    pub fn new(stores: StoreRouter) -> Self {
        Self {
            stores: Arc::new(stores),
        }
    }
}
