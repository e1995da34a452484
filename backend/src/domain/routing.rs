//! Backend selection for storage port calls.
//!
//! The backend set is closed and known at compile time: a relational
//! default and a document alternate. Callers choose per request with a
//! selector string; everything unrecognized falls back to the default
//! rather than failing, preserving the lenient routing contract.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::UserStore;

/// Selector value that routes to the document backend.
pub const DOCUMENT_SELECTOR: &str = "mongo";

/// The closed set of storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Relational backend, the default.
    Relational,
    /// Document backend, chosen by [`DOCUMENT_SELECTOR`].
    Document,
}

impl BackendKind {
    /// Resolve a caller-supplied selector to a backend.
    ///
    /// Total function: a selector that case-insensitively equals
    /// [`DOCUMENT_SELECTOR`] picks the document backend; every other input
    /// - absent, empty, or unrecognized - picks the relational backend.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some(value) if value.eq_ignore_ascii_case(DOCUMENT_SELECTOR) => Self::Document,
            Some(value) if !value.is_empty() => {
                debug!(
                    selector = value,
                    "unrecognised backend selector, falling back to relational backend"
                );
                Self::Relational
            }
            _ => Self::Relational,
        }
    }
}

/// Resolves each call to one of two long-lived store adapters.
///
/// Both adapters are constructed once at startup and shared for the life
/// of the process; the router holds them by reference and never fails.
pub struct StoreRouter {
    relational: Arc<dyn UserStore>,
    document: Arc<dyn UserStore>,
}

impl StoreRouter {
    /// Build a router over the two backend adapters.
    pub fn new(relational: Arc<dyn UserStore>, document: Arc<dyn UserStore>) -> Self {
        Self {
            relational,
            document,
        }
    }

    /// Pick the store serving this call.
    pub fn pick(&self, selector: Option<&str>) -> &Arc<dyn UserStore> {
        match BackendKind::from_selector(selector) {
            BackendKind::Relational => &self.relational,
            BackendKind::Document => &self.document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureUserStore;
    use rstest::rstest;

    #[rstest]
    #[case(None, BackendKind::Relational)]
    #[case(Some(""), BackendKind::Relational)]
    #[case(Some("POSTGRES"), BackendKind::Relational)]
    #[case(Some("anything-unrecognized"), BackendKind::Relational)]
    #[case(Some("mongo"), BackendKind::Document)]
    #[case(Some("MONGO"), BackendKind::Document)]
    #[case(Some("Mongo"), BackendKind::Document)]
    fn selector_resolution_is_total(#[case] selector: Option<&str>, #[case] expected: BackendKind) {
        assert_eq!(BackendKind::from_selector(selector), expected);
    }

    #[rstest]
    fn pick_returns_the_matching_singleton() {
        let relational: Arc<dyn UserStore> = Arc::new(FixtureUserStore::new());
        let document: Arc<dyn UserStore> = Arc::new(FixtureUserStore::new());
        let router = StoreRouter::new(Arc::clone(&relational), Arc::clone(&document));

        assert!(Arc::ptr_eq(router.pick(None), &relational));
        assert!(Arc::ptr_eq(router.pick(Some("oracle")), &relational));
        assert!(Arc::ptr_eq(router.pick(Some("Mongo")), &document));
    }
}
