//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_store;

pub use user_store::{FixtureUserStore, UserStore, UserStoreError};
