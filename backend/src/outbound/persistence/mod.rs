//! Storage adapters implementing the domain's user store port.
//!
//! Two independent backends serve the same contract:
//!
//! - **Relational**: PostgreSQL via Diesel with async support through
//!   `diesel-async` and `bb8` connection pooling.
//! - **Document**: MongoDB via the official driver and a typed collection.
//!
//! Both are thin adapters: they translate between storage models and
//! domain types and map engine failures to the port's error taxonomy. No
//! business logic lives here, and the two backends share no state.

mod diesel_user_store;
mod models;
mod mongo_user_store;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use mongo_user_store::MongoUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
