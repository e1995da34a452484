//! Inbound adapters translating external requests into domain calls.

pub mod http;
