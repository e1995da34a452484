//! Diesel table definitions for the relational schema.
//!
//! These definitions must match the migrations in `migrations/` exactly;
//! Diesel uses them for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// User records table.
    ///
    /// The `id` column is the primary key, a fixed-length canonical UUID
    /// string. `identity_number` carries a unique index.
    users (id) {
        /// Primary key: 36-character UUID string.
        id -> Bpchar,
        /// Free-form name.
        name -> Varchar,
        /// National identity number, unique within this backend.
        identity_number -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
