//! # heathub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `ProfileRepository` port defined in `heathub-app`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `heathub-app` (for port traits) and `heathub-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod profile_repo;

pub use pool::{Config, Database};
pub use profile_repo::SqliteProfileRepository;
