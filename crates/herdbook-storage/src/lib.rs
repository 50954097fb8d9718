//! # herdbook-storage
//!
//! SQLite persistence for the Herdbook engine: connection helpers with
//! pragma setup, `PRAGMA user_version` migrations, and per-entity query
//! modules. All query functions take a `&Connection` so callers control
//! transaction boundaries; multi-write operations wrap them in one
//! transaction and commit atomically.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{open, open_in_memory};
