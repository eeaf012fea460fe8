//! Persistence layer: JSON data files and the SQLite analytics store.
//!
//! [`JsonFileStore`] owns the three data files that back the in-memory
//! registry. [`AnalyticsStore`] records a detailed capture of each event
//! when it ends; it is optional and disabled with
//! `ANALYTICS_DB_ENABLED=false`.

pub mod json_store;
pub mod models;
pub mod sqlite;

pub use json_store::JsonFileStore;
pub use sqlite::AnalyticsStore;
