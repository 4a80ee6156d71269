//! Database repositories for persistence operations.
//!
//! Each repository owns the SQL for one entity and exposes a narrow
//! contract the service layer is written against.

pub mod user_repository;
