//! Persistence layer for the HiveSense backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - SQL migrations, including the partial unique index that enforces the
//!   open-alert invariant under concurrent ingestion

pub mod db;
pub mod entities;
pub mod repositories;
