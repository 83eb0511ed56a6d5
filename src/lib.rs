//! bdcc - database provider core
//!
//! Manages databases on the Bob's Discount Cloud Co REST backend and bulk-loads
//! key/value items into them.
//!
//! - [`api`] - authenticated transport and one call per backend action
//! - [`provider`] - reconciler, data source and population action
//! - [`config`] - host/API key resolution and persisted settings

pub mod api;
pub mod config;
pub mod error;
pub mod provider;

pub use error::{BdccError, ConfigError, OperationError, Result};
