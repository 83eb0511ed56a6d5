//! Backend API interaction module
//!
//! # Module Structure
//!
//! - [`credentials`] - Host URL and redacted API key
//! - [`http`] - Authenticated transport with timeout and status mapping
//! - [`client`] - One method per backend action
//! - [`models`] - Wire types
//!
//! # Example
//!
//! ```ignore
//! use bdcc::api::{ApiKey, BdccClient, Credentials};
//!
//! async fn example() -> bdcc::Result<()> {
//!     let creds = Credentials::new(None, ApiKey::new("token")?)?;
//!     let client = BdccClient::new(creds)?;
//!     let databases = client.list_databases().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod http;
pub mod models;

pub use client::BdccClient;
pub use credentials::{ApiKey, Credentials, DEFAULT_HOST};
pub use models::{Database, DatabaseItem};
