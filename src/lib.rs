//! Helpers for checking Azure resource state from infrastructure integration tests.
//!
//! ```no_run
//! # async fn check() {
//! use aztest::{query::network, Session};
//!
//! let session = Session::from_process_env();
//! let subnets = network::get_subnets_for_vnet(&session, "my-rg", "my-vnet", "").await;
//! assert!(!subnets.is_empty());
//! # }
//! ```

pub mod azure;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
mod session;

pub use config::{Endpoints, Env};
pub use error::{AzureError, Result};
pub use session::Session;
