//! Azure plumbing shared by every query.
//!
//! - [`cli`] - Command execution for the Azure CLI
//! - [`auth`] - Authorizer selection and token acquisition
//! - [`client`] - Authenticated requests against Azure Resource Manager

pub mod auth;
pub mod cli;
pub mod client;

pub use auth::{new_authorizer, select_auth_method, AuthMethod, Authorizer, StaticAuthorizer};
pub use client::ArmClient;
