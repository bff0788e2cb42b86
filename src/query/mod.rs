//! Resource queries for test assertions.
//!
//! Each query resolves its target, builds a fresh client, issues one request
//! and reshapes the answer. `try_*` functions return the error; the plain
//! variants fail the running test instead.
//! - [`compute`] - Virtual machines and extensions
//! - [`network`] - VNets, subnets, network security groups
//! - [`aks`] - Managed Kubernetes clusters
//! - [`subscription`] - Subscription client and locations
//! - [`region`] - Region listing and random region selection

pub mod aks;
pub mod compute;
pub mod network;
pub mod region;
pub mod subscription;
