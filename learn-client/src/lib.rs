//! Learn Client - HTTP access to the plan backend
//!
//! This crate provides a preconfigured HTTP client bound to the backend
//! origin and the plan API built on top of it.

mod client;
mod error;
mod plans;

#[cfg(test)]
mod test_server;

pub use client::HttpClient;
pub use error::{Error, Result};
pub use plans::PlanClient;
