//! HTTP client for the playtime backend REST API
//!
//! [`BackendClient`] talks to the real service; [`Backend`] is the seam the
//! bot is written against so tests can swap in `mock::MockBackend`
//! (enabled by the `test-support` feature).

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use backend::Backend;
pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{Error, Result};
