//! reqlens core library
//!
//! Fetching, counting and report rendering for the request-source analyzer
//! and the Confluence weekly report.

pub mod client;
pub mod config;
pub mod confluence;
pub mod error;
pub mod requests;
pub mod text;

pub use client::JsonClient;
pub use config::{ConfluenceSettings, Credentials, RequestsSettings};
pub use error::{ReqlensError, ReqlensResult};
