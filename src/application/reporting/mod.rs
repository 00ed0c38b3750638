//! Reporting: versioned scan report models, assembly policy and output formats

pub mod formats;
pub mod models;
pub mod service;

pub use models::*;
pub use service::*;
