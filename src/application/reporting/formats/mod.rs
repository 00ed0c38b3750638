//! Report format implementations

pub mod console;
pub mod json;

pub use console::*;
pub use json::*;
