//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`submit`] — Batch submission
//! - [`files`] — One-shot artifact delivery
//! - [`system`] — Health and OpenAPI

mod files;
mod submit;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use files::*;
pub use submit::*;
pub use system::*;
