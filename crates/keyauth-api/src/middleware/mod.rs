//! # Middleware Stack
//!
//! Tower middleware shared by every route:
//! - [`tracing_layer`]: request/response tracing with `TraceLayer`.
//!
//! Authentication and authorization live in [`crate::auth`] because they
//! are registered per router rather than globally.

pub mod tracing_layer;
