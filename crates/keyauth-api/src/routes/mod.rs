//! # Route Modules
//!
//! Protected sample routes. Every router here is mounted behind the
//! authentication and authorization layers.

pub mod values;
