//! rusty-forum/crates/rf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Forum.

pub mod error;
pub mod models;
pub mod path;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
