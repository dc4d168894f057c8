//! Shared types used across all modules.
//!
//! The store, the HTTP layer and the CLI all speak in terms of [`User`];
//! they import it from here rather than reaching into each other.

pub mod user;

pub use user::User;
