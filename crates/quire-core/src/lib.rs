//! Core types and trait definitions for Quire.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend and the HTTP layer both depend on it.

pub mod actions;
pub mod article;
pub mod error;
pub mod identity;
pub mod memory;
pub mod store;
pub mod verify;

pub use error::{Error, Result};
