//! Core traits for blindcopy.
//!
//! This crate defines the storage seam both engines are written against:
//! - [`ObjectStore`] - Existence probe and server-side copy for one bucket
//! - [`MemoryBackend`] / [`MemoryStore`] - In-memory implementation for tests and local runs

pub mod memory;
pub mod store;

pub use memory::*;
pub use store::*;
