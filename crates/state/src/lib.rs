//! Workspace state providers for revroute.
//!
//! Both implementations hand out a fresh snapshot on every call; neither
//! caches across calls.

pub mod file_backend;
pub mod in_memory;

pub use file_backend::FileStateProvider;
pub use in_memory::InMemoryStateProvider;
