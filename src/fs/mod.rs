//! Filesystem utilities for orca.

pub mod atomic;

pub use atomic::atomic_write;
