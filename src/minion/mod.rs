//! Salt minion configuration editing.
//!
//! This module reads the minion config file (YAML), exposes its master list
//! as a typed record, and writes it back. Every key orca does not understand
//! is carried through the edit untouched and in its original position.

mod model;
mod operations;


pub use model::{DEFAULT_MASTER_KEY, LEGACY_MASTER_KEY, MinionConfig};
pub use operations::save;

/// Conventional location of the salt minion config.
pub const DEFAULT_MINION_CONFIG: &str = "/etc/salt/minion";
