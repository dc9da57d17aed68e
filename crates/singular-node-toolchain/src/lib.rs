//! Installs the pinned Node.js engine and its package managers, and runs
//! them with a controlled environment.
//!
//! Everything here blocks: filesystem work and child processes complete
//! before the call returns.

pub mod archive;
pub mod command;
pub mod engine;
pub mod log;
pub mod manager;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use command::NodeCommand;
pub use engine::install_engine;
pub use manager::{install_manager, ManagerInstall};
pub use sync::{completion_marker, is_synced, run_managed, sync_dependencies, SyncInputs};
