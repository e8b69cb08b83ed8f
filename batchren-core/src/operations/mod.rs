//! High-level operations that correspond to CLI actions
//!
//! These modules hold the flow of each batchren operation (safety check,
//! listing, planning, confirming, applying), separated from CLI concerns
//! like argument parsing and output formatting.

pub mod apply;
pub mod plan;
pub mod rename;

pub use apply::{apply_operation, apply_plan_file};
pub use plan::{plan_operation, resolve_directory};
pub use rename::{rename_operation, RenameOptions};
