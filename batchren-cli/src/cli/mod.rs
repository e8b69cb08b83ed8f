pub mod args;
pub mod types;

pub use args::{normalize_args, Cli, Target};
pub use types::OutputFormat;
