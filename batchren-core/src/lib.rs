#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod adjust;
pub mod apply;
pub mod config;
pub mod matcher;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod policy;
pub mod preview;
pub mod rebuild;
pub mod safety;
pub mod scanner;
pub mod token;

pub use adjust::{Adjustments, Zeros};
pub use apply::{apply_plan, ApplyOptions, ApplyOutcome};
pub use config::{Config, DefaultsConfig};
pub use matcher::{match_tokens, MatchCode, MatchResult};
pub use operations::{
    apply_operation, apply_plan_file, plan_operation, rename_operation, resolve_directory,
    RenameOptions,
};
pub use output::{
    ApplyResult, OutputFormat, OutputFormatter, PlanResult, RenameResult, VersionResult,
};
pub use pattern::{build_pattern, CapturePattern, Captures};
pub use policy::Policy;
pub use preview::{render_diagnostics, render_plan, write_preview, Preview};
pub use rebuild::{classify_and_suggest, classify_and_suggest_with, rebuild, rebuild_with, Rebuild, Suggestion};
pub use safety::is_dangerous;
pub use scanner::{
    default_extensions, list_candidates, plan_renames, read_plan, scan_directory, write_plan,
    FileReport, Plan, PlanOptions, RenamePlanEntry, Stats,
};
pub use token::{parse, tokenize, tokenize_filename, tokenize_pattern, Token, TokenKind};
