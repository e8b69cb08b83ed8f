use crate::{apply_plan, output::ApplyResult, read_plan, resolve_directory, ApplyOptions, Plan};
use anyhow::{Context, Result};
use std::path::Path;

/// Apply an in-memory plan after re-checking its directory
pub fn apply_operation(plan: &Plan, options: &ApplyOptions) -> Result<ApplyResult> {
    if !plan.entries.is_empty() {
        resolve_directory(&plan.directory)?;
    }

    let outcome = apply_plan(plan, options)
        .with_context(|| format!("Failed to apply plan {}", plan.id))?;
    Ok(ApplyResult::new(&plan.id, outcome))
}

/// Apply a plan previously written with `write_plan`
pub fn apply_plan_file(plan_path: &Path, options: &ApplyOptions) -> Result<ApplyResult> {
    let plan = read_plan(plan_path)?;
    apply_operation(&plan, options)
}
