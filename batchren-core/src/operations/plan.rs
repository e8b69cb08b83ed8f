use crate::{is_dangerous, safety, scan_directory, Plan, PlanOptions};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve `dir` against the current directory and refuse anything that is
/// missing, not a directory, or flagged by [`is_dangerous`].
pub fn resolve_directory(dir: &Path) -> Result<PathBuf> {
    if is_dangerous(dir) {
        return Err(anyhow!(
            "Refusing to rename files in protected directory '{}'",
            dir.display()
        ));
    }

    let absolute = safety::absolute(dir)
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))?;

    if !absolute.is_dir() {
        return Err(anyhow!("Directory not found: {}", dir.display()));
    }

    Ok(absolute)
}

/// Plan operation - safety check, listing and planning
pub fn plan_operation(
    dir: &Path,
    prefix: &str,
    replacement: &str,
    options: &PlanOptions,
) -> Result<Plan> {
    let directory = resolve_directory(dir)?;
    scan_directory(&directory, prefix, replacement, options)
        .with_context(|| format!("Failed to plan '{prefix}' -> '{replacement}'"))
}
