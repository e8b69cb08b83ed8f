use anyhow::Result;
use batchren_core::{apply_plan_file, ApplyOptions, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

/// Apply a plan written earlier with `--plan-out`. Returns whether every
/// entry went through.
pub fn handle_apply(plan_path: &Path, options: &ApplyOptions, output: OutputFormat) -> Result<bool> {
    let result = apply_plan_file(plan_path, options)?;

    println!("{}", result.format(output.into()).trim_end());

    Ok(result.is_success())
}
