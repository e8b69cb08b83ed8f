use anyhow::Result;
use batchren_core::preview::should_use_color;
use batchren_core::{
    plan_operation, render_diagnostics, write_plan, write_preview, OutputFormatter, PlanResult,
    RenameOptions,
};
use std::path::Path;

use crate::OutputFormat;

/// Plan without renaming and save the plan for a later `--apply-plan`
pub fn handle_plan(
    dir: &Path,
    pattern: &str,
    replacement: &str,
    options: &RenameOptions,
    plan_out: &Path,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let plan = plan_operation(dir, pattern, replacement, &options.plan)?;

    if output == OutputFormat::Summary {
        write_preview(&plan, options.preview, options.use_color)?;
        if verbose {
            print!("{}", render_diagnostics(&plan, should_use_color(options.use_color)));
        }
    }

    write_plan(&plan, plan_out)?;

    let mut result = PlanResult::from(&plan);
    if output == OutputFormat::Json {
        result.plan = Some(plan);
    }
    println!("{}", result.format(output.into()).trim_end());
    if output == OutputFormat::Summary {
        println!("Plan written to {}", plan_out.display());
    }

    Ok(())
}
