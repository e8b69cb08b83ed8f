use anyhow::{Context, Result};
use batchren_core::preview::should_use_color;
use batchren_core::{rename_operation, render_diagnostics, OutputFormatter, RenameOptions};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::OutputFormat;

/// Plan, preview, confirm and apply. Returns whether the apply (if any)
/// went through without a rollback.
pub fn handle_rename(
    dir: &Path,
    pattern: &str,
    replacement: &str,
    options: &RenameOptions,
    output: OutputFormat,
    verbose: bool,
) -> Result<bool> {
    let use_color = should_use_color(options.use_color);
    let mut shown_diagnostics = false;

    let (result, message) =
        rename_operation(dir, pattern, replacement, options, |plan, preview| {
            print!("{}", preview);
            if verbose {
                print!("{}", render_diagnostics(plan, use_color));
                shown_diagnostics = true;
            }
            get_user_confirmation()
        })?;

    if let Some(message) = message {
        if output == OutputFormat::Summary {
            println!("{}", message.trim_end());
        }
    }
    if verbose && !shown_diagnostics {
        if let Some(plan) = &result.plan {
            print!("{}", render_diagnostics(plan, use_color));
        }
    }

    println!("{}", result.format(output.into()).trim_end());

    Ok(result.is_success())
}

fn get_user_confirmation() -> Result<bool> {
    get_user_confirmation_with_input(&mut io::stdin().lock())
}

fn get_user_confirmation_with_input<R: BufRead>(reader: &mut R) -> Result<bool> {
    eprint!("Apply? [y/N]: ");
    io::stderr().flush().context("Failed to flush stderr")?;

    let mut input = String::new();
    reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
