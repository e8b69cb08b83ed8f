use anyhow::{anyhow, Result};
use batchren_core::{
    Adjustments, ApplyOptions, Config, OutputFormatter, PlanOptions, Preview, RenameOptions,
    VersionResult, Zeros,
};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

mod apply;
mod cli;
mod interactive;
mod plan;
mod rename;

use cli::{normalize_args, Cli, OutputFormat, Target};

fn main() {
    let args = normalize_args(std::env::args_os().map(|a| a.to_string_lossy().into_owned()));
    let cli = Cli::parse_from(args);

    // Load config to get defaults
    let config = Config::load().unwrap_or_default();

    match run(&cli, &config) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// Exit code for an error that stopped the run before anything was renamed
fn exit_code(e: &anyhow::Error) -> i32 {
    let message = format!("{e:#}");
    if message.contains("conflict") {
        1 // Conflicts
    } else if message.contains("invalid")
        || message.contains("not found")
        || message.contains("protected directory")
    {
        2 // Invalid input
    } else {
        3 // Internal error
    }
}

/// CLI flags layered over the config file
fn rename_options(cli: &Cli, config: &Config) -> RenameOptions {
    let preview = if cli.output == OutputFormat::Json {
        Preview::None // No preview for JSON output
    } else {
        cli.preview.map(Into::into).unwrap_or_else(|| {
            Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table)
        })
    };

    let extensions = if cli.extensions.is_empty() {
        config.defaults.extensions.clone()
    } else {
        cli.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    };

    let zeros = match (cli.pad, cli.strip_zeros) {
        (Some(width), _) => Some(Zeros::Pad(width)),
        (None, true) => Some(Zeros::Strip),
        (None, false) => None,
    };

    RenameOptions {
        plan: PlanOptions {
            extensions,
            policy: config.policy,
            adjust: Adjustments {
                strip_suffix: cli.strip_suffix.clone(),
                zeros,
            },
        },
        apply: ApplyOptions {
            log_file: cli
                .log_file
                .clone()
                .or_else(|| config.defaults.log_file.clone()),
        },
        preview,
        use_color: if cli.no_color {
            Some(false)
        } else {
            config.defaults.use_color
        },
        dry_run: cli.dry_run,
        assume_yes: cli.yes,
    }
}

fn run(cli: &Cli, config: &Config) -> Result<bool> {
    if cli.version {
        handle_version(cli.output);
        return Ok(true);
    }

    let options = rename_options(cli, config);
    let verbose = cli.verbose && cli.output == OutputFormat::Summary;

    if let Some(plan_path) = &cli.apply_plan {
        return apply::handle_apply(plan_path, &options.apply, cli.output);
    }

    let (dir, pattern, replacement) = match cli.target() {
        Target::CurrentDir {
            pattern,
            replacement,
        } => (PathBuf::from("."), pattern, replacement),
        Target::Directory {
            directory,
            pattern,
            replacement,
        } => (directory, pattern, replacement),
        Target::Interactive => {
            if cli.plan_out.is_some() {
                return Err(anyhow!(
                    "invalid arguments: --plan-out needs a pattern and a replacement"
                ));
            }
            let stdin = io::stdin();
            interactive::Session::new(stdin.lock(), io::stdout(), &options, verbose).run()?;
            return Ok(true);
        },
    };

    if let Some(plan_out) = &cli.plan_out {
        plan::handle_plan(
            &dir,
            &pattern,
            &replacement,
            &options,
            plan_out,
            cli.output,
            verbose,
        )?;
        return Ok(true);
    }

    rename::handle_rename(&dir, &pattern, &replacement, &options, cli.output, verbose)
}

fn handle_version(output: OutputFormat) {
    let version_result = VersionResult {
        name: "batchren".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
}
