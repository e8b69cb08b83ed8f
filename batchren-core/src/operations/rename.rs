use crate::{
    apply_plan, output::RenameResult, plan_operation, render_plan, ApplyOptions, Plan,
    PlanOptions, Preview,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Options for [`rename_operation`]
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub plan: PlanOptions,
    pub apply: ApplyOptions,
    pub preview: Preview,
    pub use_color: Option<bool>,
    pub dry_run: bool,
    /// Apply without asking
    pub assume_yes: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            plan: PlanOptions::default(),
            apply: ApplyOptions::default(),
            preview: Preview::Table,
            use_color: None,
            dry_run: false,
            assume_yes: false,
        }
    }
}

fn result_for(plan: Plan, dry_run: bool) -> RenameResult {
    RenameResult {
        plan_id: plan.id.clone(),
        directory: plan.directory.clone(),
        prefix: plan.prefix.clone(),
        replacement: plan.replacement.clone(),
        blocked: plan.stats.blocked,
        renamed: 0,
        skipped: 0,
        failed: 0,
        applied: false,
        dry_run,
        error: None,
        stranded: vec![],
        log_error: None,
        plan: Some(plan),
    }
}

/// Rename operation - plan, preview, confirm, apply
///
/// `confirm` receives the plan and its rendered preview and decides whether
/// to go ahead. It is not called for dry runs, with `assume_yes`, or when
/// there is nothing to rename. The returned message is the preview when it
/// was not handed to `confirm`, or a short note about why nothing happened.
pub fn rename_operation<F>(
    dir: &Path,
    prefix: &str,
    replacement: &str,
    options: &RenameOptions,
    confirm: F,
) -> Result<(RenameResult, Option<String>)>
where
    F: FnOnce(&Plan, &str) -> Result<bool>,
{
    let plan = plan_operation(dir, prefix, replacement, &options.plan)?;
    let preview = render_plan(&plan, options.preview, options.use_color);

    if plan.is_empty() {
        let message = if plan.stats.candidates == 0 {
            format!("No files to rename in {}", plan.directory.display())
        } else {
            format!("Nothing to rename for '{}' -> '{}'", prefix, replacement)
        };
        let mut output = preview;
        output.push_str(&message);
        return Ok((result_for(plan, options.dry_run), Some(output)));
    }

    if options.dry_run {
        return Ok((result_for(plan, true), Some(preview)));
    }

    let mut message = None;
    if options.assume_yes {
        message = Some(preview);
    } else if !confirm(&plan, &preview)? {
        return Ok((result_for(plan, false), Some("Aborted.".to_string())));
    }

    let outcome = apply_plan(&plan, &options.apply)
        .with_context(|| format!("Failed to apply plan {}", plan.id))?;

    let mut result = result_for(plan, false);
    result.applied = true;
    result.renamed = outcome.renamed;
    result.skipped = outcome.skipped;
    result.failed = outcome.failed;
    result.error = outcome.error;
    result.stranded = outcome.stranded;
    result.log_error = outcome.log_error;

    Ok((result, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> RenameOptions {
        RenameOptions {
            preview: Preview::Summary,
            use_color: Some(false),
            ..RenameOptions::default()
        }
    }

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("img005_a.jpg"), "a").unwrap();
        fs::write(temp.path().join("img007_b.jpg"), "b").unwrap();
        temp
    }

    #[test]
    fn test_confirmed_rename_applies() {
        let temp = setup();
        let asked = Cell::new(false);

        let (result, message) =
            rename_operation(temp.path(), "img005", "img010", &options(), |plan, preview| {
                asked.set(true);
                assert_eq!(plan.entries.len(), 2);
                assert!(preview.contains("[PLAN SUMMARY]"));
                Ok(true)
            })
            .unwrap();

        assert!(asked.get());
        assert!(message.is_none());
        assert!(result.applied);
        assert_eq!(result.renamed, 2);
        assert!(temp.path().join("img010_a.jpg").exists());
        assert!(temp.path().join("img012_b.jpg").exists());
    }

    #[test]
    fn test_declined_rename_changes_nothing() {
        let temp = setup();
        let (result, message) =
            rename_operation(temp.path(), "img005", "img010", &options(), |_, _| Ok(false)).unwrap();

        assert!(!result.applied);
        assert_eq!(message.as_deref(), Some("Aborted."));
        assert!(temp.path().join("img005_a.jpg").exists());
    }

    #[test]
    fn test_dry_run_never_confirms() {
        let temp = setup();
        let mut opts = options();
        opts.dry_run = true;

        let (result, message) = rename_operation(temp.path(), "img005", "img010", &opts, |_, _| {
            panic!("dry run must not ask")
        })
        .unwrap();

        assert!(result.dry_run);
        assert!(!result.applied);
        assert!(message.unwrap().contains("img005_a.jpg -> img010_a.jpg"));
        assert!(temp.path().join("img005_a.jpg").exists());
    }

    #[test]
    fn test_assume_yes_skips_confirmation() {
        let temp = setup();
        let mut opts = options();
        opts.assume_yes = true;

        let (result, message) = rename_operation(temp.path(), "img005", "img010", &opts, |_, _| {
            panic!("--yes must not ask")
        })
        .unwrap();

        assert_eq!(result.renamed, 2);
        assert!(message.unwrap().contains("[RENAMES]"));
    }

    #[test]
    fn test_nothing_to_rename() {
        let temp = setup();
        let (result, message) =
            rename_operation(temp.path(), "vacation", "holiday", &options(), |_, _| {
                panic!("empty plan must not ask")
            })
            .unwrap();

        assert!(!result.applied);
        assert_eq!(result.blocked, 2);
        assert!(message.unwrap().contains("Nothing to rename"));
    }
}
