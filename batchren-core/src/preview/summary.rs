use crate::scanner::Plan;
use std::fmt::Write;

/// Render plan as a plain, sectioned summary
pub fn render_summary(plan: &Plan) -> String {
    let mut output = String::new();

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    writeln!(output, "Directory: {}", plan.directory.display()).unwrap();
    writeln!(output, "Pattern: {}", plan.prefix).unwrap();
    writeln!(output, "Replacement: {}", plan.replacement).unwrap();
    writeln!(output, "Candidates: {}", plan.stats.candidates).unwrap();
    writeln!(output, "Renames: {}", plan.stats.planned).unwrap();
    writeln!(output, "Blocked: {}", plan.stats.blocked).unwrap();
    writeln!(output, "Unchanged: {}", plan.stats.discarded).unwrap();

    if !plan.entries.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[RENAMES]").unwrap();
        for entry in &plan.entries {
            writeln!(
                output,
                "{} -> {}",
                display_name(&entry.source),
                display_name(&entry.destination)
            )
            .unwrap();
        }
    }

    let blocked: Vec<_> = plan.reports.iter().filter(|r| r.code.is_blocked()).collect();
    if !blocked.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[BLOCKED]").unwrap();
        for report in blocked {
            // The last diagnostic states why
            match report.diagnostics.iter().rev().find(|d| !d.starts_with("result:")) {
                Some(reason) => writeln!(output, "{}: {}", report.file, reason).unwrap(),
                None => writeln!(output, "{}", report.file).unwrap(),
            }
        }
    }

    output
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
