use crate::apply::ApplyOutcome;
use crate::scanner::Plan;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub plan_id: String,
    pub directory: PathBuf,
    pub prefix: String,
    pub replacement: String,
    pub candidates: usize,
    pub renames: usize,
    pub blocked: usize,
    pub unchanged: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl From<&Plan> for PlanResult {
    fn from(plan: &Plan) -> Self {
        Self {
            plan_id: plan.id.clone(),
            directory: plan.directory.clone(),
            prefix: plan.prefix.clone(),
            replacement: plan.replacement.clone(),
            candidates: plan.stats.candidates,
            renames: plan.stats.planned,
            blocked: plan.stats.blocked,
            unchanged: plan.stats.discarded,
            plan: None,
        }
    }
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub plan_id: String,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stranded: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

impl ApplyResult {
    pub fn new(plan_id: &str, outcome: ApplyOutcome) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            renamed: outcome.renamed,
            skipped: outcome.skipped,
            failed: outcome.failed,
            error: outcome.error,
            stranded: outcome.stranded,
            log_error: outcome.log_error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Result of a rename operation (plan, confirm, apply)
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub plan_id: String,
    pub directory: PathBuf,
    pub prefix: String,
    pub replacement: String,
    pub blocked: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// false for dry runs, declined confirmations and empty plans
    pub applied: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stranded: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl RenameResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn write_failure(
    output: &mut String,
    error: Option<&String>,
    stranded: &[PathBuf],
    log_error: Option<&String>,
) {
    if let Some(error) = error {
        writeln!(output, "✗ Rename failed and was rolled back: {}", error).unwrap();
    }
    for temp in stranded {
        writeln!(output, "✗ Could not restore {}", temp.display()).unwrap();
    }
    if let Some(log_error) = log_error {
        writeln!(output, "⚠ Apply log is incomplete: {}", log_error).unwrap();
    }
}

impl OutputFormatter for PlanResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "plan_id": self.plan_id,
            "directory": self.directory,
            "prefix": self.prefix,
            "replacement": self.replacement,
            "summary": {
                "candidates": self.candidates,
                "renames": self.renames,
                "blocked": self.blocked,
                "unchanged": self.unchanged,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Batchren plan: {} -> {} in {}",
            self.prefix,
            self.replacement,
            self.directory.display()
        )
        .unwrap();
        writeln!(
            output,
            "Files: {} candidates, {} renames, {} blocked, {} unchanged",
            self.candidates, self.renames, self.blocked, self.unchanged
        )
        .unwrap();
        writeln!(output, "Plan ID: {}", self.plan_id).unwrap();

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "apply",
            "plan_id": self.plan_id,
            "summary": {
                "renamed": self.renamed,
                "skipped": self.skipped,
                "failed": self.failed,
            },
            "error": self.error,
            "stranded": self.stranded,
            "log_error": self.log_error,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(output, "✓ Renamed {} files", self.renamed).unwrap();
        if self.skipped > 0 {
            writeln!(output, "✓ Skipped {} files", self.skipped).unwrap();
        }
        write_failure(
            &mut output,
            self.error.as_ref(),
            &self.stranded,
            self.log_error.as_ref(),
        );
        writeln!(output, "Plan ID: {}", self.plan_id).unwrap();

        output
    }
}

impl OutputFormatter for RenameResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "rename",
            "plan_id": self.plan_id,
            "directory": self.directory,
            "prefix": self.prefix,
            "replacement": self.replacement,
            "applied": self.applied,
            "dry_run": self.dry_run,
            "summary": {
                "renamed": self.renamed,
                "skipped": self.skipped,
                "failed": self.failed,
                "blocked": self.blocked,
            },
            "error": self.error,
            "stranded": self.stranded,
            "log_error": self.log_error,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.dry_run {
            writeln!(output, "Dry run: no files were renamed").unwrap();
        } else if !self.applied && self.failed == 0 {
            writeln!(output, "No files were renamed").unwrap();
        } else {
            writeln!(output, "✓ Renamed {} files", self.renamed).unwrap();
            if self.skipped > 0 {
                writeln!(output, "✓ Skipped {} files (destination exists)", self.skipped).unwrap();
            }
        }

        if self.blocked > 0 {
            writeln!(output, "Blocked: {} files did not match the pattern", self.blocked).unwrap();
        }
        write_failure(
            &mut output,
            self.error.as_ref(),
            &self.stranded,
            self.log_error.as_ref(),
        );

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename_result() -> RenameResult {
        RenameResult {
            plan_id: "abc123".to_string(),
            directory: PathBuf::from("/photos"),
            prefix: "img005".to_string(),
            replacement: "img010".to_string(),
            blocked: 1,
            renamed: 3,
            skipped: 1,
            failed: 0,
            applied: true,
            dry_run: false,
            error: None,
            stranded: vec![],
            log_error: None,
            plan: None,
        }
    }

    #[test]
    fn test_output_format_from_str() {
        use std::str::FromStr;
        assert_eq!(OutputFormat::from_str("JSON"), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("summary"), Ok(OutputFormat::Summary));
        assert!(OutputFormat::from_str("table").is_err());
    }

    #[test]
    fn test_plan_result_summary_format() {
        let result = PlanResult {
            plan_id: "abc123".to_string(),
            directory: PathBuf::from("/photos"),
            prefix: "img005".to_string(),
            replacement: "img010".to_string(),
            candidates: 5,
            renames: 3,
            blocked: 1,
            unchanged: 1,
            plan: None,
        };

        let output = result.format_summary();
        assert!(output.contains("Batchren plan: img005 -> img010 in /photos"));
        assert!(output.contains("Files: 5 candidates, 3 renames, 1 blocked, 1 unchanged"));
        assert!(output.contains("Plan ID: abc123"));
    }

    #[test]
    fn test_plan_result_json_format() {
        let result = PlanResult {
            plan_id: "abc123".to_string(),
            directory: PathBuf::from("/photos"),
            prefix: "*.png".to_string(),
            replacement: "*.jpg".to_string(),
            candidates: 2,
            renames: 2,
            blocked: 0,
            unchanged: 0,
            plan: None,
        };

        let parsed: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();
        assert_eq!(parsed["operation"], "plan");
        assert_eq!(parsed["summary"]["renames"], 2);
        assert_eq!(parsed["prefix"], "*.png");
        assert!(parsed["plan"].is_null());
    }

    #[test]
    fn test_apply_result_from_outcome() {
        let outcome = ApplyOutcome {
            renamed: 1,
            skipped: 0,
            failed: 1,
            error: Some("Failed to rename a.jpg to b.jpg".to_string()),
            stranded: vec![PathBuf::from("/photos/.a.jpg.0.batchren.tmp")],
            log_error: Some("Failed to write apply log: disk full".to_string()),
        };
        let result = ApplyResult::new("abc123", outcome);
        assert!(!result.is_success());

        let summary = result.format_summary();
        assert!(summary.contains("✓ Renamed 1 files"));
        assert!(summary.contains("✗ Rename failed and was rolled back: Failed to rename"));
        assert!(summary.contains("✗ Could not restore /photos/.a.jpg.0.batchren.tmp"));
        assert!(summary.contains("⚠ Apply log is incomplete: Failed to write apply log"));

        let parsed: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["summary"]["failed"], 1);
    }

    #[test]
    fn test_rename_result_summary_format() {
        let output = rename_result().format_summary();
        assert!(output.contains("✓ Renamed 3 files"));
        assert!(output.contains("✓ Skipped 1 files (destination exists)"));
        assert!(output.contains("Blocked: 1 files"));
        assert!(!output.contains('✗'));
    }

    #[test]
    fn test_rename_result_dry_run_summary() {
        let mut result = rename_result();
        result.dry_run = true;
        result.applied = false;
        result.renamed = 0;
        assert!(result.format_summary().starts_with("Dry run: no files were renamed"));
    }

    #[test]
    fn test_rename_result_json_format() {
        let parsed: serde_json::Value =
            serde_json::from_str(&rename_result().format_json()).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["operation"], "rename");
        assert_eq!(parsed["applied"], true);
        assert_eq!(parsed["summary"]["renamed"], 3);
        assert_eq!(parsed["stranded"], serde_json::json!([]));
    }

    #[test]
    fn test_version_result_formats() {
        let result = VersionResult {
            name: "batchren".to_string(),
            version: "0.1.0".to_string(),
        };
        assert_eq!(result.format(OutputFormat::Summary), "batchren 0.1.0");
        assert_eq!(
            result.format(OutputFormat::Json),
            r#"{"name":"batchren","version":"0.1.0"}"#
        );
    }
}
