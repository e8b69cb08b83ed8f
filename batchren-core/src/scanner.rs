use crate::adjust::Adjustments;
use crate::matcher::MatchCode;
use crate::policy::Policy;
use crate::rebuild::classify_and_suggest_with;
use crate::token::{extension_literal, split_extension};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extensions listed when no other set is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp", "heic", "raw", "mp4", "mov",
];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Extensions (without the dot) considered when listing a directory.
    /// Empty accepts every file.
    pub extensions: Vec<String>,
    pub policy: Policy,
    /// Suffix and leading-zero edits made after the pattern rename
    #[serde(default)]
    pub adjust: Adjustments,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            policy: Policy::default(),
            adjust: Adjustments::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlanEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Per-candidate record of what the matcher and rebuilder decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub code: MatchCode,
    pub suggested: String,
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub candidates: usize,
    pub planned: usize,
    pub blocked: usize,
    /// Candidates whose rebuilt name equals the original
    pub discarded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub created_at: String,
    pub directory: PathBuf,
    pub prefix: String,
    pub replacement: String,
    pub entries: Vec<RenamePlanEntry>,
    pub reports: Vec<FileReport>,
    pub stats: Stats,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// List the regular files directly inside `dir` whose extension is in
/// `extensions` (case-insensitive, no dot), sorted by file name.
pub fn list_candidates(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let file_type = entry.file_type()?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if extensions.is_empty() || has_listed_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_listed_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// List `dir` and plan the renames for `prefix` -> `replacement`.
pub fn scan_directory(
    dir: &Path,
    prefix: &str,
    replacement: &str,
    options: &PlanOptions,
) -> Result<Plan> {
    let files = list_candidates(dir, &options.extensions)?;
    let mut plan = plan_renames(&files, prefix, replacement, options);
    if plan.directory != dir {
        plan.directory = dir.to_path_buf();
        plan.id = generate_plan_id(dir, prefix, replacement);
    }
    Ok(plan)
}

/// Plan renames for an explicit set of files.
///
/// `options.extensions` is not consulted here; the caller picked the files.
/// Blocked files and files whose new name equals the old one (ignoring
/// case) produce no entry, only a report.
pub fn plan_renames(
    files: &[PathBuf],
    prefix: &str,
    replacement: &str,
    options: &PlanOptions,
) -> Plan {
    let prefix_extension = extension_literal(prefix);
    let by_full_name = prefix_extension.is_some() || extension_literal(replacement).is_some();

    let mut entries = Vec::new();
    let mut reports = Vec::new();
    let mut stats = Stats::default();

    for path in files {
        if let Some(wanted) = prefix_extension {
            let file_name = file_name_lossy(path);
            if !split_extension(&file_name).1.eq_ignore_ascii_case(wanted) {
                continue;
            }
        }
        stats.candidates += 1;

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            stats.blocked += 1;
            reports.push(FileReport {
                file: file_name_lossy(path),
                code: MatchCode::Blocked,
                suggested: file_name_lossy(path),
                diagnostics: vec!["file name is not valid UTF-8".to_string()],
            });
            continue;
        };

        let (stem, extension) = split_extension(name);
        let subject = if by_full_name { name } else { stem };

        let suggestion = classify_and_suggest_with(subject, prefix, replacement, &options.policy);
        let mut diagnostics = suggestion.diagnostics;

        if suggestion.code.is_blocked() {
            stats.blocked += 1;
            reports.push(FileReport {
                file: name.to_string(),
                code: suggestion.code,
                suggested: name.to_string(),
                diagnostics,
            });
            continue;
        }

        let mut new_name = suggestion.suggested;
        if !by_full_name || split_extension(&new_name).1.is_empty() {
            new_name.push_str(extension);
        }
        if !options.adjust.is_empty() {
            let (adjusted, notes) = options.adjust.apply(&new_name);
            diagnostics.extend(notes);
            new_name = adjusted;
        }

        if let Some(reason) = invalid_name_reason(&new_name) {
            diagnostics.push(reason);
            stats.blocked += 1;
            reports.push(FileReport {
                file: name.to_string(),
                code: MatchCode::Blocked,
                suggested: name.to_string(),
                diagnostics,
            });
            continue;
        }

        if new_name.to_lowercase() == name.to_lowercase() {
            stats.discarded += 1;
            diagnostics.push("new name equals the old one; nothing to do".to_string());
        } else {
            entries.push(RenamePlanEntry {
                source: path.clone(),
                destination: path.with_file_name(&new_name),
            });
        }

        reports.push(FileReport {
            file: name.to_string(),
            code: suggestion.code,
            suggested: new_name,
            diagnostics,
        });
    }

    stats.planned = entries.len();

    let directory = files
        .first()
        .and_then(|f| f.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();

    Plan {
        id: generate_plan_id(&directory, prefix, replacement),
        created_at: chrono::Local::now().to_rfc3339(),
        directory,
        prefix: prefix.to_string(),
        replacement: replacement.to_string(),
        entries,
        reports,
        stats,
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn invalid_name_reason(name: &str) -> Option<String> {
    if name.is_empty() {
        Some("rebuilt name is empty".to_string())
    } else if name == "." || name == ".." {
        Some(format!("rebuilt name '{}' is not a file name", name))
    } else if name.contains('/') || name.contains('\\') {
        Some(format!("rebuilt name '{}' contains a path separator", name))
    } else {
        None
    }
}

fn generate_plan_id(dir: &Path, prefix: &str, replacement: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dir.to_string_lossy().as_bytes());
    hasher.update(prefix.as_bytes());
    hasher.update(replacement.as_bytes());
    hasher.update(
        chrono::Local::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_string()
            .as_bytes(),
    );
    format!("{:x}", hasher.finalize())[..16].to_string()
}

pub fn write_plan(plan: &Plan, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create plan file {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, plan)?;
    Ok(())
}

pub fn read_plan(path: &Path) -> Result<Plan> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;
    let plan = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse plan file {}", path.display()))?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/photos").join(n)).collect()
    }

    fn destinations(plan: &Plan) -> Vec<String> {
        plan.entries
            .iter()
            .map(|e| e.destination.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_plan_shifts_numbers_and_keeps_extension() {
        let files = paths(&["img005_vacation.jpg", "img007_vacation.jpg"]);
        let plan = plan_renames(&files, "img005", "img010", &PlanOptions::default());

        assert_eq!(destinations(&plan), vec!["img010_vacation.jpg", "img012_vacation.jpg"]);
        assert_eq!(plan.reports[0].code, MatchCode::Identical);
        assert_eq!(plan.reports[1].code, MatchCode::NumericOnly);
        assert_eq!(plan.stats.planned, 2);
        assert_eq!(plan.directory, PathBuf::from("/photos"));
    }

    #[test]
    fn test_blocked_files_are_reported_not_planned() {
        let files = paths(&["trip_001.jpg"]);
        let plan = plan_renames(&files, "vacation", "holiday", &PlanOptions::default());

        assert!(plan.is_empty());
        assert_eq!(plan.stats.blocked, 1);
        assert_eq!(plan.reports[0].code, MatchCode::Blocked);
        assert_eq!(plan.reports[0].suggested, "trip_001.jpg");
    }

    #[test]
    fn test_extension_prefilter() {
        let files = paths(&["holiday.png", "beach.PNG", "notes.jpg"]);
        let plan = plan_renames(&files, "*.png", "*.jpg", &PlanOptions::default());

        assert_eq!(plan.stats.candidates, 2);
        assert_eq!(destinations(&plan), vec!["holiday.jpg", "beach.jpg"]);
    }

    #[test]
    fn test_full_name_subject_when_replacement_has_extension() {
        let files = paths(&["img_0099_final.jpg"]);
        let plan = plan_renames(&files, "img*", "photo.png", &PlanOptions::default());
        assert_eq!(destinations(&plan), vec!["photo.png"]);
    }

    #[test]
    fn test_case_only_change_is_discarded() {
        let files = paths(&["IMG005.jpg"]);
        let plan = plan_renames(&files, "IMG", "img", &PlanOptions::default());

        assert!(plan.is_empty());
        assert_eq!(plan.stats.discarded, 1);
        assert_eq!(plan.reports[0].suggested, "img005.jpg");
    }

    #[test]
    fn test_identity_is_discarded() {
        let files = paths(&["img005.jpg"]);
        let plan = plan_renames(&files, "img005", "img005", &PlanOptions::default());
        assert!(plan.is_empty());
        assert_eq!(plan.stats.discarded, 1);
    }

    #[test]
    fn test_adjustments_follow_the_rename() {
        let files = paths(&["img5_copy.jpg", "img7.jpg"]);
        let options = PlanOptions {
            adjust: Adjustments {
                strip_suffix: Some("_copy".to_string()),
                zeros: Some(crate::adjust::Zeros::Pad(3)),
            },
            ..PlanOptions::default()
        };
        let plan = plan_renames(&files, "img5", "pic5", &options);

        assert_eq!(destinations(&plan), vec!["pic005.jpg", "pic007.jpg"]);
        assert!(plan.reports[0]
            .diagnostics
            .iter()
            .any(|d| d == "removed suffix '_copy'"));
    }

    #[test]
    fn test_adjustments_alone_with_empty_pattern() {
        let files = paths(&["0012.jpg", "7.jpg", "0.jpg"]);
        let options = PlanOptions {
            adjust: Adjustments {
                zeros: Some(crate::adjust::Zeros::Strip),
                ..Adjustments::default()
            },
            ..PlanOptions::default()
        };
        let plan = plan_renames(&files, "", "", &options);

        assert_eq!(destinations(&plan), vec!["12.jpg"]);
        assert_eq!(plan.stats.discarded, 2);
    }

    #[test]
    fn test_rebuilt_name_with_separator_is_blocked() {
        let files = paths(&["a_1.jpg"]);
        let plan = plan_renames(&files, "a", "x/y", &PlanOptions::default());

        assert!(plan.is_empty());
        assert_eq!(plan.stats.blocked, 1);
        assert!(plan.reports[0]
            .diagnostics
            .last()
            .unwrap()
            .contains("path separator"));
    }

    #[test]
    fn test_list_candidates_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for name in ["b.JPG", "a.png", "c.txt", "noext"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }
        fs::create_dir(temp.path().join("dir.jpg")).unwrap();

        let files = list_candidates(temp.path(), &default_extensions()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG"]);

        let all = list_candidates(temp.path(), &[]).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_list_candidates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = list_candidates(&temp.path().join("missing"), &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to read directory"));
    }

    #[test]
    fn test_scan_directory_sets_metadata() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("img005.jpg"), "x").unwrap();

        let plan = scan_directory(temp.path(), "img005", "img010", &PlanOptions::default()).unwrap();
        assert_eq!(plan.id.len(), 16);
        assert_eq!(plan.directory, temp.path());
        assert_eq!(plan.entries[0].destination, temp.path().join("img010.jpg"));
    }

    #[test]
    fn test_write_and_read_plan() {
        let temp = TempDir::new().unwrap();
        let plan = plan_renames(&paths(&["img005.jpg"]), "img005", "img006", &PlanOptions::default());
        let path = temp.path().join("nested").join("plan.json");

        write_plan(&plan, &path).unwrap();
        assert_eq!(read_plan(&path).unwrap(), plan);
    }
}
