use crate::scanner::{Plan, RenamePlanEntry};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for applying a renaming plan
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Append-only apply log; `None` disables logging
    pub log_file: Option<PathBuf>,
}

/// What happened to a plan's entries.
///
/// `failed` is 0 or 1: the first unexpected filesystem error aborts the
/// apply and rolls back everything still staged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Temporary files rollback could not move back to their original names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stranded: Vec<PathBuf>,
    /// First write error on the apply log; nothing was logged after it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_error: Option<String>,
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Clone)]
struct Staged {
    source: PathBuf,
    temp: PathBuf,
    destination: PathBuf,
    /// The temp has been moved on, to the destination or back to the source
    settled: bool,
}

/// Tracks the state of an apply operation
struct ApplyState {
    staged: Vec<Staged>,
    log_file: Option<File>,
    log_error: Option<String>,
}

impl ApplyState {
    fn new(log_file: Option<&Path>) -> Result<Self> {
        let log_file = if let Some(path) = log_file {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open apply log {}", path.display()))?,
            )
        } else {
            None
        };

        Ok(Self {
            staged: Vec::new(),
            log_file,
            log_error: None,
        })
    }

    /// A failed write closes the log and is kept for the outcome; the
    /// renames themselves carry on.
    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.log_file {
            if let Err(e) = write_log_line(file, message) {
                self.log_error = Some(format!("Failed to write apply log: {}", e));
                self.log_file = None;
            }
        }
    }
}

fn write_log_line(file: &mut File, message: &str) -> std::io::Result<()> {
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;
    file.flush()
}

/// Temporary name beside `source`, unique per call.
fn temp_path(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!(
        ".{}.{}.batchren.tmp",
        name,
        uuid::Uuid::new_v4().simple()
    ))
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Move every source to a temporary name beside it.
fn stage(
    entries: &[&RenamePlanEntry],
    state: &mut ApplyState,
    outcome: &mut ApplyOutcome,
) -> Result<()> {
    for entry in entries {
        if !occupied(&entry.source) && occupied(&entry.destination) {
            state.log(&format!(
                "Skipping {}: already renamed to {}",
                entry.source.display(),
                entry.destination.display()
            ));
            outcome.skipped += 1;
            continue;
        }

        let temp = temp_path(&entry.source);
        fs::rename(&entry.source, &temp).with_context(|| {
            format!(
                "Failed to move {} to temporary name {}",
                entry.source.display(),
                temp.display()
            )
        })?;
        state.log(&format!("Staged {} as {}", entry.source.display(), temp.display()));

        state.staged.push(Staged {
            source: entry.source.clone(),
            temp,
            destination: entry.destination.clone(),
            settled: false,
        });
    }
    Ok(())
}

/// Move every staged temp to its destination, or back to its source when
/// the destination is taken.
fn commit(state: &mut ApplyState, outcome: &mut ApplyOutcome) -> Result<()> {
    for i in 0..state.staged.len() {
        let Staged {
            source,
            temp,
            destination,
            ..
        } = state.staged[i].clone();

        if occupied(&destination) {
            if occupied(&source) {
                return Err(anyhow!(
                    "Cannot restore {}: {} exists and {} was taken meanwhile",
                    temp.display(),
                    destination.display(),
                    source.display()
                ));
            }
            fs::rename(&temp, &source)
                .with_context(|| format!("Failed to restore {}", source.display()))?;
            state.staged[i].settled = true;
            state.log(&format!(
                "Skipped {}: {} already exists",
                source.display(),
                destination.display()
            ));
            outcome.skipped += 1;
            continue;
        }

        fs::rename(&temp, &destination).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                source.display(),
                destination.display()
            )
        })?;
        state.staged[i].settled = true;
        state.log(&format!("Renamed {} -> {}", source.display(), destination.display()));
        outcome.renamed += 1;
    }
    Ok(())
}

/// Move every unsettled temp back to its original name. Never overwrites;
/// errors are logged and the temp is reported as stranded.
fn rollback(state: &mut ApplyState, outcome: &mut ApplyOutcome) {
    state.log("Starting rollback");

    let pending: Vec<Staged> = state.staged.iter().filter(|s| !s.settled).cloned().collect();
    for staged in pending {
        if !occupied(&staged.temp) {
            continue;
        }

        if occupied(&staged.source) {
            state.log(&format!(
                "Cannot restore {}: {} exists",
                staged.temp.display(),
                staged.source.display()
            ));
            outcome.stranded.push(staged.temp);
            continue;
        }

        match fs::rename(&staged.temp, &staged.source) {
            Ok(()) => state.log(&format!("Restored {}", staged.source.display())),
            Err(e) => {
                state.log(&format!(
                    "Failed to restore {} from {}: {}",
                    staged.source.display(),
                    staged.temp.display(),
                    e
                ));
                outcome.stranded.push(staged.temp);
            },
        }
    }

    state.log("Rollback finished");
}

/// Apply a renaming plan in two phases: stage every source under a
/// temporary name, then commit every temp to its destination.
///
/// `Err` only when the apply log cannot be opened; filesystem failures
/// during the phases end up in the returned outcome.
pub fn apply_plan(plan: &Plan, options: &ApplyOptions) -> Result<ApplyOutcome> {
    let mut state = ApplyState::new(options.log_file.as_deref())?;
    let mut outcome = ApplyOutcome::default();

    state.log(&format!(
        "Applying plan {} ({} entries) in {}",
        plan.id,
        plan.entries.len(),
        plan.directory.display()
    ));

    let mut pending = Vec::new();
    for entry in &plan.entries {
        if entry.source == entry.destination {
            outcome.skipped += 1;
        } else {
            pending.push(entry);
        }
    }

    let result = stage(&pending, &mut state, &mut outcome)
        .and_then(|()| commit(&mut state, &mut outcome));

    if let Err(e) = result {
        let message = format!("{:#}", e);
        state.log(&format!("Error: {}", message));
        outcome.failed = 1;
        outcome.error = Some(message);
        rollback(&mut state, &mut outcome);
    }

    state.log(&format!(
        "Finished plan {}: {} renamed, {} skipped, {} failed",
        plan.id, outcome.renamed, outcome.skipped, outcome.failed
    ));
    outcome.log_error = state.log_error;

    Ok(outcome)
}
