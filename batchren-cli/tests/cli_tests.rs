use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Command running in `dir` with no inherited auto-approve or color settings
fn batchren(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("batchren").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("BATCHREN_YES")
        .env_remove("NO_COLOR");
    cmd
}

fn photos() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("img005_beach.jpg").write_str("beach").unwrap();
    temp.child("img007_city.jpg").write_str("city").unwrap();
    temp.child("trip_001.jpg").write_str("trip").unwrap();
    temp.child("notes.txt").write_str("notes").unwrap();
    temp
}

#[test]
fn test_help_flags() {
    let temp = TempDir::new().unwrap();
    for flag in ["--help", "-h", "--info", "/?"] {
        batchren(&temp)
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Rename batches of files by pattern",
            ))
            .stdout(predicate::str::contains("--dry-run"));
    }
}

#[test]
fn test_help_does_not_touch_files() {
    let temp = photos();
    batchren(&temp)
        .args(["--help", "img005", "img010"])
        .assert()
        .success();

    temp.child("img005_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("batchren 0.1.0"));
}

#[test]
fn test_version_json() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .args(["-V", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"\{"name":"batchren","version":"0\.1\.0"\}"#).unwrap());
}

#[test]
fn test_dry_run_shows_plan_and_renames_nothing() {
    let temp = photos();
    batchren(&temp)
        .args(["--dry-run", "--preview", "summary", "--no-color"])
        .arg(temp.path())
        .args(["img005", "img010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img005_beach.jpg -> img010_beach.jpg"))
        .stdout(predicate::str::contains("img007_city.jpg -> img012_city.jpg"))
        .stdout(predicate::str::contains("Dry run: no files were renamed"))
        .stdout(predicate::str::contains("notes.txt").not());

    temp.child("img005_beach.jpg").assert(predicate::path::exists());
    temp.child("img010_beach.jpg").assert(predicate::path::missing());
}

#[test]
fn test_yes_applies_in_current_directory() {
    let temp = photos();
    batchren(&temp)
        .args(["--yes", "--preview", "none", "img005", "img010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 files"))
        .stdout(predicate::str::contains("Blocked: 1 files did not match the pattern"));

    temp.child("img010_beach.jpg").assert("beach");
    temp.child("img012_city.jpg").assert("city");
    temp.child("trip_001.jpg").assert(predicate::path::exists());
    temp.child("img005_beach.jpg").assert(predicate::path::missing());
}

#[test]
fn test_yes_from_environment() {
    let temp = photos();
    batchren(&temp)
        .env("BATCHREN_YES", "1")
        .args(["--preview", "none", "img005", "img010"])
        .assert()
        .success();

    temp.child("img010_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_falsey_yes_from_environment_still_asks() {
    let temp = photos();
    batchren(&temp)
        .env("BATCHREN_YES", "0")
        .args(["--preview", "none", "img005", "img010"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Apply? [y/N]: "));

    temp.child("img005_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_no_color_from_environment() {
    let temp = photos();
    batchren(&temp)
        .env("NO_COLOR", "1")
        .args(["-n", "--preview", "summary", "img005", "img010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img005_beach.jpg -> img010_beach.jpg"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_confirmation_prompt_accepts() {
    let temp = photos();
    batchren(&temp)
        .args(["--preview", "summary", "img005", "img010"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[PLAN SUMMARY]"))
        .stderr(predicate::str::contains("Apply? [y/N]: "));

    temp.child("img010_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_confirmation_prompt_declined() {
    let temp = photos();
    batchren(&temp)
        .args(["--preview", "summary", "img005", "img010"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."))
        .stdout(predicate::str::contains("No files were renamed"));

    temp.child("img005_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_extension_change() {
    let temp = TempDir::new().unwrap();
    temp.child("holiday.png").write_str("png").unwrap();
    temp.child("party.png").write_str("png").unwrap();

    batchren(&temp)
        .args(["-y", "--preview", "none", "*.png", "*.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 files"));

    temp.child("holiday.jpg").assert("png");
    temp.child("party.jpg").assert("png");
}

#[test]
fn test_pad_and_strip_suffix() {
    let temp = TempDir::new().unwrap();
    temp.child("scan5_copy.png").write_str("5").unwrap();
    temp.child("scan12.png").write_str("12").unwrap();

    batchren(&temp)
        .args(["-y", "--preview", "none", "--pad", "3", "--strip-suffix", "_copy", "scan", "page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 files"));

    temp.child("page005.png").assert("5");
    temp.child("page012.png").assert("12");
}

#[test]
fn test_ext_flag_limits_candidates() {
    let temp = TempDir::new().unwrap();
    temp.child("img005.jpg").write_str("jpg").unwrap();
    temp.child("img005.png").write_str("png").unwrap();

    batchren(&temp)
        .args(["-y", "--preview", "none", "--ext", "png", "img005", "img006"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 1 files"));

    temp.child("img006.png").assert("png");
    temp.child("img005.jpg").assert(predicate::path::exists());
}

#[test]
fn test_json_output() {
    let temp = photos();
    let assert = batchren(&temp)
        .args(["--yes", "--output", "json", "img005", "img010"])
        .assert()
        .success();

    let stdout = assert.get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["operation"], "rename");
    assert_eq!(json["summary"]["renamed"], 2);
    assert_eq!(json["summary"]["blocked"], 1);
    assert_eq!(json["plan"]["stats"]["planned"], 2);
}

#[test]
fn test_verbose_prints_diagnostics() {
    let temp = photos();
    batchren(&temp)
        .args(["-n", "-v", "--no-color", "--preview", "none", "img005", "img010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trip_001.jpg [code 2]"))
        .stdout(predicate::str::contains("delta = 5"));
}

#[test]
fn test_log_file_is_appended() {
    let temp = photos();
    batchren(&temp)
        .args(["-y", "--preview", "none", "--log", "logs/apply.log", "img005", "img010"])
        .assert()
        .success();

    temp.child("logs/apply.log")
        .assert(predicate::str::contains("Applying plan"))
        .assert(predicate::str::contains("Renamed"));
}

#[test]
fn test_plan_out_then_apply_plan() {
    let temp = photos();
    batchren(&temp)
        .args(["--plan-out", "plan.json", "--preview", "none", "img005", "img010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan written to plan.json"));

    temp.child("plan.json").assert(predicate::path::exists());
    temp.child("img005_beach.jpg").assert(predicate::path::exists());

    batchren(&temp)
        .args(["--apply-plan", "plan.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 files"));

    temp.child("img010_beach.jpg").assert("beach");
    temp.child("img012_city.jpg").assert("city");
}

#[test]
fn test_nothing_to_rename() {
    let temp = photos();
    batchren(&temp)
        .args(["-y", "--preview", "none", "zzz", "yyy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to rename for 'zzz' -> 'yyy'"));
}

#[test]
fn test_protected_directory_is_refused() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .args(["-y", "/", "a", "b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error: Refusing to rename files"));
}

#[test]
fn test_missing_directory() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .args(["-y", "missing", "a", "b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_missing_plan_file() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .args(["--apply-plan", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read plan file"));
}

#[test]
fn test_too_many_arguments() {
    let temp = TempDir::new().unwrap();
    batchren(&temp)
        .args(["a", "b", "c", "d"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_interactive_mode_exits_at_end_of_input() {
    let temp = photos();
    batchren(&temp)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory [.]: "));

    temp.child("img005_beach.jpg").assert(predicate::path::exists());
}

#[test]
fn test_interactive_session() {
    let temp = photos();
    batchren(&temp)
        .args(["--preview", "summary"])
        .write_stdin("\nimg005\nimg010\ny\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename 2 files? [y/N]: "))
        .stdout(predicate::str::contains("✓ Renamed 2 files"));

    temp.child("img010_beach.jpg").assert("beach");
}
