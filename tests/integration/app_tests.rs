use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use jardupe::cli::Cli;
use jardupe::error::ExitCode;
use jardupe::output::DuplicatesDetected;
use tempfile::tempdir;

use super::support::{create_jar, jar_dependency, lock_env, root_dependency, write_manifest};

/// Manifest with `g1:a1` and `g1:a2` both shipping `com.example.Widget`.
fn conflicting_manifest(dir: &Path) -> PathBuf {
    let a1 = create_jar(dir, "a1.jar", &["com/example/Widget.class", "com/example/A.class"]);
    let a2 = create_jar(dir, "a2.jar", &["com/example/Widget.class"]);
    write_manifest(
        dir,
        &[
            root_dependency(),
            jar_dependency("g1", "a1", "compile", &a1),
            jar_dependency("g1", "a2", "compile", &a2),
        ],
    )
}

fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("jardupe-test.toml");
    fs::write(&path, "").unwrap();
    path
}

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let mut argv = vec!["jardupe", "-q"];
    argv.extend_from_slice(args);
    jardupe::run_app(Cli::try_parse_from(argv).unwrap())
}

#[test]
fn test_run_app_clean_manifest_succeeds() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let jar = create_jar(dir.path(), "a.jar", &["com/example/A.class"]);
    let manifest = write_manifest(dir.path(), &[jar_dependency("g", "a", "compile", &jar)]);
    let config = empty_config(dir.path());

    let code = run(&[
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_duplicates_fail_with_dedicated_error() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());
    let config = empty_config(dir.path());

    let err = run(&[
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap_err();

    let detected = err.downcast_ref::<DuplicatesDetected>().unwrap();
    assert_eq!(detected.classes, 1);
    assert_eq!(err.to_string(), "duplicate classes in dependencies detected");
    assert_eq!(ExitCode::for_error(&err), ExitCode::DuplicatesFound);
}

#[test]
fn test_run_app_cli_exclude_resolves_conflict() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());
    let config = empty_config(dir.path());

    let code = run(&[
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--exclude",
        "g1:a2",
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_config_file_excludes() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());
    let config = dir.path().join("jardupe.toml");
    fs::write(&config, "excludes = [\"g1:a1\"]\n").unwrap();

    let code = run(&[
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_skip_bypasses_analysis() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());

    // The manifest does not even exist: nothing is read when skipping.
    let code = run(&[
        "check",
        dir.path().join("missing.json").to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--skip",
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_missing_manifest_is_general_error() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());

    let err = run(&[
        "check",
        dir.path().join("missing.json").to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_run_app_missing_config_is_error() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());

    let err = run(&[
        "check",
        manifest.to_str().unwrap(),
        "--config",
        dir.path().join("absent.toml").to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("Configuration file not found"));
}

#[test]
fn test_run_app_stamp_skips_unchanged_manifest() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let jar = create_jar(dir.path(), "a.jar", &["com/example/A.class"]);
    let manifest = write_manifest(dir.path(), &[jar_dependency("g", "a", "compile", &jar)]);
    let config = empty_config(dir.path());
    let stamp = dir.path().join("target/jardupe.stamp");

    let args = [
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--stamp",
        stamp.to_str().unwrap(),
    ];

    assert_eq!(run(&args).unwrap(), ExitCode::Success);
    assert!(stamp.exists());

    // Unchanged manifest: the broken jar is never opened.
    fs::write(&jar, b"no longer a zip").unwrap();
    assert_eq!(run(&args).unwrap(), ExitCode::Success);

    // Any manifest change triggers a new analysis.
    let manifest_text = fs::read_to_string(&manifest).unwrap();
    fs::write(&manifest, format!("{manifest_text}\n")).unwrap();
    assert!(run(&args).is_err());
}

#[test]
fn test_run_app_stamp_reruns_when_excludes_change() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());
    let config = empty_config(dir.path());
    let stamp = dir.path().join("jardupe.stamp");
    let base = [
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--stamp",
        stamp.to_str().unwrap(),
    ];

    let mut excluded = base.to_vec();
    excluded.extend_from_slice(&["-e", "g1:a2"]);
    assert_eq!(run(&excluded).unwrap(), ExitCode::Success);
    assert!(stamp.exists());
    assert_eq!(run(&excluded).unwrap(), ExitCode::Success);

    // Same manifest, exclusion dropped: the conflict must surface again.
    let err = run(&base).unwrap_err();
    assert!(err.downcast_ref::<DuplicatesDetected>().is_some());
}

#[test]
fn test_run_app_failed_check_does_not_record_stamp() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let manifest = conflicting_manifest(dir.path());
    let config = empty_config(dir.path());
    let stamp = dir.path().join("jardupe.stamp");

    let args = [
        "check",
        manifest.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--stamp",
        stamp.to_str().unwrap(),
    ];

    assert!(run(&args).is_err());
    assert!(!stamp.exists());
    assert!(run(&args).is_err());
}

#[test]
fn test_run_app_json_and_csv_outputs() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let jar = create_jar(dir.path(), "a.jar", &["com/example/A.class"]);
    let manifest = write_manifest(dir.path(), &[jar_dependency("g", "a", "compile", &jar)]);
    let config = empty_config(dir.path());

    for format in ["json", "csv", "text"] {
        let code = run(&[
            "check",
            manifest.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--output",
            format,
        ])
        .unwrap();
        assert_eq!(code, ExitCode::Success);
    }
}
