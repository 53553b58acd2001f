use jardupe::dependency::{ArtifactCoordinate, ManifestResolver};
use jardupe::duplicates::{DuplicateFinder, FinderConfig};
use tempfile::tempdir;

use super::support::{create_jar, jar_dependency, write_manifest};

#[test]
fn test_lenient_mode_reports_remaining_duplicates() {
    let dir = tempdir().unwrap();
    let a = create_jar(dir.path(), "a.jar", &["x/Shared.class"]);
    let b = create_jar(dir.path(), "b.jar", &["x/Shared.class"]);
    let corrupt = dir.path().join("corrupt.jar");
    std::fs::write(&corrupt, b"PK\x03\x04 truncated").unwrap();

    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g", "a", "compile", &a),
            jar_dependency("g", "corrupt", "compile", &corrupt),
            jar_dependency("g", "b", "runtime", &b),
        ],
    );

    let finder = DuplicateFinder::new(FinderConfig::default().with_strict(false)).unwrap();
    let (report, summary) = finder
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(summary.artifacts_scanned, 2);
    assert_eq!(summary.skipped_artifacts.len(), 1);
    assert_eq!(
        summary.skipped_artifacts[0].artifact,
        ArtifactCoordinate::new("g", "corrupt")
    );
    assert!(summary.skipped_artifacts[0].reason.contains("corrupt.jar"));
}
