use jardupe::dependency::{ArtifactCoordinate, DependencyEdge, ManifestResolver, Scope};
use jardupe::duplicates::{DuplicateFinder, FinderConfig};
use jardupe::output::format_report;
use tempfile::tempdir;

use super::support::{
    create_jar, create_jar_with_repeated_entries, jar_dependency, root_dependency, write_manifest,
};

fn coord(group: &str, artifact: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new(group, artifact)
}

#[test]
fn test_no_duplicates_passes() {
    let dir = tempdir().unwrap();
    let a = create_jar(dir.path(), "a.jar", &["com/example/A.class"]);
    let b = create_jar(dir.path(), "b.jar", &["com/example/B.class"]);
    let manifest = write_manifest(
        dir.path(),
        &[
            root_dependency(),
            jar_dependency("g", "a", "compile", &a),
            jar_dependency("g", "b", "runtime", &b),
        ],
    );

    let finder = DuplicateFinder::with_defaults();
    let (report, summary) = finder
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.total_dependencies, 3);
    assert_eq!(summary.artifacts_scanned, 2);
    assert!(format_report(&report).success);
}

#[test]
fn test_widget_duplicate_in_either_order() {
    let dir = tempdir().unwrap();
    let a1 = create_jar(dir.path(), "a1.jar", &["com/example/Widget.class"]);
    let a2 = create_jar(dir.path(), "a2.jar", &["com/example/Widget.class"]);

    let forward = vec![
        DependencyEdge::new("g1", "a1", "1").with_scope(Scope::Compile).with_file(&a1),
        DependencyEdge::new("g1", "a2", "1").with_scope(Scope::Compile).with_file(&a2),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(&forward).unwrap();
    let (second, _) = finder.find_duplicates(&backward).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.get("com.example.Widget").unwrap(),
        &[coord("g1", "a1"), coord("g1", "a2")]
    );

    let verdict = format_report(&first);
    assert!(!verdict.success);
    assert_eq!(
        verdict.messages,
        vec!["The class: com.example.Widget is present in the artifacts: g1:a1, g1:a2".to_string()]
    );
}

#[test]
fn test_repeated_entry_in_one_jar_is_reported() {
    let dir = tempdir().unwrap();
    let jar = create_jar_with_repeated_entries(
        dir.path(),
        "a.jar",
        &["a/A.class", "a/A.class", "b/B.class"],
    );
    let manifest = write_manifest(dir.path(), &[jar_dependency("g", "a", "compile", &jar)]);

    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.get("a.A").unwrap(), &[coord("g", "a"), coord("g", "a")]);
    assert_eq!(summary.class_entries, 3);
    assert!(!format_report(&report).success);
}

#[test]
fn test_test_and_provided_scopes_ignored() {
    let dir = tempdir().unwrap();
    let main = create_jar(dir.path(), "main.jar", &["com/example/Widget.class"]);
    let tests = create_jar(dir.path(), "tests.jar", &["com/example/Widget.class"]);
    let provided = create_jar(dir.path(), "provided.jar", &["com/example/Widget.class"]);
    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g", "main", "compile", &main),
            jar_dependency("g", "tests", "test", &tests),
            jar_dependency("g", "provided", "provided", &provided),
        ],
    );

    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.filtered_out, 2);
    assert_eq!(summary.artifacts_scanned, 1);
}

#[test]
fn test_exclusion_pattern_resolves_conflict() {
    let dir = tempdir().unwrap();
    let a1 = create_jar(dir.path(), "a1.jar", &["com/example/Widget.class"]);
    let a2 = create_jar(dir.path(), "a2.jar", &["com/example/Widget.class"]);
    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g1", "a1", "compile", &a1),
            jar_dependency("g1", "a2", "compile", &a2),
        ],
    );
    let resolver = ManifestResolver::new(&manifest);

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&resolver)
        .unwrap();
    assert_eq!(report.len(), 1);

    let finder =
        DuplicateFinder::new(FinderConfig::default().with_excludes(vec!["g1:a2".into()])).unwrap();
    let (report, summary) = finder.find_duplicates(&resolver).unwrap();
    assert!(report.is_empty());
    assert_eq!(summary.filtered_out, 1);
}

#[test]
fn test_wildcard_exclusion() {
    let dir = tempdir().unwrap();
    let api = create_jar(dir.path(), "api.jar", &["javax/servlet/Servlet.class"]);
    let jetty = create_jar(dir.path(), "jetty.jar", &["javax/servlet/Servlet.class"]);
    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("javax.servlet", "servlet-api", "compile", &api),
            jar_dependency("org.eclipse.jetty.orbit", "javax.servlet", "runtime", &jetty),
        ],
    );

    let finder = DuplicateFinder::new(
        FinderConfig::default().with_excludes(vec!["org.eclipse.*:*".into()]),
    )
    .unwrap();
    let (report, _) = finder
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_module_info_and_versioned_entries_never_conflict() {
    let dir = tempdir().unwrap();
    let a = create_jar(
        dir.path(),
        "a.jar",
        &[
            "module-info.class",
            "META-INF/versions/9/module-info.class",
            "META-INF/versions/11/com/example/Widget.class",
            "com/example/A.class",
        ],
    );
    let b = create_jar(
        dir.path(),
        "b.jar",
        &[
            "module-info.class",
            "META-INF/versions/11/com/example/Widget.class",
            "com/example/B.class",
        ],
    );
    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g", "a", "compile", &a),
            jar_dependency("g", "b", "compile", &b),
        ],
    );

    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.class_entries, 2);
}

#[test]
fn test_resources_are_not_classes() {
    let dir = tempdir().unwrap();
    let a = create_jar(dir.path(), "a.jar", &["META-INF/MANIFEST.MF", "log4j2.xml"]);
    let b = create_jar(dir.path(), "b.jar", &["META-INF/MANIFEST.MF", "log4j2.xml"]);
    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g", "a", "compile", &a),
            jar_dependency("g", "b", "compile", &b),
        ],
    );

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_relative_artifact_paths_resolve_against_manifest() {
    let dir = tempdir().unwrap();
    let libs = dir.path().join("libs");
    std::fs::create_dir(&libs).unwrap();
    create_jar(&libs, "a.jar", &["x/Y.class"]);
    create_jar(&libs, "b.jar", &["x/Y.class"]);

    let manifest = write_manifest(
        dir.path(),
        &[
            jar_dependency("g", "a", "compile", std::path::Path::new("libs/a.jar")),
            jar_dependency("g", "b", "compile", std::path::Path::new("libs/b.jar")),
        ],
    );

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();
    assert_eq!(report.get("x.Y").unwrap(), &[coord("g", "a"), coord("g", "b")]);
}

#[test]
fn test_many_jars_with_parallel_scan() {
    let dir = tempdir().unwrap();
    let mut dependencies = Vec::new();
    for i in 0..24 {
        let own = format!("pkg{i}/Own.class");
        let jar = create_jar(
            dir.path(),
            &format!("lib{i}.jar"),
            &["shared/Common.class", own.as_str()],
        );
        dependencies.push(jar_dependency("g", &format!("lib{i:02}"), "compile", &jar));
    }
    let manifest = write_manifest(dir.path(), &dependencies);

    let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4)).unwrap();
    let (report, summary) = finder
        .find_duplicates(&ManifestResolver::new(&manifest))
        .unwrap();

    assert_eq!(summary.artifacts_scanned, 24);
    assert_eq!(summary.distinct_classes, 25);
    assert_eq!(report.len(), 1);

    let owners: Vec<String> = report
        .get("shared.Common")
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut sorted = owners.clone();
    sorted.sort();
    assert_eq!(owners, sorted);
    assert_eq!(owners.len(), 24);
}
