use std::{fs, path::Path};

use pretty_assertions::assert_eq;
use skein::{config::Config, orchestrator::BundleOrchestrator};
use tempfile::TempDir;

fn write_project(dir: &Path, files: &[(&str, &str)]) {
    for (name, text) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }
}

fn bundle(dir: &Path, entry: &str) -> skein::orchestrator::BundleResult {
    let config = Config {
        src: vec![dir.to_path_buf()],
        ..Config::default()
    };
    BundleOrchestrator::new(config)
        .bundle(&dir.join(entry))
        .unwrap()
}

#[test]
fn test_single_import_includes_only_the_referenced_definition() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.scala",
                "import m.Foo\n\nobject Main {\n  val f = new Foo\n}\n",
            ),
            ("foo.scala", "package m\n\nclass Foo\n"),
            ("bar.scala", "package m\n\nclass Bar\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.included_files, 2);
    assert!(result.code.contains("class Foo"));
    assert!(!result.code.contains("class Bar"));
    // entry body comes first
    assert!(result.code.find("object Main").unwrap() < result.code.find("class Foo").unwrap());
}

#[test]
fn test_wildcard_includes_unreferenced_package_members() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import m._\n\nobject Main\n"),
            ("foo.scala", "package m\n\nclass Foo\n"),
            ("bar.scala", "package m\n\nclass Bar\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.included_files, 3);
    assert!(result.code.contains("class Foo"));
    assert!(result.code.contains("class Bar"));
}

#[test]
fn test_no_package_or_local_import_lines_survive() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import util.Helper\n\nobject Main\n"),
            ("helper.scala", "package util\n\nclass Helper\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    for line in result.code.lines() {
        let trimmed = line.trim_start();
        assert!(
            !trimmed.starts_with("package ") && !trimmed.starts_with("import "),
            "header line leaked into bundle: {line:?}"
        );
    }
}

#[test]
fn test_external_imports_are_preserved_verbatim_once() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.scala",
                "import scala.collection.mutable.ArrayBuffer\nimport util.Helper\n\nobject Main\n",
            ),
            ("helper.scala", "package util\n\nclass Helper\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(
        result
            .code
            .matches("import scala.collection.mutable.ArrayBuffer")
            .count(),
        1
    );
    assert!(!result.code.contains("import util.Helper"));
}

#[test]
fn test_mutual_wildcard_imports_terminate_with_both_files() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("x.scala", "package p\n\nimport q._\n\nclass X\n"),
            ("y.scala", "package q\n\nimport p._\n\nclass Y\n"),
        ],
    );

    let result = bundle(dir.path(), "x.scala");
    assert_eq!(result.included_files, 2);
    assert!(result.code.contains("class X"));
    assert!(result.code.contains("class Y"));
}

#[test]
fn test_unreferenced_package_sibling_stays_out() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.scala",
                "package p\n\nobject Main {\n  val g = new Graph(3)\n}\n",
            ),
            ("graph.scala", "package p\n\nclass Graph(n: Int)\n"),
            ("sibling.scala", "package p\n\nclass Sibling\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.included_files, 2);
    assert!(!result.code.contains("class Sibling"));
}

#[test]
fn test_files_reachable_twice_are_emitted_once() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.scala",
                "import m.{Foo, Bar}\nimport m._\n\nobject Main\n",
            ),
            ("both.scala", "package m\n\nclass Foo\nclass Bar\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.included_files, 2);
    assert_eq!(result.code.matches("class Foo").count(), 1);
}

#[test]
fn test_bundling_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import m._\n\nobject Main\n"),
            ("a.scala", "package m\n\nclass A\n"),
            ("b.scala", "package m\n\nclass B\n"),
            ("c.scala", "package m.inner\n\nclass C\n"),
        ],
    );

    let first = bundle(dir.path(), "main.scala");
    let second = bundle(dir.path(), "main.scala");
    assert_eq!(first.code, second.code);
    assert_eq!(first.included_files, second.included_files);
}

#[test]
fn test_bodies_are_separated_by_one_blank_line() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import m.Foo\n\nobject Main\n"),
            ("foo.scala", "package m\n\nclass Foo\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.code, "object Main\n\nclass Foo\n");
}

#[test]
fn test_transitive_closure_over_subdirectories() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import a.First\n\nobject Main\n"),
            ("lib/first.scala", "package a\n\nimport b.Second\n\nclass First\n"),
            ("lib/deep/second.scala", "package b\n\nclass Second\n"),
        ],
    );

    let result = bundle(dir.path(), "main.scala");
    assert_eq!(result.included_files, 3);
    assert!(result.code.contains("class Second"));
}

#[test]
fn test_missing_entry_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), &[("present.scala", "object Present\n")]);

    let config = Config {
        src: vec![dir.path().to_path_buf()],
        ..Config::default()
    };
    let result = BundleOrchestrator::new(config).bundle(&dir.path().join("absent.scala"));
    assert!(result.is_err());
}

#[test]
fn test_default_root_is_the_entry_directory() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import m.Foo\n\nobject Main\n"),
            ("foo.scala", "package m\n\nclass Foo\n"),
        ],
    );

    // no src roots configured at all
    let result = BundleOrchestrator::new(Config::default())
        .bundle(&dir.path().join("main.scala"))
        .unwrap();
    assert_eq!(result.included_files, 2);
}

#[test]
fn test_configured_external_prefix_is_honored() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.scala", "import cats.Monad\n\nobject Main\n"),
            ("monad.scala", "package cats\n\nclass Monad\n"),
        ],
    );

    let config = Config {
        src: vec![dir.path().to_path_buf()],
        external_prefixes: vec!["scala".to_owned(), "java".to_owned(), "cats".to_owned()],
        ..Config::default()
    };
    let result = BundleOrchestrator::new(config).bundle(&dir.path().join("main.scala")).unwrap();
    assert_eq!(result.included_files, 1);
    assert!(result.code.contains("import cats.Monad"));
}
