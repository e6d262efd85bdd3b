//! Integration tests: directory analysis end-to-end on temporary trees.

use dirlint_core::{
    AnalysisRequest, Analyzer, AnalyzerError, FileLineViolation, LineCache, LineSource,
    Violation, EMPTY_FILE_MESSAGE,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

/// Counts how often files are actually read from disk.
#[derive(Clone, Default)]
struct CountingSource {
    reads: Arc<AtomicUsize>,
}

impl LineSource for CountingSource {
    fn read_lines(&self, path: &Path) -> std::io::Result<Vec<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(fs::read_to_string(path)?.lines().map(String::from).collect())
    }
}

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Temporary directories are named `.tmpXXXX` by default, which is hidden.
fn visible_tmp() -> TempDir {
    tempfile::Builder::new().prefix("dirlint").tempdir().unwrap()
}

fn todo_without_date(line: &str) -> bool {
    line.contains("// TODO") && !line.chars().any(|c| c.is_ascii_digit())
}

// ── Scenarios ──

#[test]
fn ignored_file_contributes_nothing() {
    let tmp = TempDir::new().unwrap();
    let a = write(
        tmp.path(),
        "A.java",
        "class A {\n    // TODO no-date\n}",
    );
    write(tmp.path(), "B.java", "// TODO also-no-date\n");

    let request = AnalysisRequest::builder(tmp.path())
        .file_type(".java")
        .ignoring(["B"])
        .build()
        .unwrap();
    let violations = Analyzer::default()
        .analyse_lines_of_file(&request, |line| Ok(todo_without_date(line)), "bad todo")
        .unwrap();

    assert_eq!(
        violations,
        vec![Violation::Line(FileLineViolation::new(
            a,
            "    // TODO no-date",
            "bad todo"
        ))]
    );
}

#[test]
fn zero_byte_file_yields_empty_file_sentinel() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Nothing.java", "");

    let request = AnalysisRequest::builder(tmp.path()).build().unwrap();
    let violations = Analyzer::default()
        .analyse_file_content(&request, |_| Ok(true), "msg")
        .unwrap();

    assert_eq!(violations.len(), 1);
    assert!(violations[0].message().starts_with("Empty file!"));
    assert_eq!(violations[0].message(), EMPTY_FILE_MESSAGE);
}

#[test]
fn root_that_is_a_file_fails_immediately() {
    let tmp = TempDir::new().unwrap();
    let file = write(tmp.path(), "A.java", "x\n");

    let err = AnalysisRequest::builder(&file).build().unwrap_err();
    assert!(matches!(err, AnalyzerError::NotADirectory { .. }));

    let err = AnalysisRequest::builder(tmp.path().join("missing"))
        .build()
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::NotADirectory { .. }));
}

#[test]
fn two_rules_sharing_a_cache_read_each_file_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "P.java", "package p;\nimport q;\n");

    let source = CountingSource::default();
    let reads = Arc::clone(&source.reads);
    let cache = Arc::new(LineCache::with_source(source));
    let request = AnalysisRequest::builder(tmp.path())
        .java_files()
        .build()
        .unwrap();

    let imports = Analyzer::new(Arc::clone(&cache))
        .analyse_lines_of_file(&request, |l| Ok(l.starts_with("import")), "import")
        .unwrap();
    let packages = Analyzer::new(Arc::clone(&cache))
        .analyse_file_content(&request, |c| Ok(c.contains("package p;")), "package")
        .unwrap();

    assert_eq!(imports.len(), 1);
    assert_eq!(packages.len(), 1);
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_analyzers_read_each_file_once() {
    let tmp = TempDir::new().unwrap();
    for i in 0..5 {
        write(tmp.path(), &format!("pkg/F{i}.java"), "line one\nline two\n");
    }

    let source = CountingSource::default();
    let reads = Arc::clone(&source.reads);
    let cache = Arc::new(LineCache::with_source(source));
    let request = AnalysisRequest::builder(tmp.path())
        .java_files()
        .build()
        .unwrap();
    let barrier = Barrier::new(4);

    std::thread::scope(|s| {
        for _ in 0..4 {
            let analyzer = Analyzer::new(Arc::clone(&cache));
            let request = &request;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                let violations = analyzer
                    .analyse_lines_of_file(request, |l| Ok(l.ends_with("two")), "two")
                    .unwrap();
                assert_eq!(violations.len(), 5);
            });
        }
    });

    assert_eq!(reads.load(Ordering::SeqCst), 5);
}

// ── Filtering properties ──

#[test]
fn every_violation_is_a_visible_non_exempt_descendant_of_the_type() {
    let tmp = visible_tmp();
    write(tmp.path(), "src/Main.java", "x\n");
    write(tmp.path(), "src/nested/Util.java", "x\n");
    write(tmp.path(), "src/nested/Skip.java", "x\n");
    write(tmp.path(), "src/notes.txt", "x\n");
    write(tmp.path(), ".idea/Workspace.java", "x\n");
    write(tmp.path(), "src/.generated/Gen.java", "x\n");
    write(tmp.path(), "src/.Hidden.java", "x\n");

    let request = AnalysisRequest::builder(tmp.path())
        .java_files()
        .ignoring(["nested/Skip"])
        .build()
        .unwrap();
    let violations = Analyzer::default()
        .analyse_file(&request, |_| Ok(true), "flagged")
        .unwrap();

    let mut names: Vec<String> = violations.iter().map(Violation::file_name).collect();
    names.sort();
    assert_eq!(names, ["Main.java", "Util.java"]);

    for violation in &violations {
        let path = violation.path();
        assert!(path.starts_with(tmp.path()));
        assert!(path.to_string_lossy().ends_with(".java"));
        let relative = path.strip_prefix(tmp.path()).unwrap();
        assert!(relative
            .components()
            .all(|c| !c.as_os_str().to_string_lossy().starts_with('.')));
    }
}

#[cfg(unix)]
#[test]
fn hidden_root_scans_its_hidden_directories() {
    let tmp = visible_tmp();
    let root = tmp.path().join(".hiddenroot");
    write(&root, "B.java", "x\n");
    write(&root, ".inner/A.java", "x\n");

    let request = AnalysisRequest::builder(&root).java_files().build().unwrap();
    let violations = Analyzer::default()
        .analyse_file(&request, |_| Ok(true), "flagged")
        .unwrap();

    let mut names: Vec<String> = violations.iter().map(Violation::file_name).collect();
    names.sort();
    assert_eq!(names, ["A.java", "B.java"]);
}

#[test]
fn without_file_type_every_regular_file_is_a_candidate() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.txt", "x\n");
    write(tmp.path(), "b/c.properties", "k=v\n");
    write(tmp.path(), "b/D.java", "x\n");

    let request = AnalysisRequest::builder(tmp.path()).build().unwrap();
    let candidates = Analyzer::default().candidates(&request).unwrap();

    assert_eq!(candidates.len(), 3);
}

#[test]
fn every_line_fails_when_predicate_always_true() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "ReadMyLines.java", "1\n2\n3\n4\n");

    let request = AnalysisRequest::builder(tmp.path())
        .java_files()
        .build()
        .unwrap();
    let violations = Analyzer::default()
        .analyse_lines_of_file(&request, |_| Ok(true), "Expected violation message 1234")
        .unwrap();

    assert_eq!(violations.len(), 4);
    assert_eq!(
        violations[0].to_string(),
        "Violation in file 'ReadMyLines.java'\n\n1\n\nExpected violation message 1234\n"
    );
}

#[cfg(unix)]
#[test]
fn unreadable_file_becomes_one_violation_and_scan_continues() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let locked = write(tmp.path(), "Locked.java", "secret\n");
    write(tmp.path(), "Open.java", "hit\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits are not enforced for root.
    if fs::read_to_string(&locked).is_ok() {
        return;
    }

    let request = AnalysisRequest::builder(tmp.path())
        .java_files()
        .build()
        .unwrap();
    let violations = Analyzer::default()
        .analyse_lines_of_file(&request, |l| Ok(l == "hit"), "hit")
        .unwrap();

    assert_eq!(violations.len(), 2);
    assert!(violations
        .iter()
        .any(|v| v.file_name() == "Locked.java" && v.line() == Some("Unable to read file.")));
    assert!(violations.iter().any(|v| v.message() == "hit"));
}
