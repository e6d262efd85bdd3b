//! Integration tests: configured rule sets run over a fixture project.

use dirlint_core::{Analyzer, Config, LineCache, LineSource, LintReport};
use dirlint_rules::{
    rules_with_client, HttpClient, IssueError, Request, Response, RuleBox,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

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

/// Jira knows ABC-1 (In Progress) and ABC-2 (Done); GitHub issue 1 is open.
#[derive(Default)]
struct FakeTrackers {
    calls: AtomicUsize,
}

impl HttpClient for FakeTrackers {
    fn execute(&self, request: &Request) -> Result<Response, IssueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = request.url();
        let body = if url.ends_with("/issue/ABC-1") {
            r#"{"fields":{"status":{"name":"In Progress"}}}"#.to_string()
        } else if url.ends_with("/issue/ABC-2") {
            r#"{"fields":{"status":{"name":"Done"}}}"#.to_string()
        } else if url.ends_with("/issues/1") {
            r#"{"state":"open"}"#.to_string()
        } else if url.contains("/issues/") {
            r#"{"state":"closed"}"#.to_string()
        } else {
            return Ok(Response::new("HTTP/1.1", 404, "unknown"));
        };
        Ok(Response::new("HTTP/1.1", 200, body))
    }
}

const CONFIG: &str = r#"
[analyzer]
ignore = ["Generated"]

[rules.todo-structure]

[rules.else-usage]
ignore = ["Legacy"]

[[rules.import-restriction.restrictions]]
package = "com.shop.db"
imports = "import java\\.sql\\..*"

[rules.jira-reference]
host = "https://jira.example.com"
username = "ci"
password = "pw"
allowed_statuses = ["In Progress"]

[rules.git-issue]
user = "shop"
repository = "backend"

[rules.required-content]
file_type = "java"
content = "Copyright Shop"
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/com/shop/db/Orders.java",
        "package com.shop.db;\n// Copyright Shop\nimport java.sql.Connection;\n// TODO 2024/01/31 index orders\n",
    );
    write(
        root,
        "src/com/shop/web/Checkout.java",
        "package com.shop.web;\n// Copyright Shop\nimport java.sql.Connection;\n\
         // TODO ABC-1 streaming 2024/02/01\n// TODO ABC-2 retry 2024/02/01\n\
         // TODO #7 closed 2024/02/01\n} else {\n",
    );
    write(
        root,
        "src/com/shop/web/Legacy.java",
        "package com.shop.web;\n// Copyright Shop\n} else {\n",
    );
    write(root, "src/com/shop/Generated.java", "} else {\n// TODO whenever\n");
    write(root, "src/com/shop/Blank.java", "");
    write(root, "config/dev.properties", "url=a\nuser=b\n");
    write(root, "config/prod.properties", "url=c\n");
    write(root, ".git/Hidden.java", "} else {\n");
    tmp
}

fn run(root: &Path, trackers: Arc<FakeTrackers>) -> (LintReport, usize) {
    let config = Config::parse(CONFIG).unwrap();
    let rules: Vec<RuleBox> = rules_with_client(&config, trackers).unwrap();

    let source = CountingSource::default();
    let reads = Arc::clone(&source.reads);
    let analyzer = Analyzer::new(Arc::new(LineCache::with_source(source)));
    let report = analyzer.run(root, &rules).unwrap();
    (report, reads.load(Ordering::SeqCst))
}

fn flagged(report: &LintReport, rule: &str) -> Vec<(String, Option<String>)> {
    report
        .violations()
        .filter(|(r, _)| r.rule == rule)
        .map(|(_, v)| (v.file_name(), v.line().map(String::from)))
        .collect()
}

#[test]
fn configured_rules_find_expected_violations() {
    // Blank.java is empty, so every line and content rule reports it.
    let tmp = project();
    let (report, _) = run(tmp.path(), Arc::new(FakeTrackers::default()));

    assert_eq!(
        flagged(&report, "import-restriction"),
        [
            ("Blank.java".to_string(), None),
            ("Checkout.java".to_string(), Some("import java.sql.Connection;".to_string())),
        ]
    );
    assert_eq!(
        flagged(&report, "jira-reference"),
        [
            ("Blank.java".to_string(), None),
            ("Checkout.java".to_string(), Some("// TODO ABC-2 retry 2024/02/01".to_string())),
        ]
    );
    assert_eq!(
        flagged(&report, "git-issue"),
        [
            ("Blank.java".to_string(), None),
            ("Checkout.java".to_string(), Some("// TODO #7 closed 2024/02/01".to_string())),
        ]
    );
    assert_eq!(
        flagged(&report, "else-usage"),
        [
            ("Blank.java".to_string(), None),
            ("Checkout.java".to_string(), Some("} else {".to_string())),
        ]
    );
    assert_eq!(
        flagged(&report, "environment-properties"),
        [("prod.properties".to_string(), None)]
    );
    assert_eq!(
        flagged(&report, "required-content"),
        [("Blank.java".to_string(), None)]
    );
    assert_eq!(flagged(&report, "todo-structure"), [("Blank.java".to_string(), None)]);
}

#[test]
fn files_are_read_once_and_issues_fetched_once() {
    let tmp = project();
    let trackers = Arc::new(FakeTrackers::default());
    let (report, reads) = run(tmp.path(), Arc::clone(&trackers));

    // Orders, Checkout, Legacy, Blank and two properties files.
    assert_eq!(reads, 6);
    // ABC-1, ABC-2 and #7.
    assert_eq!(trackers.calls.load(Ordering::SeqCst), 3);
    assert!(!report.is_clean());
}

#[test]
fn text_report_lists_rules_with_violations() {
    let tmp = project();
    let (report, _) = run(tmp.path(), Arc::new(FakeTrackers::default()));
    let text = report.format_report();

    assert!(text.contains("=== git-issue [DL005]: 2 violation(s) ==="));
    assert!(text.contains("Violation in file 'prod.properties'\n'prod.properties' does not have matching property keys as 'dev.properties'\n"));
    assert!(text.ends_with(&format!(
        "Found {} violation(s) in {} file(s)\n",
        report.total(),
        report.files_flagged()
    )));
}
