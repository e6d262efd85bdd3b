//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r##"# dirlint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Files exempt from every rule, matched against the end of the path.
# The rule's file type is appended when missing: "Generated" skips Generated.java.
ignore = []

# Each rule may set `enabled`, `file_type` and its own `ignore` list.

[rules.todo-structure]
# Regex a TODO line must match as a whole (default: TODO with a date).
# structure = ".*//.*TODO \\[[a-z]+\\].*"

[rules.environment-properties]
# file_type = ".properties"

# [rules.else-usage]

# [[rules.import-restriction.restrictions]]
# package = "com.example.db"
# imports = "import java\\.sql\\..*"

# [rules.jira-reference]
# host = "https://jira.example.com"
# username = "ci"
# password_env = "JIRA_PASSWORD"
# allowed_statuses = ["To Do", "In Progress"]
# issue_pattern = "[A-Z][A-Z0-9]*-[0-9]+"

# [rules.git-issue]
# user = "octocat"
# repository = "hello-world"
# issue_pattern = "#[0-9]+"

# [rules.required-content]
# file_type = ".java"
# content = "Licensed under the Apache License"
"##;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit dirlint.toml to configure rules");
    println!("  2. Run: dirlint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
