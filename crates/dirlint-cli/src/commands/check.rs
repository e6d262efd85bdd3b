//! Check command implementation.

use anyhow::{Context, Result};
use dirlint_core::{Analyzer, RuleBox};
use dirlint_rules::{find_rule, rules_from_config};
use std::path::Path;

use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command. Returns `true` if no violation was found.
pub fn run(
    path: Option<&Path>,
    format: OutputFormat,
    rules_filter: Option<String>,
    ignore: Vec<String>,
    config_path: Option<&Path>,
) -> Result<bool> {
    let project_dir = path.unwrap_or_else(|| Path::new("."));
    let mut config = config_resolver::resolve(project_dir, config_path).load()?;
    config.analyzer.ignore.extend(ignore);

    let root = path.map_or_else(|| config.analyzer.root.clone(), Path::to_path_buf);

    let mut rules = rules_from_config(&config).context("Failed to build rules")?;
    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = select_rules(rules, &names);
    }

    tracing::info!("Analyzing {} with {} rule(s)", root.display(), rules.len());

    let report = Analyzer::default()
        .run(&root, &rules)
        .context("Analysis failed")?;

    super::output::print(&report, format)?;

    Ok(report.is_clean())
}

/// Keeps the rules named (by name or code) in `names`.
fn select_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    let mut wanted = Vec::new();
    for name in names.iter().filter(|n| !n.is_empty()) {
        match find_rule(name) {
            Some(info) => wanted.push(info.name),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name) {
            tracing::warn!(
                "Rule {} is not enabled; add a [rules.{}] section to the config",
                name,
                name
            );
        }
    }

    rules
        .into_iter()
        .filter(|r| wanted.contains(&r.name()))
        .collect()
}
