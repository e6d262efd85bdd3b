//! List rules command implementation.

use dirlint_rules::RULES;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<24} {:<9} Description", "Code", "Name", "Default");
    println!("{}", "-".repeat(90));

    for rule in RULES {
        println!(
            "{:<8} {:<24} {:<9} {}",
            rule.code,
            rule.name,
            if rule.enabled_by_default { "on" } else { "opt-in" },
            rule.description
        );
    }

    println!("\nOpt-in rules run once their [rules.<name>] section exists in dirlint.toml.");
    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  dirlint check --rules todo-structure,else-usage");
    println!("  dirlint check --rules DL001,DL003");
}
