use colored::Colorize;
use xml_config_core::Console;

/// Console that prints every line to stdout, colored by kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn write_line(&self, line: &str) {
        println!("{}", colorize_line(line));
    }
}

/// Color a status line for terminal output.
pub fn colorize_line(line: &str) -> String {
    if line.starts_with("An error occurred") {
        line.red().to_string()
    } else if line.starts_with("Migration of") || line.starts_with("Migration complete") {
        line.green().to_string()
    } else if line.starts_with("migration_summary") {
        line.cyan().to_string()
    } else if line.contains("is not supported") || line.contains("Replacing existing value") {
        line.yellow().to_string()
    } else {
        line.to_string()
    }
}
