use anyhow::{bail, Context, Result};
use clap::Parser;
use config2json::discover::files_to_migrate;
use config2json::migrate::{FileMigrator, MigrateOptions};
use config2json::rules_file::{default_rules, load_rules};
use config2json::terminal::TerminalConsole;
use tracing::Level;
use xml_config_core::Console;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.path.exists() {
        bail!("path '{}' does not exist", cli.path.display());
    }

    let rules = match &cli.rules {
        Some(path) => load_rules(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => default_rules(),
    };

    let console = TerminalConsole;
    let files = files_to_migrate(&cli.path, Some(&console))
        .with_context(|| format!("failed to list {}", cli.path.display()))?;

    let options = MigrateOptions {
        prefix: cli.prefix,
        raw: cli.raw,
        rules,
    };
    let report = FileMigrator::new(&options, Some(&console)).migrate_files(&files);

    console.write_line("Migration complete.");
    console.write_line(&report.summary_line());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
