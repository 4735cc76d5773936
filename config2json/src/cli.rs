use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "config2json")]
#[command(about = "Converts a web.config/app.config file to an appsettings.json file")]
#[command(
    after_help = "Every .config/.xml file is written next to its source with a .json extension."
)]
pub struct Cli {
    /// Path to the file or directory to migrate.
    pub path: PathBuf,
    /// If provided, an additional namespace to prefix on generated keys.
    pub prefix: Option<String>,
    /// Show parsed raw key/value pairs.
    #[arg(short, long)]
    pub raw: bool,
    /// TOML file of [[rule]] tables replacing the built-in add/remove/clear rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Emit debug diagnostics on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
