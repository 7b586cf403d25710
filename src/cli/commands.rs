use clap::{Parser, Subcommand};

/// Untangle — classify what's stressing you into whose problem it actually
/// is.
#[derive(Parser, Debug)]
#[command(name = "untangle")]
#[command(version = "0.1.0")]
#[command(about = "Whose problem is it? Classify stress into domains of responsibility.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a situation (interactive flow by default)
    Reflect {
        /// Single message mode: classify, log, and exit
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show the archive dashboard and exit
    Archive,

    /// Print the resolved configuration (never the API key itself)
    Config,
}
