//! CLI module for Recipe Roulette
//!
//! Every roulette operation is available from the terminal. Running without a
//! subcommand starts the GUI instead.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

use crate::variant::Variant;

/// Recipe Roulette - spin a dish, get a post
#[derive(Parser, Debug)]
#[command(name = "recipe-roulette")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the slot catalogs
    Catalog {
        /// Only list the slots used by this roulette
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },

    /// Spin the roulette and print where it lands
    Spin {
        /// Roulette to spin (defaults to the configured one)
        #[arg(long, value_enum)]
        variant: Option<Variant>,
    },

    /// Generate a post for a selection
    Generate {
        /// Roulette to use (defaults to the configured one)
        #[arg(long, value_enum)]
        variant: Option<Variant>,

        /// Item name per slot, in slot order; omit to draw at random
        #[arg(long = "item", value_name = "NAME")]
        items: Vec<String>,

        /// Open the X compose page with the post afterwards
        #[arg(long)]
        share: bool,
    },

    /// Open the X compose page for a post
    Share {
        /// Post text
        text: String,

        /// Print the compose URL instead of opening it
        #[arg(long)]
        print_only: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive roulette session
    Shell,
}

/// Run a CLI subcommand
pub async fn run(command: Commands, output: OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Catalog { variant } => commands::catalog::run(variant, format),
        Commands::Spin { variant } => commands::spin::run(variant, format, quiet).await,
        Commands::Generate { variant, items, share } => {
            commands::generate::run(variant, &items, share, format, quiet).await
        }
        Commands::Share { text, print_only } => commands::share::run(&text, print_only, format),
        Commands::Config { command } => commands::config::run(command, format, quiet),
        Commands::Shell => shell::run().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_gui() {
        let cli = Cli::try_parse_from(["recipe-roulette"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "recipe-roulette",
            "generate",
            "--variant",
            "secret",
            "--item",
            "納豆",
            "--item",
            "カレー",
            "--json",
        ])
        .unwrap();

        assert!(cli.output.json);
        match cli.command {
            Some(Commands::Generate { variant, items, share }) => {
                assert_eq!(variant, Some(Variant::Secret));
                assert_eq!(items, vec!["納豆", "カレー"]);
                assert!(!share);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["recipe-roulette", "spin", "--variant", "brunch"]).is_err());
    }
}
