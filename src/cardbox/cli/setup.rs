use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardbox", bin_name = "cardbox", version)]
#[command(about = "Keep small titled, categorised cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the card slot and config (default: $CARDBOX_HOME, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all cards
    #[command(alias = "ls")]
    List,

    /// Show one card in full
    #[command(alias = "v")]
    View {
        /// Card id
        id: u64,
    },

    /// Add a new card
    #[command(alias = "n")]
    Add {
        /// Card title (required)
        #[arg(short, long)]
        title: Option<String>,

        /// Free text description
        #[arg(short, long)]
        description: Option<String>,

        /// One of Work, Personal, Shopping, Ideas (required)
        #[arg(short, long)]
        category: Option<String>,

        /// Image URL
        #[arg(long, value_name = "URL")]
        image_url: Option<String>,

        /// Image file to embed; takes precedence over --image-url
        #[arg(long, value_name = "PATH")]
        image_file: Option<PathBuf>,
    },

    /// Edit a card; fields not given keep their current value
    #[command(alias = "e")]
    Edit {
        /// Card id
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long, value_name = "URL")]
        image_url: Option<String>,

        #[arg(long, value_name = "PATH")]
        image_file: Option<PathBuf>,

        /// Remove the card's image
        #[arg(long, conflicts_with_all = ["image_url", "image_file"])]
        no_image: bool,
    },

    /// Delete a card
    #[command(alias = "rm")]
    Delete {
        /// Card id
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (slot, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::try_parse_from(["cardbox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_add() {
        let cli = Cli::try_parse_from([
            "cardbox", "add", "-t", "Buy milk", "-c", "Shopping", "--image-url", "https://x/y.png",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                category,
                image_url,
                description,
                image_file,
            }) => {
                assert_eq!(title.as_deref(), Some("Buy milk"));
                assert_eq!(category.as_deref(), Some("Shopping"));
                assert_eq!(image_url.as_deref(), Some("https://x/y.png"));
                assert!(description.is_none());
                assert!(image_file.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn no_image_conflicts_with_url() {
        let err = Cli::try_parse_from([
            "cardbox", "edit", "1", "--no-image", "--image-url", "https://x/y.png",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["cardbox", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn delete_alias_and_yes() {
        let cli = Cli::try_parse_from(["cardbox", "rm", "3", "--yes"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { id: 3, yes: true })));
    }
}
