use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardshelf")]
#[command(about = "Browse, search and edit a small local catalog of product cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the catalog (defaults to $CARDSHELF_DATA, then the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cards
    #[command(alias = "ls")]
    List {
        /// Only show cards whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one card (by id, or by its number in the list)
    #[command(alias = "v")]
    View { card: String },

    /// Create a new card
    #[command(alias = "n")]
    Create {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long = "desc", default_value = "")]
        description: String,

        /// Image URL (a placeholder is generated when omitted)
        #[arg(short, long, default_value = "")]
        image: String,
    },

    /// Edit a card; omitted fields keep their current value
    #[command(alias = "e")]
    Update {
        card: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long = "desc")]
        description: Option<String>,

        /// Image URL (an empty value assigns a placeholder)
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Delete a card
    #[command(alias = "rm")]
    Delete {
        card: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch between the dark and light palette
    Theme,

    /// Interactive session: list, view, create, edit and delete through the dialog
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, placeholder-base, seed-examples)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
