use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search file names and document contents for a word
    Search {
        term: String,

        /// Traversal root; falls back to the config file, then to "."
        #[clap(value_parser)]
        path: Option<PathBuf>,
    },
    /// Prompt for search terms repeatedly; identical terms are served
    /// from the in-process result cache
    Interactive {
        #[clap(value_parser)]
        path: Option<PathBuf>,
    },
    /// Open a file with the OS default handler
    Open {
        path: PathBuf,
    },
}
