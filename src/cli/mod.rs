pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::Scheme;

#[derive(Parser)]
#[command(name = "tartil")]
#[command(about = "Read the Quran in the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tartil/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers for multi-page reads
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Chapter,
    Juz,
    Page,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Chapter => Scheme::Chapter,
            SchemeArg::Juz => Scheme::Section,
            SchemeArg::Page => Scheme::Page,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all chapters
    Chapters {
        /// Language for translated chapter names
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List available translations grouped by language
    Translations {
        /// Only word-by-word gloss sources
        #[arg(long)]
        word_by_word: bool,
    },
    /// Print verses of a chapter, juz or page
    Read {
        scheme: SchemeArg,
        id: u32,

        /// Result page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        per_page: Option<u32>,

        /// Translation resource id
        #[arg(short, long)]
        translation: Option<u32>,

        /// Language for word glosses
        #[arg(short, long)]
        language: Option<String>,

        /// Wrap tajweed rules in markup
        #[arg(long)]
        tajweed: bool,

        /// Fetch every page concurrently
        #[arg(long)]
        all: bool,

        /// Print the canonical verses as JSON
        #[arg(long)]
        json: bool,
    },
    /// Full-text search
    Search {
        query: String,

        #[arg(long)]
        size: Option<u32>,

        #[arg(short, long)]
        translation: Option<u32>,
    },
    /// Show the tafsir of one verse, e.g. `tafsir 2:255`
    Tafsir {
        verse_key: String,

        #[arg(long)]
        tafsir_id: Option<u32>,
    },
    /// Show a random verse
    Random {
        #[arg(short, long)]
        translation: Option<u32>,
    },
    /// Show which verses a juz spans
    Juz { id: u32 },
    /// Launch the TUI
    Tui {
        #[arg(long)]
        chapter: Option<u16>,

        #[arg(long)]
        juz: Option<u16>,

        #[arg(long)]
        page: Option<u16>,
    },
}
