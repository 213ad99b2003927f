//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rsvp_models::{Category, UserId};

use crate::config;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.3.0 (abc1234, 2026-10-17)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// RSVP tracker - browse events, create your own and RSVP to them
#[derive(Parser, Debug)]
#[command(name = "rsvp")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the event data
    #[arg(short, long, env = config::DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// User to act as
    #[arg(short, long, env = config::USER_ENV, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events (upcoming only unless --all is given)
    List {
        /// Only events whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only events in this category ("All" for every category)
        #[arg(short, long, value_parser = parse_category_filter)]
        category: Option<CategoryFilter>,

        /// Include past events, in insertion order
        #[arg(short, long)]
        all: bool,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the details of an event
    Show {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// List the events you created
    Mine {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a new event
    Create {
        /// Event title
        #[arg(short, long, default_value = "")]
        title: String,

        /// What the event is about
        #[arg(long, default_value = "")]
        description: String,

        /// Event date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        date: String,

        /// Where the event takes place
        #[arg(short, long, default_value = "")]
        location: String,

        /// Event category
        #[arg(short, long, default_value = "Conference", value_parser = parse_category)]
        category: Category,
    },

    /// Edit an existing event
    Edit {
        /// Event ID
        #[arg(required = true)]
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New location
        #[arg(short, long)]
        location: Option<String>,

        /// New category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },

    /// Delete an event
    Delete {
        /// Event ID
        #[arg(required = true)]
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle your RSVP to an event
    Rsvp {
        /// Event ID
        #[arg(required = true)]
        id: String,
    },

    /// Run the mock events API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = rsvp_api::DEFAULT_PORT)]
        port: u16,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

/// Category selection for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns the category to filter by, if any.
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

fn parse_category_filter(s: &str) -> Result<CategoryFilter, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    parse_category(s).map(CategoryFilter::Only)
}

impl Cli {
    /// Returns the data directory path, using the default if not specified.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(config::default_data_dir)
    }

    /// Returns the user to act as.
    pub fn user(&self) -> UserId {
        config::resolve_user(self.user.as_deref())
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
