//! Command-line surface.

use clap::{Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

pub const DEFAULT_WEB_PORT: u16 = 5000;

/// jotter - tagged personal notes, viewable in the browser
#[derive(Debug, Parser)]
#[command(name = "jotter", version)]
#[command(about = "Create, search and browse tagged personal notes")]
pub struct Cli {
    /// Note store file
    #[arg(long, global = true, env = "JOTTER_STORE", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// HTML template served by `web`
    #[arg(long, global = true, env = "JOTTER_TEMPLATE", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "JOTTER_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "JOTTER_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new note
    New {
        /// The content of the note to create
        #[arg(value_name = "NOTE")]
        note: String,

        /// Comma-separated tags to add to the note
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,
    },
    /// Get all notes
    All,
    /// Get notes whose content contains the filter
    Find {
        /// Case-sensitive search term applied to note content
        filter: String,
    },
    /// Remove a note by id
    Remove {
        /// The id of the note to remove
        id: u64,
    },
    /// Launch a local website to see notes
    Web {
        /// Port to listen on
        #[arg(default_value_t = DEFAULT_WEB_PORT)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        host: IpAddr,

        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// Remove all notes
    Clean,
}
