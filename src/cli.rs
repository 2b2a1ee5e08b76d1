use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Flavor;

#[derive(Parser, Debug)]
#[command(name = "db2-hotfix-gen")]
#[command(version, about = "Generate hotfix database SQL and C++ glue from DB2Structure.h")]
pub struct Cli {
    /// Config file (defaults to the per-user config.json if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate hotfixes.sql, HotfixDatabase.cpp/.h (and DB2LoadInfo.h)
    Generate {
        /// Path to DB2Structure.h
        header: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Only include these structures (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Exclude these structures (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Output flavor, overrides the config file
        #[arg(short, long, value_enum)]
        flavor: Option<Flavor>,

        /// Maximum generated C++ line length, overrides the config file
        #[arg(long)]
        line_length: Option<usize>,

        /// Print every structure as it is generated
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the structures found in a header with their table names
    List {
        /// Path to DB2Structure.h
        header: PathBuf,
    },

    /// List the supported member types and their mappings
    Types,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
