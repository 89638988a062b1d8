//! Clap argument definitions for the `annoq` CLI.

use std::path::PathBuf;

use annoq_query::JoinOperator;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "annoq")]
#[command(about = "Translate keyword queries into annotation span queries")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `annoq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Translate queries, from arguments or one per line on stdin
    #[command(after_help = "\
QUERY SYNTAX:
  term               Literal term
  \"some phrase\"      Literal phrase
  phrase[Field]      Phrase inside an annotation of that type
  *[Field]           Any annotation of that type
  id[Field_id]       Annotation carrying that concept id
  \\ \\\" \\[ \\] \\* \\\\    Escaped characters inside a phrase

EXAMPLES:
  annoq translate 'brca1[Gene] \"breast cancer\"[Disease]'
  annoq translate --and '*[Gene]' 'rs123[SNP_id]'
  annoq translate --explain 'tp53[Gene]'
  annoq translate < queries.txt")]
    Translate(TranslateCommand),

    /// Parse an entity description from a file or stdin
    Entities(EntitiesCommand),

    /// List the fields a query may name
    Fields,

    /// Initialize annoq configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

impl Commands {
    /// Returns true if the command reads the merged configuration.
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Translate(_) | Self::Config)
    }
}

/// Arguments for `annoq translate`.
#[derive(Args, Debug, Clone, Default)]
pub struct TranslateCommand {
    /// Queries to translate; reads stdin when omitted
    pub queries: Vec<String>,

    /// Join terms with AND
    #[arg(long, conflicts_with = "or")]
    pub and: bool,

    /// Join terms with OR
    #[arg(long)]
    pub or: bool,

    /// Render phrase:field pairs instead of backend syntax
    #[arg(long)]
    pub debug: bool,

    /// Show the normalized input, terms and fragments of each query
    #[arg(long, conflicts_with = "json")]
    pub explain: bool,

    /// Print one JSON object per query
    #[arg(long)]
    pub json: bool,

    /// Report failing queries and continue instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

impl TranslateCommand {
    /// Join operator requested on the command line, if any.
    pub fn operator(&self) -> Option<JoinOperator> {
        if self.and {
            Some(JoinOperator::And)
        } else if self.or {
            Some(JoinOperator::Or)
        } else {
            None
        }
    }
}

/// Arguments for `annoq entities`.
#[derive(Args, Debug, Clone)]
pub struct EntitiesCommand {
    /// File holding the description; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `annoq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.annoq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}
