//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use projdoc_core::{
    default_log_level, DocumentCategory, DocumentStatus, ProjectStatus, ProjectType,
};
use std::path::PathBuf;

/// Directory name used under the home directory when `--data-dir` is absent.
const DEFAULT_DIR_NAME: &str = ".projdoc";

/// Project and document tracker.
#[derive(Parser, Debug)]
#[command(name = "projdoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the stores and logs
    #[arg(long, global = true, env = "PROJDOC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PROJDOC_LOG")]
    pub log_level: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert demo projects and documents into empty stores
    Seed,

    /// Project commands
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Document commands
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List {
        /// Only projects in this status (code or label)
        #[arg(long, value_parser = parse_project_status)]
        status: Option<ProjectStatus>,

        /// Only projects of this type (code or label)
        #[arg(long = "type", value_parser = parse_project_type)]
        kind: Option<ProjectType>,
    },

    /// Show completion statistics
    Stats,

    /// Set the progress percentage of a project
    Progress {
        id: i64,

        /// New progress; clamped to 0..=100, 100 completes the project
        #[arg(allow_negative_numbers = true)]
        progress: i64,
    },

    /// Show the project board
    Board {
        /// Group by kanban columns instead of the tile grid
        #[arg(long)]
        kanban: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// List documents
    List {
        /// Only documents in this category (code or label)
        #[arg(long, value_parser = parse_document_category)]
        category: Option<DocumentCategory>,
    },

    /// Search documents by text
    Search {
        query: String,

        /// Accept `status:`, `author:` and `category:` operators
        #[arg(long)]
        advanced: bool,
    },

    /// Filter documents by fields
    Filter(FilterArgs),

    /// Create a draft document
    Create {
        name: String,

        #[arg(long, value_parser = parse_document_category)]
        category: DocumentCategory,

        #[arg(long)]
        author: String,
    },

    /// Publish a document
    Publish { id: i64 },

    /// Open a new revision of a document
    Revise {
        id: i64,

        /// Author of the change
        #[arg(long)]
        author: String,

        /// Description of the change
        #[arg(long)]
        changes: String,
    },

    /// Show the version history of a document
    History { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long, value_parser = parse_document_status)]
    pub status: Option<DocumentStatus>,

    #[arg(long, value_parser = parse_document_category)]
    pub category: Option<DocumentCategory>,

    /// Substring of the author name
    #[arg(long)]
    pub author: Option<String>,

    /// Created on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Created on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Returns the data directory, falling back to `~/.projdoc`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_DIR_NAME)
        })
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

macro_rules! vocab_parser {
    ($fn_name:ident, $ty:ty) => {
        fn $fn_name(value: &str) -> Result<$ty, String> {
            <$ty>::ALL
                .iter()
                .copied()
                .find(|item| item.matches_ignore_case(value.trim()))
                .ok_or_else(|| {
                    let codes = <$ty>::ALL
                        .iter()
                        .map(|item| item.code())
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("unknown value `{value}`; expected one of: {codes}")
                })
        }
    };
}

vocab_parser!(parse_project_status, ProjectStatus);
vocab_parser!(parse_project_type, ProjectType);
vocab_parser!(parse_document_status, DocumentStatus);
vocab_parser!(parse_document_category, DocumentCategory);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_project_list_filters() {
        let cli = Cli::parse_from([
            "projdoc",
            "projects",
            "list",
            "--status",
            "В процессе",
            "--type",
            "investment",
        ]);
        match cli.command {
            Commands::Projects {
                command: ProjectCommands::List { status, kind },
            } => {
                assert_eq!(status, Some(ProjectStatus::InProgress));
                assert_eq!(kind, Some(ProjectType::Investment));
            }
            other => panic!("Expected projects list, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_cli_parse_negative_progress() {
        let cli = Cli::parse_from(["projdoc", "projects", "progress", "3", "-5"]);
        match cli.command {
            Commands::Projects {
                command: ProjectCommands::Progress { id, progress },
            } => {
                assert_eq!(id, 3);
                assert_eq!(progress, -5);
            }
            other => panic!("Expected projects progress, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_document_filter_and_global_flags() {
        let cli = Cli::parse_from([
            "projdoc",
            "documents",
            "filter",
            "--category",
            "templates",
            "--from",
            "2024-01-01",
            "--format",
            "json",
            "--data-dir",
            "/tmp/projdoc",
        ]);
        match &cli.command {
            Commands::Documents {
                command: DocumentCommands::Filter(args),
            } => {
                assert_eq!(args.category, Some(DocumentCategory::Templates));
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(args.status, None);
            }
            other => panic!("Expected documents filter, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/projdoc"));
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        let result = Cli::try_parse_from([
            "projdoc",
            "documents",
            "create",
            "Записка",
            "--category",
            "letters",
            "--author",
            "Иванов",
        ]);
        assert!(result.is_err());
    }
}
