//! Command handlers for CLI subcommands.
//!
//! Each handler opens the store it needs, runs one service call and prints
//! the result. Connections are dropped when the handler returns.

use std::path::{Path, PathBuf};

use log::info;
use projdoc_core::samples::{sample_documents, sample_projects};
use projdoc_core::service::local_today;
use projdoc_core::{
    open_store, Board, DisplayStrategy, Document, DocumentFilter, DocumentService,
    DocumentVersion, Project, ProjectFilter, ProjectService, SearchStrategy,
    SqliteDocumentRepository, SqliteProjectRepository, Store,
};
use rusqlite::Connection;
use serde::Serialize;

use crate::cli::{Commands, DocumentCommands, FilterArgs, OutputFormat, ProjectCommands};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Resolved on-disk layout under the data directory.
pub struct Workspace {
    data_dir: PathBuf,
}

impl Workspace {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn store_path(&self, store: Store) -> PathBuf {
        self.data_dir.join(store.file_name())
    }

    fn open(&self, store: Store) -> Result<Connection> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(open_store(self.store_path(store), store)?)
    }
}

/// Execute a CLI command.
pub fn execute(command: Commands, workspace: &Workspace, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Seed => cmd_seed(workspace),
        Commands::Projects { command } => execute_projects(command, workspace, format),
        Commands::Documents { command } => execute_documents(command, workspace, format),
    }
}

fn execute_projects(
    command: ProjectCommands,
    workspace: &Workspace,
    format: OutputFormat,
) -> Result<()> {
    let conn = workspace.open(Store::Projects)?;
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn)?);

    match command {
        ProjectCommands::List { status, kind } => {
            let projects = service.filter_projects(ProjectFilter { status, kind })?;
            print_projects(&projects, format)
        }
        ProjectCommands::Stats => {
            let stats = service.get_project_progress_stats()?;
            match format {
                OutputFormat::Table => {
                    println!("Всего проектов:  {}", stats.total);
                    println!("Завершено:       {}", stats.completed);
                    println!("В процессе:      {}", stats.in_progress);
                    println!("С задержкой:     {}", stats.delayed);
                    println!("Выполнение:      {:.1}%", stats.completion_rate);
                    Ok(())
                }
                OutputFormat::Json => print_json(&stats),
            }
        }
        ProjectCommands::Progress { id, progress } => {
            if !service.update_project_progress(id, progress)? {
                return Err(format!("project not found: {id}").into());
            }
            println!("Project {id} progress updated");
            Ok(())
        }
        ProjectCommands::Board { kanban } => {
            let strategy = if kanban {
                DisplayStrategy::Kanban
            } else {
                DisplayStrategy::Tile
            };
            let projects = service.get_all_projects()?;
            print_board(&strategy.project(&projects), format)
        }
    }
}

fn execute_documents(
    command: DocumentCommands,
    workspace: &Workspace,
    format: OutputFormat,
) -> Result<()> {
    let conn = workspace.open(Store::Documents)?;
    let service = DocumentService::new(SqliteDocumentRepository::try_new(&conn)?);

    match command {
        DocumentCommands::List { category } => {
            let documents = match category {
                Some(category) => service.get_documents_by_category(category)?,
                None => service.get_all_documents()?,
            };
            print_documents(&documents, format)
        }
        DocumentCommands::Search { query, advanced } => {
            let strategy = if advanced {
                SearchStrategy::Advanced
            } else {
                SearchStrategy::Simple
            };
            let documents = service.search_documents(strategy, &query)?;
            print_documents(&documents, format)
        }
        DocumentCommands::Filter(args) => {
            let documents = service.search_documents_advanced(&document_filter(args))?;
            print_documents(&documents, format)
        }
        DocumentCommands::Create {
            name,
            category,
            author,
        } => {
            let document = service.create_document(&name, category, &author)?;
            println!(
                "Created document '{}' ({})",
                document.name,
                document.id.unwrap_or_default()
            );
            Ok(())
        }
        DocumentCommands::Publish { id } => {
            if !service.publish_document(id)? {
                return Err(format!("document not found: {id}").into());
            }
            println!("Document {id} published");
            Ok(())
        }
        DocumentCommands::Revise {
            id,
            author,
            changes,
        } => {
            let document = service
                .create_new_version(id, &author, &changes)?
                .ok_or_else(|| format!("document not found: {id}"))?;
            println!("Document {id} is now at version {}", document.version);
            Ok(())
        }
        DocumentCommands::History { id } => {
            if service.get_document(id)?.is_none() {
                return Err(format!("document not found: {id}").into());
            }
            print_history(&service.get_document_history(id)?, format)
        }
    }
}

fn cmd_seed(workspace: &Workspace) -> Result<()> {
    let conn = workspace.open(Store::Projects)?;
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn)?);
    let mut seeded_projects = 0;
    if projects.get_all_projects()?.is_empty() {
        for project in sample_projects() {
            projects.save_project(&project)?;
            seeded_projects += 1;
        }
    }

    let conn = workspace.open(Store::Documents)?;
    let documents = DocumentService::new(SqliteDocumentRepository::try_new(&conn)?);
    let mut seeded_documents = 0;
    if documents.get_all_documents()?.is_empty() {
        for document in sample_documents(local_today()) {
            documents.save_document(&document)?;
            seeded_documents += 1;
        }
    }

    info!(
        "event=seed module=cli status=ok projects={seeded_projects} documents={seeded_documents}"
    );
    println!("Seeded {seeded_projects} project(s) and {seeded_documents} document(s)");
    Ok(())
}

fn document_filter(args: FilterArgs) -> DocumentFilter {
    DocumentFilter {
        status: args.status,
        category: args.category,
        author: args.author.filter(|author| !author.trim().is_empty()),
        date_from: args.from,
        date_to: args.to,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_projects(projects: &[Project], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(projects);
    }
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!(
        "{:<5}  {:<28}  {:<16}  {:<18}  {:>5}  MANAGER",
        "ID", "NAME", "TYPE", "STATUS", "DONE"
    );
    println!("{}", "-".repeat(96));
    for project in projects {
        println!(
            "{:<5}  {:<28}  {:<16}  {:<18}  {:>4}%  {}",
            project.id.unwrap_or_default(),
            truncate(&project.name, 28),
            project.kind.label(),
            project.status.label(),
            project.progress,
            project.manager
        );
    }
    println!("\n{} project(s)", projects.len());
    Ok(())
}

fn print_documents(documents: &[Document], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(documents);
    }
    if documents.is_empty() {
        println!("No documents found.");
        return Ok(());
    }

    println!(
        "{:<5}  {:<32}  {:<26}  {:<18}  {:<6}  {:<10}  AUTHOR",
        "ID", "NAME", "CATEGORY", "STATUS", "VER", "CREATED"
    );
    println!("{}", "-".repeat(120));
    for document in documents {
        println!(
            "{:<5}  {:<32}  {:<26}  {:<18}  {:<6}  {:<10}  {}",
            document.id.unwrap_or_default(),
            truncate(&document.name, 32),
            truncate(document.category.label(), 26),
            document.status.label(),
            document.version,
            document.creation_date,
            document.author
        );
    }
    println!("\n{} document(s)", documents.len());
    Ok(())
}

fn print_history(history: &[DocumentVersion], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(history);
    }
    for entry in history {
        println!(
            "{:<6}  {}  {:<20}  {}",
            entry.version, entry.version_date, entry.author, entry.changes
        );
    }
    Ok(())
}

fn print_board(board: &Board<'_>, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(board);
    }
    match board {
        Board::Tiles(tiles) => {
            for tile in tiles {
                println!(
                    "({:>3},{:>3})  [{}] {} / {} / {}",
                    tile.x, tile.y, tile.header, tile.title, tile.subtitle, tile.footer
                );
            }
        }
        Board::Kanban(columns) => {
            for column in columns {
                println!("{}", column.caption());
                for project in &column.projects {
                    println!("  - {} ({}%)", project.name, project.progress);
                }
            }
        }
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept = s.chars().take(max_chars.saturating_sub(3)).collect::<String>();
        format!("{kept}...")
    }
}

/// Makes `path` absolute against the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projdoc_core::{DocumentCategory, DocumentStatus, ProjectStatus};

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Проект", 10), "Проект");
        assert_eq!(truncate("Модернизация ИТ", 8), "Модер...");
    }

    #[test]
    fn test_seed_fills_empty_stores_once() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());

        cmd_seed(&workspace).unwrap();
        cmd_seed(&workspace).unwrap();

        let conn = open_store(workspace.store_path(Store::Projects), Store::Projects).unwrap();
        let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
        let all = projects.get_all_projects().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].status, ProjectStatus::Completed);

        let conn = open_store(workspace.store_path(Store::Documents), Store::Documents).unwrap();
        let documents = DocumentService::new(SqliteDocumentRepository::try_new(&conn).unwrap());
        assert_eq!(documents.get_all_documents().unwrap().len(), 4);
    }

    #[test]
    fn test_publish_and_revise_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());

        execute(
            Commands::Documents {
                command: DocumentCommands::Create {
                    name: "Служебная записка".to_string(),
                    category: DocumentCategory::Memos,
                    author: "Иванов".to_string(),
                },
            },
            &workspace,
            OutputFormat::Table,
        )
        .unwrap();
        execute(
            Commands::Documents {
                command: DocumentCommands::Publish { id: 1 },
            },
            &workspace,
            OutputFormat::Table,
        )
        .unwrap();
        execute(
            Commands::Documents {
                command: DocumentCommands::Revise {
                    id: 1,
                    author: "Петров".to_string(),
                    changes: "Уточнены сроки".to_string(),
                },
            },
            &workspace,
            OutputFormat::Json,
        )
        .unwrap();

        let conn = open_store(workspace.store_path(Store::Documents), Store::Documents).unwrap();
        let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
        let service = DocumentService::new(repo);
        let document = service.get_document(1).unwrap().unwrap();
        assert_eq!(document.version, "1.1");
        assert_eq!(document.status, DocumentStatus::Updating);
    }

    #[test]
    fn test_missing_ids_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());

        let publish = execute(
            Commands::Documents {
                command: DocumentCommands::Publish { id: 99 },
            },
            &workspace,
            OutputFormat::Table,
        );
        assert!(publish.unwrap_err().to_string().contains("not found"));

        let progress = execute(
            Commands::Projects {
                command: ProjectCommands::Progress { id: 99, progress: 50 },
            },
            &workspace,
            OutputFormat::Table,
        );
        assert!(progress.is_err());
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(dir.path());

        let result = execute(
            Commands::Documents {
                command: DocumentCommands::Create {
                    name: "Записка".to_string(),
                    category: DocumentCategory::Memos,
                    author: " ".to_string(),
                },
            },
            &workspace,
            OutputFormat::Table,
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Автор документа обязателен"));
    }
}
