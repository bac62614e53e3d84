use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notemark_core::filters::SortOption;
use notemark_core::models::{Category, CategoryId, Note, UserId};
use notemark_core::session::Dashboard;
use notemark_core::storage::{AuthProvider, Database, LocalAuth, SqliteStore};

mod config;
use config::load_config;

#[derive(Parser)]
#[command(name = "notemark", version, about = "Personal notes in the terminal")]
struct Cli {
    /// Config file location
    #[arg(long, default_value = "notemark.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List notes, optionally filtered and sorted
    List {
        /// Show only notes in this category
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search in title and content
        #[arg(long)]
        search: Option<String>,
        /// Sort order: newest, oldest or pinned
        #[arg(long, default_value = "newest")]
        sort: SortOption,
    },
    /// Add a note
    Add {
        title: String,
        /// Note body (markup or plain text)
        #[arg(long)]
        content: String,
        /// Category to file the note under
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit a note
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// New category name, or "none" to clear
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a note
    Rm { id: String },
    /// Toggle a note's pinned state
    Pin { id: String },
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Export categories and notes as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Back up the store database file
    Backup { path: PathBuf },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories
    List,
    /// Add a category (at most 5 per user)
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename a category
    Rename { id: CategoryId, name: String },
    /// Delete a category; its notes become uncategorized
    Rm { id: CategoryId },
}

#[derive(serde::Serialize)]
struct ExportPayload<'a> {
    categories: &'a [Category],
    notes: &'a [Note],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config);

    if let Command::Backup { path } = &cli.command {
        let db = Database::new(&config.store_path);
        if !db.exists() {
            anyhow::bail!("no store database at {}", config.store_path);
        }
        db.backup(path)?;
        println!("Backed up {} to {}", config.store_path, path.display());
        return Ok(());
    }

    let store = SqliteStore::open(&config.store_path)?;
    let auth = LocalAuth::signed_in(UserId::new(config.user.clone()));
    let mut dashboard = Dashboard::new();
    dashboard.session_changed(&store, auth.current_user())?;

    match cli.command {
        Command::List { category, search, sort } => {
            if let Some(name) = category {
                let id = resolve_category(&dashboard, &name)?;
                dashboard.set_active_category(Some(id))?;
            }
            if let Some(text) = search {
                dashboard.set_search(text);
            }
            dashboard.set_sort(sort);

            let visible = dashboard.visible_notes();
            if visible.is_empty() {
                println!("No notes.");
                return Ok(());
            }
            for note in visible {
                let pin = if note.pinned { "*" } else { " " };
                let category = note
                    .category_id
                    .and_then(|id| dashboard.categories.get(id))
                    .map(|c| c.name.as_str())
                    .unwrap_or("-");
                println!(
                    "{} {}  {}  [{}] {}: {}",
                    pin,
                    note.created_at.format("%Y-%m-%d"),
                    note.id,
                    category,
                    note.title,
                    note.preview(60),
                );
            }
        }

        Command::Add { title, content, category } => {
            dashboard.open_editor();
            dashboard.editor.set_title(title);
            dashboard.editor.set_content(content);
            if let Some(name) = category {
                let id = resolve_category(&dashboard, &name)?;
                dashboard.editor.set_category(Some(id));
            }
            let note = dashboard.save_editor(&store)?;
            println!("Created note {}", note.id);
        }

        Command::Edit { id, title, content, category } => {
            dashboard.edit_note(&id)?;
            if let Some(title) = title {
                dashboard.editor.set_title(title);
            }
            if let Some(content) = content {
                dashboard.editor.set_content(content);
            }
            if let Some(name) = category {
                if name == "none" {
                    dashboard.editor.set_category(None);
                } else {
                    let category_id = resolve_category(&dashboard, &name)?;
                    dashboard.editor.set_category(Some(category_id));
                }
            }
            let note = dashboard.save_editor(&store)?;
            println!("Updated note {}", note.id);
        }

        Command::Rm { id } => {
            dashboard.notes.delete(&store, &id)?;
            println!("Deleted note {}", id);
        }

        Command::Pin { id } => {
            let note = dashboard.notes.toggle_pin(&store, &id)?;
            println!("{} note {}", if note.pinned { "Pinned" } else { "Unpinned" }, id);
        }

        Command::Category(command) => match command {
            CategoryCommand::List => {
                if dashboard.categories.is_empty() {
                    println!("No categories.");
                }
                for category in dashboard.categories.all() {
                    println!(
                        "{}  {}  {}",
                        category.id,
                        category.name,
                        category.color.as_deref().unwrap_or("-"),
                    );
                }
            }
            CategoryCommand::Add { name, color } => {
                let color = color.unwrap_or_else(|| config.category_color.clone());
                let category = dashboard.add_category(&store, &name, Some(&color))?;
                println!("Created category {} ({})", category.name, category.id);
            }
            CategoryCommand::Rename { id, name } => {
                let category = dashboard.categories.rename(&store, id, &name)?;
                println!("Renamed category {} to {}", id, category.name);
            }
            CategoryCommand::Rm { id } => {
                dashboard.remove_category(&store, id)?;
                println!("Deleted category {}", id);
            }
        },

        Command::Export { out } => {
            let payload = ExportPayload {
                categories: dashboard.categories.all(),
                notes: dashboard.notes.all(),
            };
            let json = serde_json::to_string_pretty(&payload)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Command::Backup { .. } => unreachable!("handled before the store is opened"),
    }

    Ok(())
}

fn resolve_category(dashboard: &Dashboard, name: &str) -> Result<CategoryId> {
    dashboard
        .categories
        .find_by_name(name)
        .map(|c| c.id)
        .with_context(|| format!("no category named '{}'", name))
}
