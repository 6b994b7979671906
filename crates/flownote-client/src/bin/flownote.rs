//! flownote: command-line client for FlowNote notes.
//!
//! Works against the Notes API (`--backend remote`, the default) or a local
//! data directory (`--backend local`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use flownote_client::{default_api_url, LocalBackend, NoteBackend, NoteStore, RemoteBackend};
use flownote_core::{
    defaults, pinned_first, EditorInput, Note, NoteCategory, NoteFilters, NotePatch,
};

#[derive(Parser)]
#[command(name = "flownote")]
#[command(author, version, about = "Take, organize and search notes")]
#[command(propagate_version = true)]
struct Cli {
    /// Where notes are stored
    #[arg(long, value_enum, default_value_t = BackendKind::Remote, global = true)]
    backend: BackendKind,

    /// Notes API collection URL (remote backend)
    #[arg(long, env = "FLOWNOTE_API_URL", global = true)]
    api_url: Option<String>,

    /// Data directory (local backend)
    #[arg(long, env = "FLOWNOTE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendKind {
    Remote,
    Local,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, pinned first
    List {
        /// Case-insensitive text search over title, content and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only notes in this category
        #[arg(short, long)]
        category: Option<NoteCategory>,

        /// Notes with a tag containing this text (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show one note in full
    Show {
        /// Note id
        id: String,
    },

    /// Create a note
    New {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short = 'b', long, default_value = "")]
        content: String,

        #[arg(short, long, default_value_t = NoteCategory::Personal)]
        category: NoteCategory,

        /// Comma-separated tags, e.g. "work, urgent"
        #[arg(long, default_value = "")]
        tags: String,

        /// Pin the note
        #[arg(short, long)]
        pinned: bool,
    },

    /// Edit fields of a note
    Edit {
        /// Note id
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short = 'b', long)]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<NoteCategory>,

        /// Comma-separated tags; replaces the existing list
        #[arg(long)]
        tags: Option<String>,

        #[arg(short, long)]
        pinned: Option<bool>,
    },

    /// Pin or unpin a note
    Pin {
        /// Note id
        id: String,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn backend_for(cli: &Cli) -> Box<dyn NoteBackend> {
    match cli.backend {
        BackendKind::Remote => {
            let url = cli.api_url.as_deref().unwrap_or_else(|| default_api_url());
            Box::new(RemoteBackend::new(url))
        }
        BackendKind::Local => {
            let dir = cli
                .data_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(defaults::LOCAL_DATA_DIR));
            Box::new(LocalBackend::in_dir(dir))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut store = NoteStore::open(backend_for(&cli)).await?;

    match cli.command {
        Commands::List {
            search,
            category,
            tags,
        } => {
            let filters = NoteFilters {
                category,
                search,
                tags: (!tags.is_empty()).then_some(tags),
            };
            cmd_list(&store, &filters);
        }
        Commands::Show { id } => {
            print_note(store.get(&id)?);
        }
        Commands::New {
            title,
            content,
            category,
            tags,
            pinned,
        } => {
            let input = EditorInput {
                title,
                content,
                category,
                tags_input: tags,
                is_pinned: pinned,
            };
            let note = store.create(input.to_draft()?).await?;
            println!("Created {}", note.id);
        }
        Commands::Edit {
            id,
            title,
            content,
            category,
            tags,
            pinned,
        } => {
            let current = store.get(&id)?;
            let mut input = EditorInput::from_note(current);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(content) = content {
                input.content = content;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(tags) = tags {
                input.tags_input = tags;
            }
            if let Some(pinned) = pinned {
                input.is_pinned = pinned;
            }

            if !input.has_changes(Some(current)) {
                println!("No changes");
                return Ok(());
            }
            let patch = NotePatch::from(input.to_draft()?);
            let note = store.update(&id, patch).await?;
            println!("Updated {}", note.id);
        }
        Commands::Pin { id } => {
            let note = store.toggle_pin(&id).await?;
            let state = if note.is_pinned { "Pinned" } else { "Unpinned" };
            println!("{} {}", state, note.id);
        }
        Commands::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

fn cmd_list(store: &NoteStore, filters: &NoteFilters) {
    let notes = pinned_first(store.filter(filters));
    if notes.is_empty() {
        if filters.is_active() {
            println!("No notes match your filters");
        } else {
            println!("No notes yet");
        }
        return;
    }

    for note in notes {
        let pin = if note.is_pinned { "*" } else { " " };
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", note.tags.join(" #"))
        };
        println!(
            "{} {}  [{}]  {}{}",
            pin,
            note.id,
            note.category.label(),
            note.title,
            tags
        );
    }
}

fn print_note(note: &Note) {
    println!("{}", note.title);
    println!("  id:       {}", note.id);
    println!("  category: {}", note.category.label());
    if !note.tags.is_empty() {
        println!("  tags:     {}", note.tags.join(", "));
    }
    println!("  pinned:   {}", if note.is_pinned { "yes" } else { "no" });
    println!("  created:  {}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("  updated:  {}", note.updated_at.format("%Y-%m-%d %H:%M"));
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}
