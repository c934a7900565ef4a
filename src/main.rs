use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use noterfy::api::{self, AppState};
use noterfy::config::Config;
use noterfy::logging;
use noterfy::meta::Metadata;
use noterfy::note::Note;
use noterfy::service::Service;
use noterfy::store::{FileStore, MemoryStore, Pagination, SortBy, Store};

#[derive(Parser)]
#[command(name = "noterfy", version)]
#[command(about = "Note service with a REST API and a local CLI", long_about = None)]
struct Cli {
    /// Path to an explicit config file (otherwise the well-known
    /// locations are searched)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
        /// Storage driver to run against
        #[arg(long, value_enum, default_value_t = StoreKind::File)]
        store: StoreKind,
        /// Override the configured file-store directory
        #[arg(long)]
        store_path: Option<PathBuf>,
        /// Directory for log files (logs to the console when omitted)
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Create a note in the local store
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Mark the note as favorite
        #[arg(long)]
        favorite: bool,
    },
    /// Show a note from the local store
    Get { id: Uuid },
    /// Update fields of an existing note
    Update {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
    },
    /// Delete a note from the local store
    Delete { id: Uuid },
    /// List notes from the local store
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = Pagination::DEFAULT_SIZE)]
        size: u64,
        #[arg(long, value_enum, default_value_t = SortField::Id)]
        sort_by: SortField,
        /// Sort in descending order
        #[arg(long)]
        descending: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreKind {
    File,
    Memory,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortField {
    Id,
    Title,
    CreatedDate,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Id => SortBy::Id,
            SortField::Title => SortBy::Title,
            SortField::CreatedDate => SortBy::CreatedDate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    match cli.command {
        Commands::Serve {
            port,
            store,
            store_path,
            log_dir,
        } => {
            logging::init(log_dir.as_deref())?;

            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(path) = store_path {
                config.store.file.path = path;
            }

            let store: Arc<dyn Store> = match store {
                StoreKind::File => Arc::new(FileStore::open(&config.store.file.path)),
                StoreKind::Memory => Arc::new(MemoryStore::new()),
            };
            let state = AppState {
                service: Service::new(store),
                meta: Arc::new(Metadata::current()),
            };

            runtime.block_on(api::serve(&config, state))?;
        }
        Commands::Create {
            title,
            content,
            favorite,
        } => {
            let service = local_service(&config);
            let note = Note {
                title,
                content,
                is_favorite: favorite.then_some(true),
                ..Note::default()
            };
            let created = runtime.block_on(service.create(&note))?;
            println!("{created}");
        }
        Commands::Get { id } => {
            let service = local_service(&config);
            let note = runtime.block_on(service.get(id))?;
            println!("{note}");
        }
        Commands::Update {
            id,
            title,
            content,
            favorite,
        } => {
            let service = local_service(&config);
            let patch = Note {
                id,
                title,
                content,
                is_favorite: favorite,
                ..Note::default()
            };
            let updated = runtime.block_on(service.update(&patch))?;
            println!("{updated}");
        }
        Commands::Delete { id } => {
            let service = local_service(&config);
            runtime.block_on(service.delete(id))?;
            println!("Deleted {id}");
        }
        Commands::List {
            page,
            size,
            sort_by,
            descending,
        } => {
            let service = local_service(&config);
            let pagination = Pagination {
                page,
                size,
                sort_by: sort_by.into(),
                ascending: !descending,
            };
            let result = runtime.block_on(service.fetch(&pagination))?;

            if result.notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            for note in &result.notes {
                println!("{note}");
                println!();
            }
            println!(
                "page {} of {}, {} note(s) total",
                page.max(1),
                result.total_pages,
                result.total_count
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}

/// Service over the configured file store, for the local CLI commands.
fn local_service(config: &Config) -> Service {
    Service::new(Arc::new(FileStore::open(&config.store.file.path)))
}
