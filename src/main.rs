//! shelfmark CLI: load record files onto shelves, then search or list them.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use shelfmark::config::{CatalogConfig, load_file};
use shelfmark::error::{ConfigError, ShelfmarkError};
use shelfmark::inventory::{InventoryQuery, Library};
use shelfmark::model::{BookRecord, Location};

#[derive(Parser)]
#[command(name = "shelfmark", version, about = "Library catalog search and inventory")]
struct Cli {
    /// Catalog config file (default: $XDG_CONFIG_HOME/shelfmark/config.toml, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load a record file onto a shelf, as ROOM/ROW/SHELF=PATH. Repeatable.
    #[arg(long = "load", global = true, value_name = "LOCATION=PATH")]
    loads: Vec<ShelfLoad>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a record file and print its books without shelving them.
    Parse {
        file: PathBuf,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search the catalog, e.g. "*20* & *peter*".
    Search {
        query: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the books in a room, optionally narrowed to a row and shelf.
    Inventory {
        #[arg(long)]
        room: u32,

        #[arg(long)]
        row: Option<u32>,

        /// Requires --row.
        #[arg(long)]
        shelf: Option<u32>,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up a book by ISBN.
    Find { isbn: String },

    /// Show catalog statistics.
    Info,
}

/// `--load` argument: a shelf location and the record file for it.
#[derive(Debug, Clone)]
struct ShelfLoad {
    location: Location,
    path: PathBuf,
}

impl FromStr for ShelfLoad {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (location, path) = s.split_once('=').ok_or_else(|| ConfigError::InvalidLocation {
            input: s.to_string(),
        })?;
        Ok(Self {
            location: location.parse()?,
            path: PathBuf::from(path),
        })
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Parse { file, json } => {
            let content = std::fs::read_to_string(&file).map_err(|e| ShelfmarkError::Io {
                path: file.display().to_string(),
                source: e,
            })?;
            let books = shelfmark::parse_books(&content)?;
            let refs: Vec<&BookRecord> = books.iter().collect();
            print_books(&refs, None, json)?;
        }

        Commands::Search { query, json } => {
            let library = load_library(&config, &cli.loads)?;
            let found = library.search(&query);
            print_books(&found, Some(&library), json)?;
            if !json {
                println!("{} of {} books match \"{query}\"", found.len(), library.len());
            }
        }

        Commands::Inventory {
            room,
            row,
            shelf,
            json,
        } => {
            let library = load_library(&config, &cli.loads)?;
            let books = library.inventory_list(InventoryQuery { room, row, shelf })?;
            print_books(&books, Some(&library), json)?;
        }

        Commands::Find { isbn } => {
            let library = load_library(&config, &cli.loads)?;
            match library.find_book_by_isbn(&isbn) {
                Some(book) => print_books(&[book], Some(&library), false)?,
                None => miette::bail!("no book with ISBN \"{isbn}\" in the catalog"),
            }
        }

        Commands::Info => {
            let library = load_library(&config, &cli.loads)?;
            println!("{}", library.info());
        }
    }

    Ok(())
}

/// Build the catalog from the config's shelves, then the `--load` arguments.
fn load_library(config: &CatalogConfig, loads: &[ShelfLoad]) -> Result<Library> {
    let mut library = Library::new();
    config.populate(&mut library)?;
    for load in loads {
        load_file(&mut library, &load.path, load.location)?;
    }
    Ok(library)
}

/// Explicit `--config` must exist; the default path is optional.
fn resolve_config(explicit: Option<&std::path::Path>) -> Result<CatalogConfig> {
    if let Some(path) = explicit {
        return Ok(CatalogConfig::load(path)?);
    }
    match CatalogConfig::default_path() {
        Ok(path) if path.is_file() => Ok(CatalogConfig::load(&path)?),
        _ => Ok(CatalogConfig::default()),
    }
}

fn print_books(books: &[&BookRecord], library: Option<&Library>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(books).into_diagnostic()?);
        return Ok(());
    }

    for book in books {
        let location = book
            .shelf_id
            .and_then(|id| library.and_then(|lib| lib.location_of(id)));
        match location {
            Some(loc) => println!("[{loc}] {}", book.title),
            None => println!("{}", book.title),
        }
        if !book.authors.is_empty() {
            println!("    by {}", book.authors.join(", "));
        }
        if !book.publisher.is_empty() || book.publication_year != 0 {
            println!("    {} ({})", book.publisher, book.publication_year);
        }
        if !book.isbn.is_empty() {
            println!("    ISBN {}", book.isbn);
        }
        if book.number_of_pages != 0 {
            println!("    {} pages", book.number_of_pages);
        }
    }
    Ok(())
}
