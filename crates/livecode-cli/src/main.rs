//! livecode command-line tools.
//!
//! Provides the `livecode` binary with subcommands for inspecting and
//! editing a directory-backed program store without running the server,
//! plus `fetch-assets`, which downloads the third-party scripts and styles
//! the server serves under `/www/`.
//!
//! Uses the same `livecode_storage::DirStore` as the server, so files
//! written here are picked up by a server pointed at the same directory.

mod assets;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use livecode_storage::{CodeStore, DirStore, Pid, StorageError};

/// livecode playground tools.
#[derive(Parser, Debug)]
#[command(name = "livecode", about = "livecode playground tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every program in a store directory.
    List {
        /// Store directory.
        #[arg(short, long)]
        dir: PathBuf,
    },

    /// Search program ids and sources for a substring.
    Search {
        /// Store directory.
        #[arg(short, long)]
        dir: PathBuf,

        /// Case-sensitive substring.
        query: String,
    },

    /// Print a program's source.
    Show {
        /// Store directory.
        #[arg(short, long)]
        dir: PathBuf,

        /// Program id.
        id: String,
    },

    /// Store a program's source from a file or stdin.
    Put {
        /// Store directory.
        #[arg(short, long)]
        dir: PathBuf,

        /// Program id.
        id: String,

        /// Source file (default: read stdin).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Download vendored CodeMirror and p5.js files.
    FetchAssets {
        /// Destination directory.
        #[arg(long, default_value = "www")]
        dest: PathBuf,
    },
}

/// Exit code for bad input (invalid id, unknown program, missing store).
const EXIT_USAGE: i32 = 1;
/// Exit code for I/O and network failures.
const EXIT_IO: i32 = 3;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::List { dir } => run_store(&dir, |store| {
            for id in store.list()? {
                println!("{id}");
            }
            Ok(())
        }),
        Commands::Search { dir, query } => run_store(&dir, |store| {
            for id in store.search(&query)? {
                println!("{id}");
            }
            Ok(())
        }),
        Commands::Show { dir, id } => run_store(&dir, |store| {
            print!("{}", store.load(&Pid::parse(&id)?)?);
            Ok(())
        }),
        Commands::Put { dir, id, file } => run_put(&dir, &id, file.as_deref()),
        Commands::FetchAssets { dest } => match assets::fetch_all(&dest).await {
            Ok(files) => {
                tracing::info!("fetched {} asset(s) into {}", files.len(), dest.display());
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                EXIT_IO
            }
        },
    };
    process::exit(exit_code);
}

/// Runs `op` against an existing store directory without bootstrapping it,
/// so read-only commands leave the directory as they found it.
fn run_store(dir: &Path, op: impl FnOnce(&DirStore) -> Result<(), StorageError>) -> i32 {
    if !dir.is_dir() {
        eprintln!("Error: store directory '{}' does not exist", dir.display());
        return EXIT_USAGE;
    }
    let result = op(&DirStore::at(dir));
    report(result)
}

/// Execute the put subcommand.
fn run_put(dir: &Path, raw_id: &str, file: Option<&Path>) -> i32 {
    let id = match Pid::parse(raw_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_USAGE;
        }
    };

    let source = match read_source(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: failed to read source: {e}");
            return EXIT_IO;
        }
    };

    let result = DirStore::open(dir).and_then(|store| store.store(&id, &source));
    if result.is_ok() {
        tracing::info!(program = %id, bytes = source.len(), "stored");
    }
    report(result)
}

/// Reads program source from `file`, or stdin when absent.
fn read_source(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Maps a storage outcome to an exit code, printing any error.
fn report(result: Result<(), StorageError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e @ (StorageError::InvalidIdentifier { .. } | StorageError::NotFound(_))) => {
            eprintln!("Error: {e}");
            EXIT_USAGE
        }
        Err(e @ StorageError::Io { .. }) => {
            eprintln!("Error: {e}");
            EXIT_IO
        }
    }
}
