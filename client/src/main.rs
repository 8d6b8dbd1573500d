use clap::{Parser, Subcommand};
use client::bookmarks::{BookmarkStore, SaveOutcome, DEFAULT_BOOKMARKS_FILE};
use client::network::QueryError;
use client::poll::{poll_all, PollResult};
use client::rendering::{render_json, render_status};
use log::{info, warn};
use shared::QueryTarget;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Bookmark file
    #[arg(short = 'b', long, global = true, default_value = DEFAULT_BOOKMARKS_FILE)]
    bookmarks: PathBuf,

    /// Reply deadline per server in milliseconds
    #[arg(short = 't', long, global = true, default_value = "2000")]
    timeout_ms: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query servers given as host:port or bookmark name
    Query {
        #[arg(required = true)]
        servers: Vec<String>,
    },
    /// Query every bookmarked server
    Poll,
    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkAction {
    List,
    Add {
        name: String,
        address: String,
        /// Rename or replace an existing bookmark without failing
        #[arg(short, long)]
        force: bool,
    },
    Remove {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=debug to see raw replies");
    }

    let args = Args::parse();
    let deadline = Duration::from_millis(args.timeout_ms);

    match args.command {
        Command::Query { servers } => {
            let store = BookmarkStore::load(&args.bookmarks)?;
            let mut targets = Vec::new();

            for server in servers {
                match resolve_target(&store, &server) {
                    Ok(target) => targets.push((server, target)),
                    Err(e) => print_failure(&server, &server, &e, args.json)?,
                }
            }

            print_results(poll_all(targets, deadline).await, args.json)?;
        }

        Command::Poll => {
            let store = BookmarkStore::load(&args.bookmarks)?;
            let (targets, invalid) = store.targets();

            for (name, e) in invalid {
                let address = store.get(&name).unwrap_or_default().to_string();
                print_failure(&name, &address, &QueryError::from(e), args.json)?;
            }

            if targets.is_empty() {
                warn!("No bookmarks in {}", args.bookmarks.display());
            }
            info!("Polling {} bookmarked servers", targets.len());

            print_results(poll_all(targets, deadline).await, args.json)?;
        }

        Command::Bookmark { action } => {
            run_bookmark_action(action, &args.bookmarks)?;
        }
    }

    Ok(())
}

/// A literal `host:port` wins; anything else is looked up as a bookmark name.
fn resolve_target(store: &BookmarkStore, server: &str) -> Result<QueryTarget, QueryError> {
    match QueryTarget::parse(server) {
        Ok(target) => Ok(target),
        Err(e) => match store.get(server) {
            Some(address) => Ok(QueryTarget::parse(address)?),
            None => Err(e.into()),
        },
    }
}

fn print_results(results: Vec<PollResult>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    for PollResult {
        name,
        target,
        result,
    } in results
    {
        let address = target.to_string();
        match result {
            Ok(status) if json => println!("{}", render_json(&name, &address, Ok(&status))?),
            Ok(status) => {
                let fallback = (name != address).then_some(name.as_str());
                println!("[{}]", address);
                println!("{}", render_status(&status, fallback));
            }
            Err(e) => print_failure(&name, &address, &e, json)?,
        }
    }
    Ok(())
}

fn print_failure(
    name: &str,
    address: &str,
    error: &QueryError,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", render_json(name, address, Err(error.to_string()))?);
    } else {
        println!("[{}] {}\n", address, error);
    }
    Ok(())
}

fn run_bookmark_action(
    action: BookmarkAction,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = BookmarkStore::load(path)?;

    match action {
        BookmarkAction::List => {
            if store.is_empty() {
                println!("No bookmarks in {}", path.display());
            }
            for (name, address) in store.iter() {
                println!("{:<24} {}", name, address);
            }
        }

        BookmarkAction::Add {
            name,
            address,
            force,
        } => {
            let target = QueryTarget::parse(&address)?;
            match store.add(&name, &target, force)? {
                SaveOutcome::AlreadySaved => {
                    println!("{} is already saved as {:?}", target, name);
                    return Ok(());
                }
                SaveOutcome::Added => println!("Saved {:?} ({})", name, target),
                SaveOutcome::Renamed { from } => {
                    println!("Renamed {:?} to {:?} ({})", from, name, target)
                }
                SaveOutcome::Replaced { previous } => {
                    println!("Replaced {:?} ({} -> {})", name, previous, target)
                }
            }
            store.save(path)?;
        }

        BookmarkAction::Remove { name } => match store.remove(&name) {
            Some(address) => {
                store.save(path)?;
                println!("Removed {:?} ({})", name, address);
            }
            None => warn!("No bookmark named {:?}", name),
        },
    }

    Ok(())
}
