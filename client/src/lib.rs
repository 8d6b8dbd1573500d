//! # Status Query Client
//!
//! Client side of the `\players\final\` status query: one UDP datagram out,
//! one datagram back, decoded and interpreted by the `shared` crate.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! The single round trip and its error type:
//! - Name resolution and a per-call UDP socket
//! - One deadline covering the whole exchange
//! - `Timeout` and `Network` failures; malformed replies never fail
//!
//! ### Poll Module (`poll`)
//! Queries many servers at once, one task per server, each with its own
//! deadline, and hands the results back in input order.
//!
//! ### Bookmarks Module (`bookmarks`)
//! Named `host:port` entries kept in a TOML file, with the save rules the
//! front-ends rely on (rename and replace need explicit consent).
//!
//! ### Rendering Module (`rendering`)
//! Text table and JSON views of a server status for the command line.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::{query_server, DEFAULT_TIMEOUT};
//! use shared::QueryTarget;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target: QueryTarget = "127.0.0.1:2302".parse()?;
//!     let status = query_server(&target, DEFAULT_TIMEOUT).await?;
//!
//!     for player in &status.players {
//!         println!("{} ({}) {}", player.name, player.team, player.score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//! Every query owns its socket and nothing is shared between calls, so any
//! number of queries may run at once. Dropping a pending query closes its
//! socket.

pub mod bookmarks;
pub mod network;
pub mod poll;
pub mod rendering;

pub use bookmarks::{BookmarkError, BookmarkStore, SaveOutcome};
pub use network::{query, query_server, QueryError, DEFAULT_TIMEOUT};
pub use poll::{poll_all, PollResult};
