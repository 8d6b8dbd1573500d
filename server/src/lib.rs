//! # Stub Status Server
//!
//! A stand-in for the game's dedicated server that answers the
//! `\players\final\` status query, for testing query clients without a
//! real server.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! The advertised game settings and a random roster generator.
//!
//! ### Network Module (`network`)
//! The UDP [`network::Responder`]: reads datagrams, answers the status
//! request with a prepared reply and ignores everything else. It can also
//! stay silent, which is how client timeouts are exercised.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::game::{random_status, GameSettings};
//! use server::network::Responder;
//! use shared::{DEFAULT_BLUE_TEAM, DEFAULT_RED_TEAM};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let status = random_status(&GameSettings::default(), 6, &mut rand::thread_rng());
//!     let responder = Responder::bind(
//!         "127.0.0.1:2302",
//!         &status,
//!         &[DEFAULT_RED_TEAM, DEFAULT_BLUE_TEAM],
//!     )
//!     .await?;
//!
//!     responder.run().await;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod network;
