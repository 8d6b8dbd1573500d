//! # Status Protocol
//!
//! Pure, I/O-free pieces of the `\players\final\` status query shared by the
//! query client and the stub responder.
//!
//! - [`codec`]: request bytes and the backslash-delimited reply format
//! - [`status`]: server/player records and the interpreter that builds them
//! - [`address`]: query targets and `host:port` parsing
//!
//! ```rust
//! use shared::{decode_reply, interpret};
//!
//! let table = decode_reply(b"\\hostname\\Lan\\player_0\\Alice\\team_0\\0\\");
//! let status = interpret(&table);
//! assert_eq!(status.info.hostname, "Lan");
//! assert_eq!(status.players[0].team, "Red");
//! ```

pub mod address;
pub mod codec;
pub mod status;

pub use address::{AddressParseError, QueryTarget};
pub use codec::{
    decode_reply, encode_reply, encode_request, is_query_request, KeyValueTable, QUERY_REQUEST,
};
pub use status::{
    interpret, PlayerRecord, ServerInfo, ServerStatus, TeamCatalog, DEFAULT_BLUE_TEAM,
    DEFAULT_RED_TEAM, UNKNOWN_TEAM,
};

/// Default port of the game's dedicated servers.
pub const DEFAULT_QUERY_PORT: u16 = 2302;

/// Largest reply datagram we read.
pub const MAX_REPLY_SIZE: usize = 4096;
