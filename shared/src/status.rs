//! Server status records and the interpreter that builds them from a
//! decoded [`KeyValueTable`].

use crate::codec::KeyValueTable;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Team name used when a player's team id is not in the catalog.
/// Front-ends are expected to translate it.
pub const UNKNOWN_TEAM: &str = "Unknown";
pub const DEFAULT_RED_TEAM: &str = "Red";
pub const DEFAULT_BLUE_TEAM: &str = "Blue";

/// Control characters below this code point mark a corrupted hostname.
const CORRUPT_HOSTNAME_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub hostname: String,
    pub map_name: String,
    pub game_type: String,
    pub game_variant: String,
    pub num_players: String,
    pub max_players: String,
}

impl ServerInfo {
    pub fn player_count(&self) -> Option<u32> {
        self.num_players.trim().parse().ok()
    }

    pub fn max_player_count(&self) -> Option<u32> {
        self.max_players.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: String,
    pub ping: String,
    pub team: String,
}

/// The two-entry team id to display name mapping of one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCatalog {
    red: String,
    blue: String,
}

impl TeamCatalog {
    /// Reads `team_t0`/`team_t1`; an empty value counts as absent.
    pub fn from_table(table: &KeyValueTable) -> Self {
        let name_or = |key: &str, default: &str| match table.get(key) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default.to_string(),
        };

        Self {
            red: name_or("team_t0", DEFAULT_RED_TEAM),
            blue: name_or("team_t1", DEFAULT_BLUE_TEAM),
        }
    }

    pub fn resolve(&self, team_id: &str) -> &str {
        match team_id {
            "0" => &self.red,
            "1" => &self.blue,
            _ => UNKNOWN_TEAM,
        }
    }
}

impl Default for TeamCatalog {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_TEAM.to_string(),
            blue: DEFAULT_BLUE_TEAM.to_string(),
        }
    }
}

/// Everything one status reply tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub info: ServerInfo,
    pub players: Vec<PlayerRecord>,
}

impl ServerStatus {
    /// Builds the reply table a server would send for this status.
    ///
    /// Player teams are written back as ids: the first catalog name maps to
    /// `0`, the second to `1`, anything else to an empty id.
    pub fn to_table(&self, teams: &[&str; 2]) -> KeyValueTable {
        let mut table = KeyValueTable::new();
        table.insert("hostname", self.info.hostname.as_str());
        table.insert("gamevariant", self.info.game_variant.as_str());
        table.insert("mapname", self.info.map_name.as_str());
        table.insert("gametype", self.info.game_type.as_str());
        table.insert("numplayers", self.info.num_players.as_str());
        table.insert("maxplayers", self.info.max_players.as_str());
        table.insert("team_t0", teams[0]);
        table.insert("team_t1", teams[1]);

        for (index, player) in self.players.iter().enumerate() {
            let team_id = match teams.iter().position(|t| *t == player.team) {
                Some(id) => id.to_string(),
                None => String::new(),
            };
            table.insert(format!("player_{}", index), player.name.as_str());
            table.insert(format!("score_{}", index), player.score.as_str());
            table.insert(format!("ping_{}", index), player.ping.as_str());
            table.insert(format!("team_{}", index), team_id);
        }

        table
    }
}

/// Turns a decoded table into a [`ServerStatus`].
///
/// Total over all inputs: missing fields become empty strings and an empty
/// table yields an empty status.
pub fn interpret(table: &KeyValueTable) -> ServerStatus {
    let mut info = ServerInfo {
        hostname: table.get_or_empty("hostname").to_string(),
        map_name: table.get_or_empty("mapname").to_string(),
        game_type: table.get_or_empty("gametype").to_string(),
        game_variant: table.get_or_empty("gamevariant").to_string(),
        num_players: table.get_or_empty("numplayers").to_string(),
        max_players: table.get_or_empty("maxplayers").to_string(),
    };

    if is_corrupt_hostname(&info.hostname) {
        warn!(
            "Hostname {:?} starts with a control character, using game variant {:?}",
            info.hostname, info.game_variant
        );
        info.hostname = info.game_variant.clone();
    }

    let teams = TeamCatalog::from_table(table);
    let mut players = enumerate_players(table, &teams);

    // sort_by is stable: equal team names keep their index order
    players.sort_by(|a, b| a.team.cmp(&b.team));

    debug!(
        "Interpreted {:?} with {} players",
        info.hostname,
        players.len()
    );

    ServerStatus { info, players }
}

fn is_corrupt_hostname(hostname: &str) -> bool {
    hostname
        .chars()
        .next()
        .map_or(false, |c| (c as u32) < CORRUPT_HOSTNAME_THRESHOLD)
}

/// Walks `player_0`, `player_1`, ... until the first missing index.
fn enumerate_players(table: &KeyValueTable, teams: &TeamCatalog) -> Vec<PlayerRecord> {
    let mut players = Vec::new();

    for index in 0.. {
        let Some(name) = table.get(&format!("player_{}", index)) else {
            break;
        };

        let team_id = table.get_or_empty(&format!("team_{}", index));
        players.push(PlayerRecord {
            name: name.to_string(),
            score: table.get_or_empty(&format!("score_{}", index)).to_string(),
            ping: table.get_or_empty(&format!("ping_{}", index)).to_string(),
            team: teams.resolve(team_id).to_string(),
        });
    }

    players
}
