use rand::seq::SliceRandom;
use rand::Rng;
use shared::{PlayerRecord, ServerInfo, ServerStatus, DEFAULT_BLUE_TEAM, DEFAULT_RED_TEAM};

const PLAYER_NAMES: [&str; 16] = [
    "Chief", "Arbiter", "Johnson", "Cortana", "Keyes", "Foehammer", "Jorge", "Kat", "Carter",
    "Emile", "Jun", "Noble6", "Buck", "Dare", "Romeo", "Mickey",
];

const DEFAULT_MAP: &str = "bloodgulch";

/// Settings the demo server advertises.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub hostname: String,
    pub map_name: String,
    pub game_type: String,
    pub game_variant: String,
    pub max_players: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            hostname: "Local Test Server".to_string(),
            map_name: DEFAULT_MAP.to_string(),
            game_type: "ctf".to_string(),
            game_variant: "CTF".to_string(),
            max_players: 16,
        }
    }
}

/// Builds a status with `player_count` players spread over both teams,
/// random scores and pings.
pub fn random_status<R: Rng>(settings: &GameSettings, player_count: usize, rng: &mut R) -> ServerStatus {
    let player_count = player_count.min(settings.max_players as usize);

    let mut names = PLAYER_NAMES.to_vec();
    names.shuffle(rng);

    let players = (0..player_count)
        .map(|index| {
            let name = match names.get(index) {
                Some(name) => name.to_string(),
                None => format!("Player{}", index),
            };
            let team = if index % 2 == 0 {
                DEFAULT_RED_TEAM
            } else {
                DEFAULT_BLUE_TEAM
            };

            PlayerRecord {
                name,
                score: rng.gen_range(0..=50).to_string(),
                ping: rng.gen_range(15..=250).to_string(),
                team: team.to_string(),
            }
        })
        .collect();

    ServerStatus {
        info: ServerInfo {
            hostname: settings.hostname.clone(),
            map_name: settings.map_name.clone(),
            game_type: settings.game_type.clone(),
            game_variant: settings.game_variant.clone(),
            num_players: player_count.to_string(),
            max_players: settings.max_players.to_string(),
        },
        players,
    }
}
