//! Plain-text and JSON views of a [`ServerStatus`].

use serde::Serialize;
use shared::ServerStatus;

const NAME_WIDTH: usize = 24;
const SCORE_WIDTH: usize = 7;
const PING_WIDTH: usize = 6;

/// One-line summary of the server.
///
/// An empty hostname is replaced by `fallback_name`, usually the bookmark
/// the server was picked from.
pub fn render_header(status: &ServerStatus, fallback_name: Option<&str>) -> String {
    let info = &status.info;
    let hostname = match info.hostname.trim() {
        "" => fallback_name.unwrap_or_default(),
        name => name,
    };

    format!(
        "{} | Map: {} | Type: {} ({}) | Players: {}/{}",
        hostname, info.map_name, info.game_type, info.game_variant, info.num_players, info.max_players
    )
}

/// Header followed by a fixed-width player table.
pub fn render_status(status: &ServerStatus, fallback_name: Option<&str>) -> String {
    let mut out = render_header(status, fallback_name);
    out.push('\n');
    out.push_str(&format!(
        "{:<name$} {:>score$} {:>ping$}  {}\n",
        "Name",
        "Score",
        "Ping",
        "Team",
        name = NAME_WIDTH,
        score = SCORE_WIDTH,
        ping = PING_WIDTH
    ));

    if status.players.is_empty() {
        out.push_str("(no players)\n");
        return out;
    }

    for player in &status.players {
        out.push_str(&format!(
            "{:<name$} {:>score$} {:>ping$}  {}\n",
            truncate(&player.name, NAME_WIDTH),
            player.score,
            player.ping,
            player.team,
            name = NAME_WIDTH,
            score = SCORE_WIDTH,
            ping = PING_WIDTH
        ));
    }

    out
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a ServerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// JSON object for one queried server.
pub fn render_json(
    name: &str,
    address: &str,
    result: Result<&ServerStatus, String>,
) -> Result<String, serde_json::Error> {
    let (status, error) = match result {
        Ok(status) => (Some(status), None),
        Err(e) => (None, Some(e)),
    };

    serde_json::to_string_pretty(&JsonEntry {
        name,
        address: address.to_string(),
        status,
        error,
    })
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width - 1).chain(std::iter::once('~')).collect()
    }
}
