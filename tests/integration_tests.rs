//! Integration tests for the query client against the stub responder
//!
//! These tests run real UDP round trips on the loopback interface.

use client::network::{query, query_server, QueryError};
use client::poll::poll_all;
use client::BookmarkStore;
use server::game::{random_status, GameSettings};
use server::network::Responder;
use shared::{
    KeyValueTable, PlayerRecord, QueryTarget, ServerInfo, ServerStatus, DEFAULT_BLUE_TEAM,
    DEFAULT_RED_TEAM, UNKNOWN_TEAM,
};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio_test::{assert_err, assert_ok};

const TEAMS: [&str; 2] = [DEFAULT_RED_TEAM, DEFAULT_BLUE_TEAM];

fn target_for(addr: SocketAddr) -> QueryTarget {
    QueryTarget::new("127.0.0.1", addr.port())
}

async fn spawn_responder(responder: Responder) -> QueryTarget {
    let addr = responder.local_addr().unwrap();
    tokio::spawn(responder.run());
    target_for(addr)
}

fn player(name: &str, team: &str) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        score: "0".to_string(),
        ping: "30".to_string(),
        team: team.to_string(),
    }
}

/// ROUND TRIP TESTS
mod round_trip_tests {
    use super::*;

    /// The example reply from the protocol notes, byte for byte
    #[tokio::test]
    async fn documented_reply() {
        let payload = b"\\hostname\\My Server\\mapname\\bloodgulch\\gametype\\ctf\\numplayers\\2\\maxplayers\\16\\player_0\\Alice\\score_0\\5\\ping_0\\40\\team_0\\0\\player_1\\Bob\\score_1\\3\\ping_1\\55\\team_1\\1\\";
        let responder = Responder::bind_with_payload("127.0.0.1:0", payload.to_vec())
            .await
            .unwrap();
        let target = spawn_responder(responder).await;

        let status = assert_ok!(query_server(&target, Duration::from_secs(2)).await);

        assert_eq!(
            status.info,
            ServerInfo {
                hostname: "My Server".to_string(),
                map_name: "bloodgulch".to_string(),
                game_type: "ctf".to_string(),
                game_variant: String::new(),
                num_players: "2".to_string(),
                max_players: "16".to_string(),
            }
        );
        let names: Vec<&str> = status.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    /// A generated roster survives encode, UDP and interpretation
    #[tokio::test]
    async fn generated_roster() {
        let mut rng = rand::thread_rng();
        let mut status = random_status(&GameSettings::default(), 8, &mut rng);
        // Interpretation sorts by team name, stable within a team
        status.players.sort_by(|a, b| a.team.cmp(&b.team));

        let responder = Responder::bind("127.0.0.1:0", &status, &TEAMS)
            .await
            .unwrap();
        let target = spawn_responder(responder).await;

        let received = query_server(&target, Duration::from_secs(2)).await.unwrap();
        assert_eq!(received, status);
    }

    /// Custom team names come from team_t0/team_t1
    #[tokio::test]
    async fn custom_team_names() {
        let status = ServerStatus {
            info: ServerInfo::default(),
            players: vec![player("a", "Spartans"), player("b", "Covenant")],
        };

        let responder = Responder::bind("127.0.0.1:0", &status, &["Spartans", "Covenant"])
            .await
            .unwrap();
        let target = spawn_responder(responder).await;

        let received = query_server(&target, Duration::from_secs(2)).await.unwrap();
        let teams: Vec<&str> = received.players.iter().map(|p| p.team.as_str()).collect();
        assert_eq!(teams, vec!["Covenant", "Spartans"]);
    }

    /// Players outside both teams come back with the unknown sentinel
    #[tokio::test]
    async fn unknown_team() {
        let status = ServerStatus {
            info: ServerInfo::default(),
            players: vec![player("spectator", "Spectators")],
        };

        let responder = Responder::bind("127.0.0.1:0", &status, &TEAMS)
            .await
            .unwrap();
        let target = spawn_responder(responder).await;

        let received = query_server(&target, Duration::from_secs(2)).await.unwrap();
        assert_eq!(received.players[0].team, UNKNOWN_TEAM);
    }
}

/// MALFORMED REPLY TESTS
mod malformed_reply_tests {
    use super::*;

    async fn status_for_payload(payload: &[u8]) -> ServerStatus {
        let responder = Responder::bind_with_payload("127.0.0.1:0", payload.to_vec())
            .await
            .unwrap();
        let target = spawn_responder(responder).await;
        query_server(&target, Duration::from_secs(2)).await.unwrap()
    }

    #[tokio::test]
    async fn empty_reply() {
        let status = status_for_payload(b"").await;
        assert_eq!(status, ServerStatus::default());
    }

    #[tokio::test]
    async fn truncated_reply() {
        let status = status_for_payload(b"\\hostname\\Half\\player_0\\Alice\\score_0").await;
        assert_eq!(status.info.hostname, "Half");
        assert_eq!(status.players.len(), 1);
        assert_eq!(status.players[0].score, "");
        assert_eq!(status.players[0].team, UNKNOWN_TEAM);
    }

    #[tokio::test]
    async fn corrupted_hostname() {
        let status = status_for_payload(b"\\hostname\\\x01ctf\\gamevariant\\Slayer\\").await;
        assert_eq!(status.info.hostname, "Slayer");
        assert_eq!(status.info.game_variant, "Slayer");
    }

    #[tokio::test]
    async fn invalid_utf8() {
        let status = status_for_payload(b"\\hostname\\\xff\xfeServer\\mapname\\x\\").await;
        assert!(status.info.hostname.ends_with("Server"));
        assert_eq!(status.info.map_name, "x");
    }

    #[tokio::test]
    async fn player_index_gap() {
        let table: KeyValueTable = vec![("player_0", "A"), ("player_2", "C")]
            .into_iter()
            .collect();
        let responder = Responder::bind_with_table("127.0.0.1:0", &table)
            .await
            .unwrap();
        let target = spawn_responder(responder).await;

        let status = query_server(&target, Duration::from_secs(2)).await.unwrap();
        assert_eq!(status.players.len(), 1);
    }
}

/// FAILURE TESTS
mod failure_tests {
    use super::*;

    /// A server that never answers fails within the configured deadline
    #[tokio::test]
    async fn timeout_is_bounded() {
        let responder = Responder::bind_with_payload("127.0.0.1:0", Vec::new())
            .await
            .unwrap()
            .silent(true);
        let target = spawn_responder(responder).await;

        let deadline = Duration::from_millis(250);
        let started = Instant::now();
        let result = query(&target, deadline).await;
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(QueryError::Timeout)));
        assert!(elapsed >= deadline);
        assert!(elapsed < deadline + Duration::from_millis(750));
    }

    /// A closed port is refused through ICMP on the connected socket
    #[tokio::test]
    async fn closed_port_is_a_network_error() {
        let port = {
            let socket = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
            socket.local_addr().unwrap().port()
        };

        let result = query(&QueryTarget::new("127.0.0.1", port), Duration::from_secs(2)).await;
        let err = assert_err!(result);
        assert!(matches!(err, QueryError::Network(_)), "unexpected error: {}", err);
    }

    /// Abandoning a pending query returns promptly and leaves nothing behind
    #[tokio::test]
    async fn abandoned_query() {
        let responder = Responder::bind_with_payload("127.0.0.1:0", Vec::new())
            .await
            .unwrap()
            .silent(true);
        let target = spawn_responder(responder).await;

        let pending = query(&target, Duration::from_secs(30));
        let abandoned = tokio::time::timeout(Duration::from_millis(50), pending).await;
        assert!(abandoned.is_err());
    }
}

/// CONCURRENCY TESTS
mod concurrency_tests {
    use super::*;

    /// Bookmarked servers are polled at once; one silent server does not
    /// delay the others beyond its own deadline
    #[tokio::test]
    async fn poll_bookmarks() {
        let mut store = BookmarkStore::new();

        for i in 0..3 {
            let status = ServerStatus {
                info: ServerInfo {
                    hostname: format!("server-{}", i),
                    ..Default::default()
                },
                players: Vec::new(),
            };
            let responder = Responder::bind("127.0.0.1:0", &status, &TEAMS)
                .await
                .unwrap();
            let target = spawn_responder(responder).await;
            store.add(&format!("s{}", i), &target, false).unwrap();
        }

        let silent = Responder::bind_with_payload("127.0.0.1:0", Vec::new())
            .await
            .unwrap()
            .silent(true);
        let silent_target = spawn_responder(silent).await;
        store.add("z-silent", &silent_target, false).unwrap();

        let (targets, invalid) = store.targets();
        assert!(invalid.is_empty());

        let deadline = Duration::from_millis(300);
        let started = Instant::now();
        let results = poll_all(targets, deadline).await;
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().take(3).enumerate() {
            assert_eq!(result.name, format!("s{}", i));
            let status = result.result.as_ref().unwrap();
            assert_eq!(status.info.hostname, format!("server-{}", i));
        }
        assert_eq!(results[3].name, "z-silent");
        assert!(matches!(results[3].result, Err(QueryError::Timeout)));

        // Sequential polling would take at least one deadline per silent server
        assert!(elapsed < deadline * 3);
    }
}
