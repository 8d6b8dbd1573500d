use clap::Parser;
use log::info;
use server::game::{random_status, GameSettings};
use server::network::Responder;
use shared::DEFAULT_QUERY_PORT;

/// Stub server answering the players status query.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[clap(short, long, default_value_t = DEFAULT_QUERY_PORT)]
        port: u16,
        /// Advertised server name
        #[clap(long, default_value = "Local Test Server")]
        hostname: String,
        /// Advertised map
        #[clap(short, long, default_value = "bloodgulch")]
        map: String,
        /// Number of generated players
        #[clap(short = 'n', long, default_value = "6")]
        players: usize,
        /// Red team display name (team id 0)
        #[clap(long, default_value = shared::DEFAULT_RED_TEAM)]
        red_team: String,
        /// Blue team display name (team id 1)
        #[clap(long, default_value = shared::DEFAULT_BLUE_TEAM)]
        blue_team: String,
        /// Read requests but never answer
        #[clap(long)]
        silent: bool,
    }

    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let settings = GameSettings {
        hostname: args.hostname,
        map_name: args.map,
        ..Default::default()
    };

    let mut status = random_status(&settings, args.players, &mut rand::thread_rng());
    for player in &mut status.players {
        player.team = if player.team == shared::DEFAULT_RED_TEAM {
            args.red_team.clone()
        } else {
            args.blue_team.clone()
        };
    }

    let address = format!("{}:{}", args.host, args.port);
    let responder = Responder::bind(
        &address,
        &status,
        &[args.red_team.as_str(), args.blue_team.as_str()],
    )
    .await?
    .silent(args.silent);

    info!(
        "Serving {:?} on {} with {} players{}",
        status.info.hostname,
        responder.local_addr()?,
        status.players.len(),
        if args.silent { " (silent)" } else { "" }
    );

    tokio::select! {
        _ = responder.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
