//! Connects to a lobby server and logs what the client state does.
//!
//! ```text
//! lobby-watch [URL] [TOKEN]
//! RUST_LOG=lobbysync=debug lobby-watch ws://127.0.0.1:8080/ws my-token
//! ```

use lobbysync::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), LobbysyncError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = ClientConfig::default();
    if let Some(url) = args.next() {
        config.url = url;
    }
    let token = args.next().unwrap_or_default();

    tracing::info!(url = %config.url, "connecting");
    let conn = WebSocketConnection::connect(&config.url).await?;
    let (mut client, mut navigation) = LobbyClientBuilder::new()
        .config(config)
        .build(conn, JsonCodec);

    client.reload_client_info().await?;
    client.connect(&token).await?;

    let log_navigation = async {
        while let Some(route) = navigation.recv().await {
            tracing::info!(?route, "server asked to navigate");
        }
    };

    let mut interrupted = false;
    tokio::select! {
        result = client.run() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "link lost");
            }
        }
        () = log_navigation => {}
        _ = tokio::signal::ctrl_c() => interrupted = true,
    }
    if interrupted {
        client.close().await?;
    }

    report(client.store());
    Ok(())
}

/// Logs a one-shot summary of the final state.
fn report(store: &Store) {
    let connection = store.connection();
    tracing::info!(
        status = ?connection.status(),
        player = ?connection.player_session().map(|s| &s.player.name),
        last_error = ?connection.last_error(),
        disconnect = ?connection.disconnect_error(),
        "connection"
    );

    let game = store.game();
    match game.current_game() {
        Some(info) => {
            tracing::info!(
                game_id = %info.id,
                status = ?info.status,
                players = game.players_in_slots().len(),
                node = ?game.current_node_id(),
                "game"
            );
        }
        None => tracing::info!("not in a game"),
    }
    for entry in game.nodes().iter() {
        tracing::info!(
            node = %entry.node.name,
            location = %entry.node.location,
            ping = ?entry.ping.and_then(|p| p.current),
            "relay node"
        );
    }
}
