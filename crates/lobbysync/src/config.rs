//! Client configuration.

use std::time::Duration;

/// Settings for a [`LobbyClient`](crate::LobbyClient).
///
/// `Default` gives a client for a lobby server on localhost. Override the
/// fields you care about, or go through
/// [`LobbyClientBuilder`](crate::LobbyClientBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the lobby server (`ws://` or `wss://`).
    pub url: String,

    /// How long `run` waits for a frame before treating the link as dead.
    ///
    /// `None` waits forever. The lobby server pings regularly, so a quiet
    /// link usually means a dead one.
    pub recv_timeout: Option<Duration>,

    /// Whether a newly joined game should ask the UI to navigate to the
    /// lobby screen. Turn off for headless clients.
    pub lobby_route_on_game: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8080/ws".to_string(),
            recv_timeout: Some(Duration::from_secs(60)),
            lobby_route_on_game: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_routes_to_lobby() {
        let config = ClientConfig::default();
        assert!(config.lobby_route_on_game);
        assert_eq!(config.recv_timeout, Some(Duration::from_secs(60)));
        assert!(config.url.starts_with("ws://"));
    }
}
