//! The connection state slice.
//!
//! All mutations are synchronous and run one at a time, in the order the
//! events that cause them arrive. Nothing here blocks or awaits.

use lobbysync_protocol::{ClientInfo, GameId, PlayerInfo, PlayerSession, PlayerStatus};

use crate::{BeginOutcome, ConnectionError, InFlight};

// ---------------------------------------------------------------------------
// LinkStatus
// ---------------------------------------------------------------------------

/// Where the link to the lobby server stands.
///
/// ```text
///   Idle ──→ Connecting ──→ Connected
///                │              │
///                └──────────────┴──→ Disconnected ──→ Connecting ...
/// ```
///
/// Transitions are not enforced: `set_status` overwrites unconditionally.
/// The one coupling is that a recorded error forces `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnected,
}

// ---------------------------------------------------------------------------
// PlayerSessionPatch
// ---------------------------------------------------------------------------

/// A shallow, partial update to a [`PlayerSession`].
///
/// `None` means "field absent, keep the current value". `game_id` is a
/// double option because "no game" is itself a value the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerSessionPatch {
    pub player: Option<PlayerInfo>,
    pub status: Option<PlayerStatus>,
    pub game_id: Option<Option<GameId>>,
}

impl PlayerSessionPatch {
    /// Writes every present field over `session`.
    pub fn apply_to(self, session: &mut PlayerSession) {
        if let Some(player) = self.player {
            session.player = player;
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(game_id) = self.game_id {
            session.game_id = game_id;
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionState
// ---------------------------------------------------------------------------

/// The client's view of its connection to the lobby server.
///
/// ## Invariants
///
/// - a recorded `last_error` forces the status to `Disconnected`;
/// - `Disconnected` has no client info and no player session, and
///   nothing loading for either.
///
/// Fields are private so every write goes through a method that keeps
/// those true. `Clone + PartialEq` lets tests compare whole snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionState {
    status: LinkStatus,
    last_error: Option<ConnectionError>,
    disconnect_error: Option<ConnectionError>,

    client_info: Option<ClientInfo>,
    client_info_request: InFlight,
    client_info_error: Option<ConnectionError>,

    player_session: Option<PlayerSession>,
    player_session_request: InFlight,
    player_session_error: Option<ConnectionError>,
}

impl ConnectionState {
    /// Creates an idle connection state with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Link status ------------------------------------------------------

    /// Overwrites the link status.
    pub fn set_status(&mut self, status: LinkStatus) {
        tracing::debug!(from = ?self.status, to = ?status, "link status");
        self.status = status;
    }

    /// Records (or clears) the last link error.
    ///
    /// A `Some` error forces the status to `Disconnected`. This only moves
    /// the status; it does not clear sessions the way
    /// [`set_disconnected`](Self::set_disconnected) does. `None` leaves
    /// the status alone.
    pub fn set_error(&mut self, error: Option<ConnectionError>) {
        if let Some(err) = &error {
            tracing::warn!(error = %err, "connection error");
            self.status = LinkStatus::Disconnected;
        }
        self.last_error = error;
    }

    /// Moves to `Disconnected` and drops everything tied to the link.
    ///
    /// Clears client info, the player session and both loading flags.
    /// Error fields are left as they are.
    pub fn set_disconnected(&mut self) {
        self.status = LinkStatus::Disconnected;
        self.client_info = None;
        self.client_info_request.settle();
        self.player_session = None;
        self.player_session_request.settle();
        tracing::info!("disconnected, session state cleared");
    }

    /// Handles a server-initiated disconnect: keeps the reason in
    /// `disconnect_error`, then disconnects.
    pub fn record_disconnect(&mut self, error: ConnectionError) {
        tracing::info!(error = %error, "server closed the session");
        self.disconnect_error = Some(error);
        self.set_disconnected();
    }

    // -- Client info ------------------------------------------------------

    /// A `ReloadClientInfo` request went out.
    pub fn begin_client_info_reload(&mut self) -> BeginOutcome {
        let outcome = self.client_info_request.begin();
        if outcome == BeginOutcome::StrandedPrevious {
            tracing::warn!(
                stranded = self.client_info_request.stranded(),
                "client info reload begun while another is unanswered"
            );
        }
        outcome
    }

    /// The server answered with fresh client info.
    pub fn complete_client_info_reload(&mut self, info: ClientInfo) {
        self.client_info = Some(info);
        self.client_info_error = None;
        self.client_info_request.settle();
    }

    /// The server could not produce client info.
    pub fn fail_client_info_reload(&mut self, error: ConnectionError) {
        self.client_info_error = Some(error);
        self.client_info_request.settle();
    }

    // -- Player session ---------------------------------------------------

    /// A `Connect` request went out. Clears any previous session error.
    pub fn begin_player_session_load(&mut self) -> BeginOutcome {
        self.player_session_error = None;
        let outcome = self.player_session_request.begin();
        if outcome == BeginOutcome::StrandedPrevious {
            tracing::warn!(
                stranded = self.player_session_request.stranded(),
                "player session load begun while another is unanswered"
            );
        }
        outcome
    }

    /// The server sent the whole session. Replaces whatever was there.
    pub fn complete_player_session_load(&mut self, session: PlayerSession) {
        tracing::info!(player_id = %session.player.id, "player session loaded");
        self.player_session = Some(session);
        self.player_session_request.settle();
    }

    /// Merges a partial update over the current session.
    ///
    /// With no current session the patch is applied over a default
    /// session, so the result holds only what the patch carried.
    pub fn patch_player_session(&mut self, patch: PlayerSessionPatch) {
        let session = self.player_session.get_or_insert_with(|| {
            tracing::debug!("session patch arrived before session load");
            PlayerSession::default()
        });
        patch.apply_to(session);
    }

    /// The server rejected the session. Drops the session entirely.
    pub fn fail_player_session_load(&mut self, error: ConnectionError) {
        tracing::warn!(error = %error, "player session load failed");
        self.player_session_error = Some(error);
        self.player_session = None;
        self.player_session_request.settle();
    }

    // -- Reads ------------------------------------------------------------

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    /// Shorthand for `status() == LinkStatus::Connected`.
    pub fn is_connected(&self) -> bool {
        self.status == LinkStatus::Connected
    }

    pub fn last_error(&self) -> Option<&ConnectionError> {
        self.last_error.as_ref()
    }

    pub fn disconnect_error(&self) -> Option<&ConnectionError> {
        self.disconnect_error.as_ref()
    }

    pub fn client_info(&self) -> Option<&ClientInfo> {
        self.client_info.as_ref()
    }

    pub fn client_info_reloading(&self) -> bool {
        self.client_info_request.is_pending()
    }

    pub fn client_info_error(&self) -> Option<&ConnectionError> {
        self.client_info_error.as_ref()
    }

    /// Request tracker for client info, including the stranded count.
    pub fn client_info_request(&self) -> &InFlight {
        &self.client_info_request
    }

    pub fn player_session(&self) -> Option<&PlayerSession> {
        self.player_session.as_ref()
    }

    pub fn player_session_loading(&self) -> bool {
        self.player_session_request.is_pending()
    }

    pub fn player_session_error(&self) -> Option<&ConnectionError> {
        self.player_session_error.as_ref()
    }

    /// Request tracker for the player session, including the stranded count.
    pub fn player_session_request(&self) -> &InFlight {
        &self.player_session_request
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Naming: `test_{function}_{scenario}_{expected}`.

    use lobbysync_protocol::{DisconnectReason, PlayerId};

    use super::*;

    fn session(id: i32, game: Option<i32>) -> PlayerSession {
        PlayerSession {
            player: PlayerInfo {
                id: PlayerId(id),
                name: format!("player-{id}"),
            },
            status: PlayerStatus::Idle,
            game_id: game.map(GameId),
        }
    }

    /// A connected state with client info and a session loaded.
    fn loaded() -> ConnectionState {
        let mut state = ConnectionState::new();
        state.set_status(LinkStatus::Connected);
        state.begin_client_info_reload();
        state.complete_client_info_reload(ClientInfo {
            version: "1.0".into(),
        });
        state.begin_player_session_load();
        state.complete_player_session_load(session(7, None));
        state
    }

    // =====================================================================
    // set_error()
    // =====================================================================

    #[test]
    fn test_set_error_some_forces_disconnected() {
        for status in [
            LinkStatus::Idle,
            LinkStatus::Connecting,
            LinkStatus::Connected,
            LinkStatus::Disconnected,
        ] {
            let mut state = ConnectionState::new();
            state.set_status(status);
            state.set_error(Some(ConnectionError::Transport("reset".into())));
            assert_eq!(state.status(), LinkStatus::Disconnected);
        }
    }

    #[test]
    fn test_set_error_none_never_changes_status() {
        for status in [
            LinkStatus::Idle,
            LinkStatus::Connecting,
            LinkStatus::Connected,
            LinkStatus::Disconnected,
        ] {
            let mut state = ConnectionState::new();
            state.set_status(status);
            state.set_error(None);
            assert_eq!(state.status(), status);
        }
    }

    #[test]
    fn test_set_error_does_not_clear_session() {
        // Only the status moves; set_disconnected is the one that clears.
        let mut state = loaded();
        state.set_error(Some(ConnectionError::Transport("reset".into())));
        assert!(state.player_session().is_some());
        assert!(state.client_info().is_some());
    }

    // =====================================================================
    // set_disconnected() / record_disconnect()
    // =====================================================================

    #[test]
    fn test_set_disconnected_clears_session_and_flags() {
        let mut state = loaded();
        state.begin_client_info_reload();
        state.begin_player_session_load();

        state.set_disconnected();

        assert_eq!(state.status(), LinkStatus::Disconnected);
        assert!(state.client_info().is_none());
        assert!(!state.client_info_reloading());
        assert!(state.player_session().is_none());
        assert!(!state.player_session_loading());
    }

    #[test]
    fn test_set_disconnected_keeps_error_fields() {
        let mut state = loaded();
        state.set_error(Some(ConnectionError::Transport("reset".into())));
        state.fail_client_info_reload(ConnectionError::Request("nope".into()));

        state.set_disconnected();

        assert!(state.last_error().is_some());
        assert!(state.client_info_error().is_some());
    }

    #[test]
    fn test_record_disconnect_keeps_reason() {
        let mut state = loaded();
        let err = ConnectionError::Disconnected {
            reason: DisconnectReason::Multi,
            message: "logged in elsewhere".into(),
        };

        state.record_disconnect(err.clone());

        assert_eq!(state.disconnect_error(), Some(&err));
        assert_eq!(state.status(), LinkStatus::Disconnected);
        assert!(state.player_session().is_none());
    }

    // =====================================================================
    // client info
    // =====================================================================

    #[test]
    fn test_client_info_reload_lifecycle() {
        let mut state = ConnectionState::new();

        assert_eq!(state.begin_client_info_reload(), BeginOutcome::Fresh);
        assert!(state.client_info_reloading());

        state.complete_client_info_reload(ClientInfo {
            version: "2.1".into(),
        });
        assert!(!state.client_info_reloading());
        assert_eq!(state.client_info().unwrap().version, "2.1");
    }

    #[test]
    fn test_fail_client_info_reload_keeps_previous_info() {
        let mut state = loaded();
        state.begin_client_info_reload();

        state.fail_client_info_reload(ConnectionError::Request("busy".into()));

        assert!(!state.client_info_reloading());
        assert_eq!(state.client_info().unwrap().version, "1.0");
        assert!(state.client_info_error().is_some());
    }

    #[test]
    fn test_begin_client_info_reload_twice_reports_stranded() {
        let mut state = ConnectionState::new();
        state.begin_client_info_reload();

        let outcome = state.begin_client_info_reload();

        assert_eq!(outcome, BeginOutcome::StrandedPrevious);
        assert_eq!(state.client_info_request().stranded(), 1);
    }

    #[test]
    fn test_stranded_reload_first_answer_settles_both() {
        // The race made visible: the first answer clears the flag even
        // though the second request hasn't been answered yet.
        let mut state = ConnectionState::new();
        state.begin_client_info_reload();
        state.begin_client_info_reload();

        state.complete_client_info_reload(ClientInfo {
            version: "old".into(),
        });

        assert!(!state.client_info_reloading());
        assert_eq!(state.client_info_request().stranded(), 1);
    }

    // =====================================================================
    // player session
    // =====================================================================

    #[test]
    fn test_begin_player_session_load_clears_previous_error() {
        let mut state = ConnectionState::new();
        state.begin_player_session_load();
        state.fail_player_session_load(ConnectionError::Rejected("bad token".into()));
        assert!(state.player_session_error().is_some());

        state.begin_player_session_load();

        assert!(state.player_session_error().is_none());
        assert!(state.player_session_loading());
    }

    #[test]
    fn test_complete_player_session_load_replaces_whole_session() {
        let mut state = loaded();
        state.complete_player_session_load(session(8, Some(3)));
        assert_eq!(state.player_session(), Some(&session(8, Some(3))));
    }

    #[test]
    fn test_fail_player_session_load_clears_session() {
        let mut state = loaded();
        state.begin_player_session_load();

        state.fail_player_session_load(ConnectionError::Rejected("banned".into()));

        assert!(state.player_session().is_none());
        assert!(!state.player_session_loading());
        assert_eq!(
            state.player_session_error(),
            Some(&ConnectionError::Rejected("banned".into()))
        );
    }

    #[test]
    fn test_patch_player_session_merges_present_fields() {
        let mut state = loaded();

        state.patch_player_session(PlayerSessionPatch {
            status: Some(PlayerStatus::InGame),
            game_id: Some(Some(GameId(4))),
            ..PlayerSessionPatch::default()
        });

        let s = state.player_session().unwrap();
        assert_eq!(s.player.id, PlayerId(7), "absent field kept");
        assert_eq!(s.status, PlayerStatus::InGame);
        assert_eq!(s.game_id, Some(GameId(4)));
    }

    #[test]
    fn test_patch_player_session_can_clear_game() {
        let mut state = ConnectionState::new();
        state.complete_player_session_load(session(7, Some(4)));

        state.patch_player_session(PlayerSessionPatch {
            game_id: Some(None),
            ..PlayerSessionPatch::default()
        });

        assert_eq!(state.player_session().unwrap().game_id, None);
    }

    #[test]
    fn test_patch_player_session_without_session_builds_from_patch() {
        let mut state = ConnectionState::new();

        state.patch_player_session(PlayerSessionPatch {
            status: Some(PlayerStatus::InGame),
            game_id: Some(Some(GameId(2))),
            ..PlayerSessionPatch::default()
        });

        let s = state.player_session().expect("session built from patch");
        assert_eq!(s.player, PlayerInfo::default());
        assert_eq!(s.status, PlayerStatus::InGame);
        assert_eq!(s.game_id, Some(GameId(2)));
    }
}
