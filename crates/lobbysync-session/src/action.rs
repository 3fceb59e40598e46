//! Mutations the connection slice accepts as values.
//!
//! The router produces these; [`ConnectionState::apply`] consumes them.

use lobbysync_protocol::{ClientInfo, PlayerSession};

use crate::{ConnectionError, ConnectionState, LinkStatus, PlayerSessionPatch};

/// One mutation of [`ConnectionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionAction {
    SetStatus(LinkStatus),
    SetError(Option<ConnectionError>),
    SetDisconnected,
    /// Server-initiated disconnect, with its reason.
    RecordDisconnect(ConnectionError),
    CompleteClientInfoReload(ClientInfo),
    FailClientInfoReload(ConnectionError),
    CompletePlayerSessionLoad(PlayerSession),
    PatchPlayerSession(PlayerSessionPatch),
    FailPlayerSessionLoad(ConnectionError),
}

impl ConnectionAction {
    /// Returns `true` if applying this leaves the link `Disconnected`
    /// no matter what state it was in.
    pub fn disconnects(&self) -> bool {
        match self {
            Self::SetStatus(status) => *status == LinkStatus::Disconnected,
            Self::SetError(error) => error.is_some(),
            Self::SetDisconnected | Self::RecordDisconnect(_) => true,
            _ => false,
        }
    }
}

impl ConnectionState {
    /// Applies one action.
    pub fn apply(&mut self, action: ConnectionAction) {
        match action {
            ConnectionAction::SetStatus(status) => self.set_status(status),
            ConnectionAction::SetError(error) => self.set_error(error),
            ConnectionAction::SetDisconnected => self.set_disconnected(),
            ConnectionAction::RecordDisconnect(error) => {
                self.record_disconnect(error);
            }
            ConnectionAction::CompleteClientInfoReload(info) => {
                self.complete_client_info_reload(info);
            }
            ConnectionAction::FailClientInfoReload(error) => {
                self.fail_client_info_reload(error);
            }
            ConnectionAction::CompletePlayerSessionLoad(session) => {
                self.complete_player_session_load(session);
            }
            ConnectionAction::PatchPlayerSession(patch) => {
                self.patch_player_session(patch);
            }
            ConnectionAction::FailPlayerSessionLoad(error) => {
                self.fail_player_session_load(error);
            }
        }
    }
}
