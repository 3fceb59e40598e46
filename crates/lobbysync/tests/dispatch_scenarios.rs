//! Scenario tests: server message sequences fed through `Store::handle`.

use std::collections::BTreeMap;

use lobbysync::prelude::*;
use lobbysync_protocol::{DisconnectReason, SlotStatus};

fn msg(value: serde_json::Value) -> ServerMessage {
    serde_json::from_value(value).expect("test message should decode")
}

fn feed(store: &mut Store, route: &mut Route, messages: Vec<serde_json::Value>) -> Vec<Route> {
    let mut navigations = Vec::new();
    for value in messages {
        if let Some(next) = store.handle(&msg(value), route) {
            *route = next.clone();
            navigations.push(next);
        }
    }
    navigations
}

fn join_game(id: i32) -> serde_json::Value {
    serde_json::json!({
        "type": "CurrentGameInfo",
        "game": {
            "id": id,
            "status": "Created",
            "slots": [
                {"settings": {"status": "Occupied"}, "player": {"id": 7, "name": "moon"}},
                {"settings": {"status": "Occupied"}, "player": {"id": 8, "name": "grubby"}},
                {}
            ]
        }
    })
}

#[test]
fn test_session_then_game_then_leave() {
    let mut store = Store::new();
    let mut route = Route::Home;

    let navigations = feed(
        &mut store,
        &mut route,
        vec![
            serde_json::json!({"type": "PlayerSession", "player": {"id": 7, "name": "moon"}}),
            join_game(1),
            serde_json::json!({"type": "GamePlayerLeave", "game_id": 1, "player_id": 8}),
            serde_json::json!({"type": "PlayerSessionUpdate", "status": "InGame", "game_id": 1}),
        ],
    );

    assert_eq!(navigations, vec![Route::Lobby]);
    let game = store.game().current_game().unwrap();
    assert_eq!(game.slots[1].settings.status, SlotStatus::Open);
    assert!(game.slots[1].player.is_none());
    assert_eq!(
        store.connection().player_session().unwrap().game_id,
        Some(GameId(1))
    );
}

#[test]
fn test_session_update_for_other_game_drops_loaded_game() {
    let mut store = Store::new();
    let mut route = Route::Lobby;

    feed(
        &mut store,
        &mut route,
        vec![
            join_game(1),
            serde_json::json!({"type": "PlayerSessionUpdate", "status": "InGame", "game_id": 2}),
        ],
    );

    assert!(store.game().current_game().is_none());
    // The patch built a session from defaults since none was loaded.
    let session = store.connection().player_session().unwrap();
    assert_eq!(session.player.id, PlayerId(0));
    assert_eq!(session.game_id, Some(GameId(2)));
}

#[test]
fn test_server_disconnect_clears_everything() {
    let mut store = Store::new();
    let mut route = Route::Home;

    feed(
        &mut store,
        &mut route,
        vec![
            serde_json::json!({"type": "PlayerSession", "player": {"id": 7}}),
            join_game(1),
            serde_json::json!({"type": "Disconnect", "reason": "Multi", "message": "elsewhere"}),
        ],
    );

    let connection = store.connection();
    assert_eq!(connection.status(), LinkStatus::Disconnected);
    assert!(connection.player_session().is_none());
    assert_eq!(
        connection.disconnect_error(),
        Some(&ConnectionError::Disconnected {
            reason: DisconnectReason::Multi,
            message: "elsewhere".into(),
        })
    );
    assert!(store.game().current_game().is_none());
}

#[test]
fn test_stale_game_events_after_switch_are_dropped() {
    let mut store = Store::new();
    let mut route = Route::Home;

    feed(
        &mut store,
        &mut route,
        vec![
            join_game(1),
            join_game(2),
            serde_json::json!({"type": "GamePlayerLeave", "game_id": 1, "player_id": 7}),
            serde_json::json!({"type": "GameStarted", "game_id": 1}),
        ],
    );

    let game = store.game().current_game().unwrap();
    assert_eq!(game.id, GameId(2));
    assert_eq!(game.slots[0].player.as_ref().unwrap().id, PlayerId(7));
    assert_eq!(game.status, lobbysync_protocol::GameStatus::Created);
}

#[test]
fn test_node_selection_and_ping_reports() {
    let mut store = Store::new();
    let mut route = Route::Lobby;

    feed(
        &mut store,
        &mut route,
        vec![
            serde_json::json!({"type": "ListNodes", "nodes": [
                {"id": 9, "name": "fra", "location": "eu"},
                {"id": 10, "name": "nyc", "location": "na"}
            ]}),
            serde_json::json!({"type": "PingUpdate", "node_id": 9,
                "ping": {"min": 20, "max": 35, "avg": 25, "current": 22}}),
            join_game(1),
            serde_json::json!({"type": "GameSelectNode", "game_id": 1, "node_id": 9}),
            serde_json::json!({"type": "PlayerPingMapUpdate", "player_id": 8,
                "ping_map": {"9": 42}}),
            serde_json::json!({"type": "PlayerPingMapUpdate", "player_id": 8,
                "ping_map": {"9": 50, "10": 12}}),
        ],
    );

    let game = store.game();
    assert_eq!(game.current_node_id(), Some(NodeId(9)));
    assert_eq!(game.current_game().unwrap().node.as_ref().unwrap().name, "fra");
    assert_eq!(
        game.current_node_ping_map(PlayerId(7)),
        Some(BTreeMap::from([(PlayerId(7), 22), (PlayerId(8), 50)]))
    );
}

#[test]
fn test_connect_rejected_clears_session() {
    let mut store = Store::new();
    store.connection_mut().begin_player_session_load();

    store.handle(
        &msg(serde_json::json!({"type": "ConnectRejected", "message": "bad token"})),
        &Route::Home,
    );

    let connection = store.connection();
    assert!(connection.player_session().is_none());
    assert!(!connection.player_session_loading());
    assert_eq!(
        connection.player_session_error(),
        Some(&ConnectionError::Rejected("bad token".into()))
    );
}

#[test]
fn test_map_messages_land_in_catalog() {
    let mut store = Store::new();
    let mut route = Route::Home;

    feed(
        &mut store,
        &mut route,
        vec![
            serde_json::json!({"type": "ListMaps", "maps": [{"path": "maps/lt.w3x", "name": "Lost Temple"}]}),
            serde_json::json!({"type": "GetMapDetailError", "path": "maps/tm.w3x", "message": "missing"}),
        ],
    );

    assert_eq!(store.maps().list().unwrap()[0].name, "Lost Temple");
    assert_eq!(store.maps().detail_error("maps/tm.w3x"), Some("missing"));
    assert!(store.game().current_game().is_none());
}

#[test]
fn test_joined_game_with_node_waits_for_selection() {
    let mut store = Store::new();
    let mut route = Route::Home;

    feed(
        &mut store,
        &mut route,
        vec![
            serde_json::json!({
                "type": "CurrentGameInfo",
                "game": {"id": 4, "slots": [{}], "node": {"id": 9, "name": "fra"}}
            }),
        ],
    );

    let game = store.game();
    assert_eq!(game.current_node_id(), None);
    assert_eq!(game.current_game().unwrap().node.as_ref().unwrap().name, "fra");

    feed(
        &mut store,
        &mut route,
        vec![serde_json::json!({"type": "GameSelectNode", "game_id": 4, "node_id": 9})],
    );

    // Not in the catalog: the descriptor the game came with is kept.
    let game = store.game();
    assert_eq!(game.current_node_id(), Some(NodeId(9)));
    assert_eq!(game.current_game().unwrap().node.as_ref().unwrap().name, "fra");
}
