use holdem_engine::engine::Engine;
use holdem_engine::game::{Stage, TableConfig};
use holdem_engine::history::HandRecord;
use holdem_engine::player::PlayerAction;

fn played_hand(seed: u64) -> Engine {
    let mut eng = Engine::new(TableConfig {
        seed: Some(seed),
        ..TableConfig::default()
    })
    .unwrap();
    eng.start_hand();
    while eng.table().stage() != Stage::Showdown {
        eng.run_pending();
        eng.player_action(PlayerAction::Call);
    }
    eng
}

#[test]
fn record_tracks_board_and_showdown() {
    let eng = played_hand(3);
    let rec = eng.table().record();
    assert_eq!(rec.hand_no, 1);
    assert_eq!(rec.board, eng.table().community());
    assert!(rec.showdown.is_some());
    assert!(rec.actions.iter().any(|a| a.player_id == "me"));
    assert!(rec.actions_on(Stage::Preflop).count() >= 1);
}

#[test]
fn record_round_trips_through_json() {
    let eng = played_hand(4);
    let json = serde_json::to_string(eng.table().record()).unwrap();
    let back: HandRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, eng.table().record());
}

#[test]
fn table_read_model_serializes_without_the_deck() {
    let eng = played_hand(5);
    let value = serde_json::to_value(eng.table()).unwrap();
    assert_eq!(value["stage"], "showdown");
    assert_eq!(value["reveal_bots"], true);
    assert!(value.get("deck").is_none());
    assert_eq!(value["players"].as_array().unwrap().len(), 4);
}
