use folio_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn stale_hide_on_fresh_state_is_noop() {
    let mut state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::StatusHideElapsed { generation: 3 });

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert!(!state.consume_dirty());
    assert_eq!(state, next);
}
