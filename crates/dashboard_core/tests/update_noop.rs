use dashboard_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new(None);
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_touch_state() {
    let state = AppState::new(None);
    let (mut next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
