//! Action and state tests using TestHarness
//!
//! FRAMEWORK PATTERN: TestHarness
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions
//! - Use fluent assertions for readable tests

use mortytui::{
    action::Action,
    components::{Component, ExplorerDisplay, ExplorerDisplayProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Character, CharacterPage},
};
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};

fn character(name: &str, status: &str, species: &str, gender: &str) -> Character {
    Character {
        id: 0,
        name: name.into(),
        status: status.into(),
        species: species.into(),
        gender: gender.into(),
        origin: "Earth (C-137)".into(),
        location: "Citadel of Ricks".into(),
        image: String::new(),
    }
}

fn page_one() -> CharacterPage {
    CharacterPage {
        characters: vec![
            character("Rick Sanchez", "Alive", "Human", "Male"),
            character("Morty Smith", "Alive", "Human", "Male"),
        ],
        count: 826,
        pages: 42,
        has_next: true,
        has_prev: false,
    }
}

#[test]
fn test_reducer_fetch_sets_loading() {
    // PATTERN: Create store with reducer, dispatch actions, verify state
    let mut store = EffectStore::new(AppState::default(), reducer);

    // Initial state
    assert!(!store.state().loading);
    assert!(store.state().characters.is_empty());

    // Dispatch init - should set loading and return FetchPage effect
    let result = store.dispatch(Action::Init);
    assert!(result.changed, "State should change");
    assert!(store.state().loading);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::FetchPage { page: 1 }));
}

#[test]
fn test_reducer_page_load_settles() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::Init);
    store.dispatch(Action::PageDidLoad {
        page: 1,
        result: page_one(),
    });

    assert!(!store.state().loading);
    assert_eq!(store.state().characters.len(), 2);
    assert_eq!(store.state().filtered_indices.len(), 2);
    assert_eq!(store.state().species_options, vec!["Human"]);
}

#[test]
fn test_pagination_steps_by_one_and_fetches_once() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Init);
    store.dispatch(Action::PageDidLoad {
        page: 1,
        result: page_one(),
    });

    // No prior page: no-op, no fetch
    let result = store.dispatch(Action::PagePrev);
    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().pagination.current_page, 1);

    // Next page exists: exactly one fetch for page 2
    let result = store.dispatch(Action::PageNext);
    assert!(result.changed);
    assert_eq!(store.state().pagination.current_page, 2);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::FetchPage { page: 2 }));
}

#[test]
fn test_error_leaves_characters_in_place() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Init);
    store.dispatch(Action::PageDidLoad {
        page: 1,
        result: page_one(),
    });

    store.dispatch(Action::Init);
    store.dispatch(Action::PageDidError {
        page: 1,
        error: "HTTP error! Status: 500 Internal Server Error".into(),
    });

    assert!(!store.state().loading);
    assert!(store.state().error.is_some());
    assert_eq!(store.state().characters.len(), 2);
}

#[test]
fn test_component_keyboard_events() {
    // PATTERN: TestHarness for component testing
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ExplorerDisplay::new();

    // PATTERN: send_keys helper - parse key strings, call handler
    // NumericComponentId is a simple built-in ComponentId type
    let actions = harness.send_keys::<NumericComponentId, _, _>("n", |state, event| {
        let props = ExplorerDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // PATTERN: Fluent assertions
    actions.assert_count(1);
    actions.assert_first(Action::PageNext);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = ExplorerDisplay::new();

    // When not focused, events should be ignored
    let actions = harness.send_keys::<NumericComponentId, _, _>("n p s q", |state, event| {
        let props = ExplorerDisplayProps {
            state,
            is_focused: false, // Not focused!
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    // PATTERN: Category is accessible via the ActionCategory trait
    let did_load = Action::PageDidLoad {
        page: 1,
        result: CharacterPage::default(),
    };
    let clear = Action::FilterClear;
    let quit = Action::Quit;

    // Categories are inferred from naming convention
    assert_eq!(did_load.category(), Some("page_did"));
    assert_eq!(clear.category(), Some("filter"));
    assert_eq!(quit.category(), None); // Uncategorized

    // Generated predicates for categorized actions
    assert!(did_load.is_page_did());
    assert!(clear.is_filter());
}

#[test]
fn test_harness_emit_and_drain() {
    // PATTERN: Emit actions and drain them
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::Init);
    harness.emit(Action::PageNext);
    harness.emit(Action::PageDidError {
        page: 1,
        error: "oops".into(),
    });

    // Drain all emitted actions
    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::Init,
        Action::PageDidLoad {
            page: 1,
            result: page_one(),
        },
    ];

    // PATTERN: assert_emitted! macro for pattern matching
    assert_emitted!(actions, Action::Init);
    assert_emitted!(actions, Action::PageDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::PageDidError { .. });
}

#[test]
fn test_custom_initial_page() {
    let state = AppState::new(5);
    assert_eq!(state.pagination.current_page, 5);

    // Page numbers are 1-indexed
    let state = AppState::new(0);
    assert_eq!(state.pagination.current_page, 1);
}
