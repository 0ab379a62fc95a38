//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{species_options, AppState, FilterCriteria, Gender, LifeStatus};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Fetch lifecycle =====
        Action::Init => fetch_current(state),

        Action::PageNext => {
            if !state.pagination.has_next {
                return DispatchResult::unchanged();
            }
            state.pagination.current_page += 1;
            fetch_current(state)
        }

        Action::PagePrev => {
            if !state.pagination.has_prev {
                return DispatchResult::unchanged();
            }
            state.pagination.current_page -= 1;
            fetch_current(state)
        }

        Action::PageDidLoad { page, result } => {
            // Response for a page the user has since navigated away from
            if page != state.pagination.current_page {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.error = None;
            state.species_options = species_options(&result.characters);
            state.characters = result.characters;
            state.pagination.count = result.count;
            state.pagination.pages = result.pages;
            state.pagination.has_next = result.has_next;
            state.pagination.has_prev = result.has_prev;
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::PageDidError { page, error } => {
            if page != state.pagination.current_page {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.error = Some(format!("Error fetching characters: {error}"));
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search.query = query.clone();
            DispatchResult::changed_with(Effect::CommitSearch { query })
        }

        Action::SearchQuerySubmit(query) => {
            state.search.query = query.clone();
            state.search.active = false;
            state.criteria.query = query;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchDidCommit(query) => {
            if state.criteria.query == query {
                return DispatchResult::unchanged();
            }
            state.criteria.query = query;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Filter actions =====
        Action::FilterStatusCycle => {
            state.criteria.status = LifeStatus::cycle(state.criteria.status);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::FilterGenderCycle => {
            state.criteria.gender = Gender::cycle(state.criteria.gender);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::FilterSpeciesNext => cycle_species(state, 1),
        Action::FilterSpeciesPrev => cycle_species(state, -1),

        Action::FilterClear => {
            if state.criteria.is_empty() && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.criteria = FilterCriteria::default();
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== List actions =====
        Action::ListMove(delta) => {
            if state.filtered_indices.is_empty() {
                return DispatchResult::unchanged();
            }
            let last = state.filtered_indices.len() as i32 - 1;
            let next = (state.selected_index as i32 + i32::from(delta)).clamp(0, last);
            if state.set_selected_index(next as usize) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ListSelect(index) => {
            if state.set_selected_index(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// One fetch effect for the current target page; sets the loading flag
/// before the request starts.
fn fetch_current(state: &mut AppState) -> DispatchResult<Effect> {
    state.loading = true;
    state.error = None;
    DispatchResult::changed_with(Effect::FetchPage {
        page: state.pagination.current_page,
    })
}

/// Species selector cycles All -> option[0] -> ... -> option[last] -> All.
fn cycle_species(state: &mut AppState, step: i32) -> DispatchResult<Effect> {
    if state.species_options.is_empty() {
        return DispatchResult::unchanged();
    }
    let len = state.species_options.len() as i32;
    let current = state
        .criteria
        .species
        .as_deref()
        .and_then(|species| state.species_options.iter().position(|o| o == species))
        .map(|idx| idx as i32 + 1)
        .unwrap_or(0);
    let next = (current + step).rem_euclid(len + 1);
    state.criteria.species = if next == 0 {
        None
    } else {
        Some(state.species_options[(next - 1) as usize].clone())
    };
    state.rebuild_filtered();
    DispatchResult::changed()
}
