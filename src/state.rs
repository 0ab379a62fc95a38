//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Character record as returned by the API; never mutated after parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub origin: String,
    pub location: String,
    pub image: String,
}

/// One fetched page plus the server's pagination metadata.
/// `has_next`/`has_prev` come from the presence of the API's page links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterPage {
    pub characters: Vec<Character>,
    pub count: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Life status filter options (closed set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LifeStatus {
    Alive,
    Dead,
    Unknown,
}

impl LifeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LifeStatus::Alive => "Alive",
            LifeStatus::Dead => "Dead",
            LifeStatus::Unknown => "Unknown",
        }
    }

    /// Compared case-insensitively against the character's wire string.
    pub fn matches(&self, status: &str) -> bool {
        status.eq_ignore_ascii_case(self.label())
    }

    /// All -> Alive -> Dead -> Unknown -> All
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(LifeStatus::Alive),
            Some(LifeStatus::Alive) => Some(LifeStatus::Dead),
            Some(LifeStatus::Dead) => Some(LifeStatus::Unknown),
            Some(LifeStatus::Unknown) => None,
        }
    }
}

/// Gender filter options (closed set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    Male,
    Female,
    Genderless,
    Unknown,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "Unknown",
        }
    }

    pub fn matches(&self, gender: &str) -> bool {
        gender.eq_ignore_ascii_case(self.label())
    }

    /// All -> Male -> Female -> Genderless -> Unknown -> All
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Gender::Male),
            Some(Gender::Male) => Some(Gender::Female),
            Some(Gender::Female) => Some(Gender::Genderless),
            Some(Gender::Genderless) => Some(Gender::Unknown),
            Some(Gender::Unknown) => None,
        }
    }
}

/// Current filter predicate state. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriteria {
    /// Committed name fragment (case-insensitive substring match)
    pub query: String,
    pub status: Option<LifeStatus>,
    pub gender: Option<Gender>,
    /// Exact species value from the current page's options
    pub species: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.status.is_none()
            && self.gender.is_none()
            && self.species.is_none()
    }

    /// A character passes iff all four predicates hold.
    pub fn matches(&self, character: &Character) -> bool {
        let name_match = character
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase());
        let status_match = self
            .status
            .map_or(true, |status| status.matches(&character.status));
        let gender_match = self
            .gender
            .map_or(true, |gender| gender.matches(&character.gender));
        let species_match = self
            .species
            .as_deref()
            .map_or(true, |species| character.species.eq_ignore_ascii_case(species));
        name_match && status_match && gender_match && species_match
    }
}

/// Stable filter: keeps source order, never re-sorts, no side effects.
pub fn filter_characters(characters: &[Character], criteria: &FilterCriteria) -> Vec<Character> {
    characters
        .iter()
        .filter(|character| criteria.matches(character))
        .cloned()
        .collect()
}

/// Distinct species on one page, alphabetical, case-preserving as received.
pub fn species_options(characters: &[Character]) -> Vec<String> {
    let mut options: Vec<String> = characters
        .iter()
        .map(|character| character.species.clone())
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Server-side pagination cursor. `current_page` is 1-indexed and only moves
/// via the prev/next actions, gated by the availability flags of the most
/// recently fetched page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaginationState {
    pub current_page: u32,
    pub count: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationState {
    pub fn new(page: u32) -> Self {
        Self {
            current_page: page.max(1),
            count: 0,
            pages: 0,
            has_next: false,
            has_prev: false,
        }
    }

    pub fn summary(&self) -> String {
        format!("Page {} of {}", self.current_page, self.pages)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Search overlay state: `query` is the raw input, committed into
/// `FilterCriteria::query` only after the quiescence window.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Quiescence window for search input before it reaches the filter.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// Loading spinner cadence.
pub const SPINNER_TICK_MS: u64 = 120;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data ---
    /// Most recently fetched page of characters
    #[debug(skip)]
    pub characters: Vec<Character>,

    /// Indices into `characters` that pass the current filter
    #[debug(skip)]
    pub filtered_indices: Vec<usize>,

    /// Selection within the filtered list
    #[debug(section = "Page", label = "Selected")]
    pub selected_index: usize,

    /// Server pagination cursor and availability flags
    #[debug(section = "Page", label = "Pagination", debug_fmt)]
    pub pagination: PaginationState,

    // --- Filters ---
    /// Committed filter predicates
    #[debug(section = "Filters", label = "Criteria", debug_fmt)]
    pub criteria: FilterCriteria,

    /// Distinct species seen on the current page only
    #[debug(section = "Filters", label = "Species options", debug_fmt)]
    pub species_options: Vec<String>,

    /// Search overlay (raw, un-debounced input)
    #[debug(skip)]
    pub search: SearchState,

    // --- Fetch lifecycle ---
    /// True from request start until it settles, success or failure
    #[debug(section = "Status", label = "Loading")]
    pub loading: bool,

    /// User-facing message from the last failed fetch
    #[debug(section = "Status", label = "Error", debug_fmt)]
    pub error: Option<String>,

    /// Spinner frame counter while loading
    #[debug(skip)]
    pub tick_count: u64,
}

impl AppState {
    /// Create state targeting the given initial page
    pub fn new(page: u32) -> Self {
        Self {
            characters: Vec::new(),
            filtered_indices: Vec::new(),
            selected_index: 0,
            pagination: PaginationState::new(page),
            criteria: FilterCriteria::default(),
            species_options: Vec::new(),
            search: SearchState::default(),
            loading: false,
            error: None,
            tick_count: 0,
        }
    }

    /// Recompute the visible subset. Runs unconditionally: an empty source
    /// page yields an empty filtered list.
    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = self
            .characters
            .iter()
            .enumerate()
            .filter(|(_, character)| self.criteria.matches(character))
            .map(|(idx, _)| idx)
            .collect();

        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Character> + '_ {
        self.filtered_indices
            .iter()
            .filter_map(|idx| self.characters.get(*idx))
    }

    pub fn selected_character(&self) -> Option<&Character> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.characters.get(*idx))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn sample_page() -> Vec<Character> {
        vec![
            character("Rick Sanchez", "Alive", "Human", "Male"),
            character("Morty Smith", "Alive", "Human", "Male"),
            character("Summer Smith", "Alive", "Human", "Female"),
            character("Birdperson", "Dead", "Bird-Person", "Male"),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let characters = sample_page();
        let filtered = filter_characters(&characters, &FilterCriteria::default());
        assert_eq!(filtered, characters);
    }

    #[test]
    fn test_name_fragment_is_case_insensitive_substring() {
        let characters = sample_page();
        let criteria = FilterCriteria {
            query: "morty".into(),
            ..Default::default()
        };
        let filtered = filter_characters(&characters, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Morty Smith");
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let characters = sample_page();
        let criteria = FilterCriteria {
            query: "smith".into(),
            status: Some(LifeStatus::Alive),
            gender: Some(Gender::Female),
            species: Some("human".into()),
        };
        let filtered = filter_characters(&characters, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Summer Smith");
    }

    #[test]
    fn test_status_filter_excludes_everyone_when_nobody_matches() {
        let characters = vec![
            character("Rick Sanchez", "Alive", "Human", "Male"),
            character("Morty Smith", "Alive", "Human", "Male"),
        ];
        let criteria = FilterCriteria {
            status: Some(LifeStatus::Dead),
            ..Default::default()
        };
        assert!(filter_characters(&characters, &criteria).is_empty());
    }

    #[test]
    fn test_filter_preserves_source_order() {
        let characters = sample_page();
        let criteria = FilterCriteria {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let names: Vec<_> = filter_characters(&characters, &criteria)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith", "Birdperson"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let characters = sample_page();
        let criteria = FilterCriteria {
            query: "s".into(),
            status: Some(LifeStatus::Alive),
            ..Default::default()
        };
        let once = filter_characters(&characters, &criteria);
        let twice = filter_characters(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_species_options_dedup_and_sort() {
        let characters = vec![
            character("a", "Alive", "Human", "Male"),
            character("b", "Alive", "Human", "Male"),
            character("c", "Alive", "Alien", "Male"),
        ];
        assert_eq!(species_options(&characters), vec!["Alien", "Human"]);
    }

    #[test]
    fn test_species_options_preserve_case_as_received() {
        let characters = vec![
            character("a", "Alive", "Robot", "Male"),
            character("b", "Alive", "robot", "Male"),
        ];
        // Distinct by exact value, sorted
        assert_eq!(species_options(&characters), vec!["Robot", "robot"]);
    }

    #[test]
    fn test_rebuild_filtered_clamps_selection() {
        let mut state = AppState::default();
        state.characters = sample_page();
        state.rebuild_filtered();
        state.selected_index = 3;

        state.criteria.query = "rick".into();
        state.rebuild_filtered();

        assert_eq!(state.filtered_indices.len(), 1);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_character().unwrap().name, "Rick Sanchez");
    }

    #[test]
    fn test_rebuild_filtered_empties_with_source() {
        let mut state = AppState::default();
        state.characters = sample_page();
        state.rebuild_filtered();
        assert_eq!(state.filtered_indices.len(), 4);

        state.characters.clear();
        state.rebuild_filtered();
        assert!(state.filtered_indices.is_empty());
        assert!(state.selected_character().is_none());
    }

    #[test]
    fn test_status_cycle_round_trips() {
        let mut current = None;
        for _ in 0..4 {
            current = LifeStatus::cycle(current);
        }
        assert_eq!(current, None);
    }

    #[test]
    fn test_gender_cycle_round_trips() {
        let mut current = None;
        for _ in 0..5 {
            current = Gender::cycle(current);
        }
        assert_eq!(current, None);
    }

    #[test]
    fn test_pagination_summary() {
        let pagination = PaginationState {
            current_page: 3,
            count: 826,
            pages: 42,
            has_next: true,
            has_prev: true,
        };
        assert_eq!(pagination.summary(), "Page 3 of 42");
    }
}
