//! Actions with automatic category inference

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::CharacterPage;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Page category =====
    /// Step back one page; no-op when no prior page exists
    PagePrev,

    /// Step forward one page; no-op when no next page exists
    PageNext,

    /// Result: a page arrived, tagged with the page it was requested for
    PageDidLoad { page: u32, result: CharacterPage },

    /// Result: the fetch for `page` failed (HTTP or transport, already
    /// folded into one message)
    PageDidError { page: u32, error: String },

    // ===== Search category =====
    /// Open the name search overlay
    SearchOpen,

    /// Close the overlay, keeping the committed fragment
    SearchClose,

    /// Raw input edit; commit happens after the quiescence window
    SearchQueryChange(String),

    /// Enter pressed: commit immediately and close
    SearchQuerySubmit(String),

    /// Debounced commit of the final value within a quiescent period
    SearchDidCommit(String),

    // ===== Filter category =====
    /// Cycle the life-status selector (All -> Alive -> Dead -> Unknown)
    FilterStatusCycle,

    /// Cycle the gender selector
    FilterGenderCycle,

    /// Cycle forward through this page's species options
    FilterSpeciesNext,

    /// Cycle backward through this page's species options
    FilterSpeciesPrev,

    /// Reset every criterion
    FilterClear,

    // ===== List category =====
    /// Move the selection by a signed delta
    ListMove(i16),

    /// Select a row in the filtered list (by index)
    ListSelect(usize),

    // ===== Uncategorized (global) =====
    /// Fetch the current target page (startup and retry)
    Init,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
