//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one page of characters, tagged with the page it was issued for
    FetchPage { page: u32 },
    /// Commit the search query to the filter once the input has been stable
    /// for the quiescence window
    CommitSearch { query: String },
}
