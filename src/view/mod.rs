//! View side: the mutable view state, the pure filter/sort engine over the
//! aggregated collection, and the search-input debouncer.

pub mod debounce;
pub mod engine;
pub mod state;

pub use debounce::SearchDebouncer;
pub use engine::{featured, tag_cloud, view, EmptyReason};
pub use state::{SortKey, UserFilter, ViewEvent, ViewState};
