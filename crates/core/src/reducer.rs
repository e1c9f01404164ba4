//! Reducer trait for screen view-models.

/// Pure state transition: `(old state, action) -> new state`.
///
/// - **No mutation**: `reduce(&self, action)` builds the next state and leaves
///   `self` untouched, so callers can keep the previous snapshot.
/// - **Deterministic**: the same state and action always yield the same result.
/// - **No IO**: reducers never perform side effects; containers (see the
///   `lithia-events` store) decide what to do with the new state.
///
/// A refused action (failed guard) returns `Err` and the container keeps the
/// old state.
pub trait Reducer: Sized {
    type Action: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn reduce(&self, action: &Self::Action) -> Result<Self, Self::Error>;
}
