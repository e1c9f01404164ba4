//! Screen actions and the observable state container.
//!
//! Each screen owns a view-model that changes only through actions applied by
//! its [`Reducer`](lithia_core::Reducer). A [`Store`] holds the current
//! view-model and notifies subscribers after every accepted action, which
//! decouples "state changed" from "something re-renders".

pub mod action;
pub mod store;
pub mod subscription;

pub use action::Action;
pub use store::{Change, Store};
pub use subscription::Subscription;
