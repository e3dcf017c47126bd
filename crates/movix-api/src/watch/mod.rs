//! Cancellable data-fetch hook.
//!
//! A [`FetchHook`] fetches whatever its current request key names and exposes
//! the outcome as a [`FetchSnapshot`] on a `tokio::sync::watch` channel. Only
//! the most recently started cycle may write to the snapshot.

mod hook;
mod state;

pub use hook::FetchHook;
pub use state::{FetchPhase, FetchSnapshot, GENERIC_ERROR_MESSAGE};
