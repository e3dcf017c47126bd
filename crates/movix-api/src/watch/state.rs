//! Observable state of a fetch hook.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Lifecycle phase of the current fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No key has been set yet.
    Idle,
    /// A fetch for the current key is in flight.
    Loading,
    /// The current key resolved with a payload.
    Success,
    /// The current key failed.
    Failed,
}

/// Three-field result exposed to consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSnapshot {
    /// Decoded payload of the current key.
    pub data: Option<Value>,
    /// `true` while the current key is being fetched.
    pub loading: bool,
    /// Failure message of the current key.
    pub error: Option<String>,
}

impl FetchSnapshot {
    /// State before any key is set.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// State at the start of every cycle.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// Settled state for a successful fetch.
    #[must_use]
    pub const fn success(data: Value) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    /// Settled state for a failed fetch.
    ///
    /// An empty message is replaced with [`GENERIC_ERROR_MESSAGE`].
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            String::from(GENERIC_ERROR_MESSAGE)
        } else {
            message
        };
        Self {
            data: None,
            loading: false,
            error: Some(message),
        }
    }

    /// Derives the lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Failed
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }

    /// Decodes the payload into `T`.
    ///
    /// Returns `None` while there is no payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data.as_ref().map(T::deserialize)
    }
}
