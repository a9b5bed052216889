//! Persisted view-state containers.
//!
//! Each store owns its state behind a lock, exposes a cheap synchronous
//! [`StateContainer::get`] and changes state only through `dispatch`.

mod auth;
mod theme;

use std::future::Future;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use auth::{AuthAction, AuthState, AuthStatus, AuthStore, PersistedSession};
pub use theme::{ThemeAction, ThemeState, ThemeStore};

use crate::error::Result;

pub trait StateContainer {
    type State: Clone;
    type Action;

    /// Current state snapshot.
    fn get(&self) -> Self::State;

    /// Applies an action and returns the resulting state.
    fn dispatch(&self, action: Self::Action) -> impl Future<Output = Result<Self::State>>;
}

/// Lock wrapper that shrugs off poisoning; state is always replaced whole.
#[derive(Debug, Default)]
pub(crate) struct StateCell<T> {
    inner: RwLock<T>,
}

impl<T: Clone> StateCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn get(&self) -> T {
        self.read().clone()
    }

    pub(crate) fn set(&self, value: T) {
        *self.write() = value;
    }
}
