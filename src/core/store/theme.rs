use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::storage::{KeyValueStorage, THEME_STORAGE_KEY, load_json, save_json};
use crate::core::store::{StateCell, StateContainer};
use crate::error::Result;
use crate::theme::Palette;

/// Dark-mode flag. This is also the persisted shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub is_dark_mode: bool,
}

impl ThemeState {
    pub fn palette(&self) -> &'static Palette {
        Palette::for_mode(self.is_dark_mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
    Set(bool),
}

pub struct ThemeStore<S> {
    storage: Arc<S>,
    state: StateCell<ThemeState>,
    writer: Mutex<()>,
}

impl<S: KeyValueStorage> ThemeStore<S> {
    /// Light theme, without reading storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            state: StateCell::new(ThemeState::default()),
            writer: Mutex::new(()),
        }
    }

    /// Restores the persisted flag. Missing or unreadable data means light.
    pub async fn rehydrate(storage: Arc<S>) -> Self {
        let state = match load_json::<_, ThemeState>(&*storage, THEME_STORAGE_KEY).await {
            Ok(Some(state)) => state,
            Ok(None) => ThemeState::default(),
            Err(err) => {
                warn!(error = %err, "could not read theme, falling back to light");
                ThemeState::default()
            }
        };
        debug!(is_dark_mode = state.is_dark_mode, "theme rehydrated");
        Self {
            storage,
            state: StateCell::new(state),
            writer: Mutex::new(()),
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.read().is_dark_mode
    }
}

impl<S: KeyValueStorage> StateContainer for ThemeStore<S> {
    type State = ThemeState;
    type Action = ThemeAction;

    fn get(&self) -> ThemeState {
        self.state.get()
    }

    /// The new flag is written to storage before it becomes visible; if the
    /// write fails the in-memory flag is unchanged.
    async fn dispatch(&self, action: ThemeAction) -> Result<ThemeState> {
        let _writer = self.writer.lock().await;
        let current = self.state.get();
        let next = match action {
            ThemeAction::Toggle => ThemeState {
                is_dark_mode: !current.is_dark_mode,
            },
            ThemeAction::Set(is_dark_mode) => ThemeState { is_dark_mode },
        };

        save_json(&*self.storage, THEME_STORAGE_KEY, &next).await?;
        self.state.set(next);
        debug!(?action, is_dark_mode = next.is_dark_mode, "theme updated");
        Ok(next)
    }
}
