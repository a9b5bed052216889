pub mod config;
pub mod core;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod navigation;
pub mod projection;
pub mod theme;

pub use config::Config;
pub use crate::core::entities::{EntityStore, Snapshot};
pub use crate::core::service::{AuthResponse, AuthService};
pub use crate::core::storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use crate::core::store::{
    AuthAction, AuthState, AuthStatus, AuthStore, StateContainer, ThemeAction, ThemeState,
    ThemeStore,
};
pub use error::{AuthError, DentalFlowError, Result, StorageError, ValidationErrors};
pub use navigation::RootRoute;
pub use projection::{CategoryCounts, FilterSpec, Projection, ViewProjector};
pub use theme::Palette;
