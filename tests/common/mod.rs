#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from dentalflow for tests
pub use dentalflow::core::storage::{AUTH_STORAGE_KEY, THEME_STORAGE_KEY};
pub use dentalflow::models::{
    Appointment, AppointmentStatus, LoginCredentials, PatientRegistration, Registration, Role,
};
pub use dentalflow::{
    AuthAction, AuthService, AuthState, AuthStatus, AuthStore, EntityStore, FilterSpec,
    KeyValueStorage, MemoryStorage, SqliteStorage, StateContainer, ThemeAction, ThemeStore,
};
