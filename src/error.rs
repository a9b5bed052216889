//! Error types for the dentalflow core.
//!
//! None of these are fatal: validation and not-found errors are rendered by the
//! caller, auth errors leave the store in a retryable state and storage errors
//! on rehydration fall back to defaults.

use std::collections::BTreeMap;
use std::fmt;

pub type Result<T, E = DentalFlowError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DentalFlowError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DentalFlowError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DentalFlowError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// User-visible authentication failures. Messages are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Contraseña incorrecta")]
    WrongPassword,

    #[error("El email ya está registrado")]
    EmailTaken,

    #[error("Email no encontrado")]
    EmailNotFound,

    #[error("Ya hay una solicitud de autenticación en curso")]
    RequestInFlight,

    #[error("Acción no permitida en el estado {state}")]
    InvalidTransition { state: &'static str },

    #[error("Error al guardar la sesión")]
    Persistence,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Field-level validation failures, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, &'static str>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.fields.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.fields.get(field).copied()
    }

    /// Clears a single field, as a form does when the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields.iter().map(|(f, m)| (*f, *m))
    }

    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
