use std::sync::Arc;

use dentalflow::config::AuthConfig;
use dentalflow::fixtures;
use dentalflow::models::{LoginCredentials, PatientRegistration, Registration};
use dentalflow::{AuthService, AuthStore, EntityStore, MemoryStorage, SqliteStorage};
use time::OffsetDateTime;
use time::macros::{date, datetime};

/// Reference instant for every dated fixture: a Tuesday at noon.
pub const NOW: OffsetDateTime = datetime!(2024-10-15 12:00 UTC);

pub fn seeded_store() -> EntityStore {
    fixtures::entity_store(NOW)
}

/// Auth backend over the seeded directory, answering without delay.
pub fn instant_service() -> Arc<AuthService> {
    Arc::new(AuthService::seeded(AuthConfig::instant()))
}

pub fn memory_storage() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

/// Fresh logged-out auth store over in-memory storage.
pub fn memory_auth_store() -> (AuthStore<MemoryStorage>, Arc<MemoryStorage>) {
    let storage = memory_storage();
    (AuthStore::new(Arc::clone(&storage), instant_service()), storage)
}

/// Creates an on-disk storage inside a temporary directory.
/// Returns both the storage and the directory (which must be kept alive).
pub async fn create_test_storage() -> (Arc<SqliteStorage>, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let storage = SqliteStorage::new(dir.path().join("state.db"))
        .await
        .expect("Failed to create test storage");
    (Arc::new(storage), dir)
}

pub fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn dentist_credentials() -> LoginCredentials {
    credentials(fixtures::DENTIST_EMAIL, "password123")
}

pub fn patient_credentials() -> LoginCredentials {
    credentials(fixtures::PATIENT_EMAIL, "password123")
}

pub fn make_patient_registration(email: &str) -> Registration {
    Registration::Patient(PatientRegistration {
        email: email.to_string(),
        password: "segura123".to_string(),
        confirm_password: "segura123".to_string(),
        name: "Sofía".to_string(),
        last_name: "Navarro".to_string(),
        phone: "+34 611 222 333".to_string(),
        date_of_birth: Some(date!(1995 - 03 - 08)),
        dni: "99887766Z".to_string(),
    })
}
