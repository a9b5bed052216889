//! Integration tests for the auth session store.
//!
//! Tests cover:
//! - Login success and failure transitions
//! - Persisted session shape and cold-start rehydration
//! - Registration uniqueness and form validation
//! - Single in-flight request guard
//! - Logout, clear-error and profile updates
//! - Ordering of overlapping logout and profile writes

mod common;

use std::sync::Arc;

use dentalflow::config::AuthConfig;
use dentalflow::fixtures;
use dentalflow::DentalFlowError;
use serde_json::Value;

use common::*;

#[tokio::test]
async fn test_login_with_seeded_user() -> anyhow::Result<()> {
    // 1. Start logged out
    let (store, storage) = memory_auth_store();
    assert_eq!(store.get().status, AuthStatus::LoggedOut);

    // 2. Log in as the demo dentist
    let state = store.dispatch(AuthAction::Login(dentist_credentials())).await?;
    assert_eq!(state.status, AuthStatus::LoggedIn);
    assert!(state.is_authenticated());
    let user = state.user.as_ref().expect("logged in user");
    assert_eq!(user.id, fixtures::DENTIST_ID);
    assert_eq!(user.role, Role::Dentist);
    assert!(state.token.as_deref().unwrap_or("").starts_with("mock-token-1-"));

    // 3. The session was written before dispatch returned
    let raw = storage.raw(AUTH_STORAGE_KEY).await.expect("persisted session");
    let json: Value = serde_json::from_str(&raw)?;
    assert_eq!(json["version"], 0);
    assert_eq!(json["state"]["isAuthenticated"], true);
    assert_eq!(json["state"]["user"]["email"], fixtures::DENTIST_EMAIL);
    assert_eq!(json["state"]["user"]["type"], "dentist");
    assert_eq!(json["state"]["token"], state.token.clone().unwrap_or_default());

    Ok(())
}

#[tokio::test]
async fn test_login_unknown_email_fails() -> anyhow::Result<()> {
    let (store, storage) = memory_auth_store();

    let result = store
        .dispatch(AuthAction::Login(credentials("nadie@example.com", "password123")))
        .await;
    let err = result.expect_err("unknown email must fail");
    assert_eq!(err.to_string(), "Usuario no encontrado");

    let state = store.get();
    assert_eq!(state.status, AuthStatus::AuthFailed);
    assert_eq!(state.error.as_deref(), Some("Usuario no encontrado"));
    assert!(!state.is_authenticated());
    assert!(state.user.is_none());
    assert!(state.token.is_none());

    // Nothing is persisted for a failed attempt
    assert!(storage.raw(AUTH_STORAGE_KEY).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_retry_after_failure() -> anyhow::Result<()> {
    let (store, _storage) = memory_auth_store();

    // 1. Short password is rejected by the backend
    let err = store
        .dispatch(AuthAction::Login(credentials(fixtures::PATIENT_EMAIL, "123")))
        .await
        .expect_err("short password must fail");
    assert_eq!(err.to_string(), "Contraseña incorrecta");
    assert_eq!(store.get().status, AuthStatus::AuthFailed);

    // 2. AuthFailed --retry--> LoggedIn
    let state = store.dispatch(AuthAction::Login(patient_credentials())).await?;
    assert_eq!(state.status, AuthStatus::LoggedIn);
    assert!(state.error.is_none());

    Ok(())
}

#[tokio::test]
async fn test_clear_error_returns_to_logged_out() -> anyhow::Result<()> {
    let (store, _storage) = memory_auth_store();
    let _ = store
        .dispatch(AuthAction::Login(credentials("nadie@example.com", "password123")))
        .await;

    let state = store.dispatch(AuthAction::ClearError).await?;
    assert_eq!(state.status, AuthStatus::LoggedOut);
    assert!(state.error.is_none());

    Ok(())
}

#[tokio::test]
async fn test_concurrent_submit_is_rejected() -> anyhow::Result<()> {
    // Slow backend so the first request is still pending
    let storage = memory_storage();
    let service = Arc::new(AuthService::seeded(AuthConfig {
        min_delay_ms: 200,
        max_delay_ms: 200,
    }));
    let store = AuthStore::new(storage, service);

    let first = store.dispatch(AuthAction::Login(dentist_credentials()));
    let second = async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(store.get().is_loading());
        store.dispatch(AuthAction::Login(patient_credentials())).await
    };
    let (first, second) = tokio::join!(first, second);

    let first = first?;
    assert_eq!(first.status, AuthStatus::LoggedIn);
    assert_eq!(first.user.map(|u| u.id).as_deref(), Some(fixtures::DENTIST_ID));
    let err = second.expect_err("second submit must be rejected");
    assert!(matches!(
        err,
        DentalFlowError::Auth(dentalflow::AuthError::RequestInFlight)
    ));

    Ok(())
}

#[tokio::test]
async fn test_login_while_logged_in_is_rejected() -> anyhow::Result<()> {
    let (store, _storage) = memory_auth_store();
    store.dispatch(AuthAction::Login(dentist_credentials())).await?;

    let err = store
        .dispatch(AuthAction::Login(patient_credentials()))
        .await
        .expect_err("already logged in");
    assert!(matches!(
        err,
        DentalFlowError::Auth(dentalflow::AuthError::InvalidTransition { .. })
    ));
    // The active session is untouched
    assert_eq!(store.get().status, AuthStatus::LoggedIn);
    assert_eq!(
        store.current_user().map(|u| u.id).as_deref(),
        Some(fixtures::DENTIST_ID)
    );

    Ok(())
}

#[tokio::test]
async fn test_register_new_patient() -> anyhow::Result<()> {
    let (store, _storage) = memory_auth_store();
    let before = store.service().user_count().await;

    let state = store
        .dispatch(AuthAction::Register(make_patient_registration("sofia@example.com")))
        .await?;
    assert_eq!(state.status, AuthStatus::LoggedIn);
    let user = state.user.expect("registered user");
    assert!(user.id.starts_with("user-"));
    assert_eq!(user.role, Role::Patient);
    assert!(!user.is_verified);
    assert!(user.is_active);

    assert_eq!(store.service().user_count().await, before + 1);
    assert!(store.service().contains_email("sofia@example.com").await);

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_does_not_mutate() -> anyhow::Result<()> {
    let (store, storage) = memory_auth_store();
    let before = store.service().user_count().await;

    let err = store
        .dispatch(AuthAction::Register(make_patient_registration(
            fixtures::PATIENT_EMAIL,
        )))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.to_string(), "El email ya está registrado");

    assert_eq!(store.service().user_count().await, before);
    let state = store.get();
    assert_eq!(state.status, AuthStatus::AuthFailed);
    assert_eq!(state.error.as_deref(), Some("El email ya está registrado"));
    assert!(storage.raw(AUTH_STORAGE_KEY).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_register_with_invalid_form_keeps_state() -> anyhow::Result<()> {
    let (store, _storage) = memory_auth_store();
    let mut registration = make_patient_registration("sofia@example.com");
    if let Registration::Patient(data) = &mut registration {
        data.confirm_password = "otra-cosa".to_string();
        data.dni.clear();
    }

    let err = store
        .dispatch(AuthAction::Register(registration))
        .await
        .expect_err("invalid form");
    let errors = match err {
        DentalFlowError::Validation(errors) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(errors.get("confirmPassword"), Some("Las contraseñas no coinciden"));
    assert_eq!(errors.get("dni"), Some("El DNI es requerido"));

    // Validation never enters Authenticating
    assert_eq!(store.get().status, AuthStatus::LoggedOut);

    Ok(())
}

#[tokio::test]
async fn test_logout_then_cold_start() -> anyhow::Result<()> {
    // 1. Log in and check a cold start restores the session
    let storage = memory_storage();
    let store = AuthStore::new(Arc::clone(&storage), instant_service());
    store.dispatch(AuthAction::Login(patient_credentials())).await?;

    let restored = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(restored.get().status, AuthStatus::LoggedIn);
    assert_eq!(restored.get().user, store.get().user);
    assert_eq!(restored.get().token, store.get().token);

    // 2. Log out
    let state = store.dispatch(AuthAction::Logout).await?;
    assert_eq!(state, AuthState::logged_out());

    let raw = storage.raw(AUTH_STORAGE_KEY).await.expect("cleared session");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json["state"]["isAuthenticated"], false);
    assert!(json["state"]["user"].is_null());
    assert!(json["state"]["token"].is_null());

    // 3. A new cold start is logged out
    let restored = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(restored.get().status, AuthStatus::LoggedOut);
    assert!(restored.get().user.is_none());

    Ok(())
}

#[tokio::test]
async fn test_incomplete_session_is_ignored() -> anyhow::Result<()> {
    let storage = memory_storage();
    storage
        .set(
            AUTH_STORAGE_KEY,
            r#"{"state":{"user":null,"token":"mock-token-1-1","isAuthenticated":true},"version":0}"#,
        )
        .await?;

    let store = AuthStore::rehydrate(storage, instant_service()).await;
    assert_eq!(store.get().status, AuthStatus::LoggedOut);

    Ok(())
}

#[tokio::test]
async fn test_unreadable_storage_falls_back_to_logged_out() -> anyhow::Result<()> {
    // 1. Corrupt data
    let storage = memory_storage();
    storage.set(AUTH_STORAGE_KEY, "{not json").await?;
    let store = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(store.get().status, AuthStatus::LoggedOut);

    // 2. Storage that cannot be read at all
    storage.set_failing(true);
    let store = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(store.get().status, AuthStatus::LoggedOut);

    Ok(())
}

#[tokio::test]
async fn test_login_fails_when_session_cannot_be_saved() -> anyhow::Result<()> {
    let (store, storage) = memory_auth_store();
    storage.set_failing(true);

    let err = store
        .dispatch(AuthAction::Login(dentist_credentials()))
        .await
        .expect_err("write failure");
    assert!(matches!(
        err,
        DentalFlowError::Auth(dentalflow::AuthError::Persistence)
    ));
    let state = store.get();
    assert_eq!(state.status, AuthStatus::AuthFailed);
    assert!(!state.is_authenticated());

    Ok(())
}

#[tokio::test]
async fn test_set_user_updates_persisted_profile() -> anyhow::Result<()> {
    let (store, storage) = memory_auth_store();

    // 1. Not allowed while logged out
    let anonymous = fixtures::users().remove(0);
    assert!(store.dispatch(AuthAction::SetUser(anonymous)).await.is_err());

    // 2. Edit the signed-in user's email
    store.dispatch(AuthAction::Login(dentist_credentials())).await?;
    let mut user = store.current_user().expect("logged in");
    user.email = "elena@clinica.es".to_string();
    let state = store.dispatch(AuthAction::SetUser(user)).await?;
    assert_eq!(state.status, AuthStatus::LoggedIn);

    let restored = AuthStore::rehydrate(storage, instant_service()).await;
    assert_eq!(
        restored.current_user().map(|u| u.email).as_deref(),
        Some("elena@clinica.es")
    );

    Ok(())
}

#[tokio::test]
async fn test_logout_is_not_undone_by_profile_update() -> anyhow::Result<()> {
    // 1. Log in, then make storage writes slow
    let (store, storage) = memory_auth_store();
    store.dispatch(AuthAction::Login(dentist_credentials())).await?;
    let mut user = store.current_user().expect("logged in");
    user.email = "elena@clinica.es".to_string();
    storage.set_write_delay(std::time::Duration::from_millis(50));

    // 2. A profile edit arriving while logout is writing is refused
    let logout = store.dispatch(AuthAction::Logout);
    let update = async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.dispatch(AuthAction::SetUser(user.clone())).await
    };
    let (logout, update) = tokio::join!(logout, update);
    assert_eq!(logout?.status, AuthStatus::LoggedOut);
    let err = update.expect_err("no session to update");
    assert!(matches!(
        err,
        DentalFlowError::Auth(dentalflow::AuthError::InvalidTransition { .. })
    ));

    // 3. Memory and storage both stay logged out
    assert_eq!(store.get(), AuthState::logged_out());
    let restored = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(restored.get().status, AuthStatus::LoggedOut);

    Ok(())
}

#[tokio::test]
async fn test_logout_waits_for_pending_profile_update() -> anyhow::Result<()> {
    let (store, storage) = memory_auth_store();
    store.dispatch(AuthAction::Login(patient_credentials())).await?;
    let mut user = store.current_user().expect("logged in");
    user.email = "carlos.g@example.com".to_string();
    storage.set_write_delay(std::time::Duration::from_millis(50));

    // 1. The edit starts writing first; logout lands after it
    let update = store.dispatch(AuthAction::SetUser(user));
    let logout = async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.dispatch(AuthAction::Logout).await
    };
    let (update, logout) = tokio::join!(update, logout);
    assert_eq!(update?.status, AuthStatus::LoggedIn);
    assert_eq!(logout?.status, AuthStatus::LoggedOut);

    // 2. The later write wins in storage too
    assert_eq!(store.get().status, AuthStatus::LoggedOut);
    let restored = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    assert_eq!(restored.get().status, AuthStatus::LoggedOut);
    assert!(restored.current_user().is_none());

    Ok(())
}
