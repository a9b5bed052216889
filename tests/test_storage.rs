//! Integration tests for the SQLite key-value storage.
//!
//! Tests cover:
//! - Get/set/delete by key
//! - Upsert on repeated set
//! - Data surviving close and reopen
//! - Session restore across a reopened file

mod common;

use std::sync::Arc;

use common::*;

#[tokio::test]
async fn test_set_get_delete() -> anyhow::Result<()> {
    let (storage, _temp_dir) = create_test_storage().await;

    // 1. Missing keys read as None
    assert_eq!(storage.get("missing").await?, None);

    // 2. Set then get
    storage.set("greeting", "hola").await?;
    assert_eq!(storage.get("greeting").await?.as_deref(), Some("hola"));

    // 3. Set again replaces the value
    storage.set("greeting", "adiós").await?;
    assert_eq!(storage.get("greeting").await?.as_deref(), Some("adiós"));

    // 4. Delete, twice
    storage.delete("greeting").await?;
    storage.delete("greeting").await?;
    assert_eq!(storage.get("greeting").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_keys_are_independent() -> anyhow::Result<()> {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.set(AUTH_STORAGE_KEY, "a").await?;
    storage.set(THEME_STORAGE_KEY, "b").await?;

    storage.delete(AUTH_STORAGE_KEY).await?;
    assert_eq!(storage.get(THEME_STORAGE_KEY).await?.as_deref(), Some("b"));

    Ok(())
}

#[tokio::test]
async fn test_reopen_preserves_values() -> anyhow::Result<()> {
    // 1. Write and close
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("nested").join("state.db");
    let storage = SqliteStorage::new(&path).await?;
    assert_eq!(storage.path(), path.as_path());
    storage.set("k", "v").await?;
    storage.close().await?;

    // 2. A closed storage refuses further work
    assert!(storage.get("k").await.is_err());

    // 3. Reopen the same file
    let storage = SqliteStorage::new(&path).await?;
    assert_eq!(storage.get("k").await?.as_deref(), Some("v"));

    Ok(())
}

#[tokio::test]
async fn test_session_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("state.db");

    // 1. Log in and close the file
    let storage = Arc::new(SqliteStorage::new(&path).await?);
    let auth = AuthStore::new(Arc::clone(&storage), instant_service());
    let logged_in = auth.dispatch(AuthAction::Login(dentist_credentials())).await?;
    storage.close().await?;
    drop(auth);

    // 2. Cold start from the same file
    let storage = Arc::new(SqliteStorage::new(&path).await?);
    let auth = AuthStore::rehydrate(Arc::clone(&storage), instant_service()).await;
    let state = auth.get();
    assert_eq!(state.status, AuthStatus::LoggedIn);
    assert_eq!(state.user, logged_in.user);
    assert_eq!(state.token, logged_in.token);

    Ok(())
}
