use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::service::{AuthResponse, AuthService};
use crate::core::storage::{AUTH_STORAGE_KEY, KeyValueStorage, load_json, save_json};
use crate::core::store::{StateCell, StateContainer};
use crate::core::validation;
use crate::error::{AuthError, Result};
use crate::models::{LoginCredentials, Registration, UserIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    LoggedOut,
    Authenticating,
    LoggedIn,
    AuthFailed,
}

impl AuthStatus {
    pub fn name(self) -> &'static str {
        match self {
            AuthStatus::LoggedOut => "LoggedOut",
            AuthStatus::Authenticating => "Authenticating",
            AuthStatus::LoggedIn => "LoggedIn",
            AuthStatus::AuthFailed => "AuthFailed",
        }
    }
}

/// In-memory auth state.
///
/// `user` and `token` are set exactly when `status` is `LoggedIn`;
/// `error` only when it is `AuthFailed`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
    pub error: Option<String>,
}

impl AuthState {
    pub fn logged_out() -> Self {
        Self {
            status: AuthStatus::LoggedOut,
            user: None,
            token: None,
            error: None,
        }
    }

    fn authenticating() -> Self {
        Self {
            status: AuthStatus::Authenticating,
            ..Self::logged_out()
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: AuthStatus::AuthFailed,
            error: Some(message),
            ..Self::logged_out()
        }
    }

    fn logged_in(response: AuthResponse) -> Self {
        Self {
            status: AuthStatus::LoggedIn,
            user: Some(response.user),
            token: Some(response.access_token),
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::LoggedIn
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Authenticating
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::logged_out()
    }
}

/// What survives a restart under [`AUTH_STORAGE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl PersistedSession {
    fn from_state(state: &AuthState) -> Self {
        Self {
            user: state.user.clone(),
            token: state.token.clone(),
            is_authenticated: state.is_authenticated(),
        }
    }

    /// A session only counts when all three parts are present.
    fn into_state(self) -> Option<AuthState> {
        match (self.is_authenticated, self.user, self.token) {
            (true, Some(user), Some(token)) => Some(AuthState {
                status: AuthStatus::LoggedIn,
                user: Some(user),
                token: Some(token),
                error: None,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    Login(LoginCredentials),
    Register(Registration),
    Logout,
    ClearError,
    /// Replaces the signed-in user, e.g. after a profile edit.
    SetUser(UserIdentity),
}

/// Auth session state machine, persisted through `S`.
///
/// Every transition that writes storage holds `writer` from its status
/// check until the new state is committed, so persisted and in-memory
/// sessions change in the same order.
pub struct AuthStore<S> {
    storage: Arc<S>,
    service: Arc<AuthService>,
    state: StateCell<AuthState>,
    writer: Mutex<()>,
}

impl<S: KeyValueStorage> AuthStore<S> {
    /// Logged out, without reading storage.
    pub fn new(storage: Arc<S>, service: Arc<AuthService>) -> Self {
        Self {
            storage,
            service,
            state: StateCell::new(AuthState::logged_out()),
            writer: Mutex::new(()),
        }
    }

    /// Restores a complete prior session, or starts logged out.
    pub async fn rehydrate(storage: Arc<S>, service: Arc<AuthService>) -> Self {
        let state = match load_json::<_, PersistedSession>(&*storage, AUTH_STORAGE_KEY).await {
            Ok(Some(session)) => session.into_state().unwrap_or_default(),
            Ok(None) => AuthState::logged_out(),
            Err(err) => {
                warn!(error = %err, "could not read persisted session, starting logged out");
                AuthState::logged_out()
            }
        };
        debug!(status = state.status.name(), "auth rehydrated");
        Self {
            storage,
            service,
            state: StateCell::new(state),
            writer: Mutex::new(()),
        }
    }

    pub fn service(&self) -> &AuthService {
        &self.service
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.state.read().user.clone()
    }

    async fn persist(&self, state: &AuthState) -> Result<()> {
        save_json(
            &*self.storage,
            AUTH_STORAGE_KEY,
            &PersistedSession::from_state(state),
        )
        .await?;
        Ok(())
    }

    /// Moves to `Authenticating`, or refuses when a request is already
    /// pending or a session is active. Check and move happen under one lock.
    fn begin_request(&self) -> std::result::Result<(), AuthError> {
        let mut state = self.state.write();
        match state.status {
            AuthStatus::Authenticating => Err(AuthError::RequestInFlight),
            AuthStatus::LoggedIn => Err(AuthError::InvalidTransition {
                state: state.status.name(),
            }),
            AuthStatus::LoggedOut | AuthStatus::AuthFailed => {
                *state = AuthState::authenticating();
                Ok(())
            }
        }
    }

    async fn finish_request(&self, outcome: Result<AuthResponse>) -> Result<AuthState> {
        let _writer = self.writer.lock().await;
        match outcome {
            Ok(response) => {
                let next = AuthState::logged_in(response);
                if let Err(err) = self.persist(&next).await {
                    warn!(error = %err, "could not persist session");
                    self.state.set(AuthState::failed(AuthError::Persistence.to_string()));
                    return Err(AuthError::Persistence.into());
                }
                if let Some(user) = &next.user {
                    info!(user_id = %user.id, "logged in");
                }
                self.state.set(next.clone());
                Ok(next)
            }
            Err(err) => {
                debug!(error = %err, "authentication failed");
                self.state.set(AuthState::failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthState> {
        self.begin_request()?;
        let outcome = self.service.login(&credentials).await;
        self.finish_request(outcome).await
    }

    async fn register(&self, registration: Registration) -> Result<AuthState> {
        // Form errors are reported without leaving the current state
        validation::validate_registration(&registration)?;
        self.begin_request()?;
        let outcome = self.service.register(&registration).await;
        self.finish_request(outcome).await
    }

    /// Memory is cleared even when the cleared session cannot be written.
    async fn logout(&self) -> Result<AuthState> {
        let _writer = self.writer.lock().await;
        let status = {
            let mut state = self.state.write();
            match state.status {
                AuthStatus::Authenticating => {
                    return Err(AuthError::InvalidTransition {
                        state: state.status.name(),
                    }
                    .into());
                }
                AuthStatus::LoggedOut => return Ok(state.clone()),
                // A failed attempt leaves nothing to revoke; a new login may
                // start as soon as the error is gone.
                AuthStatus::AuthFailed => {
                    *state = AuthState::logged_out();
                    AuthStatus::AuthFailed
                }
                AuthStatus::LoggedIn => AuthStatus::LoggedIn,
            }
        };

        let next = AuthState::logged_out();
        if status == AuthStatus::LoggedIn {
            self.service.logout().await;
        }
        let persisted = self.persist(&next).await;
        if status == AuthStatus::LoggedIn {
            self.state.set(next.clone());
        }
        info!("logged out");
        match persisted {
            Ok(()) => Ok(next),
            Err(err) => {
                warn!(error = %err, "could not clear persisted session");
                Err(AuthError::Persistence.into())
            }
        }
    }

    fn clear_error(&self) -> AuthState {
        let mut state = self.state.write();
        if state.status == AuthStatus::AuthFailed {
            *state = AuthState::logged_out();
        }
        state.clone()
    }

    async fn set_user(&self, user: UserIdentity) -> Result<AuthState> {
        let _writer = self.writer.lock().await;
        let current = self.state.get();
        if current.status != AuthStatus::LoggedIn {
            return Err(AuthError::InvalidTransition {
                state: current.status.name(),
            }
            .into());
        }
        let next = AuthState {
            user: Some(user),
            ..current
        };
        self.persist(&next).await?;
        self.state.set(next.clone());
        Ok(next)
    }
}

impl<S: KeyValueStorage> StateContainer for AuthStore<S> {
    type State = AuthState;
    type Action = AuthAction;

    fn get(&self) -> AuthState {
        self.state.get()
    }

    async fn dispatch(&self, action: AuthAction) -> Result<AuthState> {
        match action {
            AuthAction::Login(credentials) => self.login(credentials).await,
            AuthAction::Register(registration) => self.register(registration).await,
            AuthAction::Logout => self.logout().await,
            AuthAction::ClearError => Ok(self.clear_error()),
            AuthAction::SetUser(user) => self.set_user(user).await,
        }
    }
}
