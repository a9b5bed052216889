use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use std::time::Duration;

use crate::config::AuthConfig;
use crate::core::validation;
use crate::error::{AuthError, DentalFlowError, Result, ValidationErrors};
use crate::fixtures;
use crate::models::{
    DentistProfile, LoginCredentials, PatientProfile, Registration, UserIdentity, UserProfile,
};

/// Lifetime of an access token, in seconds.
pub const TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserIdentity,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl AuthResponse {
    fn issue(user: UserIdentity) -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self {
            access_token: format!("mock-token-{}-{}", user.id, millis),
            refresh_token: format!("mock-refresh-{}-{}", user.id, millis),
            expires_in: TOKEN_TTL_SECS,
            user,
        }
    }
}

/// Simulated authentication backend over an in-memory user directory.
///
/// Every call waits a random delay in the configured range before answering,
/// the way a remote backend would.
#[derive(Debug)]
pub struct AuthService {
    users: RwLock<Vec<UserIdentity>>,
    latency: AuthConfig,
}

impl AuthService {
    pub fn new(users: Vec<UserIdentity>, latency: AuthConfig) -> Self {
        Self {
            users: RwLock::new(users),
            latency,
        }
    }

    /// Directory seeded with the demo dentist and patient.
    pub fn seeded(latency: AuthConfig) -> Self {
        Self::new(fixtures::users(), latency)
    }

    async fn simulate_delay(&self) {
        let AuthConfig {
            min_delay_ms,
            max_delay_ms,
        } = self.latency;
        if max_delay_ms == 0 {
            return;
        }
        let ms = if min_delay_ms >= max_delay_ms {
            min_delay_ms
        } else {
            rand::thread_rng().gen_range(min_delay_ms..max_delay_ms)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    pub async fn contains_email(&self, email: &str) -> bool {
        self.users.read().await.iter().any(|u| u.email == email)
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.simulate_delay().await;

        let user = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == credentials.email)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if credentials.password.chars().count() < validation::LOGIN_MIN_PASSWORD {
            return Err(AuthError::WrongPassword.into());
        }

        debug!(user_id = %user.id, "credentials accepted");
        Ok(AuthResponse::issue(user))
    }

    /// Creates a new identity. The directory is left untouched on any failure.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        validation::validate_registration(registration)?;
        self.simulate_delay().await;

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == registration.email()) {
            return Err(AuthError::EmailTaken.into());
        }

        let profile = match registration {
            Registration::Dentist(data) => UserProfile::Dentist(DentistProfile {
                name: data.name.clone(),
                last_name: data.last_name.clone(),
                phone: data.phone.clone(),
                license_number: data.license_number.clone(),
                specialization: data.specialization.clone(),
                clinic_name: None,
                bio: None,
            }),
            Registration::Patient(data) => {
                let date_of_birth = data.date_of_birth.ok_or_else(|| {
                    let mut errors = ValidationErrors::new();
                    errors.add("dateOfBirth", "La fecha de nacimiento es requerida");
                    DentalFlowError::from(errors)
                })?;
                UserProfile::Patient(PatientProfile {
                    name: data.name.clone(),
                    last_name: data.last_name.clone(),
                    phone: data.phone.clone(),
                    date_of_birth,
                    dni: data.dni.clone(),
                    allergies: vec![],
                    medical_conditions: vec![],
                    blood_type: None,
                })
            }
        };

        let now = OffsetDateTime::now_utc();
        let user = UserIdentity {
            id: format!("user-{}", Uuid::new_v4()),
            email: registration.email().to_string(),
            role: registration.role(),
            profile,
            created_at: now,
            updated_at: now,
            is_verified: false,
            is_active: true,
        };
        users.push(user.clone());
        info!(user_id = %user.id, role = ?user.role, "registered new user");

        Ok(AuthResponse::issue(user))
    }

    /// Verification codes are six characters long.
    pub async fn verify_email(&self, code: &str) -> bool {
        self.simulate_delay().await;
        code.chars().count() == 6
    }

    pub async fn reset_password(&self, email: &str) -> Result<()> {
        self.simulate_delay().await;
        if !self.contains_email(email).await {
            return Err(AuthError::EmailNotFound.into());
        }
        info!(email, "password reset requested");
        Ok(())
    }

    pub async fn logout(&self) {
        self.simulate_delay().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokens_carry_the_user_id() {
        let service = AuthService::seeded(AuthConfig::instant());
        let response = service
            .login(&LoginCredentials {
                email: fixtures::DENTIST_EMAIL.into(),
                password: "secreto".into(),
            })
            .await
            .unwrap();
        assert!(response.access_token.starts_with("mock-token-1-"));
        assert!(response.refresh_token.starts_with("mock-refresh-1-"));
        assert_eq!(response.expires_in, 3600);
    }

    #[tokio::test]
    async fn short_password_is_rejected_for_known_user() {
        let service = AuthService::seeded(AuthConfig::instant());
        let err = service
            .login(&LoginCredentials {
                email: fixtures::PATIENT_EMAIL.into(),
                password: "123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Contraseña incorrecta");
    }

    #[tokio::test]
    async fn verify_and_reset() {
        let service = AuthService::seeded(AuthConfig::instant());
        assert!(service.verify_email("123456").await);
        assert!(!service.verify_email("12345").await);
        assert!(service.reset_password(fixtures::PATIENT_EMAIL).await.is_ok());
        let err = service.reset_password("nadie@example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "Email no encontrado");
    }
}
