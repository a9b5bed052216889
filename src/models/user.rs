use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::projection::filter::CategoryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Dentist,
    Patient,
}

impl CategoryKind for Role {
    const ALL: &'static [Self] = &[Role::Dentist, Role::Patient];

    fn key(self) -> &'static str {
        match self {
            Role::Dentist => "dentist",
            Role::Patient => "patient",
        }
    }
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Dentist => "Dentista",
            Role::Patient => "Paciente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistProfile {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub license_number: String,
    pub specialization: Vec<String>,
    pub clinic_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: Date,
    pub dni: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    pub blood_type: Option<String>,
}

/// Role-specific profile. A dentist profile is recognised by its licence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserProfile {
    Dentist(DentistProfile),
    Patient(PatientProfile),
}

impl UserProfile {
    pub fn name(&self) -> &str {
        match self {
            UserProfile::Dentist(p) => &p.name,
            UserProfile::Patient(p) => &p.name,
        }
    }

    pub fn last_name(&self) -> &str {
        match self {
            UserProfile::Dentist(p) => &p.last_name,
            UserProfile::Patient(p) => &p.last_name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            UserProfile::Dentist(_) => Role::Dentist,
            UserProfile::Patient(_) => Role::Patient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub profile: UserProfile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub is_verified: bool,
    pub is_active: bool,
}

impl UserIdentity {
    /// Greeting name, e.g. "Dr. Elena Martínez" for dentists.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.profile.name(), self.profile.last_name());
        match self.role {
            Role::Dentist => format!("Dr. {}", name),
            Role::Patient => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct DentistRegistration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub license_number: String,
    pub specialization: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientRegistration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: Option<Date>,
    pub dni: String,
}

#[derive(Debug, Clone)]
pub enum Registration {
    Dentist(DentistRegistration),
    Patient(PatientRegistration),
}

impl Registration {
    pub fn email(&self) -> &str {
        match self {
            Registration::Dentist(d) => &d.email,
            Registration::Patient(p) => &p.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Registration::Dentist(_) => Role::Dentist,
            Registration::Patient(_) => Role::Patient,
        }
    }
}
