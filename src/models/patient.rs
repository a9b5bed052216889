use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{Badge, PatientProfile};
use crate::projection::filter::{CategoryKind, Categorized, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Inactive,
    Archived,
}

impl CategoryKind for PatientStatus {
    const ALL: &'static [Self] = &[
        PatientStatus::Active,
        PatientStatus::Inactive,
        PatientStatus::Archived,
    ];

    fn key(self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
            PatientStatus::Archived => "archived",
        }
    }
}

impl PatientStatus {
    pub fn label(self) -> &'static str {
        match self {
            PatientStatus::Active => "Activos",
            PatientStatus::Inactive => "Inactivos",
            PatientStatus::Archived => "Archivados",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            PatientStatus::Active => Badge::Success,
            PatientStatus::Inactive => Badge::Warning,
            PatientStatus::Archived => Badge::Default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub email: String,
    pub dentist_id: String,
    pub profile: PatientProfile,
    pub status: PatientStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_visit: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub next_appointment: Option<OffsetDateTime>,
    pub total_visits: u32,
    /// Outstanding balance in cents.
    pub pending_payments: u64,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.name, self.profile.last_name)
    }
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.full_name()),
            Cow::Borrowed(self.profile.dni.as_str()),
            Cow::Borrowed(self.email.as_str()),
        ]
    }
}

impl Categorized for Patient {
    type Category = PatientStatus;

    fn category(&self) -> PatientStatus {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habits {
    pub smoking: bool,
    pub alcohol: bool,
    pub exercise_frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surgery {
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: Option<String>,
}

/// Medical background shown on the patient's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub patient_id: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub surgeries: Vec<Surgery>,
    #[serde(default)]
    pub family_history: Vec<String>,
    #[serde(default)]
    pub habits: Habits,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

/// Visit and billing totals for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub patient_id: String,
    pub total_visits: u32,
    pub upcoming_appointments: u32,
    pub completed_treatments: u32,
    pub pending_treatments: u32,
    /// Same unit as `Treatment::paid`.
    pub total_spent: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_visit: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub next_appointment: Option<OffsetDateTime>,
}
