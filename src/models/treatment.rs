use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::Badge;
use crate::projection::filter::{CategoryKind, Categorized, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl CategoryKind for TreatmentStatus {
    const ALL: &'static [Self] = &[
        TreatmentStatus::Planned,
        TreatmentStatus::InProgress,
        TreatmentStatus::Completed,
        TreatmentStatus::Cancelled,
    ];

    fn key(self) -> &'static str {
        match self {
            TreatmentStatus::Planned => "planned",
            TreatmentStatus::InProgress => "in-progress",
            TreatmentStatus::Completed => "completed",
            TreatmentStatus::Cancelled => "cancelled",
        }
    }
}

impl TreatmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            TreatmentStatus::Planned => "Planificado",
            TreatmentStatus::InProgress => "En Progreso",
            TreatmentStatus::Completed => "Completado",
            TreatmentStatus::Cancelled => "Cancelado",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            TreatmentStatus::Planned => Badge::Info,
            TreatmentStatus::InProgress => Badge::Warning,
            TreatmentStatus::Completed => Badge::Success,
            TreatmentStatus::Cancelled => Badge::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentType {
    Cleaning,
    Filling,
    RootCanal,
    Extraction,
    Implant,
    Crown,
    Orthodontics,
    Whitening,
    Other,
}

impl TreatmentType {
    pub fn label(self) -> &'static str {
        match self {
            TreatmentType::Cleaning => "Limpieza",
            TreatmentType::Filling => "Empaste",
            TreatmentType::RootCanal => "Endodoncia",
            TreatmentType::Extraction => "Extracción",
            TreatmentType::Implant => "Implante",
            TreatmentType::Crown => "Corona",
            TreatmentType::Orthodontics => "Ortodoncia",
            TreatmentType::Whitening => "Blanqueamiento",
            TreatmentType::Other => "Otro",
        }
    }

    /// Material icon name.
    pub fn icon(self) -> &'static str {
        match self {
            TreatmentType::Cleaning => "cleaning-services",
            TreatmentType::Filling => "format-paint",
            TreatmentType::RootCanal => "medical-services",
            TreatmentType::Extraction => "remove-circle-outline",
            TreatmentType::Implant => "hardware",
            TreatmentType::Crown => "workspace-premium",
            TreatmentType::Orthodontics => "grid-on",
            TreatmentType::Whitening => "auto-awesome",
            TreatmentType::Other => "medical-information",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub patient_id: String,
    pub dentist_id: String,
    #[serde(rename = "type")]
    pub kind: TreatmentType,
    pub title: String,
    pub description: String,
    pub status: TreatmentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub estimated_sessions: u32,
    pub completed_sessions: u32,
    pub diagnosis: String,
    /// Total cost in cents.
    pub cost: u64,
    /// Amount paid so far in cents.
    pub paid: u64,
    #[serde(default)]
    pub teeth_affected: Vec<String>,
}

impl Treatment {
    /// Completed sessions as a fraction of the estimate, clamped to 0..=1.
    pub fn progress(&self) -> f32 {
        if self.estimated_sessions == 0 {
            return 0.0;
        }
        (self.completed_sessions as f32 / self.estimated_sessions as f32).min(1.0)
    }

    pub fn outstanding(&self) -> u64 {
        self.cost.saturating_sub(self.paid)
    }
}

/// One visit spent on a treatment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentSession {
    pub id: String,
    pub treatment_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Minutes
    pub duration: u32,
    pub notes: String,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub next_session_date: Option<OffsetDateTime>,
}

impl Searchable for Treatment {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
            Cow::Borrowed(self.diagnosis.as_str()),
        ]
    }
}

impl Categorized for Treatment {
    type Category = TreatmentStatus;

    fn category(&self) -> TreatmentStatus {
        self.status
    }
}
