use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, Time};

use crate::models::Badge;
use crate::projection::filter::{CategoryKind, Categorized, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl CategoryKind for AppointmentStatus {
    const ALL: &'static [Self] = &[
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    fn key(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl AppointmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Programada",
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::InProgress => "En Curso",
            AppointmentStatus::Completed => "Completada",
            AppointmentStatus::Cancelled => "Cancelada",
            AppointmentStatus::NoShow => "No Asistió",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            AppointmentStatus::Scheduled => Badge::Info,
            AppointmentStatus::Confirmed => Badge::Success,
            AppointmentStatus::InProgress => Badge::Warning,
            AppointmentStatus::Completed => Badge::Default,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow => Badge::Danger,
        }
    }

    /// Still expected to happen (shown on the dentist's "today" list).
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Checkup,
    Cleaning,
    Filling,
    RootCanal,
    Extraction,
    Orthodontics,
    Emergency,
    Consultation,
    Other,
}

impl AppointmentType {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentType::Checkup => "Revisión",
            AppointmentType::Cleaning => "Limpieza",
            AppointmentType::Filling => "Empaste",
            AppointmentType::RootCanal => "Endodoncia",
            AppointmentType::Extraction => "Extracción",
            AppointmentType::Orthodontics => "Ortodoncia",
            AppointmentType::Emergency => "Emergencia",
            AppointmentType::Consultation => "Consulta",
            AppointmentType::Other => "Otro",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub dentist_id: String,
    pub patient_name: String,
    /// Start of the appointment.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Length in minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub treatment_id: Option<String>,
}

impl Appointment {
    pub fn day(&self) -> Date {
        self.date.date()
    }

    pub fn start_time(&self) -> Time {
        self.date.time()
    }

    pub fn end_time(&self) -> Time {
        (self.date + Duration::minutes(i64::from(self.duration))).time()
    }

    pub fn is_on(&self, day: Date) -> bool {
        self.day() == day
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.patient_name.as_str())];
        fields.extend(self.reason.as_deref().map(Cow::Borrowed));
        fields.extend(self.notes.as_deref().map(Cow::Borrowed));
        fields
    }
}

impl Categorized for Appointment {
    type Category = AppointmentStatus;

    fn category(&self) -> AppointmentStatus {
        self.status
    }
}
