mod appointment;
mod conversation;
mod patient;
mod resource;
mod treatment;
mod user;

use serde::{Deserialize, Serialize};

pub use appointment::{Appointment, AppointmentStatus, AppointmentType};
pub use conversation::{Conversation, Message, MessageKind};
pub use patient::{Habits, MedicalHistory, Patient, PatientStats, PatientStatus, Surgery};
pub use resource::{Resource, ResourceCategory, ResourceType};
pub use treatment::{Treatment, TreatmentSession, TreatmentStatus, TreatmentType};
pub use user::{
    DentistProfile, DentistRegistration, LoginCredentials, PatientProfile, PatientRegistration,
    Registration, Role, UserIdentity, UserProfile,
};

/// Badge tone used when a category value is shown as a pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Success,
    Warning,
    Danger,
    Info,
    Default,
}

/// Hex colour, e.g. `#3b82f6`.
pub type Hex = &'static str;
