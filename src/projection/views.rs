//! Per-screen projections.
//!
//! Every screen keeps its own scope policy: the calendar counts chips for the
//! selected day only, a patient's treatment list counts that patient's
//! treatments, while the patient and resource lists count the whole
//! collection.

use time::{Date, OffsetDateTime};

use crate::core::entities::EntityStore;
use crate::error::Result;
use crate::models::{
    Appointment, AppointmentStatus, Conversation, Patient, PatientStatus, Resource,
    ResourceCategory, Role, Treatment, TreatmentStatus,
};
use crate::projection::filter::{CategoryKind, FilterSpec};
use crate::projection::projector::{Projection, ViewProjector};

/// The patients list opens on active patients.
pub fn patients_default_filter() -> FilterSpec {
    FilterSpec::category(PatientStatus::Active.key())
}

pub fn patients_projector<'f>() -> ViewProjector<'f, Patient> {
    ViewProjector::new()
}

pub fn patients_list<'a>(
    store: &'a EntityStore,
    spec: &FilterSpec,
) -> Projection<'a, Patient, PatientStatus> {
    patients_projector().project(store.patients().records(), spec)
}

pub fn treatments_projector(patient_id: &str) -> ViewProjector<'_, Treatment> {
    ViewProjector::new().with_scope("patient", move |t: &Treatment| t.patient_id == patient_id)
}

/// Treatments of one patient; fails when the patient does not exist.
pub fn patient_treatments<'a>(
    store: &'a EntityStore,
    patient_id: &str,
    spec: &FilterSpec,
) -> Result<(&'a Patient, Projection<'a, Treatment, TreatmentStatus>)> {
    let patient = store.patient(patient_id)?;
    let projection = treatments_projector(patient_id).project(store.treatments().records(), spec);
    Ok((patient, projection))
}

pub fn resources_projector<'f>() -> ViewProjector<'f, Resource> {
    ViewProjector::new()
}

pub fn resources<'a>(
    store: &'a EntityStore,
    spec: &FilterSpec,
) -> Projection<'a, Resource, ResourceCategory> {
    resources_projector().project(store.resources().records(), spec)
}

pub fn conversations<'a>(
    store: &'a EntityStore,
    search_text: &str,
) -> Projection<'a, Conversation, Role> {
    ViewProjector::new().project(
        store.conversations().records(),
        &FilterSpec::search(search_text),
    )
}

/// Unread messages across every conversation, whatever the search text.
pub fn unread_total(conversations: &[Conversation]) -> u32 {
    conversations.iter().map(|c| c.unread_count).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentTab {
    Upcoming,
    Past,
}

/// A patient's appointments split around `now`: upcoming soonest first,
/// past most recent first.
pub fn patient_appointments_projector(
    patient_id: &str,
    tab: AppointmentTab,
    now: OffsetDateTime,
) -> ViewProjector<'_, Appointment> {
    let projector = ViewProjector::new();
    match tab {
        AppointmentTab::Upcoming => projector
            .with_scope("upcoming", move |a: &Appointment| {
                a.patient_id == patient_id && a.date > now
            })
            .with_sort("date-asc", |a: &Appointment, b: &Appointment| a.date.cmp(&b.date)),
        AppointmentTab::Past => projector
            .with_scope("past", move |a: &Appointment| {
                a.patient_id == patient_id && a.date <= now
            })
            .with_sort("date-desc", |a: &Appointment, b: &Appointment| b.date.cmp(&a.date)),
    }
}

pub fn patient_appointments<'a>(
    store: &'a EntityStore,
    patient_id: &str,
    tab: AppointmentTab,
    now: OffsetDateTime,
) -> Projection<'a, Appointment, AppointmentStatus> {
    patient_appointments_projector(patient_id, tab, now)
        .project(store.appointments().records(), &FilterSpec::default())
}

/// Headline numbers of the dentist dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DentistSummary {
    pub total_patients: usize,
    pub today_appointments: usize,
    pub pending_treatments: usize,
    pub outstanding_payments: u64,
}

#[derive(Debug)]
pub struct DentistDashboard<'a> {
    /// Today's appointments still to be seen, earliest first
    pub today: Vec<&'a Appointment>,
    pub summary: DentistSummary,
}

/// Appointments on `today` that are still scheduled or confirmed.
///
/// The clinic's whole agenda is listed, not only the signed-in dentist's.
pub fn dentist_today(appointments: &[Appointment], today: Date) -> Vec<&Appointment> {
    ViewProjector::new()
        .with_scope("today-pending", move |a: &Appointment| {
            a.is_on(today) && a.status.is_pending()
        })
        .with_sort("start-time", |a: &Appointment, b: &Appointment| {
            a.start_time().cmp(&b.start_time())
        })
        .project(appointments, &FilterSpec::default())
        .items
}

pub fn dentist_dashboard<'a>(
    store: &'a EntityStore,
    dentist_id: &str,
    today: Date,
) -> DentistDashboard<'a> {
    let today_list = dentist_today(store.appointments().records(), today);
    let own_patients = move || {
        store
            .patients()
            .records()
            .iter()
            .filter(move |p| p.dentist_id == dentist_id)
    };

    let summary = DentistSummary {
        total_patients: own_patients().count(),
        today_appointments: today_list.len(),
        pending_treatments: store
            .treatments()
            .records()
            .iter()
            .filter(|t| {
                t.dentist_id == dentist_id
                    && matches!(t.status, TreatmentStatus::Planned | TreatmentStatus::InProgress)
            })
            .count(),
        outstanding_payments: own_patients().map(|p| p.pending_payments).sum(),
    };

    DentistDashboard {
        today: today_list,
        summary,
    }
}

#[derive(Debug)]
pub struct PatientDashboard<'a> {
    pub next_appointment: Option<&'a Appointment>,
    pub active_treatments: Vec<&'a Treatment>,
}

pub fn patient_dashboard<'a>(
    store: &'a EntityStore,
    patient_id: &str,
    now: OffsetDateTime,
) -> PatientDashboard<'a> {
    let upcoming = patient_appointments(store, patient_id, AppointmentTab::Upcoming, now);
    let active = treatments_projector(patient_id).project(
        store.treatments().records(),
        &FilterSpec::category(TreatmentStatus::InProgress.key()),
    );
    PatientDashboard {
        next_appointment: upcoming.items.first().copied(),
        active_treatments: active.items,
    }
}
