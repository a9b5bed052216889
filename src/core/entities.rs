use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{DentalFlowError, Result};
use crate::models::{
    Appointment, Conversation, MedicalHistory, Message, Patient, PatientStats, Resource, Treatment,
    TreatmentSession,
};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// An immutable, versioned copy of one entity collection.
///
/// Versions are unique across the process, so a projector cache keyed on the
/// version never confuses two snapshots.
#[derive(Debug)]
pub struct Snapshot<T> {
    version: u64,
    records: Arc<[T]>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            records: records.into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Entity collections the screens read from. Replacing a collection
/// publishes a new snapshot; readers holding the old one are unaffected.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    appointments: Snapshot<Appointment>,
    patients: Snapshot<Patient>,
    treatments: Snapshot<Treatment>,
    resources: Snapshot<Resource>,
    conversations: Snapshot<Conversation>,
    messages: Snapshot<Message>,
    sessions: Snapshot<TreatmentSession>,
    medical_histories: Snapshot<MedicalHistory>,
    patient_stats: Snapshot<PatientStats>,
}

fn find<'a, T>(
    records: &'a [T],
    kind: &'static str,
    id: &str,
    key: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    records
        .iter()
        .find(|r| key(r) == id)
        .ok_or_else(|| DentalFlowError::not_found(kind, id))
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appointments(&self) -> &Snapshot<Appointment> {
        &self.appointments
    }

    pub fn patients(&self) -> &Snapshot<Patient> {
        &self.patients
    }

    pub fn treatments(&self) -> &Snapshot<Treatment> {
        &self.treatments
    }

    pub fn resources(&self) -> &Snapshot<Resource> {
        &self.resources
    }

    pub fn conversations(&self) -> &Snapshot<Conversation> {
        &self.conversations
    }

    pub fn messages(&self) -> &Snapshot<Message> {
        &self.messages
    }

    pub fn replace_appointments(&mut self, records: Vec<Appointment>) {
        self.appointments = Snapshot::new(records);
    }

    pub fn replace_patients(&mut self, records: Vec<Patient>) {
        self.patients = Snapshot::new(records);
    }

    pub fn replace_treatments(&mut self, records: Vec<Treatment>) {
        self.treatments = Snapshot::new(records);
    }

    pub fn replace_resources(&mut self, records: Vec<Resource>) {
        self.resources = Snapshot::new(records);
    }

    pub fn replace_conversations(&mut self, records: Vec<Conversation>) {
        self.conversations = Snapshot::new(records);
    }

    pub fn replace_messages(&mut self, records: Vec<Message>) {
        self.messages = Snapshot::new(records);
    }

    pub fn replace_sessions(&mut self, records: Vec<TreatmentSession>) {
        self.sessions = Snapshot::new(records);
    }

    pub fn replace_medical_histories(&mut self, records: Vec<MedicalHistory>) {
        self.medical_histories = Snapshot::new(records);
    }

    pub fn replace_patient_stats(&mut self, records: Vec<PatientStats>) {
        self.patient_stats = Snapshot::new(records);
    }

    pub fn appointment(&self, id: &str) -> Result<&Appointment> {
        find(self.appointments.records(), "appointment", id, |a| &a.id)
    }

    pub fn patient(&self, id: &str) -> Result<&Patient> {
        find(self.patients.records(), "patient", id, |p| &p.id)
    }

    pub fn treatment(&self, id: &str) -> Result<&Treatment> {
        find(self.treatments.records(), "treatment", id, |t| &t.id)
    }

    pub fn resource(&self, id: &str) -> Result<&Resource> {
        find(self.resources.records(), "resource", id, |r| &r.id)
    }

    pub fn conversation(&self, id: &str) -> Result<&Conversation> {
        find(self.conversations.records(), "conversation", id, |c| &c.id)
    }

    pub fn medical_history(&self, patient_id: &str) -> Result<&MedicalHistory> {
        find(
            self.medical_histories.records(),
            "medical history",
            patient_id,
            |h| &h.patient_id,
        )
    }

    pub fn patient_stats(&self, patient_id: &str) -> Result<&PatientStats> {
        find(self.patient_stats.records(), "patient stats", patient_id, |s| {
            &s.patient_id
        })
    }

    /// Sessions held for a treatment, earliest first.
    pub fn sessions(&self, treatment_id: &str) -> Result<Vec<&TreatmentSession>> {
        self.treatment(treatment_id)?;
        let mut sessions: Vec<&TreatmentSession> = self
            .sessions
            .records()
            .iter()
            .filter(|s| s.treatment_id == treatment_id)
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    /// Messages of a conversation, oldest first.
    pub fn thread(&self, conversation_id: &str) -> Result<Vec<&Message>> {
        self.conversation(conversation_id)?;
        let mut thread: Vec<&Message> = self
            .messages
            .records()
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .collect();
        thread.sort_by_key(|m| m.timestamp);
        Ok(thread)
    }
}
