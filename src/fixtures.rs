//! Seed data for the in-memory entity store and the auth user directory.
//!
//! Dated records are laid out relative to a reference instant so that "today",
//! "upcoming" and "past" views always have something to show.

use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime, Time};

use crate::core::entities::EntityStore;
use crate::models::{
    Appointment, AppointmentStatus, AppointmentType, Conversation, DentistProfile, Habits,
    MedicalHistory, Message, MessageKind, Patient, PatientProfile, PatientStats, PatientStatus,
    Resource, ResourceCategory, ResourceType, Role, Surgery, Treatment, TreatmentSession,
    TreatmentStatus, TreatmentType, UserIdentity, UserProfile,
};

pub const DENTIST_ID: &str = "1";
pub const DENTIST_EMAIL: &str = "dr.martinez@dentalflow.com";
pub const PATIENT_ID: &str = "2";
pub const PATIENT_EMAIL: &str = "paciente@example.com";

fn at(day: Date, hour: i64, minute: i64) -> OffsetDateTime {
    day.with_time(Time::MIDNIGHT + Duration::minutes(hour * 60 + minute))
        .assume_utc()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn carlos_profile() -> PatientProfile {
    PatientProfile {
        name: "Carlos".into(),
        last_name: "García".into(),
        phone: "+34 666 789 012".into(),
        date_of_birth: date!(1990 - 05 - 20),
        dni: "12345678A".into(),
        allergies: strings(&["Penicilina"]),
        medical_conditions: vec![],
        blood_type: Some("A+".into()),
    }
}

/// The two accounts every fresh directory starts with.
pub fn users() -> Vec<UserIdentity> {
    vec![
        UserIdentity {
            id: DENTIST_ID.into(),
            email: DENTIST_EMAIL.into(),
            role: Role::Dentist,
            profile: UserProfile::Dentist(DentistProfile {
                name: "Elena".into(),
                last_name: "Martínez".into(),
                phone: "+34 666 123 456".into(),
                license_number: "DEN12345".into(),
                specialization: strings(&["Ortodoncia", "Endodoncia"]),
                clinic_name: Some("Clínica Dental Martínez".into()),
                bio: Some("Especialista en ortodoncia con 10 años de experiencia".into()),
            }),
            created_at: datetime!(2023-01-15 0:00 UTC),
            updated_at: datetime!(2024-10-01 0:00 UTC),
            is_verified: true,
            is_active: true,
        },
        UserIdentity {
            id: PATIENT_ID.into(),
            email: PATIENT_EMAIL.into(),
            role: Role::Patient,
            profile: UserProfile::Patient(carlos_profile()),
            created_at: datetime!(2024-03-10 0:00 UTC),
            updated_at: datetime!(2024-10-20 0:00 UTC),
            is_verified: true,
            is_active: true,
        },
    ]
}

struct PatientSeed {
    id: &'static str,
    name: &'static str,
    last_name: &'static str,
    dni: &'static str,
    email: &'static str,
    status: PatientStatus,
    last_visit_days_ago: Option<i64>,
    total_visits: u32,
    pending_payments: u64,
}

const PATIENTS: &[PatientSeed] = &[
    PatientSeed {
        id: PATIENT_ID,
        name: "Carlos",
        last_name: "García",
        dni: "12345678A",
        email: PATIENT_EMAIL,
        status: PatientStatus::Active,
        last_visit_days_ago: Some(14),
        total_visits: 8,
        pending_payments: 150,
    },
    PatientSeed {
        id: "p-3",
        name: "Lucía",
        last_name: "Fernández",
        dni: "23456789B",
        email: "lucia.fernandez@example.com",
        status: PatientStatus::Active,
        last_visit_days_ago: Some(3),
        total_visits: 12,
        pending_payments: 0,
    },
    PatientSeed {
        id: "p-4",
        name: "Javier",
        last_name: "López",
        dni: "34567890C",
        email: "javier.lopez@example.com",
        status: PatientStatus::Inactive,
        last_visit_days_ago: Some(200),
        total_visits: 2,
        pending_payments: 80,
    },
    PatientSeed {
        id: "p-5",
        name: "María",
        last_name: "Rodríguez",
        dni: "45678901D",
        email: "maria.rodriguez@example.com",
        status: PatientStatus::Active,
        last_visit_days_ago: Some(30),
        total_visits: 5,
        pending_payments: 0,
    },
    PatientSeed {
        id: "p-6",
        name: "Andrés",
        last_name: "Sánchez",
        dni: "56789012E",
        email: "andres.sanchez@example.com",
        status: PatientStatus::Archived,
        last_visit_days_ago: None,
        total_visits: 0,
        pending_payments: 0,
    },
    PatientSeed {
        id: "p-7",
        name: "Carmen",
        last_name: "Ruiz",
        dni: "67890123F",
        email: "carmen.ruiz@example.com",
        status: PatientStatus::Inactive,
        last_visit_days_ago: Some(400),
        total_visits: 1,
        pending_payments: 0,
    },
];

pub fn patients(today: Date) -> Vec<Patient> {
    PATIENTS
        .iter()
        .map(|seed| {
            let profile = if seed.id == PATIENT_ID {
                carlos_profile()
            } else {
                PatientProfile {
                    name: seed.name.into(),
                    last_name: seed.last_name.into(),
                    phone: "+34 600 000 000".into(),
                    date_of_birth: date!(1985 - 01 - 01),
                    dni: seed.dni.into(),
                    allergies: vec![],
                    medical_conditions: vec![],
                    blood_type: None,
                }
            };
            Patient {
                id: seed.id.into(),
                email: seed.email.into(),
                dentist_id: DENTIST_ID.into(),
                profile,
                status: seed.status,
                last_visit: seed
                    .last_visit_days_ago
                    .map(|days| at(today - Duration::days(days), 10, 0)),
                next_appointment: None,
                total_visits: seed.total_visits,
                pending_payments: seed.pending_payments,
                notes: None,
                tags: vec![],
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn appointment(
    id: &str,
    patient_id: &str,
    patient_name: &str,
    date: OffsetDateTime,
    duration: u32,
    kind: AppointmentType,
    status: AppointmentStatus,
    reason: &str,
) -> Appointment {
    Appointment {
        id: id.into(),
        patient_id: patient_id.into(),
        dentist_id: DENTIST_ID.into(),
        patient_name: patient_name.into(),
        date,
        duration,
        kind,
        status,
        reason: Some(reason.into()),
        notes: None,
        treatment_id: None,
    }
}

/// Appointments spread around `today`. Not pre-sorted.
#[rustfmt::skip]
pub fn appointments(today: Date) -> Vec<Appointment> {
    use AppointmentStatus::*;
    use AppointmentType::*;

    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);
    vec![
        appointment("apt-1", PATIENT_ID, "Carlos García", at(today, 11, 0), 60, RootCanal, Confirmed, "Endodoncia molar inferior"),
        appointment("apt-2", "p-3", "Lucía Fernández", at(today, 9, 0), 30, Checkup, Completed, "Revisión semestral"),
        appointment("apt-3", "p-5", "María Rodríguez", at(today, 16, 30), 45, Cleaning, Scheduled, "Limpieza dental"),
        appointment("apt-4", "p-4", "Javier López", at(today, 12, 0), 30, Consultation, Cancelled, "Dolor al masticar"),
        appointment("apt-5", "p-3", "Lucía Fernández", at(today, 18, 0), 30, Orthodontics, Scheduled, "Ajuste de brackets"),
        appointment("apt-6", PATIENT_ID, "Carlos García", at(yesterday, 10, 0), 45, Filling, Completed, "Empaste premolar"),
        appointment("apt-7", "p-5", "María Rodríguez", at(tomorrow, 9, 30), 30, Checkup, Confirmed, "Control post-limpieza"),
        appointment("apt-8", PATIENT_ID, "Carlos García", at(today + Duration::days(7), 10, 0), 60, RootCanal, Scheduled, "Segunda sesión de endodoncia"),
        appointment("apt-9", PATIENT_ID, "Carlos García", at(today - Duration::days(30), 17, 0), 30, Cleaning, Completed, "Limpieza dental"),
        appointment("apt-10", "p-7", "Carmen Ruiz", at(yesterday, 13, 0), 30, Emergency, NoShow, "Fractura de incisivo"),
    ]
}

#[rustfmt::skip]
pub fn treatments(today: Date) -> Vec<Treatment> {
    let base = |id: &str, patient_id: &str, kind, title: &str, status, days_ago: i64| Treatment {
        id: id.into(),
        patient_id: patient_id.into(),
        dentist_id: DENTIST_ID.into(),
        kind,
        title: title.into(),
        description: String::new(),
        status,
        start_date: at(today - Duration::days(days_ago), 10, 0),
        end_date: None,
        estimated_sessions: 1,
        completed_sessions: 0,
        diagnosis: String::new(),
        cost: 0,
        paid: 0,
        teeth_affected: vec![],
    };

    vec![
        Treatment {
            description: "Tratamiento de conducto en el molar 36".into(),
            diagnosis: "Pulpitis irreversible".into(),
            estimated_sessions: 3,
            completed_sessions: 1,
            cost: 450,
            paid: 300,
            teeth_affected: strings(&["36"]),
            ..base("tr-1", PATIENT_ID, TreatmentType::RootCanal, "Endodoncia molar", TreatmentStatus::InProgress, 7)
        },
        Treatment {
            description: "Blanqueamiento en consulta".into(),
            diagnosis: "Tinción extrínseca".into(),
            cost: 300,
            ..base("tr-2", PATIENT_ID, TreatmentType::Whitening, "Blanqueamiento dental", TreatmentStatus::Planned, 0)
        },
        Treatment {
            description: "Empaste de composite en premolar".into(),
            diagnosis: "Caries oclusal".into(),
            completed_sessions: 1,
            cost: 80,
            paid: 80,
            end_date: Some(at(today - Duration::days(1), 10, 45)),
            teeth_affected: strings(&["24"]),
            ..base("tr-3", PATIENT_ID, TreatmentType::Filling, "Empaste premolar", TreatmentStatus::Completed, 1)
        },
        Treatment {
            description: "Brackets metálicos superiores e inferiores".into(),
            diagnosis: "Maloclusión clase II".into(),
            estimated_sessions: 24,
            completed_sessions: 10,
            cost: 3200,
            paid: 1600,
            ..base("tr-4", "p-3", TreatmentType::Orthodontics, "Ortodoncia fija", TreatmentStatus::InProgress, 300)
        },
        Treatment {
            description: "Implante en pieza 46".into(),
            diagnosis: "Ausencia de pieza".into(),
            estimated_sessions: 4,
            cost: 1200,
            ..base("tr-5", "p-4", TreatmentType::Implant, "Implante dental", TreatmentStatus::Cancelled, 180)
        },
    ]
}

fn session(
    id: &str,
    treatment_id: &str,
    date: OffsetDateTime,
    duration: u32,
    notes: &str,
    procedures: &[&str],
) -> TreatmentSession {
    TreatmentSession {
        id: id.into(),
        treatment_id: treatment_id.into(),
        date,
        duration,
        notes: notes.into(),
        procedures: strings(procedures),
        next_session_date: None,
    }
}

/// Held sessions, listed out of date order on purpose.
#[rustfmt::skip]
pub fn sessions(today: Date) -> Vec<TreatmentSession> {
    vec![
        TreatmentSession {
            next_session_date: Some(at(today, 11, 0)),
            ..session("ses-1", "tr-1", at(today - Duration::days(7), 10, 0), 60, "Apertura cameral y limpieza de conductos", &["Anestesia local", "Apertura cameral", "Medicación intraconducto"])
        },
        session("ses-2", "tr-3", at(today - Duration::days(1), 10, 0), 45, "Empaste de composite sin incidencias", &["Anestesia local", "Obturación composite"]),
        session("ses-3", "tr-4", at(today - Duration::days(60), 17, 0), 30, "Cambio de arcos", &["Cambio de arco superior"]),
        session("ses-4", "tr-4", at(today - Duration::days(300), 10, 0), 90, "Colocación de brackets", &["Cementado de brackets", "Arco inicial"]),
        TreatmentSession {
            next_session_date: Some(at(today, 18, 0)),
            ..session("ses-5", "tr-4", at(today - Duration::days(30), 17, 0), 30, "Ajuste mensual", &["Ajuste de ligaduras"])
        },
    ]
}

pub fn medical_histories(today: Date) -> Vec<MedicalHistory> {
    vec![
        MedicalHistory {
            patient_id: PATIENT_ID.into(),
            allergies: strings(&["Penicilina"]),
            medications: vec![],
            conditions: vec![],
            surgeries: vec![Surgery {
                date: at(date!(2015 - 06 - 10), 9, 0),
                kind: "Extracción de cordales".into(),
                notes: Some("Sin complicaciones".into()),
            }],
            family_history: strings(&["Diabetes tipo 2"]),
            habits: Habits {
                smoking: false,
                alcohol: true,
                exercise_frequency: Some("3 veces por semana".into()),
            },
            last_updated: at(today - Duration::days(14), 10, 0),
        },
        MedicalHistory {
            patient_id: "p-3".into(),
            allergies: vec![],
            medications: strings(&["Ibuprofeno (a demanda)"]),
            conditions: vec![],
            surgeries: vec![],
            family_history: vec![],
            habits: Habits::default(),
            last_updated: at(today - Duration::days(3), 10, 0),
        },
    ]
}

pub fn patient_stats(today: Date) -> Vec<PatientStats> {
    vec![
        PatientStats {
            patient_id: PATIENT_ID.into(),
            total_visits: 8,
            upcoming_appointments: 2,
            completed_treatments: 1,
            pending_treatments: 2,
            total_spent: 380,
            last_visit: Some(at(today - Duration::days(1), 10, 0)),
            next_appointment: Some(at(today, 11, 0)),
        },
        PatientStats {
            patient_id: "p-3".into(),
            total_visits: 12,
            upcoming_appointments: 1,
            completed_treatments: 0,
            pending_treatments: 1,
            total_spent: 1600,
            last_visit: Some(at(today - Duration::days(3), 10, 0)),
            next_appointment: Some(at(today, 18, 0)),
        },
    ]
}

struct ResourceSeed {
    id: &'static str,
    kind: ResourceType,
    category: ResourceCategory,
    title: &'static str,
    description: &'static str,
    read_time: Option<u32>,
    duration: Option<u32>,
    author: &'static str,
    published_at: Date,
    tags: &'static [&'static str],
    views: u32,
    likes: u32,
    is_favorite: bool,
}

const RESOURCES: &[ResourceSeed] = &[
    ResourceSeed {
        id: "res-1",
        kind: ResourceType::Article,
        category: ResourceCategory::Hygiene,
        title: "Técnica correcta de cepillado dental",
        description: "Aprende la forma adecuada de cepillarte los dientes para una higiene óptima",
        read_time: Some(5),
        duration: None,
        author: "Dra. Elena Martínez",
        published_at: date!(2024 - 10 - 15),
        tags: &["cepillado", "higiene", "prevención"],
        views: 1240,
        likes: 89,
        is_favorite: false,
    },
    ResourceSeed {
        id: "res-2",
        kind: ResourceType::Video,
        category: ResourceCategory::Prevention,
        title: "Uso correcto del hilo dental",
        description: "Video tutorial sobre cómo usar el hilo dental de manera efectiva",
        read_time: None,
        duration: Some(180),
        author: "Dr. Carlos García",
        published_at: date!(2024 - 10 - 10),
        tags: &["hilo dental", "limpieza", "prevención"],
        views: 2150,
        likes: 156,
        is_favorite: true,
    },
    ResourceSeed {
        id: "res-3",
        kind: ResourceType::Guide,
        category: ResourceCategory::PostCare,
        title: "Cuidados después de una extracción dental",
        description: "Guía completa sobre los cuidados necesarios tras una extracción",
        read_time: Some(8),
        duration: None,
        author: "Dra. Ana López",
        published_at: date!(2024 - 09 - 28),
        tags: &["extracción", "post-operatorio", "cuidados"],
        views: 3420,
        likes: 245,
        is_favorite: true,
    },
    ResourceSeed {
        id: "res-4",
        kind: ResourceType::Article,
        category: ResourceCategory::Nutrition,
        title: "Alimentos que dañan tus dientes",
        description: "Conoce qué alimentos pueden perjudicar tu salud dental",
        read_time: Some(6),
        duration: None,
        author: "Dr. Luis Fernández",
        published_at: date!(2024 - 10 - 01),
        tags: &["nutrición", "prevención", "alimentación"],
        views: 1890,
        likes: 132,
        is_favorite: false,
    },
    ResourceSeed {
        id: "res-5",
        kind: ResourceType::Tip,
        category: ResourceCategory::Pediatric,
        title: "Cómo cuidar los dientes de leche",
        description: "Consejos para el cuidado dental infantil",
        read_time: Some(4),
        duration: None,
        author: "Dra. María Rodríguez",
        published_at: date!(2024 - 10 - 20),
        tags: &["niños", "prevención", "pediatría"],
        views: 956,
        likes: 78,
        is_favorite: false,
    },
    ResourceSeed {
        id: "res-6",
        kind: ResourceType::Infographic,
        category: ResourceCategory::Emergency,
        title: "Qué hacer ante una emergencia dental",
        description: "Pasos a seguir en caso de emergencia dental",
        read_time: Some(5),
        duration: None,
        author: "Dr. Pedro Sánchez",
        published_at: date!(2024 - 10 - 05),
        tags: &["emergencia", "urgencia", "traumatismo"],
        views: 2780,
        likes: 198,
        is_favorite: false,
    },
    ResourceSeed {
        id: "res-7",
        kind: ResourceType::Article,
        category: ResourceCategory::Treatments,
        title: "Ortodoncia: ¿Cuándo es necesaria?",
        description: "Aprende sobre los tratamientos de ortodoncia y cuándo considerarlos",
        read_time: Some(7),
        duration: None,
        author: "Dra. Carmen Ruiz",
        published_at: date!(2024 - 09 - 15),
        tags: &["ortodoncia", "tratamiento", "brackets"],
        views: 1650,
        likes: 115,
        is_favorite: false,
    },
    ResourceSeed {
        id: "res-8",
        kind: ResourceType::Video,
        category: ResourceCategory::Hygiene,
        title: "Enjuague bucal: ¿Sí o no?",
        description: "Todo lo que necesitas saber sobre el uso de enjuagues bucales",
        read_time: None,
        duration: Some(240),
        author: "Dr. José Martín",
        published_at: date!(2024 - 10 - 12),
        tags: &["enjuague", "higiene", "complemento"],
        views: 1420,
        likes: 94,
        is_favorite: false,
    },
];

pub fn resources() -> Vec<Resource> {
    RESOURCES
        .iter()
        .map(|seed| Resource {
            id: seed.id.into(),
            kind: seed.kind,
            category: seed.category,
            title: seed.title.into(),
            description: seed.description.into(),
            content: None,
            video_url: seed
                .duration
                .map(|_| format!("https://example.com/video-{}", seed.id)),
            duration: seed.duration,
            read_time: seed.read_time,
            author: Some(seed.author.into()),
            published_at: seed.published_at.midnight().assume_utc(),
            tags: strings(seed.tags),
            views: seed.views,
            likes: seed.likes,
            is_favorite: seed.is_favorite,
        })
        .collect()
}

fn message(
    id: &str,
    conversation_id: &str,
    sender: (&str, &str),
    content: &str,
    timestamp: OffsetDateTime,
    read: bool,
) -> Message {
    Message {
        id: id.into(),
        conversation_id: conversation_id.into(),
        sender_id: sender.0.into(),
        sender_name: sender.1.into(),
        content: content.into(),
        kind: MessageKind::Text,
        timestamp,
        read,
    }
}

#[rustfmt::skip]
pub fn messages(now: OffsetDateTime) -> Vec<Message> {
    let dentist = (DENTIST_ID, "Dra. Elena Martínez");
    vec![
        message("msg-1", "conv-1", dentist, "Recuerde su cita de mañana a las 11:00", now - Duration::hours(5), true),
        message("msg-2", "conv-1", (PATIENT_ID, "Carlos García"), "¿Puedo tomar ibuprofeno antes de la cita?", now - Duration::hours(2), false),
        message("msg-3", "conv-1", (PATIENT_ID, "Carlos García"), "Gracias de antemano", now - Duration::hours(1), false),
        message("msg-4", "conv-2", ("p-3", "Lucía Fernández"), "Se me ha soltado un bracket", now - Duration::days(1), false),
        message("msg-5", "conv-3", dentist, "Los resultados de la radiografía están listos", now - Duration::days(3), true),
    ]
}

pub fn conversations(now: OffsetDateTime) -> Vec<Conversation> {
    let all = messages(now);
    let last = |conversation_id: &str| {
        all.iter()
            .filter(|m| m.conversation_id == conversation_id)
            .max_by_key(|m| m.timestamp)
            .cloned()
    };
    let conversation = |id: &str, participant_id: &str, name: &str, role, unread_count| {
        let last_message = last(id);
        Conversation {
            id: id.into(),
            participant_id: participant_id.into(),
            participant_name: name.into(),
            participant_role: role,
            updated_at: last_message.as_ref().map(|m| m.timestamp).unwrap_or(now),
            last_message,
            unread_count,
        }
    };
    vec![
        conversation("conv-1", PATIENT_ID, "Carlos García", Role::Patient, 2),
        conversation("conv-2", "p-3", "Lucía Fernández", Role::Patient, 1),
        conversation("conv-3", "p-5", "María Rodríguez", Role::Patient, 0),
        conversation("conv-4", DENTIST_ID, "Dra. Elena Martínez", Role::Dentist, 0),
    ]
}

/// A fully seeded entity store with dates relative to `now`.
pub fn entity_store(now: OffsetDateTime) -> EntityStore {
    let today = now.date();
    let mut store = EntityStore::new();
    store.replace_patients(patients(today));
    store.replace_appointments(appointments(today));
    store.replace_treatments(treatments(today));
    store.replace_sessions(sessions(today));
    store.replace_medical_histories(medical_histories(today));
    store.replace_patient_stats(patient_stats(today));
    store.replace_resources(resources());
    store.replace_conversations(conversations(now));
    store.replace_messages(messages(now));
    store
}
