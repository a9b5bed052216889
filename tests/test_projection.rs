//! Integration tests for the list-screen projections over seeded data.
//!
//! Tests cover:
//! - Calendar day scope, chip counts and start-time ordering
//! - Patients, treatments, resources and conversations filters
//! - Patient appointment tabs and both dashboards
//! - Treatment sessions, medical history and patient stats lookups
//! - Snapshot memoization and republished collections

mod common;

use dentalflow::fixtures;
use dentalflow::models::{PatientStatus, ResourceCategory, TreatmentStatus};
use dentalflow::projection::calendar::{self, CalendarDay};
use dentalflow::projection::views;
use dentalflow::projection::{AppointmentTab, CategoryKind};
use dentalflow::DentalFlowError;
use time::Duration;
use time::macros::date;

use common::*;

fn ids<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, id: impl Fn(&T) -> &str) -> Vec<String> {
    items.into_iter().map(|item| id(item).to_string()).collect()
}

#[test]
fn test_calendar_day_lists_by_start_time() {
    let store = seeded_store();
    let today = NOW.date();

    // 1. "all" with no search shows the whole day, earliest first
    let day = calendar::calendar_day(store.appointments().records(), today, &FilterSpec::default());
    assert_eq!(
        ids(day.iter(), |a| &a.id),
        vec!["apt-2", "apt-1", "apt-4", "apt-3", "apt-5"]
    );

    // 2. Chip counts cover the day only
    assert_eq!(day.counts.all(), 5);
    assert_eq!(day.counts.get(AppointmentStatus::Scheduled), 2);
    assert_eq!(day.counts.get(AppointmentStatus::Confirmed), 1);
    assert_eq!(day.counts.get(AppointmentStatus::Completed), 1);
    assert_eq!(day.counts.get(AppointmentStatus::Cancelled), 1);
    assert_eq!(day.counts.get(AppointmentStatus::NoShow), 0);
    assert_eq!(
        calendar::appointment_count(store.appointments().records(), today),
        day.counts.all()
    );
}

#[test]
fn test_calendar_search_and_chip_combine() {
    let store = seeded_store();
    let today = NOW.date();

    let spec = FilterSpec::new("LUCÍA", AppointmentStatus::Scheduled.key());
    let day = calendar::calendar_day(store.appointments().records(), today, &spec);
    assert_eq!(ids(day.iter(), |a| &a.id), vec!["apt-5"]);

    // Counts ignore the search text
    assert_eq!(day.counts.all(), 5);
    assert_eq!(day.counts.for_key("scheduled"), 2);

    // The reason is searchable too
    let day = calendar::calendar_day(
        store.appointments().records(),
        today,
        &FilterSpec::search("limpieza"),
    );
    assert_eq!(ids(day.iter(), |a| &a.id), vec!["apt-3"]);
}

#[test]
fn test_calendar_day_keeps_snapshot_order_on_ties() {
    let today = NOW.date();
    let mut appointments = fixtures::appointments(today);
    let mut twin = appointments[2].clone();
    twin.id = "apt-3b".to_string();
    appointments.push(twin);

    let day = calendar::calendar_day(&appointments, today, &FilterSpec::default());
    assert_eq!(
        ids(day.iter(), |a| &a.id),
        vec!["apt-2", "apt-1", "apt-4", "apt-3", "apt-3b", "apt-5"]
    );
}

#[test]
fn test_unknown_chip_matches_nothing() {
    let store = seeded_store();
    let day = calendar::calendar_day(
        store.appointments().records(),
        NOW.date(),
        &FilterSpec::category("rescheduled"),
    );
    assert!(day.is_empty());
    assert_eq!(day.counts.all(), 5);
    assert_eq!(day.counts.for_key("rescheduled"), 0);
}

#[test]
fn test_month_grid_counts_appointments() {
    let store = seeded_store();
    let grid = calendar::month_grid(store.appointments().records(), NOW.date());

    let count_on = |day: time::Date| {
        grid.iter()
            .find(|d: &&CalendarDay| d.date == day)
            .map(|d| d.appointment_count)
    };
    assert_eq!(count_on(date!(2024 - 10 - 15)), Some(5));
    assert_eq!(count_on(date!(2024 - 10 - 14)), Some(2));
    assert_eq!(count_on(date!(2024 - 10 - 16)), Some(1));
    assert_eq!(count_on(date!(2024 - 10 - 22)), Some(1));
    // The appointment a month back falls outside the grid
    assert_eq!(grid.iter().map(|d| d.appointment_count).sum::<usize>(), 9);

    let next = calendar::shift_month(NOW.date(), 1);
    assert_eq!(next, date!(2024 - 11 - 15));
    let grid = calendar::month_grid(store.appointments().records(), next);
    assert!(grid.iter().all(|d| d.appointment_count == 0));
}

#[test]
fn test_patients_default_to_active() {
    let store = seeded_store();

    // 1. Default chip
    let list = views::patients_list(&store, &views::patients_default_filter());
    assert_eq!(ids(list.iter(), |p| &p.id), vec!["2", "p-3", "p-5"]);
    assert_eq!(list.counts.all(), 6);
    assert_eq!(list.counts.get(PatientStatus::Active), 3);
    assert_eq!(list.counts.get(PatientStatus::Inactive), 2);
    assert_eq!(list.counts.get(PatientStatus::Archived), 1);

    // 2. Search by DNI, any case
    let list = views::patients_list(&store, &FilterSpec::search("12345678a"));
    assert_eq!(ids(list.iter(), |p| &p.id), vec!["2"]);

    // 3. Search by email across every status
    let list = views::patients_list(&store, &FilterSpec::search("@example.com"));
    assert_eq!(list.len(), 6);

    // 4. Search within a chip
    let spec = FilterSpec::category(PatientStatus::Inactive.key()).with_search("ruiz");
    let list = views::patients_list(&store, &spec);
    assert_eq!(ids(list.iter(), |p| &p.id), vec!["p-7"]);
}

#[test]
fn test_patient_treatments_are_scoped() -> anyhow::Result<()> {
    let store = seeded_store();

    let (patient, list) =
        views::patient_treatments(&store, fixtures::PATIENT_ID, &FilterSpec::default())?;
    assert_eq!(patient.full_name(), "Carlos García");
    assert_eq!(ids(list.iter(), |t| &t.id), vec!["tr-1", "tr-2", "tr-3"]);
    assert_eq!(list.counts.all(), 3);
    assert_eq!(list.counts.get(TreatmentStatus::InProgress), 1);
    assert_eq!(list.counts.get(TreatmentStatus::Cancelled), 0);

    let (_, list) = views::patient_treatments(
        &store,
        fixtures::PATIENT_ID,
        &FilterSpec::category(TreatmentStatus::Completed.key()),
    )?;
    assert_eq!(ids(list.iter(), |t| &t.id), vec!["tr-3"]);

    let err = views::patient_treatments(&store, "p-404", &FilterSpec::default())
        .expect_err("unknown patient");
    assert!(matches!(err, DentalFlowError::NotFound { kind: "patient", .. }));

    Ok(())
}

#[test]
fn test_resources_by_category_and_tag() {
    let store = seeded_store();

    let list = views::resources(&store, &FilterSpec::category(ResourceCategory::Hygiene.key()));
    assert_eq!(ids(list.iter(), |r| &r.id), vec!["res-1", "res-8"]);
    assert_eq!(list.counts.all(), 8);
    assert_eq!(list.counts.get(ResourceCategory::Hygiene), 2);
    assert_eq!(list.counts.get(ResourceCategory::PostCare), 1);

    // Tags take part in search
    let list = views::resources(&store, &FilterSpec::search("BRACKETS"));
    assert_eq!(ids(list.iter(), |r| &r.id), vec!["res-7"]);
}

#[test]
fn test_conversations_and_unread_total() -> anyhow::Result<()> {
    let store = seeded_store();

    let all = views::conversations(&store, "");
    assert_eq!(all.len(), 4);
    assert_eq!(views::unread_total(store.conversations().records()), 3);

    let found = views::conversations(&store, "lucía");
    assert_eq!(ids(found.iter(), |c| &c.id), vec!["conv-2"]);

    // Threads are oldest first
    let thread = store.thread("conv-1")?;
    assert_eq!(ids(thread, |m| &m.id), vec!["msg-1", "msg-2", "msg-3"]);
    assert!(store.thread("conv-9").is_err());

    Ok(())
}

#[test]
fn test_treatment_sessions_are_scoped_and_sorted() -> anyhow::Result<()> {
    let store = seeded_store();

    // 1. Only the treatment's own sessions, earliest first
    let sessions = store.sessions("tr-4")?;
    assert_eq!(ids(sessions.iter().copied(), |s| &s.id), vec!["ses-4", "ses-3", "ses-5"]);
    assert!(sessions.windows(2).all(|pair| pair[0].date <= pair[1].date));
    assert_eq!(sessions[2].procedures, vec!["Ajuste de ligaduras".to_string()]);

    // 2. A treatment with no sessions yet is an empty list, not an error
    assert!(store.sessions("tr-2")?.is_empty());

    // 3. Unknown treatment
    let err = store.sessions("tr-404").expect_err("unknown treatment");
    assert!(matches!(err, DentalFlowError::NotFound { kind: "treatment", .. }));

    Ok(())
}

#[test]
fn test_patient_profile_lookups() -> anyhow::Result<()> {
    let store = seeded_store();

    // 1. History and stats are keyed by patient id
    let history = store.medical_history(fixtures::PATIENT_ID)?;
    assert_eq!(history.allergies, vec!["Penicilina".to_string()]);
    assert_eq!(history.surgeries.len(), 1);
    assert!(history.habits.alcohol);

    let stats = store.patient_stats("p-3")?;
    assert_eq!(stats.total_visits, 12);
    assert_eq!(stats.next_appointment.map(|at| at.date()), Some(NOW.date()));

    // 2. A known patient without records still reports the missing part
    store.patient("p-6")?;
    let err = store.medical_history("p-6").expect_err("no history for p-6");
    assert!(matches!(err, DentalFlowError::NotFound { kind: "medical history", .. }));
    let err = store.patient_stats("p-6").expect_err("no stats for p-6");
    assert!(matches!(err, DentalFlowError::NotFound { kind: "patient stats", .. }));

    Ok(())
}

#[test]
fn test_patient_appointment_tabs() {
    let store = seeded_store();

    let upcoming =
        views::patient_appointments(&store, fixtures::PATIENT_ID, AppointmentTab::Upcoming, NOW);
    assert_eq!(ids(upcoming.iter(), |a| &a.id), vec!["apt-8"]);

    // Today's 11:00 appointment is already in the past at noon
    let past = views::patient_appointments(&store, fixtures::PATIENT_ID, AppointmentTab::Past, NOW);
    assert_eq!(ids(past.iter(), |a| &a.id), vec!["apt-1", "apt-6", "apt-9"]);

    let earlier = NOW - Duration::hours(2);
    let upcoming = views::patient_appointments(
        &store,
        fixtures::PATIENT_ID,
        AppointmentTab::Upcoming,
        earlier,
    );
    assert_eq!(ids(upcoming.iter(), |a| &a.id), vec!["apt-1", "apt-8"]);
}

#[test]
fn test_dentist_dashboard() {
    let store = seeded_store();
    let dashboard = views::dentist_dashboard(&store, fixtures::DENTIST_ID, NOW.date());

    assert_eq!(
        ids(dashboard.today.iter().copied(), |a| &a.id),
        vec!["apt-1", "apt-3", "apt-5"]
    );
    assert_eq!(dashboard.summary.total_patients, 6);
    assert_eq!(dashboard.summary.today_appointments, 3);
    assert_eq!(dashboard.summary.pending_treatments, 3);
    assert_eq!(dashboard.summary.outstanding_payments, 230);

    // Another dentist sees the same agenda but no patients of their own
    let other = views::dentist_dashboard(&store, "99", NOW.date());
    assert_eq!(
        ids(other.today.iter().copied(), |a| &a.id),
        vec!["apt-1", "apt-3", "apt-5"]
    );
    assert_eq!(other.summary.total_patients, 0);
    assert_eq!(other.summary.outstanding_payments, 0);
}

#[test]
fn test_dentist_today_lists_whole_clinic() {
    let today = NOW.date();
    let mut appointments = fixtures::appointments(today);
    let mut colleague = appointments[0].clone();
    colleague.id = "apt-other".to_string();
    colleague.dentist_id = "7".to_string();
    colleague.status = AppointmentStatus::Confirmed;
    appointments.push(colleague);

    let list = views::dentist_today(&appointments, today);
    assert_eq!(
        ids(list, |a| &a.id),
        vec!["apt-1", "apt-other", "apt-3", "apt-5"]
    );
}

#[test]
fn test_patient_dashboard() {
    let store = seeded_store();
    let dashboard = views::patient_dashboard(&store, fixtures::PATIENT_ID, NOW);

    assert_eq!(dashboard.next_appointment.map(|a| a.id.as_str()), Some("apt-8"));
    assert_eq!(
        ids(dashboard.active_treatments.iter().copied(), |t| &t.id),
        vec!["tr-1"]
    );
}

#[test]
fn test_snapshot_projection_follows_new_versions() {
    let mut store = seeded_store();
    let projector = calendar::day_projector(NOW.date());
    let spec = FilterSpec::category(AppointmentStatus::Scheduled.key());

    // 1. Same snapshot and spec give the same rows
    let first = ids(projector.project_snapshot(store.appointments(), &spec).iter(), |a| &a.id);
    let again = ids(projector.project_snapshot(store.appointments(), &spec).iter(), |a| &a.id);
    assert_eq!(first, vec!["apt-3", "apt-5"]);
    assert_eq!(first, again);

    // 2. A new spec is not served from the cache
    let all = projector.project_snapshot(store.appointments(), &FilterSpec::default());
    assert_eq!(all.len(), 5);

    // 3. Republishing the collection bumps the version
    let old_version = store.appointments().version();
    let mut appointments = store.appointments().records().to_vec();
    appointments.retain(|a| a.id != "apt-3");
    store.replace_appointments(appointments);
    assert_ne!(store.appointments().version(), old_version);

    let after = projector.project_snapshot(store.appointments(), &spec);
    assert_eq!(ids(after.iter(), |a| &a.id), vec!["apt-5"]);
    assert_eq!(after.counts.all(), 4);
}
