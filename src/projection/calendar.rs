use std::collections::HashMap;

use time::{Date, Duration};

use crate::models::{Appointment, AppointmentStatus};
use crate::projection::filter::FilterSpec;
use crate::projection::projector::{Projection, ViewProjector};

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    /// Appointments on this day, whatever their status
    pub appointment_count: usize,
}

/// Appointments of one calendar day, earliest first.
///
/// The chip counts are scoped to the same day.
pub fn day_projector<'f>(day: Date) -> ViewProjector<'f, Appointment> {
    ViewProjector::new()
        .with_scope("same-day", move |a: &Appointment| a.is_on(day))
        .with_sort("start-time", |a: &Appointment, b: &Appointment| {
            a.start_time().cmp(&b.start_time())
        })
}

pub fn calendar_day<'a>(
    appointments: &'a [Appointment],
    day: Date,
    spec: &FilterSpec,
) -> Projection<'a, Appointment, AppointmentStatus> {
    day_projector(day).project(appointments, spec)
}

/// Number of appointments on `day`, all statuses included.
pub fn appointment_count(appointments: &[Appointment], day: Date) -> usize {
    appointments.iter().filter(|a| a.is_on(day)).count()
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

fn last_of_month(date: Date) -> Date {
    let days = date.month().length(date.year());
    first_of_month(date) + Duration::days(i64::from(days) - 1)
}

/// Full weeks (Monday first) covering the month that contains `date`.
pub fn month_grid(appointments: &[Appointment], date: Date) -> Vec<CalendarDay> {
    let first = first_of_month(date);
    let last = last_of_month(date);
    let start = first - Duration::days(i64::from(first.weekday().number_days_from_monday()));
    let end = last + Duration::days(6 - i64::from(last.weekday().number_days_from_monday()));

    let mut per_day: HashMap<Date, usize> = HashMap::new();
    for appointment in appointments {
        let day = appointment.day();
        if day >= start && day <= end {
            *per_day.entry(day).or_default() += 1;
        }
    }

    let mut grid = Vec::with_capacity(42);
    let mut day = start;
    while day <= end {
        grid.push(CalendarDay {
            date: day,
            in_month: day.month() == date.month(),
            appointment_count: per_day.get(&day).copied().unwrap_or(0),
        });
        day += Duration::days(1);
    }
    grid
}

/// Same day of the previous or next month, clamped to the month's length.
pub fn shift_month(date: Date, months: i32) -> Date {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + months;
    let year = index.div_euclid(12);
    let month_number = (index.rem_euclid(12) + 1) as u8;
    let Ok(month) = time::Month::try_from(month_number) else {
        return date;
    };
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}
