//! This bench simulates the availability check against a room with a
//! long history of committed bookings.

#![allow(missing_docs)]

use chrono::{DateTime, TimeDelta, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use odin::{Booking, Interval, Slot, schedule};
use uuid::Uuid;

/// Generates a year of hour-long bookings, one per day, for one room.
fn preseed_bookings(room: Uuid) -> Vec<Booking> {
    let opening: DateTime<Utc> = "2025-01-01T09:00:00Z".parse().unwrap();
    (0..365)
        .map(|day| {
            let start = opening + TimeDelta::days(day);
            Booking::new(
                Slot::Room { room },
                Uuid::new_v4(),
                Interval::new(start, start + TimeDelta::hours(1)).unwrap(),
                format!("reserva {day}"),
            )
        })
        .collect()
}

fn conflict_scan(c: &mut Criterion) {
    let room = Uuid::new_v4();
    let bookings = preseed_bookings(room);

    // Worst case: the candidate collides with nothing, so the scan
    // visits every booking.
    let free_slot = Interval::new(
        "2026-06-01T09:00:00Z".parse().unwrap(),
        "2026-06-01T10:00:00Z".parse().unwrap(),
    )
    .unwrap();

    c.bench_function("conflict scan, free slot", |b| {
        b.iter(|| schedule::check_availability(free_slot, &bookings, None));
    });

    let taken_slot = bookings[180].interval();
    c.bench_function("conflict scan, taken slot", |b| {
        b.iter(|| schedule::check_availability(taken_slot, &bookings, None));
    });
}

criterion_group!(benches, conflict_scan);
criterion_main!(benches);
