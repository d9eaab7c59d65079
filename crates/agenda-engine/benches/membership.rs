use std::hint::black_box;

use agenda_engine::{Agenda, RecurringEvent, RepetitionUnit};
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};

fn start() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 11, 1)
        .unwrap()
        .and_hms_opt(22, 30, 0)
        .unwrap()
}

fn bench_is_in_day(c: &mut Criterion) {
    let bounded = RecurringEvent::new("Bounded", start(), Duration::minutes(120))
        .unwrap()
        .with_repetition(RepetitionUnit::Days)
        .with_occurrences(u32::MAX - 1);
    let monthly = RecurringEvent::new("Monthly", start(), Duration::minutes(120))
        .unwrap()
        .with_repetition(RepetitionUnit::Months);

    let near = NaiveDate::from_ymd_opt(2020, 11, 2).unwrap();
    let far = NaiveDate::from_ymd_opt(9999, 11, 1).unwrap();

    c.bench_function("daily_near", |b| b.iter(|| bounded.is_in_day(black_box(near))));
    c.bench_function("daily_far", |b| b.iter(|| bounded.is_in_day(black_box(far))));
    c.bench_function("monthly_far", |b| b.iter(|| monthly.is_in_day(black_box(far))));
}

fn bench_events_in_day(c: &mut Criterion) {
    let units = [
        RepetitionUnit::Days,
        RepetitionUnit::Weeks,
        RepetitionUnit::Months,
    ];
    let agenda: Agenda = (0..1_000i64)
        .map(|i| {
            let event = RecurringEvent::new(
                format!("Event {i}"),
                start() + Duration::hours(i),
                Duration::minutes(45),
            )
            .unwrap();
            match i % 4 {
                3 => event,
                n => event.with_repetition(units[n as usize]),
            }
        })
        .collect();
    let day = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();

    c.bench_function("events_in_day_1000", |b| {
        b.iter(|| agenda.events_in_day(black_box(day)).len())
    });
}

criterion_group!(benches, bench_is_in_day, bench_events_in_day);
criterion_main!(benches);
