use criterion::{criterion_group, criterion_main, Criterion};
use solarops_api::models::{CrmAppointment, CrmContact, UserRole};
use solarops_api::services::{resolve_visible_appointments, Viewer};
use std::hint::black_box;

/// A location's worth of events spread over 40 users and 8 teams,
/// with some duplicates and some unassigned records.
fn synthetic_location(count: usize) -> Vec<CrmAppointment> {
    (0..count)
        .map(|i| {
            let unassigned = i % 7 == 0;
            CrmAppointment {
                id: Some(format!("evt_{}", i % (count - count / 20))),
                title: Some(format!("Site survey {}", i)),
                assigned_user_id: (!unassigned).then(|| format!("U{}", i % 40)),
                team_id: Some(format!("T{}", i % 8)),
                start_time: Some(format!(
                    "2025-{:02}-{:02}T{:02}:00:00Z",
                    1 + i % 12,
                    1 + i % 28,
                    i % 24
                )),
                appointment_status: Some("confirmed".to_string()),
                contact: Some(CrmContact {
                    first_name: Some("Customer".to_string()),
                    last_name: Some(i.to_string()),
                    address1: Some(format!("{} Main St", i)),
                    city: Some("Fresno".to_string()),
                    state: Some("CA".to_string()),
                    assigned_to: Some(format!("U{}", (i + 3) % 40)),
                    ..Default::default()
                }),
                ..Default::default()
            }
        })
        .collect()
}

fn benchmark_resolve_visible(c: &mut Criterion) {
    let records = synthetic_location(5_000);

    let admin = Viewer::Admin;
    let surveyor = Viewer::new(UserRole::Surveyor, Some("U3"), Some("T3")).expect("viewer");
    let rep = Viewer::new(UserRole::SalesRep, Some("U3"), None).expect("viewer");

    let mut group = c.benchmark_group("resolve_visible_appointments");

    group.bench_function("admin_all_records", |b| {
        b.iter(|| resolve_visible_appointments(black_box(&records), black_box(&admin)))
    });

    group.bench_function("surveyor_own_and_team", |b| {
        b.iter(|| resolve_visible_appointments(black_box(&records), black_box(&surveyor)))
    });

    group.bench_function("sales_rep_own_only", |b| {
        b.iter(|| resolve_visible_appointments(black_box(&records), black_box(&rep)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve_visible);
criterion_main!(benches);
