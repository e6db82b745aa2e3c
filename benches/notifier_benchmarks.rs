use bus_notifier::core::{NewNotification, NotificationType};
use bus_notifier::storage::MemoryBlobStore;
use bus_notifier::store::NotificationStore;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn populated_store(count: usize) -> NotificationStore {
    let mut store = NotificationStore::new(MemoryBlobStore::new());
    for i in 0..count {
        store.add_notification(NewNotification::new(
            format!("Ticket {i}"),
            "Dhaka to Khulna",
            NotificationType::TicketCreated,
        ));
    }
    store
}

fn bench_add_notification(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_notification");
    for size in [10, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || populated_store(size),
                |mut store| {
                    store.add_notification(black_box(NewNotification::new(
                        "Booking confirmed",
                        "Seat B4",
                        NotificationType::BookingConfirmed,
                    )))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let store = populated_store(500);
    c.bench_function("get_unread_count_500", |b| {
        b.iter(|| black_box(store.get_unread_count()));
    });
    c.bench_function("get_notifications_500", |b| {
        b.iter(|| black_box(store.get_notifications()));
    });
}

fn bench_load(c: &mut Criterion) {
    let blob = MemoryBlobStore::new();
    {
        let mut store = NotificationStore::new(blob.clone());
        for i in 0..500 {
            store.add_notification(NewNotification::new(
                format!("Trip {i}"),
                "",
                NotificationType::General,
            ));
        }
    }

    c.bench_function("load_notifications_500", |b| {
        b.iter(|| {
            let mut store = NotificationStore::new(blob.clone());
            black_box(store.load_notifications().len())
        });
    });
}

criterion_group!(benches, bench_add_notification, bench_queries, bench_load);
criterion_main!(benches);
