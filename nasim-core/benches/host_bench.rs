//! Benchmark for host operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nasim_core::{Action, Address, Host, ObservationMask};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_host(n_services: usize, n_os: usize, rng: &mut StdRng) -> Host {
    let mut builder = Host::builder(Address::new(1, 0)).value(10.0);
    for i in 0..n_services {
        builder = builder.service(&format!("service_{}", i), rng.gen::<bool>());
    }
    for i in 0..n_os {
        builder = builder.os(&format!("os_{}", i), i == 0);
    }
    // At least one exploitable service
    builder.service("service_0", true).build().unwrap()
}

fn bench_perform_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("perform_action");
    let mut rng = StdRng::seed_from_u64(42);

    for n_services in [4, 32, 256] {
        let host = random_host(n_services, 4, &mut rng);
        let exploit = Action::exploit(host.address(), "service_0", Some("os_0"));
        let scan = Action::service_scan(host.address());

        group.bench_with_input(BenchmarkId::new("exploit", n_services), &host, |b, host| {
            b.iter_batched(
                || host.clone(),
                |mut host| host.perform_action(black_box(&exploit)).unwrap(),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("service_scan", n_services), &host, |b, host| {
            let mut host = host.clone();
            b.iter(|| host.perform_action(black_box(&scan)).unwrap())
        });
    }

    group.finish();
}

fn bench_observe(c: &mut Criterion) {
    let mut group = c.benchmark_group("observe");
    let mut rng = StdRng::seed_from_u64(42);

    for n_services in [4, 32, 256] {
        let host = random_host(n_services, 8, &mut rng);
        let mask = ObservationMask {
            compromised: true,
            reachable: true,
            services: true,
            ..ObservationMask::none()
        };

        group.bench_with_input(BenchmarkId::new("masked", n_services), &host, |b, host| {
            b.iter(|| host.observe(black_box(mask)))
        });

        group.bench_with_input(BenchmarkId::new("decode", n_services), &host, |b, host| {
            b.iter(|| host.get_readable(black_box(host.numpy())).unwrap())
        });
    }

    group.finish();
}

fn bench_status_change(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut host = random_host(32, 4, &mut rng);

    c.bench_function("status_change", |b| {
        let mut flag = false;
        b.iter(|| {
            flag = !flag;
            host.set_reachable(black_box(flag));
        })
    });
}

criterion_group!(benches, bench_perform_action, bench_observe, bench_status_change);
criterion_main!(benches);
