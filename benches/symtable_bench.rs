use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use symtable::{SymTable, SymTableList};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(n: usize, seed: u64) -> (SymTable<u64>, Vec<String>) {
    let mut t = SymTable::new();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.put(k, i as u64).unwrap();
    }
    (t, keys)
}

// Crosses every capacity step up to 32749.
fn bench_put_fresh_20k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(1).take(20_000).map(key).collect();
    c.bench_function("symtable::put_fresh_20k", |b| {
        b.iter_batched(
            SymTable::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.put(k, i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("symtable::get_hit_on_20k", |b| {
        let (t, keys) = filled(20_000, 7);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("symtable::get_miss_on_20k", |b| {
        let (t, _) = filled(20_000, 11);
        let misses: Vec<String> = lcg(0xdead_beef).take(4096).map(key).collect();
        let mut it = misses.iter().cycle();
        b.iter(|| black_box(t.get(it.next().unwrap())))
    });
}

// Past the last capacity step chains only get longer.
fn bench_get_saturated(c: &mut Criterion) {
    c.bench_function("symtable::get_hit_on_200k", |b| {
        let (t, keys) = filled(200_000, 13);
        let mut it = keys.iter().cycle();
        b.iter(|| black_box(t.get(it.next().unwrap())))
    });
}

fn bench_remove_all_10k(c: &mut Criterion) {
    c.bench_function("symtable::remove_all_10k", |b| {
        b.iter_batched(
            || filled(10_000, 5),
            |(mut t, keys)| {
                for k in &keys {
                    let _ = t.remove(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_for_each_20k(c: &mut Criterion) {
    c.bench_function("symtable::for_each_20k", |b| {
        let (t, _) = filled(20_000, 17);
        b.iter(|| {
            let mut sum = 0u64;
            t.for_each(|_, v| sum = sum.wrapping_add(*v));
            black_box(sum)
        })
    });
}

fn bench_list_vs_table_64(c: &mut Criterion) {
    let keys: Vec<String> = lcg(3).take(64).map(key).collect();
    c.bench_function("list::put_get_64", |b| {
        b.iter(|| {
            let mut t = SymTableList::new();
            for (i, k) in keys.iter().enumerate() {
                t.put(k, i).unwrap();
            }
            for k in &keys {
                black_box(t.get(k));
            }
            t
        })
    });
    c.bench_function("symtable::put_get_64", |b| {
        b.iter(|| {
            let mut t = SymTable::new();
            for (i, k) in keys.iter().enumerate() {
                t.put(k, i).unwrap();
            }
            for k in &keys {
                black_box(t.get(k));
            }
            t
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put_fresh_20k, bench_get_hit, bench_get_miss, bench_get_saturated,
        bench_remove_all_10k, bench_for_each_20k, bench_list_vs_table_64
}
criterion_main!(benches);
