#[macro_use]
extern crate criterion;

use criterion::Criterion;
use interval_mapping::{ChainOptions, Interval, IntervalChain, IntervalMapping};
use rand::prelude::*;

fn kitchen_sink(mapping: &IntervalMapping<i32, bool>, probes: &[(i32, i32)]) {
    let span = mapping.chain().total_interval();
    for &(start, len) in probes {
        let probe = Interval::closed(start, start + len).unwrap();
        // Walk the probe through the chain, folding touching pieces back
        // together as we go.
        let mut covered: Option<Interval<i32>> = None;
        for key in mapping.keys() {
            if let Ok(piece) = probe.intersection(key) {
                covered = match covered {
                    Some(acc) => acc.union(&piece).ok(),
                    None => Some(piece),
                };
            }
        }
        let _ = mapping.get_containing(&start);
        let _ = span.difference(&probe);
        criterion::black_box(covered);
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("kitchen sink", |b| {
        let mut rng = thread_rng();
        let mut limits: Vec<i32> = (0..1000).map(|_| rng.gen_range(0..100_000)).collect();
        limits.sort_unstable();
        limits.dedup();
        let values: Vec<bool> = limits.iter().map(|_| random()).collect();
        let options = ChainOptions::new().with_lower_infinite(true);
        let chain = IntervalChain::with_options(limits, options).unwrap();
        let values: Vec<bool> = values.into_iter().chain(Some(random())).collect();
        let mapping = IntervalMapping::new(chain, values).unwrap();
        let probes: Vec<(i32, i32)> = (0..100)
            .map(|_| (rng.gen_range(-1000..101_000), rng.gen_range(0..5000)))
            .collect();
        b.iter(|| kitchen_sink(&mapping, &probes))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
