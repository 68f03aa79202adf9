use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use interval_mapping::*;
use proptest::{prelude::*, strategy::ValueTree, test_runner::TestRunner};
use std::any::type_name;
use test_strategy::Arbitrary;

type Key = i64;
type Value = i64;

const COUNT: usize = 100000;
const OPERATIONS: usize = 100000;
const LOOKUPS: usize = 1000000;

#[derive(Debug, Clone, Arbitrary)]
enum Operation<K> {
    Intersection(K, K),
    Union(K, K),
    Difference(K, K),
}

// Strictly ascending, as a chain wants them.
fn chain_limits(size: usize) -> impl Strategy<Value = Vec<Key>> {
    prop::collection::btree_set(any::<Key>(), size).prop_map(|limits| limits.into_iter().collect())
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut runner = TestRunner::deterministic();

    let mut group = c.benchmark_group(format!("IntervalChain<{}>", type_name::<Key>()));

    group.throughput(Throughput::Elements(COUNT as u64));
    group.bench_function("build", |b| {
        let limits = chain_limits(COUNT).new_tree(&mut runner).unwrap().current();
        let options = ChainOptions::new().with_lower_infinite(true);
        b.iter_with_large_drop(|| IntervalChain::with_options(limits.clone(), options).unwrap())
    });

    group.throughput(Throughput::Elements(LOOKUPS as u64));
    group.bench_function("lookups", |b| {
        let limits = chain_limits(COUNT).new_tree(&mut runner).unwrap().current();
        let chain = IntervalChain::new(limits).unwrap();
        let lookups = prop::collection::vec(any::<Key>(), LOOKUPS)
            .new_tree(&mut runner)
            .unwrap()
            .current();
        b.iter(|| {
            for lookup in lookups.iter() {
                black_box(chain.position(lookup));
            }
        })
    });

    group.finish();

    let mut group = c.benchmark_group(format!(
        "IntervalMapping<{}, {}>",
        type_name::<Key>(),
        type_name::<Value>()
    ));

    group.throughput(Throughput::Elements(LOOKUPS as u64));
    group.bench_function("lookups", |b| {
        let limits = chain_limits(COUNT).new_tree(&mut runner).unwrap().current();
        let values = prop::collection::vec(any::<Value>(), COUNT)
            .new_tree(&mut runner)
            .unwrap()
            .current();
        let mapping = IntervalMapping::from_limits(limits, values).unwrap();
        let lookups = prop::collection::vec(any::<Key>(), LOOKUPS)
            .new_tree(&mut runner)
            .unwrap()
            .current();
        b.iter(|| {
            for lookup in lookups.iter() {
                black_box(mapping.get_containing(lookup));
            }
        })
    });

    group.finish();

    let mut group = c.benchmark_group(format!("Interval<{}>", type_name::<Key>()));

    group.throughput(Throughput::Elements(OPERATIONS as u64));
    group.bench_function("operations", |b| {
        let base = Interval::closed(-1 << 32, 1 << 32).unwrap();
        let operations = prop::collection::vec(any::<Operation<Key>>(), OPERATIONS)
            .new_tree(&mut runner)
            .unwrap()
            .current();
        b.iter(|| {
            for operation in operations.iter() {
                let result = match *operation {
                    Operation::Intersection(x, y) => {
                        base.intersection(&Interval::closed(x.min(y), x.max(y)).unwrap())
                    }
                    Operation::Union(x, y) => {
                        base.union(&Interval::closed(x.min(y), x.max(y)).unwrap())
                    }
                    Operation::Difference(x, y) => {
                        base.difference(&Interval::closed(x.min(y), x.max(y)).unwrap())
                    }
                };
                let _ = black_box(result);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
